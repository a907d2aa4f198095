//! Debugger Output Console
//!
//! The output-console engine behind an interactive debugger UI. It ingests
//! raw, arbitrarily-chunked text from a debuggee/adapter process and
//! reconstructs it into a stable, ordered sequence of logical lines, each
//! optionally annotated with a source location extracted from diagnostic
//! text. The reconstructed line sequence is the single source of truth for
//! any presentation layer.
//!
//! Not a terminal emulator: no cursor movement and no ANSI interpretation,
//! only literal-tab normalization. Process spawning, stream reading and
//! rendering are the host's concern.
//!
//! # Example
//!
//! ```
//! use debugger_console::{Category, Console};
//!
//! let mut console = Console::new();
//!
//! // Chunk boundaries rarely align with line boundaries.
//! console.append(Category::Stdout, "buil", None);
//! console.append(Category::Stdout, "ding target\n", None);
//!
//! let lines = console.lines();
//! assert_eq!(lines.len(), 1);
//! assert_eq!(lines[0].text(), "building target");
//! assert!(lines[0].is_finished());
//! ```

mod config;
mod console;
mod error;
mod line;
mod matcher;
mod notify;
mod types;

pub use config::ConsoleConfig;
pub use console::Console;
pub use error::ConsoleError;
pub use line::LineBuffer;
pub use matcher::{DEFAULT_LOCATION_PATTERN, LocationPattern};
pub use notify::{ChangeNotifier, SubscriptionId};
pub use types::{Category, SourceLocation};
