//! Type definitions shared across the console engine

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Classifies the origin/severity of a console line.
///
/// The category decides which open line a new fragment may coalesce into and
/// which display style the presentation layer picks. Style lookup itself lives
/// with the presentation layer, not here.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Category {
    /// Output written through the adapter's generic console channel.
    Console,
    /// The debuggee's stdout stream.
    Stdout,
    /// The debuggee's stderr stream.
    Stderr,
    /// An error message produced by the debugger itself.
    DebuggerError,
    /// An informational message produced by the debugger itself.
    DebuggerInfo,
    /// Miscellaneous debugger output.
    DebuggerOutput,
    /// Output of an integrated terminal task.
    TerminalOutput,
    /// A line recognized as a compiler/tool diagnostic with a source location.
    TerminalError,
}

/// A resolved source position attached to a line for navigation.
///
/// `line` and `column` are 1-based; a location that only identifies a file
/// carries 1 for both.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceLocation {
    pub file: PathBuf,
    pub line: u32,
    pub column: u32,
}

impl SourceLocation {
    pub fn new(file: impl Into<PathBuf>, line: u32, column: u32) -> Self {
        Self {
            file: file.into(),
            line,
            column,
        }
    }

    /// A location pointing at the start of a file.
    pub fn file_only(file: impl Into<PathBuf>) -> Self {
        Self::new(file, 1, 1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_only_defaults_line_and_column() {
        let loc = SourceLocation::file_only("src/main.c");
        assert_eq!(loc.file, PathBuf::from("src/main.c"));
        assert_eq!(loc.line, 1);
        assert_eq!(loc.column, 1);
    }

    #[test]
    fn test_category_serde_tag() {
        let json = serde_json::to_string(&Category::DebuggerError).unwrap();
        assert_eq!(json, "\"debugger-error\"");
        let back: Category = serde_json::from_str(&json).unwrap();
        assert_eq!(back, Category::DebuggerError);
    }
}
