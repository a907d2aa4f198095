//! Error types for the console engine

use thiserror::Error;

/// Errors surfaced by the console engine.
///
/// Every variant is a contract violation or a configuration mistake; this
/// crate performs no I/O, so there is nothing to retry.
#[derive(Error, Debug)]
pub enum ConsoleError {
    /// `add` or `add_embedded_value` was called on a line that is already
    /// complete. Finished lines are immutable.
    #[error("line is already complete")]
    LineFinished,

    /// A user-supplied diagnostic-location pattern failed to compile.
    #[error("invalid location pattern: {0}")]
    Pattern(#[from] regex::Error),
}
