//! Diagnostic-location pattern matching
//!
//! Resolves embedded source locations from finished lines of free-form
//! diagnostic text, e.g. `src/main.c:10:4: error: boom`.

use crate::error::ConsoleError;
use crate::types::{Category, SourceLocation};
use regex::{Captures, Regex};
use std::sync::OnceLock;

/// The built-in `<path>:<line>:<column>: error: <message>` pattern.
pub const DEFAULT_LOCATION_PATTERN: &str = r"^(.*):([0-9]+):([0-9]+): error: (.*)$";

/// A compiled diagnostic-location pattern plus the category a successful
/// match classifies the line under.
///
/// Patterns may capture `file`, `line` and `column` either as named groups or
/// positionally as groups 1, 2 and 3. The file capture is required for a match
/// to produce a location; missing or unparsable line/column captures default
/// to 1.
#[derive(Debug, Clone)]
pub struct LocationPattern {
    regex: Regex,
    category: Category,
}

impl LocationPattern {
    /// Compile a replacement pattern, classifying matches under `category`.
    pub fn new(pattern: &str, category: Category) -> Result<Self, ConsoleError> {
        Ok(Self {
            regex: Regex::new(pattern)?,
            category,
        })
    }

    /// The category assigned to lines this pattern matches.
    pub fn category(&self) -> Category {
        self.category
    }

    /// Resolve a fully assembled line of text against the pattern.
    ///
    /// Stateless: depends only on the pattern and the text. Returns `None`
    /// when the pattern does not match or the file capture is absent.
    pub fn resolve(&self, text: &str) -> Option<SourceLocation> {
        let caps = self.regex.captures(text)?;

        let file = group(&caps, "file", 1)?;
        let line = group(&caps, "line", 2)
            .and_then(|s| s.parse().ok())
            .unwrap_or(1);
        let column = group(&caps, "column", 3)
            .and_then(|s| s.parse().ok())
            .unwrap_or(1);

        Some(SourceLocation::new(file, line, column))
    }
}

impl Default for LocationPattern {
    fn default() -> Self {
        static DEFAULT_REGEX: OnceLock<Regex> = OnceLock::new();

        let regex = DEFAULT_REGEX
            .get_or_init(|| Regex::new(DEFAULT_LOCATION_PATTERN).unwrap())
            .clone();

        Self {
            regex,
            category: Category::TerminalError,
        }
    }
}

/// Look up a capture by name first, then by positional index.
fn group<'t>(caps: &Captures<'t>, name: &str, index: usize) -> Option<&'t str> {
    caps.name(name)
        .or_else(|| caps.get(index))
        .map(|m| m.as_str())
}
