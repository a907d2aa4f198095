//! A single logical console line
//!
//! A [`LineBuffer`] accumulates fragments of one logical line while open and
//! becomes immutable once finished. Finishing happens when a fragment carries
//! a line terminator, or immediately when an embedded value is stored.

use crate::error::ConsoleError;
use crate::matcher::LocationPattern;
use crate::types::{Category, SourceLocation};
use serde_json::Value;
use std::path::PathBuf;

/// One logical line, either under construction or finished.
///
/// A line holds either accumulated text or an embedded structured value,
/// never both. Lines are created and destroyed only by their owning
/// [`Console`](crate::Console).
#[derive(Debug, Clone)]
pub struct LineBuffer {
    category: Option<Category>,
    text: String,
    location: Option<SourceLocation>,
    embedded: Option<Value>,
    working_dir: Option<PathBuf>,
    finished: bool,
}

impl LineBuffer {
    pub(crate) fn new(category: Option<Category>, working_dir: Option<PathBuf>) -> Self {
        Self {
            category,
            text: String::new(),
            location: None,
            embedded: None,
            working_dir,
            finished: false,
        }
    }

    /// The line's origin/severity tag. `None` only for embedded-value lines.
    pub fn category(&self) -> Option<Category> {
        self.category
    }

    /// The accumulated, normalized text. Empty for embedded-value lines.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// The resolved source location, if any.
    pub fn location(&self) -> Option<&SourceLocation> {
        self.location.as_ref()
    }

    /// The embedded structured payload, if this is an embedded-value line.
    pub fn embedded_value(&self) -> Option<&Value> {
        self.embedded.as_ref()
    }

    /// Whether the line is complete. Finished lines are immutable.
    pub fn is_finished(&self) -> bool {
        self.finished
    }

    /// Append one fragment to an open line.
    ///
    /// `location` is recorded only if the line has none yet (first write
    /// wins). A single trailing CR, LF or CRLF is stripped before storage;
    /// literal tabs are stored as four spaces. A fragment carrying a
    /// terminator finishes the line, which runs the location pattern against
    /// the assembled text.
    ///
    /// Errors with [`ConsoleError::LineFinished`] when the line is already
    /// complete.
    pub fn add(
        &mut self,
        chunk: &str,
        location: Option<SourceLocation>,
        pattern: &LocationPattern,
    ) -> Result<(), ConsoleError> {
        if self.finished {
            return Err(ConsoleError::LineFinished);
        }
        self.extend(chunk, location, pattern);
        Ok(())
    }

    /// Infallible fragment append for the owning console, which only routes
    /// fragments to lines it has checked are open.
    pub(crate) fn extend(
        &mut self,
        chunk: &str,
        location: Option<SourceLocation>,
        pattern: &LocationPattern,
    ) {
        if self.location.is_none() {
            self.location = location;
        }

        let (body, terminated) = strip_terminator(chunk);
        if body.contains('\t') {
            self.text.push_str(&body.replace('\t', "    "));
        } else {
            self.text.push_str(body);
        }

        if terminated {
            self.finalize(pattern);
        }
    }

    /// Finish the line and resolve its source location.
    ///
    /// The pattern runs exactly once, here, against the fully assembled
    /// normalized text; running it per fragment would match partially-written
    /// lines. On a match the pattern's category and the derived location
    /// replace whatever the line carried; a relative matched path is joined
    /// onto the working directory.
    pub(crate) fn finalize(&mut self, pattern: &LocationPattern) {
        self.finished = true;

        if let Some(mut location) = pattern.resolve(&self.text) {
            if location.file.is_relative()
                && let Some(dir) = &self.working_dir
            {
                location.file = dir.join(&location.file);
            }
            self.category = Some(pattern.category());
            self.location = Some(location);
        }
    }

    /// Store an embedded structured value, finishing the line synchronously.
    ///
    /// Legal only on a freshly created line; embedded values and accumulated
    /// text are mutually exclusive. Errors with
    /// [`ConsoleError::LineFinished`] when the line is already complete.
    pub fn add_embedded_value(
        &mut self,
        value: Value,
        location: Option<SourceLocation>,
    ) -> Result<(), ConsoleError> {
        if self.finished {
            return Err(ConsoleError::LineFinished);
        }
        self.set_embedded(value, location);
        Ok(())
    }

    pub(crate) fn set_embedded(&mut self, value: Value, location: Option<SourceLocation>) {
        self.finished = true;
        self.embedded = Some(value);
        self.location = location;
    }
}

/// Strip one trailing line terminator, reporting whether one was present.
fn strip_terminator(chunk: &str) -> (&str, bool) {
    if let Some(body) = chunk.strip_suffix("\r\n") {
        (body, true)
    } else if let Some(body) = chunk.strip_suffix('\n') {
        (body, true)
    } else if let Some(body) = chunk.strip_suffix('\r') {
        (body, true)
    } else {
        (chunk, false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn pattern() -> LocationPattern {
        LocationPattern::default()
    }

    fn open_line(category: Category) -> LineBuffer {
        LineBuffer::new(Some(category), None)
    }

    #[test]
    fn test_accumulates_until_terminator() {
        let mut line = open_line(Category::Stdout);
        line.add("abc", None, &pattern()).unwrap();
        assert!(!line.is_finished());

        line.add("def\n", None, &pattern()).unwrap();
        assert!(line.is_finished());
        assert_eq!(line.text(), "abcdef");
    }

    #[test]
    fn test_terminator_variants_are_stripped() {
        for chunk in ["x\n", "x\r\n", "x\r"] {
            let mut line = open_line(Category::Stdout);
            line.add(chunk, None, &pattern()).unwrap();
            assert!(line.is_finished());
            assert_eq!(line.text(), "x");
        }
    }

    #[test]
    fn test_tabs_become_four_spaces() {
        let mut line = open_line(Category::Stdout);
        line.add("a\tb\t\n", None, &pattern()).unwrap();
        assert_eq!(line.text(), "a    b    ");
    }

    #[test]
    fn test_add_after_finish_is_illegal_and_leaves_line_untouched() {
        let mut line = open_line(Category::Stdout);
        line.add("done\n", None, &pattern()).unwrap();

        let err = line.add("more", None, &pattern()).unwrap_err();
        assert!(matches!(err, ConsoleError::LineFinished));
        assert_eq!(line.text(), "done");
    }

    #[test]
    fn test_first_supplied_location_wins() {
        let first = SourceLocation::new("a.c", 1, 1);
        let second = SourceLocation::new("b.c", 2, 2);

        let mut line = open_line(Category::Stdout);
        line.add("x", Some(first.clone()), &pattern()).unwrap();
        line.add("y\n", Some(second), &pattern()).unwrap();

        assert_eq!(line.location(), Some(&first));
    }

    #[test]
    fn test_finalize_match_overrides_category_and_location() {
        let caller_loc = SourceLocation::new("elsewhere.c", 99, 99);

        let mut line = LineBuffer::new(Some(Category::Stdout), Some(PathBuf::from("/proj")));
        line.add("src/main.c:10:4: error: boom\n", Some(caller_loc), &pattern())
            .unwrap();

        assert_eq!(line.category(), Some(Category::TerminalError));
        assert_eq!(
            line.location(),
            Some(&SourceLocation::new("/proj/src/main.c", 10, 4))
        );
    }

    #[test]
    fn test_finalize_keeps_absolute_matched_paths() {
        let mut line = LineBuffer::new(Some(Category::Stdout), Some(PathBuf::from("/proj")));
        line.add("/abs/main.c:3:1: error: nope\n", None, &pattern())
            .unwrap();

        assert_eq!(
            line.location(),
            Some(&SourceLocation::new("/abs/main.c", 3, 1))
        );
    }

    #[test]
    fn test_finalize_without_match_leaves_caller_state() {
        let caller_loc = SourceLocation::new("here.c", 5, 2);

        let mut line = open_line(Category::Stderr);
        line.add("plain output\n", Some(caller_loc.clone()), &pattern())
            .unwrap();

        assert_eq!(line.category(), Some(Category::Stderr));
        assert_eq!(line.location(), Some(&caller_loc));
    }

    #[test]
    fn test_embedded_value_finishes_immediately() {
        let mut line = LineBuffer::new(None, None);
        line.add_embedded_value(json!({"name": "x", "value": 42}), None)
            .unwrap();

        assert!(line.is_finished());
        assert!(line.text().is_empty());
        assert_eq!(line.embedded_value(), Some(&json!({"name": "x", "value": 42})));
    }

    #[test]
    fn test_embedded_value_rejected_on_finished_line() {
        let mut line = open_line(Category::Stdout);
        line.add("text\n", None, &pattern()).unwrap();

        let err = line.add_embedded_value(json!(1), None).unwrap_err();
        assert!(matches!(err, ConsoleError::LineFinished));
        assert!(line.embedded_value().is_none());
    }
}
