//! The append-only ordered line store and its coalescing policy
//!
//! [`Console`] reassembles arbitrarily-chunked process output into logical
//! lines. Incoming text is split into physical-line fragments; each fragment
//! either extends the last line, when that line is still open and carries the
//! same category, or starts a new one. Coalescing only within "same category,
//! still open" reassembles a single stream's fragments without merging
//! unrelated interleaved streams: an error write arriving between two output
//! writes never joins the output line.

use crate::config::ConsoleConfig;
use crate::error::ConsoleError;
use crate::line::LineBuffer;
use crate::matcher::LocationPattern;
use crate::notify::{ChangeNotifier, SubscriptionId};
use crate::types::{Category, SourceLocation};
use serde_json::Value;
use std::path::PathBuf;

/// The ordered, append-only collection of console lines.
///
/// Only the last line is ever extended; an open line displaced by output of
/// another category keeps its text but never grows again. The store is
/// unbounded. Bounding the visible window is the presentation layer's
/// concern, served by [`Console::recent`].
///
/// All operations are synchronous and assume a single logical writer; a host
/// that feeds writes from another execution context must serialize access
/// around the whole console.
pub struct Console {
    lines: Vec<LineBuffer>,
    name: String,
    working_dir: Option<PathBuf>,
    pattern: LocationPattern,
    notifier: ChangeNotifier,
}

impl Console {
    /// A console with the built-in location pattern and no working directory.
    pub fn new() -> Self {
        Self {
            lines: Vec::new(),
            name: ConsoleConfig::default().name,
            working_dir: None,
            pattern: LocationPattern::default(),
            notifier: ChangeNotifier::new(),
        }
    }

    /// Build a console from configuration.
    ///
    /// Errors with [`ConsoleError::Pattern`] when the replacement location
    /// pattern does not compile.
    pub fn with_config(config: ConsoleConfig) -> Result<Self, ConsoleError> {
        let pattern = match &config.location_pattern {
            Some(pattern) => LocationPattern::new(pattern, Category::TerminalError)?,
            None => LocationPattern::default(),
        };

        log::debug!(
            "console '{}' configured (working_dir: {:?}, custom pattern: {})",
            config.name,
            config.working_dir,
            config.location_pattern.is_some()
        );

        Ok(Self {
            lines: Vec::new(),
            name: config.name,
            working_dir: config.working_dir,
            pattern,
            notifier: ChangeNotifier::new(),
        })
    }

    /// Display name for the presentation layer's tab label.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Ingest one chunk of output.
    ///
    /// The chunk is split into physical-line fragments, each routed into the
    /// open last line of the same category or into a new line. `location`
    /// describes the start of the chunk and therefore attaches to the first
    /// fragment only. Exactly one change notification fires per call, after
    /// all fragments are processed.
    pub fn append(&mut self, category: Category, text: &str, location: Option<SourceLocation>) {
        log::trace!("append {:?}: {} bytes", category, text.len());

        let mut location = location;
        for fragment in split_fragments(text) {
            self.route_fragment(category, fragment, location.take());
        }

        self.notifier.notify();
    }

    fn route_fragment(
        &mut self,
        category: Category,
        fragment: &str,
        location: Option<SourceLocation>,
    ) {
        if let Some(last) = self.lines.last_mut()
            && !last.is_finished()
            && last.category() == Some(category)
        {
            last.extend(fragment, location, &self.pattern);
            return;
        }

        let mut line = LineBuffer::new(Some(category), self.working_dir.clone());
        line.extend(fragment, location, &self.pattern);
        self.lines.push(line);
    }

    /// Write a debugger error message.
    pub fn error(&mut self, text: &str, location: Option<SourceLocation>) {
        self.append(Category::DebuggerError, text, location);
    }

    /// Write an informational debugger message.
    pub fn info(&mut self, text: &str, location: Option<SourceLocation>) {
        self.append(Category::DebuggerInfo, text, location);
    }

    /// Present a structured value as its own line.
    ///
    /// Embedded values never coalesce: a new, immediately-finished line is
    /// created regardless of the state of the previous one. Fires one change
    /// notification.
    pub fn append_embedded(&mut self, value: Value, location: Option<SourceLocation>) {
        let mut line = LineBuffer::new(None, None);
        line.set_embedded(value, location);
        self.lines.push(line);

        self.notifier.notify();
    }

    /// Drop every line. Fires one change notification.
    pub fn clear(&mut self) {
        log::debug!("clearing {} console lines", self.lines.len());
        self.lines.clear();
        self.notifier.notify();
    }

    /// All lines, in append order. Read-only.
    pub fn lines(&self) -> &[LineBuffer] {
        &self.lines
    }

    /// The most recent `n` lines, newest first, without copying.
    pub fn recent(&self, n: usize) -> impl Iterator<Item = &LineBuffer> {
        self.lines.iter().rev().take(n)
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Register a change listener, invoked once per mutating operation.
    ///
    /// The listener must not mutate this console from inside the callback.
    pub fn subscribe(&mut self, listener: impl FnMut() + 'static) -> SubscriptionId {
        self.notifier.subscribe(listener)
    }

    /// Remove a previously registered change listener.
    pub fn unsubscribe(&mut self, id: SubscriptionId) {
        self.notifier.unsubscribe(id);
    }
}

impl Default for Console {
    fn default() -> Self {
        Self::new()
    }
}

/// Split a chunk at line terminators (LF, CRLF or lone CR), keeping each
/// terminator with the fragment it ends. An unterminated tail becomes the
/// final fragment.
fn split_fragments(text: &str) -> Vec<&str> {
    let bytes = text.as_bytes();
    let mut fragments = Vec::new();
    let mut start = 0;
    let mut i = 0;

    while i < bytes.len() {
        match bytes[i] {
            b'\n' => {
                fragments.push(&text[start..=i]);
                start = i + 1;
                i += 1;
            }
            b'\r' => {
                let end = if bytes.get(i + 1) == Some(&b'\n') { i + 1 } else { i };
                fragments.push(&text[start..=end]);
                start = end + 1;
                i = end + 1;
            }
            _ => i += 1,
        }
    }

    if start < bytes.len() {
        fragments.push(&text[start..]);
    }

    fragments
}
