//! Console configuration
//!
//! One-time options supplied by the hosting debugger session when it creates
//! a console.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Configuration for a [`Console`](crate::Console).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConsoleConfig {
    /// Display name the presentation layer shows for this console.
    #[serde(default = "default_name")]
    pub name: String,

    /// Base directory used to absolutize relative file paths extracted from
    /// diagnostic lines.
    #[serde(default)]
    pub working_dir: Option<PathBuf>,

    /// Replacement diagnostic-location pattern, e.g. tuned to a specific
    /// build tool's output. The built-in
    /// `<path>:<line>:<column>: error: <message>` pattern applies when unset.
    #[serde(default)]
    pub location_pattern: Option<String>,
}

fn default_name() -> String {
    "Debugger Console".to_string()
}

impl Default for ConsoleConfig {
    fn default() -> Self {
        Self {
            name: default_name(),
            working_dir: None,
            location_pattern: None,
        }
    }
}
