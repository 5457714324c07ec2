// src/config/model.rs

use serde::Deserialize;

/// Top-level configuration as read from `Livebuild.toml`.
///
/// ```toml
/// [watch]
/// dir = "src"
/// extensions = ["rs"]
/// poll_ms = 1000
///
/// [[step]]
/// name = "build"
/// program = "cargo"
/// args = ["build"]
/// ```
///
/// All sections are optional and have reasonable defaults.
#[derive(Debug, Clone, Deserialize, Default)]
pub struct ConfigFile {
    /// Watch behaviour from `[watch]`.
    #[serde(default)]
    pub watch: WatchSection,

    /// Ordered build steps from `[[step]]`, run on every trigger.
    ///
    /// When empty, the live command only announces the trigger.
    #[serde(default)]
    pub step: Vec<StepConfig>,
}

/// `[watch]` section.
#[derive(Debug, Clone, Deserialize)]
pub struct WatchSection {
    /// Root directory to scan and watch.
    #[serde(default = "default_dir")]
    pub dir: String,

    /// File extensions to track, without the leading dot.
    #[serde(default = "default_extensions")]
    pub extensions: Vec<String>,

    /// Poll interval in milliseconds.
    #[serde(default = "default_poll_ms")]
    pub poll_ms: u64,
}

fn default_dir() -> String {
    ".".to_string()
}

fn default_extensions() -> Vec<String> {
    vec!["rs".to_string()]
}

fn default_poll_ms() -> u64 {
    1000
}

impl Default for WatchSection {
    fn default() -> Self {
        Self {
            dir: default_dir(),
            extensions: default_extensions(),
            poll_ms: default_poll_ms(),
        }
    }
}

/// A single `[[step]]` entry.
#[derive(Debug, Clone, Deserialize)]
pub struct StepConfig {
    /// Step name, carried by failure reports.
    pub name: String,

    /// Program to execute.
    pub program: String,

    /// Arguments passed to the program.
    #[serde(default)]
    pub args: Vec<String>,

    /// Optional string written to the program's stdin after start.
    #[serde(default)]
    pub stdin: Option<String>,
}
