//! Logging configuration for the `linkfolio` binary and its tests
//!
//! The server logs one line per request (from the HTTP trace layer) plus the
//! loader's collapsed store failures; `show` and `export` print their results
//! on stdout, so console logs always go to stderr.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Level used when neither `RUST_LOG` nor `--log-level` is given
pub const DEFAULT_LEVEL: &str = "info";

/// Logging configuration
///
/// Missing fields take their defaults when deserialized, so a config file
/// only needs the parts it changes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LogConfig {
    /// Filter directive, e.g. `info` or `linkfolio_core=debug,info`
    pub default_level: String,
    pub console: ConsoleConfig,
    /// Rolling JSON file next to the console output
    pub file: Option<FileConfig>,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            default_level: DEFAULT_LEVEL.to_string(),
            console: ConsoleConfig::default(),
            file: None,
        }
    }
}

impl LogConfig {
    /// Console-only config for the CLI's `--log-format` flag
    pub fn cli(pretty: bool, level: impl Into<String>) -> Self {
        Self {
            default_level: level.into(),
            console: ConsoleConfig {
                enabled: true,
                pretty,
                ansi: pretty,
            },
            file: None,
        }
    }

    /// Colored human-readable output with loader and store reads visible
    pub fn development() -> Self {
        Self {
            default_level: "debug".to_string(),
            ..Self::cli(true, DEFAULT_LEVEL)
        }
    }

    /// JSON lines on stderr plus daily files under `log_dir`, for a
    /// long-running `linkfolio serve`
    pub fn production(log_dir: PathBuf) -> Self {
        Self {
            file: Some(FileConfig {
                directory: log_dir,
                ..FileConfig::default()
            }),
            ..Self::default()
        }
    }

    /// Warnings only, uncolored, for test output
    pub fn testing() -> Self {
        Self {
            default_level: "warn".to_string(),
            console: ConsoleConfig {
                enabled: true,
                pretty: true,
                ansi: false,
            },
            file: None,
        }
    }
}

/// Console (stderr) output
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConsoleConfig {
    pub enabled: bool,
    /// Human-readable lines instead of JSON
    pub pretty: bool,
    pub ansi: bool,
}

impl Default for ConsoleConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            pretty: false,
            ansi: false,
        }
    }
}

/// Rolling file output, always JSON lines
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    pub directory: PathBuf,
    /// File name prefix; `Never` rotation writes `<prefix>.log`
    pub prefix: String,
    pub rotation: RotationStrategy,
}

impl Default for FileConfig {
    fn default() -> Self {
        Self {
            directory: PathBuf::from("./logs"),
            prefix: "linkfolio".to_string(),
            rotation: RotationStrategy::Daily,
        }
    }
}

/// When the log file rolls over
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum RotationStrategy {
    #[default]
    Daily,
    Hourly,
    /// One file, truncated on start
    Never,
}
