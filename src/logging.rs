//! Logging set-up using `tracing` and `tracing-subscriber`.
//!
//! The terminal belongs to the TUI while it runs, so log lines always go to a
//! file. `RUST_LOG` takes precedence over the level derived from `-v` flags.

use std::fs::{self, OpenOptions};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use tracing::Level;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[derive(Debug, Clone)]
pub struct LogConfig {
    pub level: Level,
    pub log_file: PathBuf,
}

impl LogConfig {
    /// - 0 (no `-v`): warn level
    /// - 1 (`-v`): info level
    /// - 2 (`-vv`): debug level
    /// - 3+: trace level
    pub fn from_verbosity(verbosity: u8, log_file: PathBuf) -> Self {
        Self {
            level: level_for_verbosity(verbosity),
            log_file,
        }
    }
}

pub fn level_for_verbosity(verbosity: u8) -> Level {
    match verbosity {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    }
}

fn build_env_filter(level: Level) -> EnvFilter {
    EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("wordsprint={level}")))
}

fn open_log_file(path: &Path) -> std::io::Result<fs::File> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    OpenOptions::new().create(true).append(true).open(path)
}

/// Install the global subscriber. Errors leave logging disabled.
pub fn init(config: &LogConfig) -> std::io::Result<()> {
    let file = open_log_file(&config.log_file)?;

    let layer = fmt::layer()
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_target(false);

    tracing_subscriber::registry()
        .with(build_env_filter(config.level))
        .with(layer)
        .try_init()
        .map_err(std::io::Error::other)
}
