//! Log subscriber setup for the command-line binary.

use std::fs::{File, OpenOptions, create_dir_all};
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::{EnvFilter, Layer, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Verbosity accepted by `--log-level`.
///
/// `Superdebug` is the most verbose level and also records full prompts and
/// raw model replies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum LogLevel {
    /// Failures only
    Error,
    /// Failures and recoverable problems
    Warn,
    /// Progress of each run
    #[default]
    Info,
    /// Stage internals
    Debug,
    /// Everything, including prompts and replies
    Superdebug,
}

impl LogLevel {
    /// `EnvFilter` directive for this level.
    pub fn directive(self) -> &'static str {
        match self {
            LogLevel::Error => "error",
            LogLevel::Warn => "warn",
            LogLevel::Info => "info",
            LogLevel::Debug => "debug",
            LogLevel::Superdebug => "trace",
        }
    }
}

/// Where log events go.
#[derive(Debug, Clone, Default)]
pub struct LogOptions {
    /// Verbosity when `RUST_LOG` is unset
    pub level: LogLevel,
    /// Append events to this file, creating parent directories
    pub file: Option<PathBuf>,
    /// Send events at `level` to the console, not just warnings
    pub console: bool,
}

impl LogOptions {
    /// Most verbose level the console shows.
    ///
    /// Without the console flag only warnings and errors reach the console,
    /// leaving it to progress lines.
    pub fn console_level(&self) -> LevelFilter {
        if self.console {
            LevelFilter::TRACE
        } else {
            LevelFilter::WARN
        }
    }
}

/// Open `path` for appending, creating missing parent directories.
pub fn open_log_file(path: &Path) -> std::io::Result<File> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        create_dir_all(parent)?;
    }
    OpenOptions::new().create(true).append(true).open(path)
}

/// Install the global subscriber: one console layer and an optional file layer.
///
/// # Errors
///
/// Fails when the log file cannot be opened or a subscriber is already set.
pub fn init_logging(options: &LogOptions) -> Result<(), Box<dyn std::error::Error>> {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(options.level.directive()));

    let console = fmt::layer()
        .with_target(false)
        .with_writer(std::io::stderr)
        .with_filter(options.console_level());

    let file = match &options.file {
        Some(path) => Some(
            fmt::layer()
                .with_ansi(false)
                .with_writer(Mutex::new(open_log_file(path)?)),
        ),
        None => None,
    };

    tracing_subscriber::registry()
        .with(env_filter)
        .with(console)
        .with(file)
        .try_init()?;

    tracing::debug!(
        level = options.level.directive(),
        file = ?options.file,
        console = options.console,
        "Logging initialized"
    );
    Ok(())
}
