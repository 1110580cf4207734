//! Logging initialization
//!
//! Console output on stderr plus an optional daily-rotated file under `LAUNCHPAD_LOG_DIR`.
//! The filter comes from `RUST_LOG`, falling back to [`DEFAULT_FILTER`].

use std::fs;
use std::path::PathBuf;

use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

pub const DEFAULT_FILTER: &str = "launchpad=info,lib_evm=info,lib_core=info,warn";
const LOG_FILE_NAME: &str = "launchpad.log";

/// Logging configuration from environment variables
#[derive(Debug, Clone)]
pub struct LogConfig {
    /// Log level filter (e.g., "launchpad=debug,info")
    pub log_level: String,
    /// Directory for the rotated log file, `None` keeps logs on stderr only
    pub log_dir: Option<PathBuf>,
    /// Emit JSON lines instead of human-readable output
    pub json: bool,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            log_level: DEFAULT_FILTER.to_string(),
            log_dir: None,
            json: false,
        }
    }
}

impl LogConfig {
    pub fn from_env() -> Self {
        Self {
            log_level: std::env::var("RUST_LOG").unwrap_or_else(|_| DEFAULT_FILTER.to_string()),
            log_dir: std::env::var("LAUNCHPAD_LOG_DIR")
                .ok()
                .filter(|dir| !dir.trim().is_empty())
                .map(PathBuf::from),
            json: std::env::var("LAUNCHPAD_LOG_JSON")
                .map(|v| v == "1")
                .unwrap_or(false),
        }
    }
}

/// Keeps the non-blocking file writer flushing. Hold it for the lifetime of the program.
#[must_use = "dropping the guard stops file logging"]
pub struct LogGuard {
    _file: Option<WorkerGuard>,
}

/// Initialize the global subscriber and the panic hook.
pub fn init(config: &LogConfig) -> LogGuard {
    let env_filter = EnvFilter::try_new(&config.log_level)
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    let (file_layer, file_guard) = match config.log_dir.as_ref() {
        Some(dir) => match fs::create_dir_all(dir) {
            Ok(()) => {
                let appender = tracing_appender::rolling::daily(dir, LOG_FILE_NAME);
                let (writer, guard) = tracing_appender::non_blocking(appender);
                let layer = fmt::layer()
                    .with_writer(writer)
                    .with_target(true)
                    .with_thread_ids(true)
                    .with_file(true)
                    .with_line_number(true)
                    .with_ansi(false);
                (Some(layer), Some(guard))
            }
            Err(e) => {
                eprintln!("Warning: Failed to create log directory {}: {}", dir.display(), e);
                (None, None)
            }
        },
        None => (None, None),
    };

    let (console, console_json) = if config.json {
        (None, Some(fmt::layer().json().with_writer(std::io::stderr)))
    } else {
        (
            Some(fmt::layer().with_writer(std::io::stderr).with_target(false)),
            None,
        )
    };

    let result = tracing_subscriber::registry()
        .with(env_filter)
        .with(console)
        .with(console_json)
        .with(file_layer)
        .try_init();
    if let Err(e) = result {
        eprintln!("Warning: Logging already initialized: {}", e);
    }

    tracing::info!(
        log_level = %config.log_level,
        log_dir = ?config.log_dir,
        json = config.json,
        "Logging initialized"
    );

    setup_panic_hook();

    LogGuard { _file: file_guard }
}

/// Log panics with their location before the default hook runs.
fn setup_panic_hook() {
    let default_panic = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        let location = panic_info
            .location()
            .map(|l| format!("{}:{}:{}", l.file(), l.line(), l.column()))
            .unwrap_or_else(|| "unknown location".to_string());

        let message = if let Some(s) = panic_info.payload().downcast_ref::<&str>() {
            s.to_string()
        } else if let Some(s) = panic_info.payload().downcast_ref::<String>() {
            s.clone()
        } else {
            "unknown panic message".to_string()
        };

        tracing::error!(location = %location, message = %message, "Application panic");

        default_panic(panic_info);
    }));
}
