//! Logging setup for the flame chart tool
//
// Console output goes to stderr so `summary --json` stays parseable. Every run
// also writes a plain-text log under the platform data dir.
//
// Usage:
//   Call `logging::init(verbose)` at the start of main().
//   Keep the returned guard alive for the program's duration.

use std::fs;
use std::path::{Path, PathBuf};
use chrono::Local;
use directories::ProjectDirs;
use tracing::Subscriber;
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::fmt::{
    format::{FormatEvent, FormatFields, Writer},
    FmtContext,
};
use tracing_subscriber::registry::LookupSpan;
use crate::consts::{APP_DIR_NAME, APP_NAME, APP_ORGANIZATION, APP_QUALIFIER};

/// Flushes the file log on drop
#[allow(dead_code)]
pub struct LogGuard(Option<tracing_appender::non_blocking::WorkerGuard>);

/// Initializes logging.
///
/// - `verbose`: colored console output down to debug level. Otherwise only
///   warnings and errors reach the console.
/// - Returns: LogGuard, which must be kept alive for file logging.
pub fn init(verbose: bool) -> LogGuard {
    use tracing_subscriber::prelude::*;

    let env_filter = match std::env::var("RUST_LOG") {
        Ok(val) => tracing_subscriber::EnvFilter::new(val),
        Err(_) if verbose => tracing_subscriber::EnvFilter::new("debug"),
        Err(_) => tracing_subscriber::EnvFilter::new("info"),
    };

    let (file_layer, guard) = match open_log_file() {
        Some(file) => {
            let (non_blocking, guard) = tracing_appender::non_blocking(file);
            // File log: plain formatting, no ANSI/color codes
            let layer = tracing_subscriber::fmt::layer()
                .with_writer(non_blocking)
                .with_ansi(false)
                .with_target(true)
                .with_thread_ids(true);
            (Some(layer), Some(guard))
        }
        None => (None, None),
    };

    let registry = tracing_subscriber::registry()
        .with(env_filter)
        .with(file_layer);

    if verbose {
        let console_layer = tracing_subscriber::fmt::layer()
            .with_writer(std::io::stderr)
            .event_format(ColorFormatter);
        registry.with(console_layer).init();
    } else {
        let console_layer = tracing_subscriber::fmt::layer()
            .with_writer(std::io::stderr)
            .with_target(false)
            .without_time()
            .with_filter(LevelFilter::WARN);
        registry.with(console_layer).init();
    }

    LogGuard(guard)
}

/// `<data dir>/logs`, `None` when the platform has no home directory
fn logs_dir() -> Option<PathBuf> {
    let proj_dirs = ProjectDirs::from(APP_QUALIFIER, APP_ORGANIZATION, APP_DIR_NAME)?;
    Some(proj_dirs.data_dir().join("logs"))
}

fn open_log_file() -> Option<fs::File> {
    let logs_dir = logs_dir()?;
    let log_folder = run_folder(&logs_dir, Local::now());
    if let Err(e) = fs::create_dir_all(&log_folder) {
        eprintln!("[LOGGING] Failed to create log folder {}: {e}", log_folder.display());
        return None;
    }

    let log_path = log_folder.join(format!("{APP_NAME}.log"));
    match fs::OpenOptions::new().create(true).append(true).open(&log_path) {
        Ok(file) => Some(file),
        Err(e) => {
            eprintln!("[LOGGING] Failed to open {}: {e}", log_path.display());
            None
        }
    }
}

/// One folder per run, named after its start time
fn run_folder(logs_dir: &Path, now: chrono::DateTime<Local>) -> PathBuf {
    logs_dir.join(now.format("%Y-%m-%d_%H-%M-%S").to_string())
}

/// Colored console formatter used with `--verbose`
pub struct ColorFormatter;

impl<S, N> FormatEvent<S, N> for ColorFormatter
where
    S: Subscriber + for<'a> LookupSpan<'a>,
    N: for<'a> FormatFields<'a> + 'static,
{
    fn format_event(
        &self,
        ctx: &FmtContext<'_, S, N>,
        mut writer: Writer<'_>,
        event: &tracing::Event<'_>,
    ) -> std::fmt::Result {
        use std::fmt::Write as _;
        let meta = event.metadata();
        let (level_str, level_color) = level_style(*meta.level());

        // Timestamp: dim cyan
        write!(writer, "\x1b[2;36m{}\x1b[0m ", Local::now().format("%H:%M:%S%.3f"))?;
        write!(writer, "{}{}\x1b[0m ", level_color, level_str)?;
        // Target: dim yellow
        write!(writer, "\x1b[2;33m{}\x1b[0m: ", meta.target())?;
        ctx.format_fields(writer.by_ref(), event)?;
        writeln!(writer)
    }
}

fn level_style(level: tracing::Level) -> (&'static str, &'static str) {
    match level {
        tracing::Level::ERROR => ("ERROR", "\x1b[1;91m"), // Bold Red
        tracing::Level::WARN => ("WARN ", "\x1b[1;93m"),  // Bold Yellow
        tracing::Level::INFO => ("INFO ", "\x1b[1;94m"),  // Bold Blue
        tracing::Level::DEBUG => ("DEBUG", "\x1b[1;92m"), // Bold Green
        tracing::Level::TRACE => ("TRACE", "\x1b[1;95m"), // Bold Magenta
    }
}
