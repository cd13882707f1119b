//! Logging setup for hosts embedding the summon core.
//!
//! Writes to a log file (truncated on start) and to stdout. The level is
//! taken from `RUST_LOG` and defaults to `info`. By default logs live under
//! the config directory, in `~/.vehicle-summon/logs/vehicle-summon.log`.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::fmt::MakeWriter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::registry::LookupSpan;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer};

use crate::config::config_directory;

/// Log directory name under the config directory.
pub const DEFAULT_LOG_DIR: &str = "logs";

/// Default log file name.
pub const DEFAULT_LOG_FILE: &str = "vehicle-summon.log";

/// Guard that must be kept alive for the duration of logging.
///
/// Dropping it flushes and closes the log file writer.
pub struct LoggingGuard {
    _file_guard: WorkerGuard,
}

/// Install the global tracing subscriber.
///
/// Creates `log_dir` if needed and clears any previous `log_file`.
///
/// # Errors
///
/// Returns an error if the directory cannot be created, the log file cannot
/// be cleared, or a global subscriber is already installed.
pub fn init_logging(log_dir: &Path, log_file: &str) -> Result<LoggingGuard, io::Error> {
    let (writer, file_guard) = prepare_log_file(log_dir, log_file)?;

    let stdout_layer = tracing_subscriber::fmt::layer()
        .with_writer(io::stdout)
        .compact();

    tracing_subscriber::registry()
        .with(default_filter())
        .with(file_layer(writer))
        .with(stdout_layer)
        .try_init()
        .map_err(|e| io::Error::new(io::ErrorKind::AlreadyExists, e.to_string()))?;

    Ok(LoggingGuard {
        _file_guard: file_guard,
    })
}

/// [`init_logging`] with [`default_log_dir`] and [`DEFAULT_LOG_FILE`].
pub fn init_default_logging() -> Result<LoggingGuard, io::Error> {
    init_logging(&default_log_dir(), DEFAULT_LOG_FILE)
}

/// Default log directory (~/.vehicle-summon/logs).
pub fn default_log_dir() -> PathBuf {
    config_directory().join(DEFAULT_LOG_DIR)
}

/// Plain-text layer for the log file.
fn file_layer<S, W>(writer: W) -> impl Layer<S>
where
    S: tracing::Subscriber + for<'a> LookupSpan<'a>,
    W: for<'w> MakeWriter<'w> + Send + Sync + 'static,
{
    tracing_subscriber::fmt::layer()
        .with_writer(writer)
        .with_ansi(false)
}

/// Create the directory, truncate the file, and open a non-blocking writer.
fn prepare_log_file(
    log_dir: &Path,
    log_file: &str,
) -> Result<(tracing_appender::non_blocking::NonBlocking, WorkerGuard), io::Error> {
    fs::create_dir_all(log_dir)?;
    fs::write(log_dir.join(log_file), "")?;

    let appender = tracing_appender::rolling::never(log_dir, log_file);
    Ok(tracing_appender::non_blocking(appender))
}

/// `RUST_LOG` if set and valid, otherwise `info`.
fn default_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_prepare_creates_directory_and_clears_file() {
        let temp = tempfile::TempDir::new().unwrap();
        let log_dir = temp.path().join("nested").join("logs");
        fs::create_dir_all(&log_dir).unwrap();
        fs::write(log_dir.join("test.log"), "old log data").unwrap();

        let (writer, guard) = prepare_log_file(&log_dir, "test.log").unwrap();

        assert!(log_dir.exists());
        assert_eq!(fs::read_to_string(log_dir.join("test.log")).unwrap(), "");

        drop(writer);
        drop(guard);
    }

    #[test]
    fn test_writer_reaches_file() {
        let temp = tempfile::TempDir::new().unwrap();

        let (mut writer, guard) = prepare_log_file(temp.path(), "out.log").unwrap();
        writer.write_all(b"hello\n").unwrap();
        drop(writer);
        // Dropping the guard flushes pending lines
        drop(guard);

        assert_eq!(
            fs::read_to_string(temp.path().join("out.log")).unwrap(),
            "hello\n"
        );
    }

    #[test]
    fn test_invalid_directory_error() {
        let temp = tempfile::TempDir::new().unwrap();
        let blocker = temp.path().join("not-a-dir");
        fs::write(&blocker, "").unwrap();

        assert!(prepare_log_file(&blocker.join("logs"), "x.log").is_err());
    }

    #[test]
    fn test_file_layer_writes_plain_lines() {
        let temp = tempfile::TempDir::new().unwrap();
        let (writer, guard) = prepare_log_file(temp.path(), "plain.log").unwrap();

        let subscriber = tracing_subscriber::registry().with(file_layer(writer));
        tracing::subscriber::with_default(subscriber, || {
            tracing::info!(attempt = 3, "Summon request sent");
        });
        drop(guard);

        let contents = fs::read_to_string(temp.path().join("plain.log")).unwrap();
        assert!(contents.contains("INFO"));
        assert!(contents.contains("Summon request sent"));
        assert!(contents.contains("attempt=3"));
        assert!(!contents.contains('\u{1b}'), "file output must not contain ANSI codes");
    }

    #[test]
    fn test_default_log_dir_is_under_config_directory() {
        let dir = default_log_dir();
        assert!(dir.starts_with(config_directory()));
        assert!(dir.ends_with(".vehicle-summon/logs"));
    }
}
