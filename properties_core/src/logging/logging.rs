// properties_core/src/logging/logging.rs
use std::io::Write;
use std::path::Path;
use std::sync::Mutex;
use flexi_logger::*;
use log::Record;
use once_cell::sync::Lazy;
use crate::constants::{LOG_BASENAME, LOG_FILES_KEPT, LOG_ROTATE_BYTES};

// Most recent status message, shown under the property grid.
pub static LAST_LOG: Lazy<Mutex<String>> = Lazy::new(|| Mutex::new(String::new()));

/// Logs a message and keeps it as the grid's status line.
#[macro_export]
macro_rules! status_log {
    ($lvl:expr, $($arg:tt)*) => {{
        log::log!($lvl, $($arg)*);
        if let Ok(mut buf) = $crate::logging::logging::LAST_LOG.lock() {
            *buf = format!($($arg)*);
        }
    }};
}

#[macro_export]
macro_rules! status_info  { ($($arg:tt)*) => { $crate::status_log!(log::Level::Info,  $($arg)*) }; }

#[macro_export]
macro_rules! status_warn  { ($($arg:tt)*) => { $crate::status_log!(log::Level::Warn,  $($arg)*) }; }

/// Helper macro that keeps errors on the status line.
#[macro_export]
macro_rules! status_error { ($($arg:tt)*) => { $crate::status_log!(log::Level::Error, $($arg)*) }; }

#[macro_export]
macro_rules! status_debug { ($($arg:tt)*) => { $crate::status_log!(log::Level::Debug, $($arg)*) }; }

// Serializes tests that assert on the shared status line.
#[cfg(test)]
pub(crate) static STATUS_TEST_LOCK: Mutex<()> = Mutex::new(());

/// Returns the last status message.
pub fn last_status() -> String {
    LAST_LOG.lock().map(|buf| buf.clone()).unwrap_or_default()
}

/// Starts the rotating file logger writing into `log_dir`.
/// `spec` is a flexi_logger level spec such as `"info"` or `"properties_core=debug"`.
pub fn init_file_logger(log_dir: &Path, spec: &str) -> Result<LoggerHandle, FlexiLoggerError> {
    let file_spec = FileSpec::default()
        .directory(log_dir)
        .basename(LOG_BASENAME)
        .suffix("log");

    let handle = Logger::try_with_str(spec)?
        .log_to_file(file_spec)
        .format(line_formatter)
        .rotate(
            Criterion::Size(LOG_ROTATE_BYTES),
            Naming::Numbers,
            Cleanup::KeepLogFiles(LOG_FILES_KEPT),
        )
        .write_mode(WriteMode::BufferAndFlush)
        .start()?;

    status_info!("Log dir: {}.", log_dir.display());
    Ok(handle)
}

fn line_formatter(
    write: &mut dyn Write,
    now: &mut DeferredNow,
    record: &Record,
) -> std::io::Result<()> {
    write!(
        write,
        "{} {:5} [{}] {}",
        now.format("%Y-%m-%d %H:%M:%S%.3f"),
        record.level(),
        record.module_path().unwrap_or("<unknown>"),
        &record.args()
    )
}
