use anyhow::{Context, Result};
use log::{Level, LevelFilter, Log, Metadata, Record};
use std::fs;
use std::io::Write;
use std::path::Path;
use std::sync::mpsc::Sender;
use std::sync::{Arc, Mutex};
use std::time::Instant;
use tracing_appender::rolling::{RollingFileAppender, Rotation};

/// Flash message for TUI display
///
/// Produced by the logger for records at or above the configured flash level;
/// the app keeps a queue of these and prunes them once visible + fade time
/// has elapsed.
#[derive(Debug, Clone)]
pub struct FlashMessage {
    pub level: Level,
    pub message: String,
    pub timestamp: Instant,
}

impl FlashMessage {
    /// Icon keyed by severity, matching the flash banner styling
    pub fn icon(&self) -> &'static str {
        match self.level {
            Level::Error | Level::Warn => "✗",
            _ => "✓",
        }
    }
}

/// Logger that tees records to a rolling log file and an optional flash
/// message channel
///
/// The sender sits behind a mutex because `Log` implementations must be Sync
/// and `mpsc::Sender` is not.
struct RegbookLogger {
    file_writer: Arc<Mutex<RollingFileAppender>>,
    flash_tx: Option<Mutex<Sender<FlashMessage>>>,
    file_level: LevelFilter,
    flash_level: LevelFilter,
}

impl Log for RegbookLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.file_level || metadata.level() <= self.flash_level
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }

        let message = format!("{}", record.args());
        let level = record.level();

        if level <= self.file_level {
            if let Ok(mut writer) = self.file_writer.lock() {
                let _ = writeln!(
                    writer,
                    "{} [{}] {}",
                    chrono::Local::now().format("%Y-%m-%d %H:%M:%S"),
                    level,
                    message
                );
            }
        }

        if level <= self.flash_level {
            if let Some(tx) = &self.flash_tx {
                if let Ok(tx) = tx.lock() {
                    let _ = tx.send(FlashMessage {
                        level,
                        message,
                        timestamp: Instant::now(),
                    });
                }
            }
        }
    }

    fn flush(&self) {
        // RollingFileAppender handles flushing automatically
    }
}

/// Parse a log level string to LevelFilter, defaulting to Info
pub fn parse_level(level_str: &str) -> LevelFilter {
    match level_str.to_lowercase().as_str() {
        "off" => LevelFilter::Off,
        "error" => LevelFilter::Error,
        "warn" => LevelFilter::Warn,
        "info" => LevelFilter::Info,
        "debug" => LevelFilter::Debug,
        "trace" => LevelFilter::Trace,
        _ => LevelFilter::Info,
    }
}

/// Install the global logger
///
/// Records go to a daily-rolling `regbook.log` under `log_dir`; records at or
/// above `flash_level` are additionally forwarded to `flash_tx` for on-screen
/// display.
pub fn init_logger(
    log_dir: &Path,
    flash_tx: Option<Sender<FlashMessage>>,
    file_level: &str,
    flash_level: &str,
) -> Result<()> {
    fs::create_dir_all(log_dir).context("Failed to create log directory")?;

    let file_appender = RollingFileAppender::builder()
        .rotation(Rotation::DAILY)
        .max_log_files(3)
        .filename_prefix("regbook")
        .filename_suffix("log")
        .build(log_dir)
        .context("Failed to create rolling file appender")?;

    let file_level = parse_level(file_level);
    let flash_level = parse_level(flash_level);

    let logger = RegbookLogger {
        file_writer: Arc::new(Mutex::new(file_appender)),
        flash_tx: flash_tx.map(Mutex::new),
        file_level,
        flash_level,
    };

    log::set_boxed_logger(Box::new(logger)).context("Failed to set global logger")?;
    log::set_max_level(file_level.max(flash_level));

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_level() {
        assert_eq!(parse_level("error"), LevelFilter::Error);
        assert_eq!(parse_level("WARN"), LevelFilter::Warn);
        assert_eq!(parse_level("Debug"), LevelFilter::Debug);
        assert_eq!(parse_level("bogus"), LevelFilter::Info);
    }

    #[test]
    fn test_flash_icons() {
        let flash = |level| FlashMessage {
            level,
            message: String::new(),
            timestamp: Instant::now(),
        };
        assert_eq!(flash(Level::Info).icon(), "✓");
        assert_eq!(flash(Level::Warn).icon(), "✗");
        assert_eq!(flash(Level::Error).icon(), "✗");
    }
}
