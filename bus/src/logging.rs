//! Logging backend for the bus driver.
//!
//! The crate logs through the [log] facade. Embedders that do not bring their own logger can
//! install [Logger] with [init], giving it a [LogSink] (a serial port, a ring buffer...).
use alloc::format;
use log::{Level, LevelFilter, Log, Metadata, Record, SetLoggerError, set_logger, set_max_level};
use spin::Once;

/// Where formatted log lines end up.
pub trait LogSink: Sync {
    fn write_line(&self, line: &str);
}

pub struct Logger {
    sink: Once<&'static dyn LogSink>,
}

impl Log for Logger {
    fn enabled(&self, _metadata: &Metadata) -> bool {
        self.sink.is_completed()
    }

    fn log(&self, record: &Record) {
        let Some(sink) = self.sink.get() else {
            return;
        };
        let color = match record.level() {
            Level::Error => 31, // Red
            Level::Warn => 93,  // BrightYellow
            Level::Info => 20,  // White
            Level::Debug => 32, // Green
            Level::Trace => 90, // BrightBlack
        };
        sink.write_line(&format!(
            "\u{1B}[{}m[{:}] {}\u{1B}[0m",
            color,
            record.level(),
            record.args(),
        ));
    }

    fn flush(&self) {}
}

static LOGGER: Logger = Logger { sink: Once::new() };

/// Install [Logger] as the global logger, writing into `sink`.
///
/// Only the first call wins; later calls report the [SetLoggerError] from [log].
pub fn init(sink: &'static dyn LogSink, level: LevelFilter) -> Result<(), SetLoggerError> {
    set_logger(&LOGGER)?;
    LOGGER.sink.call_once(|| sink);
    set_max_level(level);
    Ok(())
}

/// Improved debug macro,
/// only compiled in debug mode.
#[macro_export]
macro_rules! debug_ex {
    // debug_ex!(target: "my_target", "a {} event", "log")
    (target: $target:expr, $($arg:tt)+) => {
        #[cfg(debug_assertions)]
        {
            use log::{log,Level};
            log!(target: $target, Level::Debug, $($arg)+)
        }
    };

    // debug_ex!("a {} event", "log")
    ($($arg:tt)+) => {
        #[cfg(debug_assertions)]
        {
            use log::{log,Level};
            log!(Level::Debug, $($arg)+)
        }
    }
}
