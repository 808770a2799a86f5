//! `log` backend that writes through the host's `trace` primitive
//!
//! The console has no stdout; on wasm32 every log record becomes one `trace`
//! call. Native builds use `env_logger` instead.

use log::{LevelFilter, Log, Metadata, Record, SetLoggerError};

pub struct TraceLogger {
    sink: fn(&str),
    level: LevelFilter,
}

impl TraceLogger {
    pub const fn new(sink: fn(&str), level: LevelFilter) -> Self {
        Self { sink, level }
    }
}

/// One line per record: `LEVEL target: message`
pub fn format_record(record: &Record<'_>) -> String {
    format!("{} {}: {}", record.level(), record.target(), record.args())
}

impl Log for TraceLogger {
    fn enabled(&self, metadata: &Metadata<'_>) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record<'_>) {
        if self.enabled(record.metadata()) {
            (self.sink)(&format_record(record));
        }
    }

    fn flush(&self) {}
}

/// Install a [`TraceLogger`] as the global logger. Fails if one is already set.
pub fn init(sink: fn(&str), level: LevelFilter) -> Result<(), SetLoggerError> {
    let logger: &'static TraceLogger = Box::leak(Box::new(TraceLogger::new(sink, level)));
    log::set_logger(logger)?;
    log::set_max_level(level);
    Ok(())
}
