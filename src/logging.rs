//! `log` backend that prints over the ESP serial console.

use esp_println::println;
use log::{LevelFilter, Log, Metadata, Record};

pub const MAX_LEVEL: LevelFilter = if cfg!(feature = "debug-sweep") {
    LevelFilter::Debug
} else {
    LevelFilter::Info
};

pub struct EspLogger;

static LOGGER: EspLogger = EspLogger;

impl Log for EspLogger {
    fn enabled(&self, metadata: &Metadata<'_>) -> bool {
        metadata.level() <= MAX_LEVEL
    }

    fn log(&self, record: &Record<'_>) {
        if !self.enabled(record.metadata()) {
            return;
        }

        println!(
            "{}: {} -- {}",
            record.level(),
            record.module_path().unwrap_or("?"),
            record.args(),
        );
    }

    fn flush(&self) {}
}

/// Installs the logger. Safe to call more than once; later calls do nothing.
pub fn init() {
    if log::set_logger(&LOGGER).is_ok() {
        log::set_max_level(MAX_LEVEL);
    }
}
