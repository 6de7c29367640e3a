#![cfg(feature = "std")]

use log::{Level, LevelFilter, Metadata, Record};
use std::env;

/// Info and below go to stdout next to the game output; warnings and errors
/// go to stderr.
struct ConsoleLogger;

impl log::Log for ConsoleLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }
        let target = record.target().strip_prefix("naval_battle::").unwrap_or(record.target());
        match record.level() {
            Level::Error | Level::Warn => {
                eprintln!("[{}] {}: {}", record.level(), target, record.args())
            }
            level => println!("[{}] {}: {}", level, target, record.args()),
        }
    }

    fn flush(&self) {}
}

static LOGGER: ConsoleLogger = ConsoleLogger;

/// Install the console logger with a level taken from `NAVAL_LOG`
/// (`off`, `error` .. `trace`). Defaults to `info` if unset or unparsable.
/// Calling this more than once is harmless.
pub fn init_logging() {
    let level = env::var("NAVAL_LOG")
        .ok()
        .and_then(|lvl| lvl.parse().ok())
        .unwrap_or(LevelFilter::Info);
    if log::set_logger(&LOGGER).is_ok() {
        log::set_max_level(level);
    }
}
