//! A [`log`] backend for the REPL.
//!
//! Records go to stderr in the same `[source] message` shape as every other
//! line the CLI prints, with the level as the source name.

use log::{LevelFilter, Log, Metadata, Record};

use crate::cli::messages::system_message;

struct CliLogger;

static LOGGER: CliLogger = CliLogger;

impl Log for CliLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            let level = record.level().as_str().to_lowercase();
            eprintln!("{}", system_message(&level, record.args().to_string()));
        }
    }

    fn flush(&self) {}
}

pub fn init(level: LevelFilter) {
    //! Install the logger. A second call keeps the first logger and only
    //! adjusts the level.

    match log::set_logger(&LOGGER) {
        Ok(()) => {}
        // the logger from the earlier call stays installed
        Err(_already_set) => {}
    }
    log::set_max_level(level);
}
