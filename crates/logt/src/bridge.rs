//! `log` crate integration.
//!
//! Routes `log::info!` and friends through a [`Logger`]:
//!
//! ```ignore
//! use logt::LogtLogger;
//! use log::Level;
//!
//! LogtLogger::init(Level::Info)?;
//! log::info!("listening on {}", addr);
//! log::error!("accept failed: {}", err); // tagged [error]
//! ```
//!
//! The call site is the record's file and line, so the caller segment points
//! at the `log::` macro invocation. Records without a location render no
//! caller segment. Records at [`Level::Error`] carry the error capability
//! and render as `[error]`; everything else is `[info ]`.

use std::error::Error;
use std::fmt;

use log::{Level, LevelFilter, Log, Metadata, Record};

use crate::caller::CallSite;
use crate::global::std_logger;
use crate::logger::Logger;
use crate::value::{LINE_END, Value};

/// A `log::Log` implementation backed by a [`Logger`].
pub struct LogtLogger {
    logger: &'static Logger,
    max_level: Level,
}

impl LogtLogger {
    /// Bridge over `logger` accepting records up to `max_level`.
    #[must_use]
    pub fn new(logger: &'static Logger, max_level: Level) -> Self {
        Self { logger, max_level }
    }

    /// Install as the global `log` logger over the default [`Logger`].
    ///
    /// Returns an error if a logger has already been set.
    pub fn init(max_level: Level) -> Result<(), log::SetLoggerError> {
        Self::install(Self::new(std_logger(), max_level))
    }

    /// Install as the global `log` logger over `logger`.
    pub fn init_with(logger: Logger, max_level: Level) -> Result<(), log::SetLoggerError> {
        Self::install(Self::new(Box::leak(Box::new(logger)), max_level))
    }

    /// Install over the default logger, ignoring errors if already set.
    pub fn try_init(max_level: Level) {
        let _ = Self::init(max_level);
    }

    fn install(bridge: Self) -> Result<(), log::SetLoggerError> {
        let filter = bridge.max_level.to_level_filter();
        log::set_boxed_logger(Box::new(bridge))?;
        log::set_max_level(filter);
        Ok(())
    }

    /// Most verbose level forwarded.
    #[must_use]
    pub fn max_level(&self) -> LevelFilter {
        self.max_level.to_level_filter()
    }
}

impl Log for LogtLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.max_level
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }

        let site = record
            .file()
            .zip(record.line())
            .map(|(file, line)| CallSite::new(file, line));
        let out = self.logger.output();
        if record.level() == Level::Error {
            let escalated = Escalated(record.args());
            out.render(None, &[&escalated, &LINE_END], site);
        } else {
            out.render(None, &[record.args(), &LINE_END], site);
        }
    }

    fn flush(&self) {}
}

/// Message of an error-level record; answers the error capability.
struct Escalated<'a>(&'a fmt::Arguments<'a>);

impl fmt::Debug for Escalated<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self.0, f)
    }
}

impl fmt::Display for Escalated<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self.0, f)
    }
}

impl Error for Escalated<'_> {}

impl Value for Escalated<'_> {
    fn fmt_value(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self.0, f)
    }

    fn as_error(&self) -> Option<&dyn Error> {
        Some(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::flags::Flags;
    use crate::testing::TestOutput;

    fn bridge(tc: &TestOutput, level: Level) -> LogtLogger {
        let logger: &'static Logger = Box::leak(Box::new(tc.logger("", Flags::SHORT_FILE)));
        LogtLogger::new(logger, level)
    }

    fn record<'a>(level: Level, args: fmt::Arguments<'a>) -> Record<'a> {
        Record::builder()
            .level(level)
            .target("app")
            .file(Some("src/net/listener.rs"))
            .line(Some(12))
            .args(args)
            .build()
    }

    #[test]
    fn test_enabled_respects_level() {
        let tc = TestOutput::new();
        let logger = bridge(&tc, Level::Info);
        assert!(logger.enabled(&Metadata::builder().level(Level::Error).target("t").build()));
        assert!(logger.enabled(&Metadata::builder().level(Level::Info).target("t").build()));
        assert!(!logger.enabled(&Metadata::builder().level(Level::Debug).target("t").build()));
        assert_eq!(logger.max_level(), LevelFilter::Info);
    }

    #[test]
    fn test_info_record_renders_info_line() {
        let tc = TestOutput::new();
        let logger = bridge(&tc, Level::Info);
        logger.log(&record(Level::Info, format_args!("listening on {}", 8080)));
        assert_eq!(tc.output(), vec!["[info ] listener.rs listening on 8080"]);
    }

    #[test]
    fn test_warn_record_is_info() {
        let tc = TestOutput::new();
        let logger = bridge(&tc, Level::Trace);
        logger.log(&record(Level::Warn, format_args!("slow")));
        tc.assert_logged(crate::style::Severity::Info, "listener.rs slow");
    }

    #[test]
    fn test_error_record_renders_error_line() {
        let tc = TestOutput::new();
        let logger = bridge(&tc, Level::Info);
        logger.log(&record(Level::Error, format_args!("accept failed: {}", "EMFILE")));
        assert_eq!(
            tc.output(),
            vec!["[error] listener.rs accept failed: EMFILE"]
        );
    }

    #[test]
    fn test_record_without_location_has_no_caller() {
        let tc = TestOutput::new();
        let logger: &'static Logger = Box::leak(Box::new(tc.logger("", Flags::CALLER)));
        let bridge = LogtLogger::new(logger, Level::Info);
        bridge.log(
            &Record::builder()
                .level(Level::Info)
                .args(format_args!("no location"))
                .build(),
        );
        assert_eq!(tc.output(), vec!["[info ] no location"]);
    }

    #[test]
    fn test_disabled_record_is_dropped() {
        let tc = TestOutput::new();
        let logger = bridge(&tc, Level::Warn);
        logger.log(&record(Level::Debug, format_args!("noise")));
        assert!(tc.output().is_empty());
    }
}
