//! The process-wide default logger.
//!
//! Created on first use with [`Flags::DEFAULT_LOGGER`] (`CALLER | DATE |
//! TIME`), an empty prefix and stdout as output. The free functions here
//! mirror [`Logger`]'s methods and report their own caller's position.
//!
//! [`set_flags`] and [`set_prefix`] act on shared state without coordinating
//! with lines being rendered on other threads. Configure the default logger
//! once, early in `main`.

use std::sync::OnceLock;

use crate::flags::Flags;
use crate::logger::Logger;
use crate::output::StdOutput;
use crate::value::Value;

static STD: OnceLock<Logger> = OnceLock::new();

/// The default logger.
pub fn std_logger() -> &'static Logger {
    STD.get_or_init(|| Logger::new(StdOutput::new(), "", Flags::DEFAULT_LOGGER))
}

/// Logs `args` joined by spaces to the default logger.
#[track_caller]
pub fn print(args: &[&dyn Value]) {
    std_logger().print(args);
}

/// Logs `args` substituted into `format` to the default logger.
#[track_caller]
pub fn printf(format: &str, args: &[&dyn Value]) {
    std_logger().printf(format, args);
}

/// Logs `args` and a newline to the default logger.
#[track_caller]
pub fn println(args: &[&dyn Value]) {
    std_logger().println(args);
}

/// Logs to the default logger, then exits with status 1.
#[track_caller]
pub fn fatal(args: &[&dyn Value]) -> ! {
    std_logger().fatal(args)
}

/// Logs to the default logger, then exits with status 1.
#[track_caller]
pub fn fatalf(format: &str, args: &[&dyn Value]) -> ! {
    std_logger().fatalf(format, args)
}

/// Logs to the default logger, then exits with status 1.
#[track_caller]
pub fn fatalln(args: &[&dyn Value]) -> ! {
    std_logger().fatalln(args)
}

/// Logs to the default logger, then panics with the message.
#[track_caller]
pub fn panic(args: &[&dyn Value]) -> ! {
    std_logger().panic(args)
}

/// Logs to the default logger, then panics with the message.
#[track_caller]
pub fn panicf(format: &str, args: &[&dyn Value]) -> ! {
    std_logger().panicf(format, args)
}

/// Logs to the default logger, then panics with the message.
#[track_caller]
pub fn panicln(args: &[&dyn Value]) -> ! {
    std_logger().panicln(args)
}

/// Flags of the default logger.
pub fn flags() -> Flags {
    std_logger().flags()
}

/// Prefix of the default logger.
pub fn prefix() -> String {
    std_logger().prefix()
}

/// Replaces the flags of the default logger.
pub fn set_flags(flags: Flags) {
    std_logger().set_flags(flags);
}

/// Replaces the prefix of the default logger.
pub fn set_prefix(prefix: &str) {
    std_logger().set_prefix(prefix);
}
