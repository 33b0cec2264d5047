//! Prints one line per flag combination to stdout.
//!
//! Run with: cargo run -p logt --example smoke

use std::io;

use logt::value::debug;
use logt::{Flags, Logger, LoggerConfig, LogtLogger};

fn main() {
    let err = io::Error::other("BOOM");

    // default logger: CALLER | DATE | TIME
    logt::println(&[&"data is ok"]);
    logt::println(&[&"some more data", &1, &2, &3]);
    logt::println(&[&"there are some errors here", &14, &err]);
    logt::printf("{} {}\n", &[&10, &"BOOM"]);
    logt::printf("{} {}\n", &[&10, &err]);

    let combos = [
        ("std", Flags::STD_FLAGS),
        ("micro", Flags::MICROSECONDS),
        ("utc", Flags::STD_FLAGS | Flags::UTC),
        ("short", Flags::SHORT_FILE),
        ("long", Flags::LONG_FILE),
        ("caller", Flags::CALLER),
    ];
    let log = LoggerConfig::from_env().build();
    for (name, flags) in combos {
        log.set_flags(flags);
        log.println(&[&name, &"config", &debug(flags)]);
    }

    log_bridge(&err);
}

fn log_bridge(err: &io::Error) {
    let logger = Logger::new(logt::StdOutput::new(), "log:", Flags::CALLER);
    if LogtLogger::init_with(logger, log::Level::Info).is_ok() {
        log::info!("bridged info");
        log::error!("bridged error: {err}");
    }
}
