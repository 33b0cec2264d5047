#![forbid(unsafe_code)]
#![doc = include_str!("../README.md")]

pub mod bridge; // `log` crate integration
pub mod caller; // Call-site and function-name resolution
pub mod config;
pub mod flags;
pub mod global; // Process-wide default logger
pub mod logger;
pub mod message; // Message body rendering
pub mod output;
pub mod pool; // Reusable line buffers
pub mod style; // Severity tags
pub mod testing; // Test utilities
pub mod value;

pub use bridge::LogtLogger;
pub use caller::{CallSite, Caller};
pub use config::LoggerConfig;
pub use flags::{Flags, ParseFlagsError};
pub use global::{
    fatal, fatalf, fatalln, flags, panic, panicf, panicln, prefix, print, printf, println,
    set_flags, set_prefix, std_logger,
};
pub use logger::Logger;
pub use output::{Output, StdOutput};
pub use style::{
    AnsiPainter, DisplayContext, PlainPainter, Severity, TagPainter, should_enable_color,
};
pub use value::{LINE_END, Value};
