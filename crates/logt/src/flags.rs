//! Formatting flags.
//!
//! The bit values are part of the public contract: configurations that store
//! a raw bitmask must keep meaning the same thing across releases.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer, de};

bitflags::bitflags! {
    /// Independent options read by the formatting engine on every call.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct Flags: u32 {
        /// The date in the local time zone: `2009/01/23`.
        const DATE = 1;
        /// The time in the local time zone: `01:23:23`.
        const TIME = 1 << 1;
        /// Microsecond resolution: `01:23:23.123123`. Ignored when `TIME` is set.
        const MICROSECONDS = 1 << 2;
        /// Full file path and line number: `src/net/conn.rs:23`.
        const LONG_FILE = 1 << 3;
        /// Final file name element only: `conn.rs`. Overrides `LONG_FILE`.
        const SHORT_FILE = 1 << 4;
        /// If `DATE` or `TIME` is set, use UTC rather than the local time zone.
        const UTC = 1 << 5;
        /// `net/conn.rs:23 dial()`. Overrides both file flags.
        const CALLER = 1 << 6;
        /// Initial values for a plain logger.
        const STD_FLAGS = Self::DATE.bits() | Self::TIME.bits();
    }
}

impl Default for Flags {
    fn default() -> Self {
        Self::STD_FLAGS
    }
}

impl Flags {
    /// Flags used by the process-wide default logger.
    pub const DEFAULT_LOGGER: Self = Self::CALLER.union(Self::DATE).union(Self::TIME);

    /// Whether any timestamp component is requested.
    #[must_use]
    pub const fn wants_timestamp(self) -> bool {
        self.intersects(Self::DATE.union(Self::TIME).union(Self::MICROSECONDS))
    }

    /// Whether any call-site component is requested.
    #[must_use]
    pub const fn wants_caller(self) -> bool {
        self.intersects(Self::CALLER.union(Self::SHORT_FILE).union(Self::LONG_FILE))
    }
}

// Serialized as the raw bitmask so stored configurations stay numeric.
impl Serialize for Flags {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u32(self.bits())
    }
}

impl<'de> Deserialize<'de> for Flags {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let bits = u32::deserialize(deserializer)?;
        Self::from_bits(bits)
            .ok_or_else(|| de::Error::custom(format!("unknown logger flag bits {bits:#x}")))
    }
}

/// Error returned when a flag specification cannot be parsed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseFlagsError {
    token: String,
}

impl ParseFlagsError {
    /// The token that was not recognized.
    #[must_use]
    pub fn token(&self) -> &str {
        &self.token
    }
}

impl fmt::Display for ParseFlagsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown logger flag `{}`", self.token)
    }
}

impl std::error::Error for ParseFlagsError {}

/// Parses either a decimal bitmask (`"67"`) or flag names separated by `|`
/// or `,` (`"date|time|caller"`). Names are case-insensitive and accept both
/// `short_file` and `shortfile`. An empty string yields no flags.
impl FromStr for Flags {
    type Err = ParseFlagsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if let Ok(bits) = s.parse::<u32>() {
            return Self::from_bits(bits).ok_or_else(|| ParseFlagsError {
                token: s.to_string(),
            });
        }

        let mut flags = Self::empty();
        for token in s.split(['|', ',']).map(str::trim).filter(|t| !t.is_empty()) {
            let flag = match token.to_ascii_lowercase().replace(['_', '-'], "").as_str() {
                "date" => Self::DATE,
                "time" => Self::TIME,
                "microseconds" | "micros" => Self::MICROSECONDS,
                "longfile" => Self::LONG_FILE,
                "shortfile" => Self::SHORT_FILE,
                "utc" => Self::UTC,
                "caller" => Self::CALLER,
                "std" | "stdflags" => Self::STD_FLAGS,
                _ => {
                    return Err(ParseFlagsError {
                        token: token.to_string(),
                    });
                }
            };
            flags |= flag;
        }
        Ok(flags)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bit_values_are_stable() {
        assert_eq!(Flags::DATE.bits(), 1);
        assert_eq!(Flags::TIME.bits(), 2);
        assert_eq!(Flags::MICROSECONDS.bits(), 4);
        assert_eq!(Flags::LONG_FILE.bits(), 8);
        assert_eq!(Flags::SHORT_FILE.bits(), 16);
        assert_eq!(Flags::UTC.bits(), 32);
        assert_eq!(Flags::CALLER.bits(), 64);
        assert_eq!(Flags::STD_FLAGS.bits(), 3);
    }

    #[test]
    fn default_logger_flags() {
        assert_eq!(Flags::DEFAULT_LOGGER.bits(), 67);
        assert_eq!(Flags::default(), Flags::STD_FLAGS);
    }

    #[test]
    fn wants_helpers() {
        assert!(Flags::MICROSECONDS.wants_timestamp());
        assert!(!Flags::CALLER.wants_timestamp());
        assert!(Flags::LONG_FILE.wants_caller());
        assert!(!Flags::UTC.wants_caller());
        assert!(!Flags::empty().wants_timestamp());
    }

    #[test]
    fn parse_numeric() {
        assert_eq!("67".parse::<Flags>(), Ok(Flags::DEFAULT_LOGGER));
        assert_eq!(" 0 ".parse::<Flags>(), Ok(Flags::empty()));
        let err = "128".parse::<Flags>().unwrap_err();
        assert_eq!(err.token(), "128");
    }

    #[test]
    fn parse_names() {
        assert_eq!(
            "date|time|caller".parse::<Flags>(),
            Ok(Flags::DEFAULT_LOGGER)
        );
        assert_eq!(
            "Short_File, UTC".parse::<Flags>(),
            Ok(Flags::SHORT_FILE | Flags::UTC)
        );
        assert_eq!("std".parse::<Flags>(), Ok(Flags::STD_FLAGS));
        assert_eq!("".parse::<Flags>(), Ok(Flags::empty()));
    }

    #[test]
    fn parse_unknown_name() {
        let err = "date|weekday".parse::<Flags>().unwrap_err();
        assert_eq!(err.token(), "weekday");
        assert_eq!(err.to_string(), "unknown logger flag `weekday`");
    }

    #[test]
    fn serde_uses_raw_bits() {
        let json = serde_json::to_string(&Flags::DEFAULT_LOGGER).unwrap();
        assert_eq!(json, "67");
        let back: Flags = serde_json::from_str("18").unwrap();
        assert_eq!(back, Flags::TIME | Flags::SHORT_FILE);
        assert!(serde_json::from_str::<Flags>("256").is_err());
    }
}
