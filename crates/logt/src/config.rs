//! Centralized configuration for a logt logger.
//!
//! `LoggerConfig` gathers flags, prefix and tag styling in one place and
//! can be filled programmatically or from environment variables.

use std::env;

use crate::flags::Flags;
use crate::logger::Logger;
use crate::output::StdOutput;
use crate::style::{DisplayContext, painter_for};

/// Configuration for building a [`Logger`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoggerConfig {
    /// Header flags
    pub flags: Flags,
    /// Prefix reported by the logger. Not part of rendered lines.
    pub prefix: String,

    // Display mode
    /// Override display context (None = auto-detect)
    pub context: Option<DisplayContext>,
    /// Force colored tags even in non-TTY
    pub force_color: Option<bool>,
    /// Force plain tags
    pub force_plain: bool,
}

impl Default for LoggerConfig {
    fn default() -> Self {
        Self {
            flags: Flags::STD_FLAGS,
            prefix: String::new(),
            context: None,
            force_color: None,
            force_plain: false,
        }
    }
}

impl LoggerConfig {
    /// Create config with defaults
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create config from environment variables
    ///
    /// # Environment Variables
    ///
    /// | Variable | Values | Description |
    /// |----------|--------|-------------|
    /// | `LOGT_FLAGS` | `67` / `date\|time\|caller` | Header flags |
    /// | `LOGT_PREFIX` | any text | Prefix |
    /// | `LOGT_FORCE_COLOR` | (set) | Force colored tags |
    /// | `LOGT_PLAIN` | (set) | Force plain tags |
    /// | `NO_COLOR` | (set) | Disable colors (standard) |
    ///
    /// An unparsable `LOGT_FLAGS` is reported with `log::warn!` and the
    /// default flags are kept.
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Like [`from_env`](Self::from_env), reading variables through `lookup`
    #[must_use]
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();

        if let Some(raw) = lookup("LOGT_FLAGS") {
            match raw.parse::<Flags>() {
                Ok(flags) => config.flags = flags,
                Err(err) => {
                    log::warn!("ignoring LOGT_FLAGS={raw:?}: {err}");
                }
            }
        }
        if let Some(prefix) = lookup("LOGT_PREFIX") {
            config.prefix = prefix;
        }

        // Display mode
        if lookup("LOGT_FORCE_COLOR").is_some() {
            config.force_color = Some(true);
        }
        if lookup("LOGT_PLAIN").is_some() || lookup("NO_COLOR").is_some() {
            config.force_plain = true;
        }

        config
    }

    // ─────────────────────────────────────────────────
    // Builder Methods
    // ─────────────────────────────────────────────────

    /// Set the header flags
    #[must_use]
    pub fn with_flags(mut self, flags: Flags) -> Self {
        self.flags = flags;
        self
    }

    /// Set the prefix
    #[must_use]
    pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = prefix.into();
        self
    }

    /// Force colored tags
    #[must_use]
    pub fn force_color(mut self, force: bool) -> Self {
        self.force_color = Some(force);
        self
    }

    /// Enable plain tags
    #[must_use]
    pub fn plain_mode(mut self) -> Self {
        self.force_plain = true;
        self
    }

    /// Set display context explicitly
    #[must_use]
    pub fn with_context(mut self, context: DisplayContext) -> Self {
        self.context = Some(context);
        self
    }

    // ─────────────────────────────────────────────────
    // Resolution Methods
    // ─────────────────────────────────────────────────

    /// Resolve the display context based on config and environment
    #[must_use]
    pub fn resolve_context(&self) -> DisplayContext {
        if self.force_plain {
            return DisplayContext::Plain;
        }
        match self.force_color {
            Some(true) => DisplayContext::Styled,
            Some(false) => DisplayContext::Plain,
            None => self.context.unwrap_or_else(DisplayContext::detect),
        }
    }

    /// Build a stdout output styled per the resolved context
    #[must_use]
    pub fn build_output(&self) -> StdOutput {
        StdOutput::with_painter(painter_for(self.resolve_context()))
    }

    /// Build a logger writing to stdout
    #[must_use]
    pub fn build(&self) -> Logger {
        Logger::new(self.build_output(), &self.prefix, self.flags)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn test_default_config() {
        let config = LoggerConfig::new();
        assert_eq!(config.flags, Flags::STD_FLAGS);
        assert!(config.prefix.is_empty());
        assert!(!config.force_plain);
        assert_eq!(config.force_color, None);
    }

    #[test]
    fn test_builder_pattern() {
        let config = LoggerConfig::new()
            .with_flags(Flags::TIME | Flags::MICROSECONDS)
            .with_prefix("worker-3")
            .with_context(DisplayContext::Plain);

        assert_eq!(config.flags, Flags::TIME | Flags::MICROSECONDS);
        assert_eq!(config.prefix, "worker-3");
        assert_eq!(config.resolve_context(), DisplayContext::Plain);
    }

    #[test]
    fn test_plain_mode_beats_force_color() {
        let config = LoggerConfig::new().force_color(true).plain_mode();
        assert_eq!(config.resolve_context(), DisplayContext::Plain);
    }

    #[test]
    fn test_force_color() {
        let config = LoggerConfig::new()
            .with_context(DisplayContext::Plain)
            .force_color(true);
        assert_eq!(config.resolve_context(), DisplayContext::Styled);

        let config = LoggerConfig::new().force_color(false);
        assert_eq!(config.resolve_context(), DisplayContext::Plain);
    }

    #[test]
    fn test_from_lookup_reads_variables() {
        let config = LoggerConfig::from_lookup(lookup(&[
            ("LOGT_FLAGS", "date|time|caller"),
            ("LOGT_PREFIX", "api:"),
            ("NO_COLOR", "1"),
        ]));
        assert_eq!(config.flags, Flags::DEFAULT_LOGGER);
        assert_eq!(config.prefix, "api:");
        assert!(config.force_plain);
    }

    #[test]
    fn test_from_lookup_numeric_flags() {
        let config = LoggerConfig::from_lookup(lookup(&[("LOGT_FLAGS", "67")]));
        assert_eq!(config.flags, Flags::DEFAULT_LOGGER);
    }

    #[test]
    fn test_from_lookup_bad_flags_keep_default() {
        let config = LoggerConfig::from_lookup(lookup(&[("LOGT_FLAGS", "date|sometimes")]));
        assert_eq!(config.flags, Flags::STD_FLAGS);
    }

    #[test]
    fn test_from_lookup_force_color() {
        let config = LoggerConfig::from_lookup(lookup(&[("LOGT_FORCE_COLOR", "")]));
        assert_eq!(config.force_color, Some(true));
        assert_eq!(config.resolve_context(), DisplayContext::Styled);
    }

    #[test]
    fn test_build_applies_flags_and_prefix() {
        let logger = LoggerConfig::new()
            .with_flags(Flags::UTC | Flags::DATE)
            .with_prefix("jobs")
            .plain_mode()
            .build();
        assert_eq!(logger.flags(), Flags::UTC | Flags::DATE);
        assert_eq!(logger.prefix(), "jobs");
    }
}
