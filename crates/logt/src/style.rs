//! Severity tags and how they are painted.

use console::Style;

use crate::value::Value;

/// Severity inferred from a line's arguments.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// No argument carries the error capability.
    Info,
    /// At least one argument is an error.
    Error,
}

impl Severity {
    /// Scans `args` and stops at the first error value.
    #[must_use]
    pub fn of(args: &[&dyn Value]) -> Self {
        if args.iter().any(|arg| arg.as_error().is_some()) {
            Self::Error
        } else {
            Self::Info
        }
    }

    /// Fixed-width tag: `[info ]` or `[error]`.
    #[must_use]
    pub const fn tag(self) -> &'static str {
        match self {
            Self::Info => "[info ]",
            Self::Error => "[error]",
        }
    }
}

/// Strategy for writing the severity tag into a line.
///
/// Lets non-terminal sinks drop color without touching the engine.
pub trait TagPainter: Send + Sync {
    /// Appends the tag for `severity` to `out`.
    fn paint(&self, severity: Severity, out: &mut String);
}

/// ANSI colored tags: bright red for errors, bright blue otherwise.
#[derive(Debug, Clone)]
pub struct AnsiPainter {
    info: Style,
    error: Style,
}

impl AnsiPainter {
    #[must_use]
    pub fn new() -> Self {
        Self {
            info: Style::new().blue().bright().force_styling(true),
            error: Style::new().red().bright().force_styling(true),
        }
    }
}

impl Default for AnsiPainter {
    fn default() -> Self {
        Self::new()
    }
}

impl TagPainter for AnsiPainter {
    fn paint(&self, severity: Severity, out: &mut String) {
        let style = match severity {
            Severity::Info => &self.info,
            Severity::Error => &self.error,
        };
        out.push_str(&style.apply_to(severity.tag()).to_string());
    }
}

/// Bare tags without escape codes.
#[derive(Debug, Clone, Copy, Default)]
pub struct PlainPainter;

impl TagPainter for PlainPainter {
    fn paint(&self, severity: Severity, out: &mut String) {
        out.push_str(severity.tag());
    }
}

/// Whether severity tags carry ANSI color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DisplayContext {
    /// Bare tags, for pipes and log collectors.
    Plain,
    /// Colored tags, for a terminal.
    #[default]
    Styled,
}

impl DisplayContext {
    /// Context for stdout under the current environment.
    #[must_use]
    pub fn detect() -> Self {
        if should_enable_color() {
            Self::Styled
        } else {
            Self::Plain
        }
    }
}

/// `LOGT_FORCE_COLOR` wins, then `LOGT_PLAIN` / `NO_COLOR` turn color off,
/// then `console` decides from `CLICOLOR` and whether stdout is a tty.
#[must_use]
pub fn should_enable_color() -> bool {
    let set = |key: &str| std::env::var_os(key).is_some();
    if set("LOGT_FORCE_COLOR") {
        return true;
    }
    if set("LOGT_PLAIN") || set("NO_COLOR") {
        return false;
    }
    console::colors_enabled()
}

/// Painter matching a display context.
#[must_use]
pub fn painter_for(context: DisplayContext) -> Box<dyn TagPainter> {
    match context {
        DisplayContext::Styled => Box::new(AnsiPainter::new()),
        DisplayContext::Plain => Box::new(PlainPainter),
    }
}
