//! The formatting engine.
//!
//! [`Output`] is the seam between the [`Logger`](crate::Logger) facade and
//! whatever turns arguments into a line. [`StdOutput`] is the standard
//! implementation:
//!
//! ```text
//! [info ] 2024/03/09 14:05:22 src/main.rs:42 main() listening on 0.0.0.0:80
//! └─tag─┘ └───timestamp─────┘ └──────caller──────┘ └─────message────────┘
//! ```
//!
//! # Concurrency
//!
//! Rendering is safe from any number of threads; the only shared resource is
//! the [line pool](crate::pool::line_pool). Flags and prefix are *not*
//! updated together: a reader racing [`set_flags`](Output::set_flags) and
//! [`set_prefix`](Output::set_prefix) may see the new flags with the old
//! prefix. Configure a logger from one place, before sharing it.
//!
//! The prefix is state only. It is reported by [`Output::prefix`] and never
//! written into a line.

use std::fmt::{self, Write as _};
use std::io::{self, Write};
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::{Mutex, PoisonError, RwLock};

use chrono::{DateTime, Local, Utc};

use crate::caller::{CallSite, Caller, base_name};
use crate::flags::Flags;
use crate::message;
use crate::pool::line_pool;
use crate::style::{DisplayContext, Severity, TagPainter, painter_for};
use crate::value::Value;

/// Something a [`Logger`](crate::Logger) can render lines into.
pub trait Output: Send + Sync {
    /// Renders and emits one line.
    ///
    /// An absent or empty `format` joins `args` with spaces. `site` is the
    /// position of the public call that produced the line; without one the
    /// caller segment is left out.
    fn render(&self, format: Option<&str>, args: &[&dyn Value], site: Option<CallSite<'_>>);

    /// Current flags.
    fn flags(&self) -> Flags;

    /// Current prefix.
    fn prefix(&self) -> String;

    /// Replaces the flags. Not coordinated with concurrent renders.
    fn set_flags(&self, flags: Flags);

    /// Replaces the prefix. Not coordinated with concurrent renders.
    fn set_prefix(&self, prefix: &str);
}

impl<O: Output + ?Sized> Output for std::sync::Arc<O> {
    fn render(&self, format: Option<&str>, args: &[&dyn Value], site: Option<CallSite<'_>>) {
        (**self).render(format, args, site);
    }

    fn flags(&self) -> Flags {
        (**self).flags()
    }

    fn prefix(&self) -> String {
        (**self).prefix()
    }

    fn set_flags(&self, flags: Flags) {
        (**self).set_flags(flags);
    }

    fn set_prefix(&self, prefix: &str) {
        (**self).set_prefix(prefix);
    }
}

enum Sink {
    Stdout,
    Writer(Mutex<Box<dyn Write + Send>>),
}

impl Sink {
    // One write_all per line so concurrent lines never interleave.
    fn write_line(&self, line: &[u8]) {
        match self {
            Self::Stdout => {
                let mut out = io::stdout().lock();
                let _ = out.write_all(line);
                let _ = out.flush();
            }
            Self::Writer(writer) => {
                let mut writer = writer.lock().unwrap_or_else(PoisonError::into_inner);
                let _ = writer.write_all(line);
                let _ = writer.flush();
            }
        }
    }
}

/// Standard [`Output`]: formats into a pooled buffer and writes to stdout
/// (or a supplied writer).
pub struct StdOutput {
    flags: AtomicU32,
    prefix: RwLock<String>,
    painter: Box<dyn TagPainter>,
    sink: Sink,
}

impl StdOutput {
    /// Stdout output with no flags, empty prefix and detected coloring.
    #[must_use]
    pub fn new() -> Self {
        Self::with_painter(painter_for(DisplayContext::detect()))
    }

    /// Stdout output using `painter` for severity tags.
    #[must_use]
    pub fn with_painter(painter: Box<dyn TagPainter>) -> Self {
        Self {
            flags: AtomicU32::new(Flags::empty().bits()),
            prefix: RwLock::new(String::new()),
            painter,
            sink: Sink::Stdout,
        }
    }

    /// Output writing to `writer` instead of stdout.
    #[must_use]
    pub fn with_writer<W: Write + Send + 'static>(writer: W, painter: Box<dyn TagPainter>) -> Self {
        Self {
            sink: Sink::Writer(Mutex::new(Box::new(writer))),
            ..Self::with_painter(painter)
        }
    }

    /// Formats one complete line into `out` as if rendered at `now`.
    pub fn format_line(
        &self,
        out: &mut String,
        format: Option<&str>,
        args: &[&dyn Value],
        site: Option<CallSite<'_>>,
        now: DateTime<Utc>,
    ) {
        let flags = self.flags();

        self.painter.paint(Severity::of(args), out);
        write_timestamp(out, flags, now);
        if let Some(site) = site.filter(|_| flags.wants_caller()) {
            let caller = if flags.contains(Flags::CALLER) {
                Caller::resolve(site)
            } else {
                Caller::at(site)
            };
            write_caller(out, flags, &caller);
        }
        out.push(' ');
        match format.filter(|f| !f.is_empty()) {
            Some(format) => message::write_formatted(out, format, args),
            None => message::write_joined(out, args),
        }
    }
}

impl Default for StdOutput {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for StdOutput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StdOutput")
            .field("flags", &self.flags())
            .field("prefix", &self.prefix())
            .field("stdout", &matches!(self.sink, Sink::Stdout))
            .finish_non_exhaustive()
    }
}

impl Output for StdOutput {
    fn render(&self, format: Option<&str>, args: &[&dyn Value], site: Option<CallSite<'_>>) {
        let mut line = line_pool().acquire();
        self.format_line(&mut line, format, args, site, Utc::now());
        self.sink.write_line(line.as_bytes());
    }

    fn flags(&self) -> Flags {
        Flags::from_bits_truncate(self.flags.load(Ordering::Relaxed))
    }

    fn prefix(&self) -> String {
        self.prefix
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    fn set_flags(&self, flags: Flags) {
        self.flags.store(flags.bits(), Ordering::Relaxed);
    }

    fn set_prefix(&self, prefix: &str) {
        *self.prefix.write().unwrap_or_else(PoisonError::into_inner) = prefix.to_string();
    }
}

/// Appends ` <timestamp>` when `flags` asks for date or time.
///
/// `TIME` wins over `MICROSECONDS`. Local time unless `UTC` is set.
pub fn write_timestamp(out: &mut String, flags: Flags, now: DateTime<Utc>) {
    if !flags.wants_timestamp() {
        return;
    }
    let mut layout = String::with_capacity(24);
    if flags.contains(Flags::DATE) {
        layout.push_str("%Y/%m/%d ");
    }
    if flags.contains(Flags::TIME) {
        layout.push_str("%H:%M:%S");
    } else if flags.contains(Flags::MICROSECONDS) {
        layout.push_str("%H:%M:%S%.6f");
    }
    let layout = layout.trim();

    if flags.contains(Flags::UTC) {
        let _ = write!(out, " {}", now.format(layout));
    } else {
        let _ = write!(out, " {}", now.with_timezone(&Local).format(layout));
    }
}

/// Appends the call-site segment selected by `flags`.
///
/// `CALLER` renders `dir/file.rs:NN function()`, `SHORT_FILE` the base name
/// only, `LONG_FILE` the full path with line.
pub fn write_caller(out: &mut String, flags: Flags, caller: &Caller) {
    if flags.contains(Flags::CALLER) {
        let _ = write!(out, " {}:{:02}", caller.file(), caller.line());
        if let Some(function) = caller.function() {
            let _ = write!(out, " {function}()");
        }
    } else if flags.contains(Flags::SHORT_FILE) {
        out.push(' ');
        out.push_str(base_name(caller.full_path()));
    } else if flags.contains(Flags::LONG_FILE) {
        let _ = write!(out, " {}:{:02}", caller.full_path(), caller.line());
    }
}
