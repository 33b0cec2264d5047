//! The `Logger` facade.
//!
//! Every method reduces to one [`Output::render`] call. Entry points are
//! `#[track_caller]`: the call site handed to the output is the line that
//! called the facade, however the facade is reached.
//!
//! # Example
//!
//! ```no_run
//! use logt::{Flags, Logger, StdOutput};
//!
//! let log = Logger::new(StdOutput::new(), "", Flags::STD_FLAGS | Flags::CALLER);
//! log.println(&[&"listening on", &8080]);
//!
//! let err = std::io::Error::other("connection reset");
//! log.printf("peer {} dropped: {}\n", &[&"10.0.0.7", &err]);
//! ```

use std::fmt;
use std::panic::Location;

use crate::caller::CallSite;
use crate::flags::Flags;
use crate::message;
use crate::output::Output;
use crate::value::{LINE_END, Value};

/// Leveled console logger.
///
/// Severity is not chosen by the caller: a line is `[error]` when any
/// argument is an error value and `[info ]` otherwise.
///
/// The setters change state shared with concurrent callers without
/// coordinating flags and prefix; see [`Output`].
pub struct Logger {
    out: Box<dyn Output>,
}

impl Logger {
    /// Creates a logger over `out`, applying `prefix` and `flags` to it.
    pub fn new(out: impl Output + 'static, prefix: &str, flags: Flags) -> Self {
        out.set_flags(flags);
        out.set_prefix(prefix);
        Self { out: Box::new(out) }
    }

    /// Logs `args` joined by spaces.
    #[track_caller]
    pub fn print(&self, args: &[&dyn Value]) {
        self.out.render(None, args, site());
    }

    /// Logs `args` substituted into `format`.
    #[track_caller]
    pub fn printf(&self, format: &str, args: &[&dyn Value]) {
        self.out.render(Some(format), args, site());
    }

    /// Logs `args` joined by spaces, followed by a newline.
    #[track_caller]
    pub fn println(&self, args: &[&dyn Value]) {
        self.out.render(None, &with_line_end(args), site());
    }

    /// [`print`](Self::print), then exits the process with status 1.
    #[track_caller]
    pub fn fatal(&self, args: &[&dyn Value]) -> ! {
        self.out.render(None, args, site());
        std::process::exit(1)
    }

    /// [`printf`](Self::printf), then exits the process with status 1.
    #[track_caller]
    pub fn fatalf(&self, format: &str, args: &[&dyn Value]) -> ! {
        self.out.render(Some(format), args, site());
        std::process::exit(1)
    }

    /// [`println`](Self::println), then exits the process with status 1.
    #[track_caller]
    pub fn fatalln(&self, args: &[&dyn Value]) -> ! {
        self.out.render(None, &with_line_end(args), site());
        std::process::exit(1)
    }

    /// [`print`](Self::print), then panics with the message text.
    ///
    /// The panic payload is a `String` holding the message without tag,
    /// timestamp or caller.
    #[track_caller]
    pub fn panic(&self, args: &[&dyn Value]) -> ! {
        self.out.render(None, args, site());
        std::panic::panic_any(message::render(None, args))
    }

    /// [`printf`](Self::printf), then panics with the message text.
    #[track_caller]
    pub fn panicf(&self, format: &str, args: &[&dyn Value]) -> ! {
        self.out.render(Some(format), args, site());
        std::panic::panic_any(message::render(Some(format), args))
    }

    /// [`println`](Self::println), then panics with the message text.
    #[track_caller]
    pub fn panicln(&self, args: &[&dyn Value]) -> ! {
        let args = with_line_end(args);
        self.out.render(None, &args, site());
        std::panic::panic_any(message::render(None, &args))
    }

    /// Current flags of the output.
    #[must_use]
    pub fn flags(&self) -> Flags {
        self.out.flags()
    }

    /// Current prefix of the output.
    #[must_use]
    pub fn prefix(&self) -> String {
        self.out.prefix()
    }

    /// Replaces the flags of the output.
    pub fn set_flags(&self, flags: Flags) {
        self.out.set_flags(flags);
    }

    /// Replaces the prefix of the output.
    pub fn set_prefix(&self, prefix: &str) {
        self.out.set_prefix(prefix);
    }

    /// Swaps the output. Flags and prefix come from the new output.
    pub fn set_output(&mut self, out: impl Output + 'static) {
        self.out = Box::new(out);
    }

    /// The output lines are rendered into.
    #[must_use]
    pub fn output(&self) -> &dyn Output {
        &*self.out
    }
}

impl fmt::Debug for Logger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Logger")
            .field("flags", &self.flags())
            .field("prefix", &self.prefix())
            .finish_non_exhaustive()
    }
}

#[track_caller]
fn site() -> Option<CallSite<'static>> {
    Some(CallSite::from(Location::caller()))
}

fn with_line_end<'a>(args: &[&'a dyn Value]) -> Vec<&'a dyn Value> {
    let mut all = Vec::with_capacity(args.len() + 1);
    all.extend_from_slice(args);
    all.push(&LINE_END);
    all
}
