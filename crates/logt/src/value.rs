//! Loggable argument values.
//!
//! Every argument handed to a [`Logger`](crate::Logger) is a `&dyn Value`.
//! The trait carries the two capabilities the formatting engine needs: a
//! textual form and the optional "is an error" query that drives severity
//! detection.
//!
//! Common std types implement [`Value`] directly. Anything else can be
//! adapted with [`display`], [`debug`] or [`error`]:
//!
//! ```
//! use logt::value::{debug, display, error};
//!
//! let path = std::path::Path::new("/etc/hosts");
//! let err = std::io::Error::other("permission denied");
//! let _args: [&dyn logt::Value; 3] = [&display(path.display()), &debug(&[1, 2]), &error(err)];
//! ```

use std::borrow::Cow;
use std::error::Error;
use std::fmt;

/// An argument that can be rendered into a log line.
pub trait Value {
    /// Writes the default textual form.
    fn fmt_value(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result;

    /// Writes the form used by `{:?}` directives.
    fn fmt_debug(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.fmt_value(f)
    }

    /// Returns the value as an error if it carries the error capability.
    ///
    /// A single argument answering `Some` tags the whole line `[error]`.
    fn as_error(&self) -> Option<&dyn Error> {
        None
    }

    /// Whether this is the line terminator appended by `println`.
    fn is_line_end(&self) -> bool {
        false
    }

    /// Name used in the placeholder when the value cannot be rendered.
    fn type_name(&self) -> &'static str {
        std::any::type_name::<Self>()
    }
}

impl<T: Value + ?Sized> Value for &T {
    fn fmt_value(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        (**self).fmt_value(f)
    }

    fn fmt_debug(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        (**self).fmt_debug(f)
    }

    fn as_error(&self) -> Option<&dyn Error> {
        (**self).as_error()
    }

    fn is_line_end(&self) -> bool {
        (**self).is_line_end()
    }

    fn type_name(&self) -> &'static str {
        (**self).type_name()
    }
}

macro_rules! impl_display_value {
    ($($ty:ty),* $(,)?) => {
        $(
            impl Value for $ty {
                fn fmt_value(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                    fmt::Display::fmt(self, f)
                }

                fn fmt_debug(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                    fmt::Debug::fmt(self, f)
                }
            }
        )*
    };
}

impl_display_value!(
    bool, char, i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize, f32, f64, str,
    String,
);

impl Value for Cow<'_, str> {
    fn fmt_value(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self)
    }

    fn fmt_debug(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self.as_ref(), f)
    }
}

impl Value for fmt::Arguments<'_> {
    fn fmt_value(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self, f)
    }
}

macro_rules! impl_error_value {
    ($($ty:ty),* $(,)?) => {
        $(
            impl Value for $ty {
                fn fmt_value(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                    fmt::Display::fmt(self, f)
                }

                fn fmt_debug(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                    fmt::Debug::fmt(self, f)
                }

                fn as_error(&self) -> Option<&dyn Error> {
                    Some(self)
                }
            }
        )*
    };
}

impl_error_value!(
    std::io::Error,
    fmt::Error,
    std::num::ParseIntError,
    std::num::ParseFloatError,
    std::num::TryFromIntError,
    std::str::ParseBoolError,
    std::str::Utf8Error,
    std::string::FromUtf8Error,
    std::env::VarError,
    std::sync::mpsc::RecvError,
    crate::flags::ParseFlagsError,
);

impl Value for dyn Error + '_ {
    fn fmt_value(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self, f)
    }

    fn fmt_debug(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }

    fn as_error(&self) -> Option<&dyn Error> {
        Some(self)
    }
}

impl Value for dyn Error + Send + Sync + '_ {
    fn fmt_value(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self, f)
    }

    fn fmt_debug(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }

    fn as_error(&self) -> Option<&dyn Error> {
        Some(self)
    }
}

impl<T: Value + ?Sized> Value for Box<T> {
    fn fmt_value(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        (**self).fmt_value(f)
    }

    fn fmt_debug(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        (**self).fmt_debug(f)
    }

    fn as_error(&self) -> Option<&dyn Error> {
        (**self).as_error()
    }

    fn type_name(&self) -> &'static str {
        (**self).type_name()
    }
}

/// Renders `None` as `<none>` and `Some(v)` as `v`.
impl<T: Value> Value for Option<T> {
    fn fmt_value(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Some(v) => v.fmt_value(f),
            None => f.write_str("<none>"),
        }
    }

    fn fmt_debug(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Some(v) => {
                f.write_str("Some(")?;
                v.fmt_debug(f)?;
                f.write_str(")")
            }
            None => f.write_str("None"),
        }
    }

    fn as_error(&self) -> Option<&dyn Error> {
        self.as_ref().and_then(Value::as_error)
    }
}

// ─────────────────────────────────────────────────────────
// Adapters
// ─────────────────────────────────────────────────────────

/// Wraps a [`fmt::Display`] type. See [`display`].
#[derive(Clone, Copy)]
pub struct DisplayValue<T>(T);

/// Wraps a [`fmt::Debug`] type. See [`debug`].
#[derive(Clone, Copy)]
pub struct DebugValue<T>(T);

/// Wraps an [`Error`] so the line is tagged `[error]`. See [`error`].
pub struct ErrorValue<E>(E);

/// Logs a value through its `Display` implementation.
pub fn display<T: fmt::Display>(value: T) -> DisplayValue<T> {
    DisplayValue(value)
}

/// Logs a value through its `Debug` implementation.
pub fn debug<T: fmt::Debug>(value: T) -> DebugValue<T> {
    DebugValue(value)
}

/// Logs an error value, marking the line as an error.
pub fn error<E: Error>(err: E) -> ErrorValue<E> {
    ErrorValue(err)
}

impl<T: fmt::Display> Value for DisplayValue<T> {
    fn fmt_value(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }

    fn type_name(&self) -> &'static str {
        std::any::type_name::<T>()
    }
}

impl<T: fmt::Debug> Value for DebugValue<T> {
    fn fmt_value(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&self.0, f)
    }

    fn type_name(&self) -> &'static str {
        std::any::type_name::<T>()
    }
}

impl<E: Error> Value for ErrorValue<E> {
    fn fmt_value(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }

    fn fmt_debug(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&self.0, f)
    }

    fn as_error(&self) -> Option<&dyn Error> {
        Some(&self.0)
    }

    fn type_name(&self) -> &'static str {
        std::any::type_name::<E>()
    }
}

/// The newline marker `println` appends to its arguments.
#[derive(Debug, Clone, Copy)]
pub struct LineEnd;

/// Shared instance of [`LineEnd`].
pub static LINE_END: LineEnd = LineEnd;

impl Value for LineEnd {
    fn fmt_value(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("\n")
    }

    fn is_line_end(&self) -> bool {
        true
    }
}

/// Adapts a `&dyn Value` to `Display` using its default form.
pub(crate) struct Shown<'a>(pub &'a dyn Value);

impl fmt::Display for Shown<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt_value(f)
    }
}

/// Adapts a `&dyn Value` to `Display` using its debug form.
pub(crate) struct Debugged<'a>(pub &'a dyn Value);

impl fmt::Display for Debugged<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt_debug(f)
    }
}
