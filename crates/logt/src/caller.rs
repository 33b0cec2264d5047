//! Call-site resolution.
//!
//! Public entry points are `#[track_caller]` and hand their
//! [`Location`](std::panic::Location) down as a [`CallSite`]. File and line
//! therefore never depend on how many frames sit between the user and the
//! engine. Only the function name needs the stack: the frame whose debug
//! info points at the recorded file and line is the caller.

use std::panic::Location;
use std::path::Path;

/// Source position of the code that asked for a log line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CallSite<'a> {
    file: &'a str,
    line: u32,
}

impl<'a> CallSite<'a> {
    /// Creates a call site from a file path and line.
    #[must_use]
    pub const fn new(file: &'a str, line: u32) -> Self {
        Self { file, line }
    }

    /// The call site of whoever called the enclosing `#[track_caller]` chain.
    #[track_caller]
    #[must_use]
    pub fn here() -> CallSite<'static> {
        CallSite::from(Location::caller())
    }

    /// Path as recorded by the compiler.
    #[must_use]
    pub const fn file(&self) -> &'a str {
        self.file
    }

    /// One-based line number.
    #[must_use]
    pub const fn line(&self) -> u32 {
        self.line
    }
}

impl From<&'static Location<'static>> for CallSite<'static> {
    fn from(location: &'static Location<'static>) -> Self {
        Self::new(location.file(), location.line())
    }
}

/// A resolved caller frame. Built per call, never cached.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Caller {
    function: Option<String>,
    file: String,
    line: u32,
}

impl Caller {
    /// Builds a frame from already known parts.
    #[must_use]
    pub fn new(function: Option<&str>, file: &str, line: u32) -> Self {
        Self {
            function: function.map(str::to_string),
            file: file.to_string(),
            line,
        }
    }

    /// Frame for `site` without looking up the function name.
    #[must_use]
    pub fn at(site: CallSite<'_>) -> Self {
        Self::new(None, site.file(), site.line())
    }

    /// Resolves the function enclosing `site` by walking the current stack.
    ///
    /// File and line always come from `site`. The function name is `None`
    /// when no frame with matching debug info is found (stripped binaries,
    /// inlined frames).
    #[must_use]
    pub fn resolve(site: CallSite<'_>) -> Self {
        Self {
            function: lookup_function(site),
            file: site.file().to_string(),
            line: site.line(),
        }
    }

    /// Resolves the frame of the code calling this function.
    #[track_caller]
    #[must_use]
    pub fn here() -> Self {
        Self::resolve(CallSite::here())
    }

    /// Short function name, e.g. `connect` for `net::pool::connect`.
    #[must_use]
    pub fn function(&self) -> Option<&str> {
        self.function.as_deref()
    }

    /// Parent directory and base name, e.g. `net/pool.rs`.
    #[must_use]
    pub fn file(&self) -> String {
        short_path(&self.file)
    }

    /// The path exactly as recorded by the compiler.
    #[must_use]
    pub fn full_path(&self) -> &str {
        &self.file
    }

    /// One-based line number.
    #[must_use]
    pub fn line(&self) -> u32 {
        self.line
    }
}

fn lookup_function(site: CallSite<'_>) -> Option<String> {
    let wanted = Path::new(site.file());
    let mut exact = None;
    let mut same_file = None;

    backtrace::trace(|frame| {
        backtrace::resolve_frame(frame, |symbol| {
            if exact.is_some() {
                return;
            }
            let (Some(path), Some(name)) = (symbol.filename(), symbol.name()) else {
                return;
            };
            if !path.ends_with(wanted) {
                return;
            }
            let name = format!("{name:#}");
            if symbol.lineno() == Some(site.line()) {
                exact = Some(name);
            } else if same_file.is_none() {
                same_file = Some(name);
            }
        });
        exact.is_none()
    });

    exact
        .or(same_file)
        .map(|qualified| function_name(&qualified).to_string())
}

/// Extracts the short function name from a qualified path.
///
/// Trailing `{{closure}}` segments are dropped first, then the text after
/// the last `::` is taken. Without a separator, or with nothing after it,
/// the closure-free identifier is returned as is.
#[must_use]
pub fn function_name(qualified: &str) -> &str {
    let mut trimmed = qualified;
    while let Some(rest) = trimmed.strip_suffix("::{{closure}}") {
        trimmed = rest;
    }
    match trimmed.rfind("::") {
        Some(ix) if ix > 0 && ix + 2 < trimmed.len() => &trimmed[ix + 2..],
        _ => trimmed,
    }
}

/// Keeps the immediate parent directory and the base name of `path`.
#[must_use]
pub fn short_path(path: &str) -> String {
    let path = Path::new(path);
    let Some(base) = path.file_name() else {
        return path.display().to_string();
    };
    match path.parent().and_then(Path::file_name) {
        Some(dir) => Path::new(dir).join(base).display().to_string(),
        None => Path::new(base).display().to_string(),
    }
}

/// Base name of `path`.
#[must_use]
pub fn base_name(path: &str) -> &str {
    Path::new(path)
        .file_name()
        .and_then(|name| name.to_str())
        .unwrap_or(path)
}
