//! TestOutput for capturing log lines in tests
//!
//! Provides a [`StdOutput`] that writes into memory instead of stdout.

use std::io::Write;
use std::sync::{Arc, Mutex};

use strip_ansi_escapes::strip;

use crate::flags::Flags;
use crate::logger::Logger;
use crate::output::StdOutput;
use crate::style::{AnsiPainter, PlainPainter, Severity, TagPainter};

/// An output that captures everything rendered into it
///
/// Use [`logger()`](Self::logger) or [`std_output()`](Self::std_output) to
/// log into it, then read lines back with `output()` or
/// [`lines_tagged()`](Self::lines_tagged), or assert on them with
/// [`assert_logged()`](Self::assert_logged).
pub struct TestOutput {
    inner: Arc<StdOutput>,
    buffer: Arc<Mutex<Vec<u8>>>,
    styled: bool,
}

impl TestOutput {
    /// Create a test output with plain tags
    #[must_use]
    pub fn new() -> Self {
        Self::new_inner(false)
    }

    /// Create a test output with ANSI colored tags
    #[must_use]
    pub fn new_styled() -> Self {
        Self::new_inner(true)
    }

    fn new_inner(styled: bool) -> Self {
        let buffer = Arc::new(Mutex::new(Vec::new()));
        let writer = BufferWriter(buffer.clone());
        let painter: Box<dyn TagPainter> = if styled {
            Box::new(AnsiPainter::new())
        } else {
            Box::new(PlainPainter)
        };

        Self {
            inner: Arc::new(StdOutput::with_writer(writer, painter)),
            buffer,
            styled,
        }
    }

    /// Get the underlying output
    #[must_use]
    pub fn std_output(&self) -> Arc<StdOutput> {
        self.inner.clone()
    }

    /// Create a logger writing into this output
    #[must_use]
    pub fn logger(&self, prefix: &str, flags: Flags) -> Logger {
        Logger::new(self.std_output(), prefix, flags)
    }

    /// Get all captured lines (ANSI codes stripped)
    #[must_use]
    pub fn output(&self) -> Vec<String> {
        self.output_string().lines().map(String::from).collect()
    }

    /// Get all captured lines (with ANSI codes)
    #[must_use]
    pub fn raw_output(&self) -> Vec<String> {
        self.raw_string().lines().map(String::from).collect()
    }

    /// Get the captured text (ANSI codes stripped)
    #[must_use]
    pub fn output_string(&self) -> String {
        let bytes = self.buffer.lock().map(|b| strip(&*b)).unwrap_or_default();
        String::from_utf8_lossy(&bytes).into_owned()
    }

    /// Get the captured text exactly as written
    #[must_use]
    pub fn raw_string(&self) -> String {
        self.buffer
            .lock()
            .map(|b| String::from_utf8_lossy(&b).into_owned())
            .unwrap_or_default()
    }

    /// Captured lines carrying `severity`, with the tag and its trailing
    /// space removed
    #[must_use]
    pub fn lines_tagged(&self, severity: Severity) -> Vec<String> {
        let tag = severity.tag();
        self.output()
            .into_iter()
            .filter_map(|line| {
                let rest = line.strip_prefix(tag)?;
                Some(rest.strip_prefix(' ').unwrap_or(rest).to_string())
            })
            .collect()
    }

    /// Whether any captured line contains `needle`
    #[must_use]
    pub fn contains(&self, needle: &str) -> bool {
        self.output().iter().any(|line| line.contains(needle))
    }

    /// Whether any captured line matches the regex `pattern`
    ///
    /// An invalid pattern matches nothing.
    #[must_use]
    pub fn any_line_matches(&self, pattern: &str) -> bool {
        let Ok(re) = regex::Regex::new(pattern) else {
            return false;
        };
        self.output().iter().any(|line| re.is_match(line))
    }

    /// Assert that some captured line contains `needle`
    ///
    /// # Panics
    ///
    /// Panics listing the captured lines when none contains `needle`.
    pub fn assert_line_contains(&self, needle: &str) {
        let lines = self.output();
        assert!(
            lines.iter().any(|line| line.contains(needle)),
            "no logged line contains {needle:?}; lines: {lines:#?}"
        );
    }

    /// Assert that a line tagged `severity` ends with `message`
    ///
    /// Headers between the tag and the message (timestamp, caller) are not
    /// compared.
    ///
    /// # Panics
    ///
    /// Panics listing the captured lines when no such line exists.
    pub fn assert_logged(&self, severity: Severity, message: &str) {
        let tagged = self.lines_tagged(severity);
        assert!(
            tagged.iter().any(|rest| rest.ends_with(message)),
            "no {} line ends with {message:?}; lines: {:#?}",
            severity.tag(),
            self.output()
        );
    }

    /// Clear the buffer
    pub fn clear(&self) {
        if let Ok(mut buf) = self.buffer.lock() {
            buf.clear();
        }
    }

    /// Whether tags are rendered with ANSI colors
    #[must_use]
    pub fn is_styled(&self) -> bool {
        self.styled
    }
}

impl Default for TestOutput {
    fn default() -> Self {
        Self::new()
    }
}

impl Clone for TestOutput {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
            buffer: self.buffer.clone(),
            styled: self.styled,
        }
    }
}

impl std::fmt::Debug for TestOutput {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TestOutput")
            .field("is_styled", &self.is_styled())
            .field("line_count", &self.output().len())
            .finish()
    }
}

/// Writer that captures to a buffer
struct BufferWriter(Arc<Mutex<Vec<u8>>>);

impl Write for BufferWriter {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        if let Ok(mut buffer) = self.0.lock() {
            buffer.extend_from_slice(buf);
        }
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_is_plain() {
        let tc = TestOutput::new();
        assert!(!tc.is_styled());
        tc.logger("", Flags::empty()).println(&[&"hello"]);
        assert!(!tc.raw_string().contains('\u{1b}'));
    }

    #[test]
    fn test_new_styled_keeps_escapes_in_raw_output() {
        let tc = TestOutput::new_styled();
        tc.logger("", Flags::empty()).println(&[&"hello"]);
        assert!(tc.raw_string().contains('\u{1b}'));
        assert_eq!(tc.output(), vec!["[info ] hello"]);
    }

    #[test]
    fn test_lines_tagged_splits_by_severity() {
        let tc = TestOutput::new_styled();
        let log = tc.logger("", Flags::empty());
        log.println(&[&"cache warm"]);
        log.println(&[&"flush failed:", &std::io::Error::other("EIO")]);

        assert_eq!(tc.lines_tagged(Severity::Info), vec!["cache warm"]);
        assert_eq!(tc.lines_tagged(Severity::Error), vec!["flush failed: EIO"]);
    }

    #[test]
    fn test_assert_logged_ignores_headers() {
        let tc = TestOutput::new();
        tc.logger("", Flags::TIME | Flags::SHORT_FILE)
            .println(&[&"replica", &2, &"caught up"]);
        tc.assert_logged(Severity::Info, "replica 2 caught up");
    }

    #[test]
    #[should_panic(expected = "no [error] line")]
    fn test_assert_logged_checks_severity() {
        let tc = TestOutput::new();
        tc.logger("", Flags::empty()).println(&[&"disk full"]);
        tc.assert_logged(Severity::Error, "disk full");
    }

    #[test]
    fn test_any_line_matches() {
        let tc = TestOutput::new();
        tc.logger("", Flags::empty()).println(&[&"code:", &42]);
        assert!(tc.any_line_matches(r"^\[info \] code: \d+$"));
        assert!(!tc.any_line_matches(r"code: [a-z]+"));
        assert!(!tc.any_line_matches(r"("));
    }

    #[test]
    fn test_clear_and_shared_buffer() {
        let tc = TestOutput::new();
        let other = tc.clone();
        tc.logger("", Flags::empty()).println(&[&"Some output"]);
        assert!(other.contains("Some output"));

        other.clear();
        assert!(tc.output().is_empty());
    }
}
