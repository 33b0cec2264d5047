//! Message rendering.
//!
//! Both entry points are total: a value whose `Display` implementation
//! returns an error or panics is replaced by `<unprintable TYPE>`, and a
//! malformed format string is copied through rather than rejected.

use std::fmt::Write as _;
use std::panic::{self, AssertUnwindSafe};

use crate::value::{Debugged, Shown, Value};

/// Rendered in place of a directive that has no matching argument.
pub const MISSING: &str = "<missing>";

/// Appends `args` separated by single spaces.
///
/// No space is inserted before the line-end marker appended by `println`.
pub fn write_joined(out: &mut String, args: &[&dyn Value]) {
    for (i, arg) in args.iter().enumerate() {
        if i > 0 && !arg.is_line_end() {
            out.push(' ');
        }
        write_value(out, *arg, false);
    }
}

/// Appends `format` with its directives replaced by `args`.
///
/// Supported directives: `{}` (next argument), `{N}` (argument `N`), and the
/// debug forms `{:?}` / `{N:?}`. `{{` and `}}` are literal braces. Unused
/// arguments are ignored.
pub fn write_formatted(out: &mut String, format: &str, args: &[&dyn Value]) {
    let mut next = 0;
    let mut rest = format;

    while let Some(ix) = rest.find(['{', '}']) {
        out.push_str(&rest[..ix]);
        let tail = &rest[ix..];

        if tail.starts_with("{{") || tail.starts_with("}}") {
            out.push_str(&tail[..1]);
            rest = &tail[2..];
            continue;
        }
        if tail.starts_with('}') {
            out.push('}');
            rest = &tail[1..];
            continue;
        }

        let Some(end) = tail[1..].find('}') else {
            // unterminated
            out.push_str(tail);
            return;
        };
        let body = &tail[1..=end];
        match Directive::parse(body) {
            Some(directive) => {
                let index = directive.index.unwrap_or_else(|| {
                    let i = next;
                    next += 1;
                    i
                });
                match args.get(index) {
                    Some(arg) => write_value(out, *arg, directive.debug),
                    None => out.push_str(MISSING),
                }
            }
            None => out.push_str(&tail[..end + 2]),
        }
        rest = &tail[end + 2..];
    }
    out.push_str(rest);
}

/// Renders the message part of a line into a fresh string.
#[must_use]
pub fn render(format: Option<&str>, args: &[&dyn Value]) -> String {
    let mut out = String::new();
    match format.filter(|f| !f.is_empty()) {
        Some(format) => write_formatted(&mut out, format, args),
        None => write_joined(&mut out, args),
    }
    out
}

struct Directive {
    index: Option<usize>,
    debug: bool,
}

impl Directive {
    fn parse(body: &str) -> Option<Self> {
        let (position, style) = body.split_once(':').unwrap_or((body, ""));
        let index = if position.is_empty() {
            None
        } else {
            Some(position.parse::<usize>().ok()?)
        };
        let debug = match style {
            "" => false,
            "?" => true,
            _ => return None,
        };
        Some(Self { index, debug })
    }
}

fn write_value(out: &mut String, value: &dyn Value, debug: bool) {
    let mark = out.len();
    let written = panic::catch_unwind(AssertUnwindSafe(|| {
        if debug {
            write!(out, "{}", Debugged(value))
        } else {
            write!(out, "{}", Shown(value))
        }
    }));
    if !matches!(written, Ok(Ok(()))) {
        out.truncate(mark);
        let _ = write!(out, "<unprintable {}>", value.type_name());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::LINE_END;
    use std::fmt;

    struct Refuses;

    impl Value for Refuses {
        fn fmt_value(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str("half")?;
            Err(fmt::Error)
        }
    }

    struct Explodes;

    impl Value for Explodes {
        fn fmt_value(&self, _f: &mut fmt::Formatter<'_>) -> fmt::Result {
            panic!("no text for you")
        }
    }

    #[test]
    fn joined_uses_single_spaces() {
        let boom = std::io::Error::other("BOOM");
        let args: [&dyn Value; 3] = [&"count", &14, &boom];
        assert_eq!(render(None, &args), "count 14 BOOM");
    }

    #[test]
    fn joined_line_end_is_tight() {
        let args: [&dyn Value; 2] = [&"data is ok", &LINE_END];
        assert_eq!(render(None, &args), "data is ok\n");
    }

    #[test]
    fn empty_format_means_joined() {
        let args: [&dyn Value; 2] = [&1, &2];
        assert_eq!(render(Some(""), &args), "1 2");
    }

    #[test]
    fn sequential_directives() {
        let args: [&dyn Value; 2] = [&10, &"BOOM"];
        assert_eq!(render(Some("{} {}\n"), &args), "10 BOOM\n");
    }

    #[test]
    fn positional_directives_do_not_advance() {
        let args: [&dyn Value; 2] = [&"a", &"b"];
        assert_eq!(render(Some("{1}{}{0}{}"), &args), "baab");
    }

    #[test]
    fn debug_directive() {
        let args: [&dyn Value; 1] = [&"quoted"];
        assert_eq!(render(Some("got {:?}"), &args), "got \"quoted\"");
        assert_eq!(render(Some("got {0:?}"), &args), "got \"quoted\"");
    }

    #[test]
    fn escaped_braces() {
        let args: [&dyn Value; 1] = [&3];
        assert_eq!(render(Some("{{{}}}"), &args), "{3}");
        assert_eq!(render(Some("a } b"), &args), "a } b");
    }

    #[test]
    fn missing_arguments_render_placeholder() {
        let args: [&dyn Value; 1] = [&1];
        assert_eq!(render(Some("{} {} {5}"), &args), "1 <missing> <missing>");
    }

    #[test]
    fn extra_arguments_are_ignored() {
        let args: [&dyn Value; 3] = [&1, &2, &3];
        assert_eq!(render(Some("only {}"), &args), "only 1");
    }

    #[test]
    fn unknown_directives_are_copied() {
        let args: [&dyn Value; 1] = [&1];
        assert_eq!(render(Some("{:>5} {name} {}"), &args), "{:>5} {name} 1");
    }

    #[test]
    fn unterminated_brace_is_copied() {
        let args: [&dyn Value; 1] = [&1];
        assert_eq!(render(Some("{} {oops"), &args), "1 {oops");
    }

    #[test]
    fn failing_display_gets_placeholder() {
        let args: [&dyn Value; 2] = [&Refuses, &"after"];
        let out = render(None, &args);
        assert!(out.starts_with("<unprintable "));
        assert!(out.contains("Refuses>"));
        assert!(out.ends_with(" after"));
        assert!(!out.contains("half"));
    }

    #[test]
    fn panicking_display_gets_placeholder() {
        let args: [&dyn Value; 1] = [&Explodes];
        let out = render(Some("value={}"), &args);
        assert!(out.starts_with("value=<unprintable "));
        assert!(out.contains("Explodes>"));
    }
}
