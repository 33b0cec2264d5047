//! Caller resolution against real stack frames.
//!
//! These run in the default test profile, which keeps debug info, so the
//! function name of the calling frame is expected to resolve.

use logt::testing::TestOutput;
use logt::{CallSite, Caller, Flags};

#[test]
fn caller_here_names_enclosing_function() {
    let caller = Caller::here();
    let line = line!() - 1;

    assert_eq!(caller.function(), Some("caller_here_names_enclosing_function"));
    assert_eq!(caller.file(), "tests/caller.rs");
    assert!(caller.full_path().ends_with("caller.rs"));
    assert_eq!(caller.line(), line);
}

#[test]
fn call_site_is_the_line_that_called() {
    let site = CallSite::here();
    assert_eq!(site.line(), line!() - 1);
    assert!(site.file().ends_with("tests/caller.rs"));
}

#[test]
fn caller_flag_renders_file_line_and_function() {
    let tc = TestOutput::new();
    let log = tc.logger("", Flags::CALLER);

    log.println(&[&"probe"]);
    let line = line!() - 1;

    assert_eq!(
        tc.output(),
        vec![format!(
            "[info ] tests/caller.rs:{line} caller_flag_renders_file_line_and_function() probe"
        )]
    );
}

#[test]
fn caller_inside_helper_reports_helper() {
    fn open_pool(log: &logt::Logger) {
        log.println(&[&"pool open"]);
    }

    let tc = TestOutput::new();
    let log = tc.logger("", Flags::CALLER);
    open_pool(&log);

    tc.assert_line_contains("tests/caller.rs:");
    tc.assert_line_contains("open_pool() pool open");
}

#[test]
fn caller_inside_closure_reports_enclosing_function() {
    let tc = TestOutput::new();
    let log = tc.logger("", Flags::CALLER);
    let run = || log.println(&[&"from closure"]);
    run();

    tc.assert_line_contains("caller_inside_closure_reports_enclosing_function() from closure");
}

#[test]
fn short_and_long_file_skip_the_lookup() {
    let tc = TestOutput::new();
    let log = tc.logger("", Flags::SHORT_FILE);
    log.println(&[&"short"]);
    log.set_flags(Flags::LONG_FILE);
    log.println(&[&"long"]);
    let long_line = line!() - 1;

    let lines = tc.output();
    assert_eq!(lines[0], "[info ] caller.rs short");
    assert!(lines[1].starts_with("[info ] "));
    assert!(lines[1].ends_with(&format!("tests/caller.rs:{long_line} long")));
    assert!(!lines[1].contains("()"));
}

#[test]
fn caller_wins_over_file_flags() {
    let tc = TestOutput::new();
    let log = tc.logger("", Flags::CALLER | Flags::SHORT_FILE | Flags::LONG_FILE);
    log.println(&[&"x"]);

    tc.assert_line_contains("tests/caller.rs:");
    tc.assert_line_contains("caller_wins_over_file_flags() x");
}
