//! Testing utilities for logt output
//!
//! Provides `TestOutput` for capturing and asserting on log lines in tests.

mod test_output;

pub use test_output::TestOutput;
