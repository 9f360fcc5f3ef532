#![forbid(unsafe_code)]
//! shcase — a data-driven shell-command test harness
//!
//! shcase reads a declarative YAML case list (`test.yml`, beside the harness
//! binary) and registers one test per case with libtest-mimic. Each case
//! names a shell command and the exact text it must write to stdout; each
//! registered test runs the command with a 10-second timeout and asserts
//! byte-for-byte equality.
//!
//! ## Panic policy
//!
//! Production code uses `Result` with `?`; `.unwrap()` and `.expect()` are
//! acceptable in test code only.

pub mod case;
pub mod exec;
pub mod harness;

pub use case::{Case, CaseError, load_cases};
pub use exec::{ExecError, ShellOutput, run_shell};
pub use harness::{CASE_TIMEOUT, build_trials, check_case};
