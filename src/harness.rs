//! Trial construction and the per-case assertion
//!
//! Each case record becomes one [`libtest_mimic::Trial`] named `test_<name>`,
//! so the ambient framework discovers, filters, runs and reports every case
//! independently. The trial body runs the case's command with the fixed
//! timeout and asserts exact stdout equality; everything else (run order,
//! name filtering, verbosity, exit code) belongs to libtest-mimic.

use std::time::Duration;

use libtest_mimic::{Failed, Trial};

use crate::case::Case;
use crate::exec::{self, ExecError};

/// Fixed per-case timeout.
pub const CASE_TIMEOUT: Duration = Duration::from_secs(10);

/// Build one trial per case, in case order.
pub fn build_trials(cases: Vec<Case>) -> Vec<Trial> {
    cases
        .into_iter()
        .map(|case| {
            let name = format!("test_{}", case.name);
            Trial::test(name, move || check_case(&case, CASE_TIMEOUT))
        })
        .collect()
}

/// Run one case and assert its captured stdout equals the expectation.
///
/// Timeouts and spawn failures surface as failures of this case only; the
/// message distinguishes them from an output mismatch.
pub fn check_case(case: &Case, timeout: Duration) -> Result<(), Failed> {
    let output = match exec::run_shell(&case.command, timeout) {
        Ok(output) => output,
        Err(err @ ExecError::TimedOut { .. }) => {
            return Err(format!("{err}\ncommand: {}", case.command).into());
        }
        Err(err) => {
            return Err(format!("error: {err}\ncommand: {}", case.command).into());
        }
    };

    if output.stdout == case.stdout {
        return Ok(());
    }

    let mut msg = format!(
        "stdout mismatch\ncommand: {}\nexpected: {:?}\n  actual: {:?}",
        case.command, case.stdout, output.stdout
    );
    if !output.stderr.is_empty() {
        msg.push_str(&format!("\n  stderr: {:?}", output.stderr));
    }
    Err(msg.into())
}

// ============================================================================
// Tests
// ============================================================================
