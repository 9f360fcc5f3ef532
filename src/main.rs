//! shcase harness entry point
//!
//! Linear flow: load the case file (fatal on any load error, before a single
//! test runs), build one trial per case, then hand control to libtest-mimic.
//! Its standard CLI (name filters, `--list`, verbosity) and exit-code
//! conventions apply unchanged. This is the only place the process exits.

use std::process;

use libtest_mimic::Arguments;

use shcase::{build_trials, case};

fn main() {
    // Initialize structured logging with env-based filter, defaulting to info
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .try_init();

    let mut args = Arguments::from_args();
    // Cases run sequentially on one thread; commands may assume they have the
    // filesystem and environment to themselves.
    args.test_threads = Some(1);

    let cases = match case::case_file_path().and_then(|path| case::load_cases(&path)) {
        Ok(cases) => cases,
        Err(e) => {
            eprintln!("shcase: {e}");
            process::exit(2);
        }
    };

    libtest_mimic::run(&args, build_trials(cases)).exit();
}
