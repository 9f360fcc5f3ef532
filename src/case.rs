//! Case file loading
//!
//! The harness is driven by a YAML case file: a sequence of mappings, each
//! with the required string keys `name`, `command` and `stdout`. The file is
//! named `test.yml` and lives beside the harness executable, so the case data
//! travels with the harness no matter where it is invoked from. The
//! `SHCASE_FILE` environment variable overrides the path outright.
//!
//! Loading is fail-fast: any IO or parse problem aborts startup before a
//! single test runs. There is no partial registration from a malformed file.

use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

/// Fixed name of the case file, resolved beside the executable.
pub const CASE_FILE_NAME: &str = "test.yml";

/// Environment variable that overrides the case file location.
pub const CASE_FILE_ENV: &str = "SHCASE_FILE";

/// Errors that occur while locating or loading the case file.
#[derive(Debug, Error)]
pub enum CaseError {
    #[error("cannot locate harness executable: {0}")]
    Locate(#[source] std::io::Error),

    #[error("cannot read case file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("cannot parse case file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },
}

/// One declarative test definition.
///
/// `stdout` is compared byte-for-byte against the command's captured standard
/// output, trailing newlines included, so YAML double-quoted scalars
/// (`"hi\n"`) are the usual way to spell expectations.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct Case {
    /// Unique identifier fragment; the registered test is named `test_<name>`.
    pub name: String,
    /// Shell command line, run as `sh -c "<command>"`.
    pub command: String,
    /// Exact expected standard-output text.
    pub stdout: String,
}

/// Resolve the case file path.
///
/// `SHCASE_FILE` wins if set; otherwise the file is `test.yml` in the
/// directory of the running executable.
pub fn case_file_path() -> Result<PathBuf, CaseError> {
    if let Some(path) = env::var_os(CASE_FILE_ENV) {
        return Ok(PathBuf::from(path));
    }
    let exe = env::current_exe().map_err(CaseError::Locate)?;
    Ok(case_file_beside(&exe))
}

/// The default case file location for a given executable path.
pub fn case_file_beside(exe: &Path) -> PathBuf {
    exe.parent().unwrap_or_else(|| Path::new(".")).join(CASE_FILE_NAME)
}

/// Load and parse the case file at `path`.
///
/// Returns the cases in file order, with duplicate names collapsed (see
/// [`dedupe_cases`]).
pub fn load_cases(path: &Path) -> Result<Vec<Case>, CaseError> {
    tracing::debug!(path = %path.display(), "loading case file");

    let text = fs::read_to_string(path).map_err(|source| CaseError::Read {
        path: path.to_path_buf(),
        source,
    })?;

    let cases = parse_cases(&text).map_err(|source| CaseError::Parse {
        path: path.to_path_buf(),
        source,
    })?;

    tracing::debug!(count = cases.len(), "loaded cases");
    Ok(cases)
}

/// Parse case file text into an ordered, de-duplicated case list.
pub fn parse_cases(text: &str) -> Result<Vec<Case>, serde_yaml::Error> {
    let cases: Vec<Case> = serde_yaml::from_str(text)?;
    Ok(dedupe_cases(cases))
}

/// Collapse duplicate case names: the LAST case with a given name wins, so
/// exactly one test is registered per name. Each overwrite is logged loudly;
/// duplicate names in a case file are almost certainly a mistake.
///
/// The surviving case keeps the position of the first occurrence of its name,
/// preserving file order for everything else.
fn dedupe_cases(cases: Vec<Case>) -> Vec<Case> {
    let mut out: Vec<Case> = Vec::with_capacity(cases.len());
    for case in cases {
        if let Some(existing) = out.iter_mut().find(|c| c.name == case.name) {
            tracing::warn!(
                name = %case.name,
                "duplicate case name: later definition replaces the earlier one"
            );
            *existing = case;
        } else {
            out.push(case);
        }
    }
    out
}

// ============================================================================
// Tests
// ============================================================================
