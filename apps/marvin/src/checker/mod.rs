//! Checker adapters.
//!
//! Each adapter wraps one external documentation linter and normalizes its
//! JSON output into a `CheckResult`. The tool-specific translation lives in a
//! pure `transform` function per adapter so it can be tested without the tool.

pub mod markdownlint;
pub mod vale;

pub use markdownlint::MarkdownlintChecker;
pub use vale::ValeChecker;

use crate::models::CheckResult;
use std::env;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CheckerError {
    #[error("{tool} not found in PATH")]
    NotFound { tool: String },

    #[error("failed to execute {tool}: {source}")]
    Exec {
        tool: String,
        #[source]
        source: io::Error,
    },

    #[error("{tool} execution failed: {message}")]
    ToolFailed { tool: String, message: String },

    #[error("{tool} produced no output")]
    NoOutput { tool: String },

    #[error("failed to parse {tool} output: {source}")]
    Parse {
        tool: String,
        #[source]
        source: serde_json::Error,
    },
}

#[derive(Debug, Clone, Default)]
/// Per-run options passed to `Checker::check`.
pub struct CheckOptions {
    pub path: PathBuf,
    /// Overrides the adapter's configured tool config file for this run.
    pub config_file: Option<String>,
    pub extra_args: Vec<String>,
}

/// A documentation checker backed by an external tool.
pub trait Checker {
    /// Stable identifier, also used as the record's `checker` field.
    fn name(&self) -> &'static str;

    /// Verify the underlying tool can be invoked.
    fn validate(&self) -> Result<(), CheckerError>;

    /// Run the tool once and return exactly one result.
    fn check(&self, opts: &CheckOptions) -> Result<CheckResult, CheckerError>;
}

/// Resolve `program` to an executable path.
///
/// Names containing a path separator are taken as-is; bare names are looked
/// up in each `PATH` entry.
pub fn find_executable(program: &str) -> Option<PathBuf> {
    let direct = Path::new(program);
    if direct.components().count() > 1 {
        return is_executable(direct).then(|| direct.to_path_buf());
    }
    let paths = env::var_os("PATH")?;
    for dir in env::split_paths(&paths) {
        for name in candidate_names(program) {
            let p = dir.join(&name);
            if is_executable(&p) {
                return Some(p);
            }
        }
    }
    None
}

#[cfg(windows)]
fn candidate_names(program: &str) -> Vec<String> {
    vec![
        program.to_string(),
        format!("{}.exe", program),
        format!("{}.cmd", program),
    ]
}

#[cfg(not(windows))]
fn candidate_names(program: &str) -> Vec<String> {
    vec![program.to_string()]
}

#[cfg(unix)]
fn is_executable(p: &Path) -> bool {
    use std::os::unix::fs::PermissionsExt;
    p.metadata()
        .map(|m| m.is_file() && m.permissions().mode() & 0o111 != 0)
        .unwrap_or(false)
}

#[cfg(not(unix))]
fn is_executable(p: &Path) -> bool {
    p.is_file()
}
