//! On-disk run history.
//!
//! Every checker run is saved as one pretty-printed JSON record under the
//! results directory. The reader walks the whole tree and tolerates foreign or
//! corrupt files: they are skipped and reported in `ScanReport::skipped`.
//! Records whose summary counters disagree with their issues are corrupt too.

use crate::error::Result;
use crate::models::CheckResult;
use glob::{glob, Pattern};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Default results directory, relative to the repository root.
pub const DEFAULT_RESULTS_DIR: &str = ".marvin/results";

#[derive(Debug, Default)]
/// Outcome of scanning a results directory.
pub struct ScanReport {
    pub results: Vec<CheckResult>,
    /// Candidate files that could not be read or decoded.
    pub skipped: Vec<PathBuf>,
}

/// Load all decodable records under `root`. A missing directory yields an
/// empty collection.
pub fn load_results(root: &Path) -> Vec<CheckResult> {
    scan_results(root).results
}

/// Scan `root` recursively for `*.json` records.
pub fn scan_results(root: &Path) -> ScanReport {
    let mut report = ScanReport::default();
    if !root.is_dir() {
        debug!(dir = %root.display(), "results directory not found");
        return report;
    }
    for path in candidate_files(root) {
        match read_record(&path) {
            Some(r) => report.results.push(r),
            None => {
                debug!(file = %path.display(), "skipping unreadable record");
                report.skipped.push(path);
            }
        }
    }
    debug!(
        loaded = report.results.len(),
        skipped = report.skipped.len(),
        "scanned results directory"
    );
    report
}

fn candidate_files(root: &Path) -> Vec<PathBuf> {
    let pattern = format!(
        "{}/**/*.json",
        Pattern::escape(&root.to_string_lossy())
    );
    let entries = match glob(&pattern) {
        Ok(e) => e,
        Err(e) => {
            warn!(error = %e, "invalid results directory pattern");
            return Vec::new();
        }
    };
    let mut files: Vec<PathBuf> = entries
        .flatten()
        .filter(|p| p.is_file())
        .collect();
    files.sort();
    files
}

/// A record whose counters disagree with its issue list counts as corrupt.
fn read_record(path: &Path) -> Option<CheckResult> {
    let data = fs::read_to_string(path).ok()?;
    let record: CheckResult = serde_json::from_str(&data).ok()?;
    record.is_consistent().then_some(record)
}

/// Persists results as timestamped JSON files.
pub struct ResultWriter {
    dir: PathBuf,
}

impl ResultWriter {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Write `result` and return the path of the new record. Never overwrites
    /// an existing record; a numeric suffix is added on name collisions.
    pub fn write(&self, result: &CheckResult) -> Result<PathBuf> {
        fs::create_dir_all(&self.dir)?;
        let path = self.output_path(result);
        let data = serde_json::to_string_pretty(result)?;
        fs::write(&path, data)?;
        debug!(file = %path.display(), checker = %result.checker, "saved result");
        Ok(path)
    }

    /// File name is `<checker>-<YYYYMMDD-HHMMSS>.json` from the run timestamp.
    pub fn output_path(&self, result: &CheckResult) -> PathBuf {
        let stamp = result.timestamp.format("%Y%m%d-%H%M%S").to_string();
        let base = format!("{}-{}", sanitize(&result.checker), stamp);
        let mut path = self.dir.join(format!("{}.json", base));
        let mut n = 2;
        while path.exists() {
            path = self.dir.join(format!("{}-{}.json", base, n));
            n += 1;
        }
        path
    }
}

fn sanitize(name: &str) -> String {
    name.chars()
        .map(|c| if c.is_ascii_alphanumeric() || c == '-' || c == '_' { c } else { '_' })
        .collect()
}
