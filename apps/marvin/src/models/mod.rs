//! Shared data models for checker runs and the dashboard aggregate.
//!
//! The JSON shape of `CheckResult` is the on-disk record format: field names
//! and nesting must stay stable so older runs keep loading.

pub mod dashboard;

pub use dashboard::{CheckerStats, DashboardData};

use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value as Json};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
/// Normalized severity of a single finding.
pub enum Severity {
    Error,
    Warning,
    #[serde(alias = "suggestion")]
    Info,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Error => "error",
            Severity::Warning => "warning",
            Severity::Info => "info",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
/// A single finding reported by a checker.
pub struct Issue {
    pub file: String,
    /// 1-based; 0 when the tool did not report one.
    pub line: usize,
    /// 0 when unknown.
    pub column: usize,
    pub severity: Severity,
    pub message: String,
    pub rule: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub context: Option<String>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
/// Counters for one run.
pub struct Summary {
    pub total_files: usize,
    pub files_with_issues: usize,
    pub total_issues: usize,
    pub error_count: usize,
    pub warning_count: usize,
    pub info_count: usize,
}

impl Summary {
    /// Build counters from an issue list so that the severity partition
    /// always adds up to `issues.len()`.
    pub fn from_issues(total_files: usize, files_with_issues: usize, issues: &[Issue]) -> Self {
        let mut s = Summary {
            total_files,
            files_with_issues,
            total_issues: issues.len(),
            ..Summary::default()
        };
        for is in issues {
            match is.severity {
                Severity::Error => s.error_count += 1,
                Severity::Warning => s.warning_count += 1,
                Severity::Info => s.info_count += 1,
            }
        }
        s
    }

    /// Add another summary's counters into this one. Counters saturate.
    pub fn accumulate(&mut self, other: &Summary) {
        self.total_files = self.total_files.saturating_add(other.total_files);
        self.files_with_issues = self.files_with_issues.saturating_add(other.files_with_issues);
        self.total_issues = self.total_issues.saturating_add(other.total_issues);
        self.error_count = self.error_count.saturating_add(other.error_count);
        self.warning_count = self.warning_count.saturating_add(other.warning_count);
        self.info_count = self.info_count.saturating_add(other.info_count);
    }

    /// Whether the severity counts add up to `total_issues` and that total
    /// matches the number of issues actually listed.
    pub fn is_consistent_with(&self, issue_count: usize) -> bool {
        let partition = self
            .error_count
            .checked_add(self.warning_count)
            .and_then(|n| n.checked_add(self.info_count));
        partition == Some(self.total_issues) && self.total_issues == issue_count
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
/// One complete run of one checker. Never mutated after construction.
pub struct CheckResult {
    pub checker: String,
    pub timestamp: DateTime<FixedOffset>,
    pub path: String,
    pub summary: Summary,
    #[serde(default, deserialize_with = "null_as_default")]
    pub issues: Vec<Issue>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub metadata: Map<String, Json>,
}

impl CheckResult {
    /// Summary counters agree with the issue list.
    pub fn is_consistent(&self) -> bool {
        self.summary.is_consistent_with(self.issues.len())
    }
}

/// Older writers emit `null` for empty collections.
fn null_as_default<'de, D, T>(de: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(de)?.unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn issue(sev: Severity, context: Option<&str>) -> Issue {
        Issue {
            file: "docs/a.md".into(),
            line: 3,
            column: 7,
            severity: sev,
            message: "Avoid 'very'".into(),
            rule: "Vale.Weasel".into(),
            context: context.map(String::from),
        }
    }

    #[test]
    fn test_summary_from_issues_partitions_by_severity() {
        let issues = vec![
            issue(Severity::Error, None),
            issue(Severity::Warning, None),
            issue(Severity::Warning, None),
            issue(Severity::Info, None),
        ];
        let s = Summary::from_issues(4, 1, &issues);
        assert_eq!(s.total_issues, 4);
        assert_eq!(s.error_count + s.warning_count + s.info_count, s.total_issues);
        assert_eq!(s.warning_count, 2);
        assert_eq!(s.total_files, 4);
        assert_eq!(s.files_with_issues, 1);
    }

    #[test]
    fn test_summary_consistency_check() {
        let issues = vec![issue(Severity::Error, None), issue(Severity::Info, None)];
        let s = Summary::from_issues(1, 1, &issues);
        assert!(s.is_consistent_with(2));
        assert!(!s.is_consistent_with(3));

        let overflowing = Summary {
            total_issues: usize::MAX,
            error_count: usize::MAX,
            warning_count: 1,
            ..Summary::default()
        };
        assert!(!overflowing.is_consistent_with(0));

        let mut acc = Summary {
            error_count: usize::MAX,
            ..Summary::default()
        };
        acc.accumulate(&s);
        assert_eq!(acc.error_count, usize::MAX);
        assert_eq!(acc.total_issues, 2);
    }

    #[test]
    fn test_context_empty_and_absent_stay_distinct() {
        let absent = serde_json::to_value(issue(Severity::Info, None)).unwrap();
        assert!(absent.get("context").is_none());
        let empty = serde_json::to_value(issue(Severity::Info, Some(""))).unwrap();
        assert_eq!(empty["context"], "");
        let back: Issue = serde_json::from_value(empty).unwrap();
        assert_eq!(back.context.as_deref(), Some(""));
    }

    #[test]
    fn test_decode_record_with_offset_nanos_and_nulls() {
        let raw = r#"{
  "checker": "markdownlint",
  "timestamp": "2025-11-02T14:05:09.123456789+01:00",
  "path": "docs/",
  "summary": {"total_files": 1, "files_with_issues": 0, "total_issues": 0,
              "error_count": 0, "warning_count": 0, "info_count": 0},
  "issues": null,
  "metadata": null
}"#;
        let r: CheckResult = serde_json::from_str(raw).unwrap();
        assert!(r.issues.is_empty());
        assert!(r.metadata.is_empty());
        assert_eq!(r.timestamp.offset().local_minus_utc(), 3600);

        let again: CheckResult =
            serde_json::from_str(&serde_json::to_string(&r).unwrap()).unwrap();
        assert_eq!(again, r);
    }

    #[test]
    fn test_suggestion_reads_as_info() {
        let raw = r#"{"file":"a.md","line":1,"column":0,"severity":"suggestion",
                      "message":"m","rule":"r"}"#;
        let is: Issue = serde_json::from_str(raw).unwrap();
        assert_eq!(is.severity, Severity::Info);
        assert_eq!(serde_json::to_value(&is).unwrap()["severity"], "info");
    }

    #[test]
    fn test_unknown_severity_is_rejected() {
        let raw = r#"{"file":"a.md","line":1,"column":0,"severity":"fatal",
                      "message":"m","rule":"r"}"#;
        assert!(serde_json::from_str::<Issue>(raw).is_err());
    }
}
