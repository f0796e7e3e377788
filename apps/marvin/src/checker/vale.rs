//! Vale prose linter adapter.

use super::{find_executable, CheckOptions, Checker, CheckerError};
use crate::models::{CheckResult, Issue, Severity, Summary};
use chrono::{DateTime, FixedOffset, Local};
use serde::Deserialize;
use serde_json::{json, Map};
use std::collections::BTreeMap;
use std::path::PathBuf;
use std::process::Command;
use tracing::debug;

const TOOL: &str = "vale";

/// Vale's `--output=JSON` shape: file path to alerts.
pub type ValeOutput = BTreeMap<String, Vec<ValeAlert>>;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ValeAlert {
    #[serde(default)]
    pub check: String,
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub line: usize,
    #[serde(default)]
    pub severity: String,
    #[serde(default)]
    pub span: Vec<usize>,
    #[serde(default, rename = "Match")]
    pub matched: String,
}

pub struct ValeChecker {
    config_file: Option<String>,
    min_alert_level: String,
    glob: Option<String>,
    binary: String,
}

impl ValeChecker {
    pub fn new(
        config_file: Option<String>,
        min_alert_level: Option<String>,
        glob: Option<String>,
        binary: Option<String>,
    ) -> Self {
        Self {
            config_file,
            min_alert_level: min_alert_level
                .filter(|s| !s.is_empty())
                .unwrap_or_else(|| "suggestion".to_string()),
            glob: glob.filter(|s| !s.is_empty()),
            binary: binary.unwrap_or_else(|| TOOL.to_string()),
        }
    }

    fn resolve_binary(&self) -> Result<PathBuf, CheckerError> {
        find_executable(&self.binary).ok_or_else(|| CheckerError::NotFound {
            tool: TOOL.to_string(),
        })
    }

    fn build_args(&self, opts: &CheckOptions, config: Option<&str>) -> Vec<String> {
        let mut args = vec!["--output=JSON".to_string()];
        if let Some(c) = config {
            args.push(format!("--config={}", c));
        }
        args.push(format!("--minAlertLevel={}", self.min_alert_level));
        if let Some(g) = &self.glob {
            args.push(format!("--glob={}", g));
        }
        args.push(opts.path.to_string_lossy().to_string());
        args.extend(opts.extra_args.iter().cloned());
        args
    }
}

impl Checker for ValeChecker {
    fn name(&self) -> &'static str {
        TOOL
    }

    fn validate(&self) -> Result<(), CheckerError> {
        self.resolve_binary().map(|_| ())
    }

    fn check(&self, opts: &CheckOptions) -> Result<CheckResult, CheckerError> {
        let bin = self.resolve_binary()?;
        let config = opts.config_file.as_deref().or(self.config_file.as_deref());
        let args = self.build_args(opts, config);
        debug!(bin = %bin.display(), ?args, "running vale");
        let out = Command::new(&bin)
            .args(&args)
            .output()
            .map_err(|source| CheckerError::Exec {
                tool: TOOL.to_string(),
                source,
            })?;
        // Non-zero exit with a clean stderr only means alerts were found.
        if !out.status.success() && !out.stderr.is_empty() {
            return Err(CheckerError::ToolFailed {
                tool: TOOL.to_string(),
                message: String::from_utf8_lossy(&out.stderr).trim().to_string(),
            });
        }
        if out.stdout.iter().all(u8::is_ascii_whitespace) {
            return Err(CheckerError::NoOutput {
                tool: TOOL.to_string(),
            });
        }
        let parsed: ValeOutput =
            serde_json::from_slice(&out.stdout).map_err(|source| CheckerError::Parse {
                tool: TOOL.to_string(),
                source,
            })?;
        Ok(transform(
            parsed,
            &opts.path.to_string_lossy(),
            config,
            &self.min_alert_level,
            Local::now().fixed_offset(),
        ))
    }
}

/// Map Vale severities onto the common scale.
pub fn normalize_severity(severity: &str) -> Severity {
    match severity {
        "error" => Severity::Error,
        "warning" => Severity::Warning,
        _ => Severity::Info,
    }
}

/// Convert Vale output into a normalized result.
pub fn transform(
    output: ValeOutput,
    path: &str,
    config_file: Option<&str>,
    min_alert_level: &str,
    timestamp: DateTime<FixedOffset>,
) -> CheckResult {
    let total_files = output.len();
    let mut files_with_issues = 0usize;
    let mut issues: Vec<Issue> = Vec::new();
    for (file, alerts) in output {
        if !alerts.is_empty() {
            files_with_issues += 1;
        }
        for alert in alerts {
            issues.push(Issue {
                file: file.clone(),
                line: alert.line,
                column: alert.span.first().copied().unwrap_or(0),
                severity: normalize_severity(&alert.severity),
                message: alert.message,
                rule: if alert.check.is_empty() {
                    "unknown".to_string()
                } else {
                    alert.check
                },
                context: Some(alert.matched).filter(|m| !m.is_empty()),
            });
        }
    }
    let mut metadata = Map::new();
    metadata.insert("config_file".into(), json!(config_file.unwrap_or("")));
    metadata.insert("min_alert_level".into(), json!(min_alert_level));
    CheckResult {
        checker: TOOL.to_string(),
        timestamp,
        path: path.to_string(),
        summary: Summary::from_issues(total_files, files_with_issues, &issues),
        issues,
        metadata,
    }
}
