//! markdownlint adapter. Works with `markdownlint-cli2`, `markdownlint-cli`,
//! or a plain `markdownlint` binary, whichever is found first.

use super::{find_executable, CheckOptions, Checker, CheckerError};
use crate::models::{CheckResult, Issue, Severity, Summary};
use chrono::{DateTime, FixedOffset, Local};
use serde::Deserialize;
use serde_json::{json, Map};
use std::collections::HashSet;
use std::path::PathBuf;
use std::process::Command;
use tracing::debug;

const TOOL: &str = "markdownlint";
const BINARIES: [&str; 3] = ["markdownlint-cli2", "markdownlint-cli", "markdownlint"];

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MarkdownlintIssue {
    pub file_name: String,
    #[serde(default)]
    pub line_number: usize,
    #[serde(default)]
    pub rule_names: Vec<String>,
    #[serde(default)]
    pub rule_description: String,
    #[serde(default)]
    pub error_detail: Option<String>,
    #[serde(default)]
    pub error_context: Option<String>,
    #[serde(default)]
    pub error_range: Option<Vec<usize>>,
    #[serde(default)]
    pub severity: Option<String>,
}

pub struct MarkdownlintChecker {
    config_file: Option<String>,
    fix: bool,
    binary: Option<String>,
}

impl MarkdownlintChecker {
    pub fn new(config_file: Option<String>, fix: bool, binary: Option<String>) -> Self {
        Self {
            config_file,
            fix,
            binary,
        }
    }

    fn resolve_binary(&self) -> Result<PathBuf, CheckerError> {
        let found = match &self.binary {
            Some(b) => find_executable(b),
            None => BINARIES.iter().find_map(|b| find_executable(b)),
        };
        found.ok_or_else(|| CheckerError::NotFound {
            tool: TOOL.to_string(),
        })
    }

    fn build_args(&self, opts: &CheckOptions, config: Option<&str>) -> Vec<String> {
        let mut args: Vec<String> = Vec::new();
        if let Some(c) = config {
            args.push("--config".into());
            args.push(c.to_string());
        }
        if self.fix {
            args.push("--fix".into());
        }
        args.push(opts.path.to_string_lossy().to_string());
        args.push("--json".into());
        args.extend(opts.extra_args.iter().cloned());
        args
    }
}

impl Checker for MarkdownlintChecker {
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
        debug!(bin = %bin.display(), ?args, "running markdownlint");
        // Exit status is non-zero whenever issues are found; only the output matters.
        let out = Command::new(&bin)
            .args(&args)
            .output()
            .map_err(|source| CheckerError::Exec {
                tool: TOOL.to_string(),
                source,
            })?;
        // JSON goes to stderr; stdout is the fallback.
        let raw = if out.stderr.iter().all(u8::is_ascii_whitespace) {
            out.stdout
        } else {
            out.stderr
        };
        let text = String::from_utf8_lossy(&raw);
        let trimmed = text.trim();
        if trimmed.is_empty() {
            return Err(CheckerError::NoOutput {
                tool: TOOL.to_string(),
            });
        }
        if !trimmed.starts_with('[') && !trimmed.starts_with('{') {
            return Err(CheckerError::ToolFailed {
                tool: TOOL.to_string(),
                message: trimmed.to_string(),
            });
        }
        let parsed: Vec<MarkdownlintIssue> =
            serde_json::from_str(trimmed).map_err(|source| CheckerError::Parse {
                tool: TOOL.to_string(),
                source,
            })?;
        Ok(transform(
            parsed,
            &opts.path.to_string_lossy(),
            config,
            self.fix,
            Local::now().fixed_offset(),
        ))
    }
}

/// Convert markdownlint's issue array into a normalized result.
pub fn transform(
    output: Vec<MarkdownlintIssue>,
    path: &str,
    config_file: Option<&str>,
    fix: bool,
    timestamp: DateTime<FixedOffset>,
) -> CheckResult {
    let mut files: HashSet<String> = HashSet::new();
    let mut issues: Vec<Issue> = Vec::with_capacity(output.len());
    for is in output {
        files.insert(is.file_name.clone());
        let mut message = is.rule_description;
        if let Some(detail) = is.error_detail.filter(|d| !d.is_empty()) {
            message = format!("{}: {}", message, detail);
        }
        let severity = match is.severity.as_deref() {
            Some("error") => Severity::Error,
            _ => Severity::Warning,
        };
        issues.push(Issue {
            file: is.file_name,
            line: is.line_number,
            column: is
                .error_range
                .as_ref()
                .and_then(|r| r.first().copied())
                .unwrap_or(0),
            severity,
            message,
            rule: is
                .rule_names
                .into_iter()
                .next()
                .unwrap_or_else(|| "unknown".to_string()),
            context: is.error_context,
        });
    }
    let mut metadata = Map::new();
    metadata.insert("config_file".into(), json!(config_file.unwrap_or("")));
    metadata.insert("fix_enabled".into(), json!(fix));
    CheckResult {
        checker: TOOL.to_string(),
        timestamp,
        path: path.to_string(),
        // markdownlint only reports files that have issues.
        summary: Summary::from_issues(files.len(), files.len(), &issues),
        issues,
        metadata,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aggregate::tests::at;

    const SAMPLE: &str = r#"[
  {"fileName": "docs/intro.md", "lineNumber": 1, "ruleNames": ["MD041", "first-line-heading"],
   "ruleDescription": "First line in a file should be a top-level heading",
   "ruleInformation": "https://example.invalid/md041", "errorDetail": null,
   "errorContext": "Intro text", "errorRange": null, "fixInfo": null},
  {"fileName": "docs/intro.md", "lineNumber": 7, "ruleNames": ["MD013", "line-length"],
   "ruleDescription": "Line length", "errorDetail": "Expected: 80; Actual: 112",
   "errorContext": null, "errorRange": [81, 32], "fixInfo": null, "severity": "error"},
  {"fileName": "docs/setup.md", "lineNumber": 3, "ruleNames": [],
   "ruleDescription": "Trailing spaces", "errorDetail": "",
   "errorRange": [5, 2]}
]"#;

    #[test]
    fn test_transform_maps_issues() {
        let out: Vec<MarkdownlintIssue> = serde_json::from_str(SAMPLE).unwrap();
        let r = transform(out, "docs/", None, true, at(0));

        assert_eq!(r.checker, "markdownlint");
        assert_eq!(r.summary.total_files, 2);
        assert_eq!(r.summary.files_with_issues, 2);
        assert_eq!(r.summary.total_issues, 3);
        assert_eq!((r.summary.error_count, r.summary.warning_count), (1, 2));

        assert_eq!(r.issues[0].rule, "MD041");
        assert_eq!(r.issues[0].column, 0);
        assert_eq!(r.issues[0].context.as_deref(), Some("Intro text"));
        assert_eq!(r.issues[1].message, "Line length: Expected: 80; Actual: 112");
        assert_eq!(r.issues[1].column, 81);
        assert_eq!(r.issues[1].severity, Severity::Error);
        assert_eq!(r.issues[2].rule, "unknown");
        assert_eq!(r.issues[2].message, "Trailing spaces");
        assert_eq!(r.metadata["fix_enabled"], true);
    }

    #[test]
    fn test_build_args_order() {
        let c = MarkdownlintChecker::new(Some(".markdownlint.yaml".into()), true, None);
        let opts = CheckOptions {
            path: PathBuf::from("docs/"),
            ..CheckOptions::default()
        };
        let args = c.build_args(&opts, c.config_file.as_deref());
        assert_eq!(
            args,
            vec!["--config", ".markdownlint.yaml", "--fix", "docs/", "--json"]
        );
    }
}
