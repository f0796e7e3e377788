//! Non-interactive output for checker runs and the dashboard.
//!
//! Supports `plain` text and `json`. The JSON form of a single run is the
//! record schema itself, so piping `--json` output into the results
//! directory yields a loadable record.

use crate::models::{CheckResult, DashboardData};
use crate::tui::{issue_breakdown, DashboardView, NavEvent, Navigator, Theme, ViewMode};
use chrono::Utc;
use serde_json::Value as JsonVal;
use std::io::{self, Write};

const RULE_HEAVY: &str = "═══════════════════════════════════════════════════════════";
const RULE_LIGHT: &str = "───────────────────────────────────────────────────────────";

/// Write one run as plain text.
pub fn write_plain<W: Write>(result: &CheckResult, w: &mut W) -> io::Result<()> {
    let s = &result.summary;
    writeln!(w, "Marvin - {} Results", result.checker)?;
    writeln!(w, "{}\n", RULE_HEAVY)?;

    writeln!(w, "Summary:")?;
    writeln!(w, "  Path: {}", result.path)?;
    writeln!(w, "  Files Scanned: {}", s.total_files)?;
    writeln!(w, "  Files with Issues: {}", s.files_with_issues)?;
    let plain = Theme::plain();
    writeln!(
        w,
        "  Total Issues: {}\n",
        issue_breakdown(
            &plain,
            s.total_issues,
            s.error_count,
            s.warning_count,
            s.info_count,
            "suggestions"
        )
    )?;

    if result.issues.is_empty() {
        writeln!(w, "No issues found! ✓\n")?;
        return Ok(());
    }
    writeln!(w, "Issues:")?;
    writeln!(w, "{}\n", RULE_LIGHT)?;
    for is in &result.issues {
        writeln!(w, "{}:{}:{}", is.file, is.line, is.column)?;
        writeln!(w, "[{}] {}", is.severity, is.rule)?;
        writeln!(w, "{}", is.message)?;
        if let Some(ctx) = is.context.as_deref().filter(|c| !c.is_empty()) {
            writeln!(w, "Context: {}", ctx)?;
        }
        writeln!(w)?;
    }
    Ok(())
}

/// Compose the JSON for one run (pure) for testing/snapshot purposes.
pub fn compose_result_json(result: &CheckResult) -> serde_json::Result<JsonVal> {
    serde_json::to_value(result)
}

/// Write one run as pretty JSON, the same text the results directory holds.
pub fn write_json<W: Write>(result: &CheckResult, w: &mut W) -> io::Result<()> {
    let s = serde_json::to_string_pretty(result).map_err(io::Error::from)?;
    writeln!(w, "{}", s)
}

/// Print one run to stdout in the requested mode (`json` or plain text).
pub fn print_result(result: &CheckResult, output: &str) -> io::Result<()> {
    let mut out = io::stdout().lock();
    match output {
        "json" => write_json(result, &mut out),
        _ => write_plain(result, &mut out),
    }
}

/// Plain dashboard: the "All" tab followed by every checker's latest details.
pub fn compose_dashboard_text(data: &DashboardData, theme: &Theme) -> String {
    let view = DashboardView::new(data, theme);
    let now = Utc::now();
    let mut nav = Navigator::new();
    let mut b = view.render(&nav, now);
    for _ in &data.checkers {
        nav.handle(NavEvent::NextTab, data.checkers.len());
        if nav.view_mode() == ViewMode::Summary {
            nav.handle(NavEvent::ToggleMode, data.checkers.len());
        }
        b.push('\n');
        b.push_str(&view.render(&nav, now));
    }
    b
}

/// Print the dashboard aggregate to stdout in the requested mode.
pub fn print_dashboard(data: &DashboardData, output: &str, theme: &Theme) -> io::Result<()> {
    let mut out = io::stdout().lock();
    match output {
        "json" => {
            let s = serde_json::to_string_pretty(data).map_err(io::Error::from)?;
            writeln!(out, "{}", s)
        }
        _ => write!(out, "{}", compose_dashboard_text(data, theme)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aggregate::aggregate;
    use crate::aggregate::tests::{at, run};

    #[test]
    fn test_write_plain_lists_issues() {
        let mut r = run("vale", at(0), (1, 1, 0));
        r.issues[1].context = Some("very".into());
        let mut buf: Vec<u8> = Vec::new();
        write_plain(&r, &mut buf).unwrap();
        let text = String::from_utf8(buf).unwrap();
        assert!(text.starts_with("Marvin - vale Results\n"));
        assert!(text.contains("  Total Issues: 2 (1 errors, 1 warnings)\n"));
        assert!(text.contains("docs/0.md:1:1\n[error] rule\nfinding\n\n"));
        assert!(text.contains("[warning] rule\nfinding\nContext: very\n"));
    }

    #[test]
    fn test_write_plain_without_issues() {
        let r = run("markdownlint", at(0), (0, 0, 0));
        let mut buf: Vec<u8> = Vec::new();
        write_plain(&r, &mut buf).unwrap();
        let text = String::from_utf8(buf).unwrap();
        assert!(text.contains("  Total Issues: 0\n"));
        assert!(text.contains("No issues found! ✓"));
        assert!(!text.contains("Issues:\n"));
    }

    #[test]
    fn test_compose_result_json_shape() {
        let r = run("vale", at(0), (0, 1, 0));
        let out = compose_result_json(&r).unwrap();
        assert_eq!(out["checker"], "vale");
        assert_eq!(out["summary"]["warning_count"], 1);
        assert_eq!(out["issues"][0]["severity"], "warning");
        assert!(out["issues"][0].get("context").is_none());
        assert!(out["metadata"].is_object());
    }

    #[test]
    fn test_write_json_is_a_loadable_record() {
        let mut r = run("markdownlint", at(0), (1, 0, 0));
        r.metadata.insert("fix_enabled".into(), serde_json::json!(false));
        let mut buf: Vec<u8> = Vec::new();
        write_json(&r, &mut buf).unwrap();
        let text = String::from_utf8(buf).unwrap();
        assert!(text.ends_with("}\n"));
        assert_ne!(text.trim(), "null");
        let back: CheckResult = serde_json::from_str(&text).unwrap();
        assert_eq!(back, r);
        assert_eq!(serde_json::from_str::<JsonVal>(&text).unwrap(), compose_result_json(&r).unwrap());
    }

    #[test]
    fn test_dashboard_text_includes_every_checker_details() {
        let d = aggregate(vec![
            run("vale", at(0), (1, 0, 0)),
            run("markdownlint", at(1), (0, 1, 0)),
        ]);
        let text = compose_dashboard_text(&d, &Theme::plain());
        assert!(text.contains("Overall Summary"));
        assert!(text.contains(" Marvin - Markdownlint Results "));
        assert!(text.contains(" Marvin - Vale Results "));
        assert!(text.contains("[error] rule"));
    }
}
