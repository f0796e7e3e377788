//! Single-result viewer, used right after a checker run.

use super::terminal::{self, Screen};
use super::theme::Theme;
use super::{issue_breakdown, title_case};
use crate::error::Result;
use crate::models::CheckResult;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

const FOOTER: &str = "↑/↓: scroll | q: quit";

/// Render one result's summary followed by its full issue list.
pub fn render_result(result: &CheckResult, t: &Theme) -> String {
    let mut b = String::new();
    b.push_str(&t.paint(
        t.title,
        &format!(" Marvin - {} Results ", title_case(&result.checker)),
    ));
    b.push_str("\n\n");

    b.push_str(&t.paint(t.section, "Summary"));
    b.push('\n');
    let s = &result.summary;
    let rows = [
        ("Path:", result.path.clone()),
        ("Files Scanned:", s.total_files.to_string()),
        ("Files with Issues:", s.files_with_issues.to_string()),
        (
            "Total Issues:",
            issue_breakdown(t, s.total_issues, s.error_count, s.warning_count, s.info_count, "suggestions"),
        ),
    ];
    for (label, value) in rows {
        b.push_str(&format!("  {} {}\n", t.paint(t.label, label), t.paint(t.value, &value)));
    }

    b.push('\n');
    b.push_str(&t.paint(t.section, "Issues"));
    b.push('\n');
    if result.issues.is_empty() {
        b.push_str(&t.paint(t.info, "  ✓ No issues found!"));
        b.push('\n');
        return b;
    }
    for (i, is) in result.issues.iter().enumerate() {
        if i > 0 {
            b.push('\n');
        }
        let location = format!("{}:{}:{}", is.file, is.line, is.column);
        b.push_str(&format!("  {}\n", t.paint(t.location, &location)));
        b.push_str(&format!(
            "  {} {}\n",
            t.paint(t.severity(is.severity), &format!("[{}]", is.severity)),
            t.paint(t.rule, &is.rule)
        ));
        b.push_str(&format!("  {}\n", t.paint(t.message, &is.message)));
        if let Some(ctx) = is.context.as_deref().filter(|c| !c.is_empty()) {
            b.push_str(&format!("  {}\n", t.paint(t.context, &format!("Context: {}", ctx))));
        }
    }
    b
}

fn is_quit_key(key: &KeyEvent) -> bool {
    match key.code {
        KeyCode::Char('c') => key.modifiers.contains(KeyModifiers::CONTROL),
        KeyCode::Char('q') | KeyCode::Esc => true,
        _ => false,
    }
}

/// Show one result until the user quits.
pub fn show_result(result: &CheckResult, theme: &Theme) -> Result<()> {
    let content = format!("{}\n{}", render_result(result, theme), theme.paint(theme.footer, FOOTER));
    let mut screen = Screen::enter()?;
    loop {
        screen.draw(&content)?;
        if let Some(key) = terminal::next_key()? {
            if is_quit_key(&key) {
                break;
            }
            if let Some(delta) = terminal::scroll_for_key(&key) {
                screen.scroll_by(delta);
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aggregate::tests::{at, run};

    #[test]
    fn test_render_issue_blocks() {
        let mut r = run("vale", at(0), (1, 0, 1));
        r.issues[0].context = Some("teh".into());
        r.issues[1].context = Some(String::new());
        let out = render_result(&r, &Theme::plain());

        assert!(out.starts_with(" Marvin - Vale Results \n\n"));
        assert!(out.contains("  Total Issues: 2 (1 errors, 1 suggestions)\n"));
        assert!(out.contains("  docs/0.md:1:1\n  [error] rule\n  finding\n  Context: teh\n"));
        // Empty context prints no context line.
        assert!(out.ends_with("  docs/0.md:1:1\n  [info] rule\n  finding\n"));
    }

    #[test]
    fn test_render_without_issues() {
        let r = run("markdownlint", at(0), (0, 0, 0));
        let out = render_result(&r, &Theme::plain());
        assert!(out.contains("Total Issues: 0\n"));
        assert!(out.contains("✓ No issues found!"));
    }

    #[test]
    fn test_quit_keys() {
        assert!(is_quit_key(&KeyEvent::new(KeyCode::Char('q'), KeyModifiers::NONE)));
        assert!(is_quit_key(&KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL)));
        assert!(!is_quit_key(&KeyEvent::new(KeyCode::Enter, KeyModifiers::NONE)));
    }
}
