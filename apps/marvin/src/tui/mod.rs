//! Terminal presentation: the interactive dashboard, the single-result
//! viewer, and the theme they share.

pub mod dashboard;
pub mod terminal;
pub mod theme;
pub mod viewer;

pub use dashboard::{show_dashboard, DashboardView, NavEvent, Navigator, ViewMode};
pub use theme::Theme;
pub use viewer::{render_result, show_result};

/// Capitalize the first letter of each whitespace-separated word.
pub fn title_case(s: &str) -> String {
    s.split(' ')
        .map(|w| {
            let mut chars = w.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// `"<total>"`, followed by the non-zero severity counts in parentheses,
/// e.g. `3 (1 errors, 2 warnings)`.
pub fn issue_breakdown(
    t: &Theme,
    total: usize,
    errors: usize,
    warnings: usize,
    infos: usize,
    info_label: &str,
) -> String {
    let mut parts: Vec<String> = Vec::new();
    if errors > 0 {
        parts.push(t.paint(t.error, &format!("{} errors", errors)));
    }
    if warnings > 0 {
        parts.push(t.paint(t.warning, &format!("{} warnings", warnings)));
    }
    if infos > 0 {
        parts.push(t.paint(t.info, &format!("{} {}", infos, info_label)));
    }
    if parts.is_empty() {
        total.to_string()
    } else {
        format!("{} ({})", total, parts.join(", "))
    }
}
