//! Interactive dashboard over the run history.
//!
//! Navigation is a small state machine (`Navigator`) kept apart from the
//! aggregate it browses; rendering is a pure function of navigator state,
//! `DashboardData`, a `Theme`, and the current time.
//!
//! Tab 0 is the synthetic "All" tab. Tabs `1..=N` map onto the checkers in
//! `DashboardData::checkers` order.

use super::terminal::{self, Screen};
use super::theme::Theme;
use super::viewer::render_result;
use super::{issue_breakdown, title_case};
use crate::error::Result;
use crate::models::{CheckerStats, DashboardData};
use chrono::{DateTime, Datelike, FixedOffset, Utc};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

const FOOTER: &str = "Tab/Shift+Tab: switch tabs | Enter: toggle view | ↑/↓: scroll | q: quit";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ViewMode {
    #[default]
    Summary,
    Details,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavEvent {
    NextTab,
    PrevTab,
    ToggleMode,
    Quit,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
/// Selected tab and view mode. Starts on the "All" tab in summary mode.
pub struct Navigator {
    selected_tab: usize,
    view_mode: ViewMode,
    quitting: bool,
}

impl Navigator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn selected_tab(&self) -> usize {
        self.selected_tab
    }

    pub fn view_mode(&self) -> ViewMode {
        self.view_mode
    }

    pub fn is_quitting(&self) -> bool {
        self.quitting
    }

    /// Apply one event for a dashboard with `checkers` checker tabs.
    /// Events after `Quit` are ignored.
    pub fn handle(&mut self, event: NavEvent, checkers: usize) {
        if self.quitting {
            return;
        }
        let tabs = checkers + 1;
        match event {
            NavEvent::NextTab => self.selected_tab = (self.selected_tab + 1) % tabs,
            NavEvent::PrevTab => self.selected_tab = (self.selected_tab + tabs - 1) % tabs,
            NavEvent::ToggleMode => {
                // The "All" tab has no details projection.
                if self.selected_tab != 0 {
                    self.view_mode = match self.view_mode {
                        ViewMode::Summary => ViewMode::Details,
                        ViewMode::Details => ViewMode::Summary,
                    };
                }
            }
            NavEvent::Quit => self.quitting = true,
        }
    }
}

/// Translate a key press into a navigation event.
pub fn event_for_key(key: &KeyEvent) -> Option<NavEvent> {
    match key.code {
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => Some(NavEvent::Quit),
        KeyCode::Char('q') | KeyCode::Esc => Some(NavEvent::Quit),
        KeyCode::Tab | KeyCode::Right => Some(NavEvent::NextTab),
        KeyCode::BackTab | KeyCode::Left => Some(NavEvent::PrevTab),
        KeyCode::Enter => Some(NavEvent::ToggleMode),
        _ => None,
    }
}

/// Human-readable age of `ts` relative to `now`.
pub fn relative_time(ts: Option<DateTime<FixedOffset>>, now: DateTime<Utc>) -> String {
    let ts = match ts {
        // Year 1 is the zero instant written by older tooling.
        Some(t) if t.year() > 1 => t,
        _ => return "never".to_string(),
    };
    let elapsed = now.signed_duration_since(ts);
    let minutes = elapsed.num_minutes();
    let hours = elapsed.num_hours();
    let days = elapsed.num_days();
    if minutes < 1 {
        "just now".to_string()
    } else if hours < 1 {
        plural(minutes, "minute")
    } else if days < 1 {
        plural(hours, "hour")
    } else {
        plural(days, "day")
    }
}

fn plural(n: i64, unit: &str) -> String {
    if n == 1 {
        format!("1 {} ago", unit)
    } else {
        format!("{} {}s ago", n, unit)
    }
}

/// Renders dashboard frames for one aggregate.
pub struct DashboardView<'a> {
    data: &'a DashboardData,
    theme: &'a Theme,
}

impl<'a> DashboardView<'a> {
    pub fn new(data: &'a DashboardData, theme: &'a Theme) -> Self {
        Self { data, theme }
    }

    /// Body for the current state; empty once the navigator has quit.
    pub fn render(&self, nav: &Navigator, now: DateTime<Utc>) -> String {
        if nav.is_quitting() {
            return String::new();
        }
        let t = self.theme;
        let mut b = String::new();
        b.push_str(&t.paint(t.title, " Marvin Dashboard - Documentation QA Results "));
        b.push_str("\n\n");
        b.push_str(&self.render_tabs(nav.selected_tab()));
        b.push_str("\n\n");

        match nav.selected_tab().checked_sub(1) {
            None => b.push_str(&self.render_overall(now)),
            Some(idx) => {
                if let Some(checker) = self.data.checkers.get(idx) {
                    match nav.view_mode() {
                        ViewMode::Summary => b.push_str(&self.render_checker_summary(checker, now)),
                        ViewMode::Details => b.push_str(&self.render_checker_details(checker)),
                    }
                }
            }
        }
        b
    }

    /// Full frame including the key-hint footer.
    pub fn frame(&self, nav: &Navigator, now: DateTime<Utc>) -> String {
        if nav.is_quitting() {
            return String::new();
        }
        let t = self.theme;
        format!("{}\n{}", self.render(nav, now), t.paint(t.footer, FOOTER))
    }

    fn render_tabs(&self, selected: usize) -> String {
        let t = self.theme;
        let mut tabs: Vec<String> = Vec::with_capacity(self.data.checkers.len() + 1);
        let names = std::iter::once("All".to_string())
            .chain(self.data.checkers.iter().map(|c| title_case(&c.name)));
        for (i, name) in names.enumerate() {
            if i == selected {
                tabs.push(t.paint(t.selected_tab, &format!("[{}]", name)));
            } else {
                tabs.push(t.paint(t.tab, &format!(" {} ", name)));
            }
        }
        tabs.join(" ")
    }

    fn line(&self, label: &str, value: &str) -> String {
        let t = self.theme;
        format!("  {} {}\n", t.paint(t.label, label), t.paint(t.value, value))
    }

    fn render_overall(&self, now: DateTime<Utc>) -> String {
        let t = self.theme;
        let overall = self.data.overall_summary();
        let mut b = String::new();
        b.push_str(&t.paint(t.section, "Overall Summary"));
        b.push('\n');
        b.push_str(&self.line("Total Checks Run:", &self.data.total_checks.to_string()));
        b.push_str(&self.line(
            "Last Check:",
            &relative_time(self.data.latest_check_time(), now),
        ));
        b.push_str(&self.line("Total Files:", &overall.total_files.to_string()));
        b.push_str(&self.line("Files with Issues:", &overall.files_with_issues.to_string()));
        b.push_str(&self.line(
            "Total Issues:",
            &issue_breakdown(
                t,
                overall.total_issues,
                overall.error_count,
                overall.warning_count,
                overall.info_count,
                "info",
            ),
        ));

        b.push('\n');
        b.push_str(&t.paint(t.section, "Checkers"));
        b.push_str("\n\n");
        for checker in &self.data.checkers {
            b.push_str(&self.render_card(checker, now));
            b.push('\n');
        }
        b
    }

    fn render_card(&self, checker: &CheckerStats, now: DateTime<Utc>) -> String {
        let t = self.theme;
        let mut b = String::new();
        b.push_str(&format!("  {}\n", t.paint(t.card_header, &title_case(&checker.name))));
        b.push_str(&self.line("Last run:", &relative_time(Some(checker.latest_run), now)));
        b.push_str(&self.line(
            "Total issues:",
            &issue_breakdown(
                t,
                checker.total_issues,
                checker.error_count,
                checker.warning_count,
                checker.info_count,
                "info",
            ),
        ));
        b.push_str(&self.line("Total runs:", &checker.total_runs.to_string()));
        b
    }

    fn render_checker_summary(&self, checker: &CheckerStats, now: DateTime<Utc>) -> String {
        let t = self.theme;
        let mut b = String::new();
        b.push_str(&t.paint(t.section, &format!("{} Summary", title_case(&checker.name))));
        b.push('\n');
        let result = match self.data.latest_result(&checker.name) {
            Some(r) => r,
            None => {
                b.push_str("  No results available\n");
                return b;
            }
        };
        let s = &result.summary;
        b.push_str(&self.line("Path:", &result.path));
        b.push_str(&self.line("Last Run:", &relative_time(Some(result.timestamp), now)));
        b.push_str(&self.line("Files Scanned:", &s.total_files.to_string()));
        b.push_str(&self.line("Files with Issues:", &s.files_with_issues.to_string()));
        b.push_str(&self.line(
            "Total Issues:",
            &issue_breakdown(t, s.total_issues, s.error_count, s.warning_count, s.info_count, "info"),
        ));
        b.push('\n');
        b.push_str(&t.paint(t.info, "  Press Enter to view detailed issues"));
        b.push('\n');
        b
    }

    fn render_checker_details(&self, checker: &CheckerStats) -> String {
        match self.data.latest_result(&checker.name) {
            Some(r) => render_result(r, self.theme),
            None => "  No results available\n".to_string(),
        }
    }
}

/// Run the dashboard until the user quits.
pub fn show_dashboard(data: &DashboardData, theme: &Theme) -> Result<()> {
    let view = DashboardView::new(data, theme);
    let mut nav = Navigator::new();
    let mut screen = Screen::enter()?;
    loop {
        screen.draw(&view.frame(&nav, Utc::now()))?;
        let key = match terminal::next_key()? {
            Some(k) => k,
            None => continue,
        };
        if let Some(delta) = terminal::scroll_for_key(&key) {
            screen.scroll_by(delta);
            continue;
        }
        if let Some(ev) = event_for_key(&key) {
            nav.handle(ev, data.checkers.len());
            screen.reset_scroll();
        }
        if nav.is_quitting() {
            break;
        }
    }
    Ok(())
}
