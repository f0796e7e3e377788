//! Visual treatments shared by all renderers.
//!
//! A `Theme` is passed into every render call; `Theme::plain()` produces
//! unstyled text, which is what tests and `NO_COLOR` use.

use crate::models::Severity;
use owo_colors::{OwoColorize, Style};
use std::io::IsTerminal;

#[derive(Debug, Clone)]
pub struct Theme {
    enabled: bool,
    pub title: Style,
    pub section: Style,
    pub label: Style,
    pub value: Style,
    pub tab: Style,
    pub selected_tab: Style,
    pub card_header: Style,
    pub error: Style,
    pub warning: Style,
    pub info: Style,
    pub location: Style,
    pub rule: Style,
    pub message: Style,
    pub context: Style,
    pub footer: Style,
}

impl Theme {
    pub fn colored() -> Self {
        Self {
            enabled: true,
            title: Style::new().bold().bright_magenta().on_black(),
            section: Style::new().bold().bright_cyan(),
            label: Style::new().bright_black(),
            value: Style::new().bold().bright_white(),
            tab: Style::new().bright_black(),
            selected_tab: Style::new().bold().black().on_bright_magenta(),
            card_header: Style::new().bold().bright_magenta(),
            error: Style::new().bold().bright_red(),
            warning: Style::new().bold().yellow(),
            info: Style::new().bright_blue(),
            location: Style::new().bold().magenta(),
            rule: Style::new().bright_black(),
            message: Style::new().bright_white(),
            context: Style::new().italic().bright_black(),
            footer: Style::new().bright_black(),
        }
    }

    pub fn plain() -> Self {
        Self {
            enabled: false,
            ..Self::colored()
        }
    }

    /// Colored when stdout is a terminal and `NO_COLOR` is unset.
    pub fn detect() -> Self {
        if std::env::var_os("NO_COLOR").is_none() && std::io::stdout().is_terminal() {
            Self::colored()
        } else {
            Self::plain()
        }
    }

    pub fn paint(&self, style: Style, text: &str) -> String {
        if self.enabled {
            text.style(style).to_string()
        } else {
            text.to_string()
        }
    }

    pub fn severity(&self, severity: Severity) -> Style {
        match severity {
            Severity::Error => self.error,
            Severity::Warning => self.warning,
            Severity::Info => self.info,
        }
    }
}
