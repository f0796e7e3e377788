//! Small shared helpers for the binary's console messages.

use owo_colors::{OwoColorize, Style};
use std::io::{self, IsTerminal};
use std::path::Path;

#[derive(Debug, Clone, Copy)]
enum Stream {
    Stdout,
    Stderr,
}

/// Colors only for an interactive stream and without `NO_COLOR`.
fn use_colors(is_terminal: bool, no_color: bool) -> bool {
    is_terminal && !no_color
}

fn colors(stream: Stream) -> bool {
    let is_terminal = match stream {
        Stream::Stdout => io::stdout().is_terminal(),
        Stream::Stderr => io::stderr().is_terminal(),
    };
    use_colors(is_terminal, std::env::var_os("NO_COLOR").is_some())
}

fn paint(label: &str, style: Style, enabled: bool) -> String {
    if enabled {
        label.style(style).to_string()
    } else {
        label.to_string()
    }
}

/// `error:` prefix for messages written to stderr.
pub fn error_prefix() -> String {
    paint("error:", Style::new().red().bold(), colors(Stream::Stderr))
}

/// `note:` prefix for messages written to stderr.
pub fn note_prefix() -> String {
    paint("note:", Style::new().yellow().bold(), colors(Stream::Stderr))
}

/// `info:` prefix for messages written to stdout.
pub fn info_prefix() -> String {
    paint("info:", Style::new().blue().bold(), colors(Stream::Stdout))
}

/// Path relative to the working directory when possible, for display.
pub fn rel_to_wd(p: &Path) -> String {
    std::env::current_dir()
        .ok()
        .and_then(|wd| pathdiff::diff_paths(p, wd))
        .filter(|r| !r.as_os_str().is_empty())
        .unwrap_or_else(|| p.to_path_buf())
        .to_string_lossy()
        .to_string()
}
