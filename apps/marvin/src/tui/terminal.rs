//! Raw-mode terminal handling for the interactive views.
//!
//! Frames taller than the terminal are clipped to a scrollable window; the
//! last line of a frame (the key hints) stays pinned to the bottom row.

use crate::error::{Error, Result};
use crossterm::cursor::{Hide, MoveTo, Show};
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind};
use crossterm::terminal::{
    self, disable_raw_mode, enable_raw_mode, Clear, ClearType, DisableLineWrap, EnableLineWrap,
    EnterAlternateScreen, LeaveAlternateScreen,
};
use crossterm::{execute, queue};
use std::io::{self, Stdout, Write};

const PAGE: isize = 10;

/// Alternate screen in raw mode; the terminal is restored on drop.
pub struct Screen {
    out: Stdout,
    scroll: usize,
}

impl Screen {
    pub fn enter() -> Result<Self> {
        enable_raw_mode().map_err(Error::Terminal)?;
        let mut out = io::stdout();
        if let Err(e) = execute!(out, EnterAlternateScreen, DisableLineWrap, Hide) {
            let _ = disable_raw_mode();
            return Err(Error::Terminal(e));
        }
        Ok(Self { out, scroll: 0 })
    }

    /// Replace the whole screen with the visible window of `content`.
    pub fn draw(&mut self, content: &str) -> Result<()> {
        let (_, rows) = terminal::size().map_err(Error::Terminal)?;
        let rows = usize::from(rows);
        let lines: Vec<&str> = content.lines().collect();
        self.scroll = self.scroll.min(max_scroll(lines.len(), rows));

        queue!(self.out, MoveTo(0, 0), Clear(ClearType::All)).map_err(Error::Terminal)?;
        for (i, line) in visible_lines(&lines, rows, self.scroll).iter().enumerate() {
            // No trailing newline on the bottom row, it would scroll the screen.
            // Raw mode does not translate "\n" into a carriage return.
            if i > 0 {
                write!(self.out, "\r\n").map_err(Error::Terminal)?;
            }
            write!(self.out, "{}", line).map_err(Error::Terminal)?;
        }
        self.out.flush().map_err(Error::Terminal)
    }

    /// Move the window; clamped to the content on the next `draw`.
    pub fn scroll_by(&mut self, delta: isize) {
        self.scroll = if delta < 0 {
            self.scroll.saturating_sub(delta.unsigned_abs())
        } else {
            self.scroll.saturating_add(delta.unsigned_abs())
        };
    }

    pub fn reset_scroll(&mut self) {
        self.scroll = 0;
    }
}

impl Drop for Screen {
    fn drop(&mut self) {
        let _ = execute!(self.out, Show, EnableLineWrap, LeaveAlternateScreen);
        let _ = disable_raw_mode();
    }
}

/// Largest useful scroll offset for `line_count` lines on `rows` rows.
pub fn max_scroll(line_count: usize, rows: usize) -> usize {
    if rows == 0 || line_count <= rows {
        0
    } else {
        line_count - rows
    }
}

/// Lines shown on a `rows`-tall screen: a body window starting at `offset`,
/// followed by the pinned last line.
pub fn visible_lines<'a>(lines: &[&'a str], rows: usize, offset: usize) -> Vec<&'a str> {
    if lines.len() <= rows {
        return lines.to_vec();
    }
    let (footer, body) = match lines.split_last() {
        Some(split) if rows > 0 => split,
        _ => return Vec::new(),
    };
    let height = rows - 1;
    let start = offset.min(body.len() - height);
    let mut shown = body[start..start + height].to_vec();
    shown.push(*footer);
    shown
}

/// Scroll distance for a key, if it is a scroll key.
pub fn scroll_for_key(key: &KeyEvent) -> Option<isize> {
    match key.code {
        KeyCode::Up | KeyCode::Char('k') => Some(-1),
        KeyCode::Down | KeyCode::Char('j') => Some(1),
        KeyCode::PageUp => Some(-PAGE),
        KeyCode::PageDown | KeyCode::Char(' ') => Some(PAGE),
        KeyCode::Home => Some(isize::MIN),
        KeyCode::End => Some(isize::MAX),
        _ => None,
    }
}

/// Block for the next key press. Other events (resize, release) yield `None`.
pub fn next_key() -> Result<Option<KeyEvent>> {
    match event::read().map_err(Error::Terminal)? {
        Event::Key(key) if key.kind == KeyEventKind::Press => Ok(Some(key)),
        _ => Ok(None),
    }
}
