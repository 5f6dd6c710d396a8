//! Query bar widget: the text input at the top of the screen.
//!
//! # Editing
//!
//! - `Char(c)` inserts at the cursor.
//! - `Backspace` deletes the character before the cursor.
//! - `Cursor(Left/Right)`, `CursorHome`, `CursorEnd` move the cursor.
//! - `ClearQuery` empties the input.
//!
//! [`QueryBarState::handle`] reports whether the text changed so the app
//! shell only re-runs the search on real edits.

use crate::event::{AppEvent, Side};
use crate::theme::Theme;
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Direction as LayoutDir, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Paragraph, Widget},
};

// ---------------------------------------------------------------------------
// State
// ---------------------------------------------------------------------------

#[derive(Debug, Default)]
pub struct QueryBarState {
    /// The query typed by the user.
    pub query: String,
    /// Byte offset of the cursor within `query`.
    pub cursor: usize,
}

impl QueryBarState {
    /// Apply an editing event. Returns `true` when the query text changed.
    pub fn handle(&mut self, event: &AppEvent) -> bool {
        match event {
            AppEvent::Char(c) => {
                self.query.insert(self.cursor, *c);
                self.cursor += c.len_utf8();
                tracing::debug!(query = %self.query, cursor = self.cursor, "query: char inserted");
                true
            }
            AppEvent::Backspace => {
                if self.cursor == 0 {
                    return false;
                }
                let prev = self.prev_boundary();
                self.query.remove(prev);
                self.cursor = prev;
                tracing::debug!(query = %self.query, cursor = self.cursor, "query: backspace");
                true
            }
            AppEvent::ClearQuery => {
                if self.query.is_empty() {
                    return false;
                }
                self.clear();
                tracing::debug!("query: cleared");
                true
            }
            AppEvent::Cursor(Side::Left) => {
                self.cursor = self.prev_boundary();
                false
            }
            AppEvent::Cursor(Side::Right) => {
                if self.cursor < self.query.len() {
                    self.cursor = self.query[self.cursor..]
                        .char_indices()
                        .nth(1)
                        .map(|(i, _)| self.cursor + i)
                        .unwrap_or(self.query.len());
                }
                false
            }
            AppEvent::CursorHome => {
                self.cursor = 0;
                false
            }
            AppEvent::CursorEnd => {
                self.cursor = self.query.len();
                false
            }
            _ => false,
        }
    }

    pub fn clear(&mut self) {
        self.query.clear();
        self.cursor = 0;
    }

    /// Replace the query text and park the cursor at the end.
    pub fn set(&mut self, text: &str) {
        self.query = text.to_string();
        self.cursor = self.query.len();
    }

    /// Byte offset of the char boundary before the cursor.
    fn prev_boundary(&self) -> usize {
        self.query[..self.cursor]
            .char_indices()
            .last()
            .map(|(i, _)| i)
            .unwrap_or(0)
    }
}

// ---------------------------------------------------------------------------
// Widget
// ---------------------------------------------------------------------------

pub struct QueryBar<'a> {
    state: &'a QueryBarState,
    hint: &'a str,
    hits: usize,
    theme: &'a Theme,
}

impl<'a> QueryBar<'a> {
    pub fn new(state: &'a QueryBarState, hint: &'a str, hits: usize, theme: &'a Theme) -> Self {
        Self { state, hint, hits, theme }
    }

    /// Absolute terminal position of the text cursor within this widget's
    /// rendered area. Pass to `frame.set_cursor_position()` after rendering.
    pub fn cursor_position(&self, area: Rect) -> (u16, u16) {
        // The block adds 1-cell borders; text starts at (area.x+1, area.y+1).
        let col = self.state.query[..self.state.cursor].chars().count() as u16;
        let x = (area.x + 1 + col).min(area.right().saturating_sub(1));
        let y = area.y + 1;
        (x, y)
    }
}

impl Widget for QueryBar<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = Block::bordered()
            .title(" Diagnosis ")
            .border_style(self.theme.border_query);

        let inner = block.inner(area);
        block.render(area, buf);

        // Split inner area: query text (fill) | hit counter (fixed width)
        let chunks = Layout::default()
            .direction(LayoutDir::Horizontal)
            .constraints([Constraint::Fill(1), Constraint::Length(12)])
            .split(inner);

        let query_line = if self.state.query.is_empty() {
            Line::from(Span::styled(self.hint.to_string(), self.theme.hint))
        } else {
            Line::from(self.state.query.as_str())
        };
        Paragraph::new(query_line).render(chunks[0], buf);

        let counter = if self.state.query.is_empty() {
            String::new()
        } else {
            format!("{} hits", self.hits)
        };
        Paragraph::new(Line::from(Span::styled(counter, self.theme.status)).right_aligned())
            .render(chunks[1], buf);
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
