//! Result list widget: the ranked suggestions under the query bar.
//!
//! Rows are rendered in engine order without any re-sorting. The highlighted
//! row is kept inside the visible window; moving past either edge scrolls.
//!
//! # Scroll semantics
//!
//! `offset` = index of the first visible row. `selected` = absolute index of
//! the highlighted row, always in `offset..offset + height` after a move.

use std::cell::Cell;

use crate::event::{AppEvent, Direction};
use crate::theme::Theme;
use dxsearch_core::{MatchTier, SearchHit};
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    text::{Line, Span},
    widgets::{
        Block, Paragraph, Scrollbar, ScrollbarOrientation, ScrollbarState, StatefulWidget, Widget,
    },
};

/// One rendered result. Owned so the list outlives the search call.
#[derive(Debug, Clone, PartialEq)]
pub struct ResultRow {
    pub text: String,
    pub quality: f64,
    pub tier: MatchTier,
}

impl From<&SearchHit<'_>> for ResultRow {
    fn from(hit: &SearchHit<'_>) -> Self {
        Self {
            text: hit.entry.display_text().to_string(),
            quality: hit.quality,
            tier: hit.tier,
        }
    }
}

// ---------------------------------------------------------------------------
// State
// ---------------------------------------------------------------------------

#[derive(Debug)]
pub struct ResultListState {
    pub rows: Vec<ResultRow>,
    pub selected: usize,
    pub offset: usize,
    /// Cached from the last render so `handle()` can page by screenfuls.
    last_height: Cell<usize>,
}

impl Default for ResultListState {
    fn default() -> Self {
        Self {
            rows: Vec::new(),
            selected: 0,
            offset: 0,
            last_height: Cell::new(10),
        }
    }
}

impl ResultListState {
    /// Replace the rows after a new search and reset the highlight to the top.
    pub fn replace(&mut self, rows: Vec<ResultRow>) {
        self.rows = rows;
        self.selected = 0;
        self.offset = 0;
    }

    pub fn selected_row(&self) -> Option<&ResultRow> {
        self.rows.get(self.selected)
    }

    fn height(&self) -> usize {
        self.last_height.get().max(1)
    }

    /// Handle a navigation event from the app shell.
    pub fn handle(&mut self, event: &AppEvent) {
        let total = self.rows.len();
        if total == 0 {
            return;
        }

        match event {
            AppEvent::Select(Direction::Up) => {
                self.selected = self.selected.saturating_sub(1);
            }
            AppEvent::Select(Direction::Down) => {
                if self.selected + 1 < total {
                    self.selected += 1;
                }
            }
            AppEvent::PageUp => {
                self.selected = self.selected.saturating_sub(self.height());
            }
            AppEvent::PageDown => {
                self.selected = (self.selected + self.height()).min(total - 1);
            }
            _ => return,
        }
        self.keep_selection_visible();
        tracing::debug!(selected = self.selected, offset = self.offset, "results: moved");
    }

    fn keep_selection_visible(&mut self) {
        let height = self.height();
        if self.selected < self.offset {
            self.offset = self.selected;
        } else if self.selected >= self.offset + height {
            self.offset = self.selected + 1 - height;
        }
    }
}

// ---------------------------------------------------------------------------
// Widget
// ---------------------------------------------------------------------------

pub struct ResultList<'a> {
    state: &'a ResultListState,
    show_scores: bool,
    theme: &'a Theme,
}

impl<'a> ResultList<'a> {
    pub fn new(state: &'a ResultListState, show_scores: bool, theme: &'a Theme) -> Self {
        Self { state, show_scores, theme }
    }
}

impl Widget for ResultList<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = Block::bordered()
            .title(" Results ")
            .border_style(self.theme.border_results);
        let inner = block.inner(area);
        block.render(area, buf);

        let height = inner.height as usize;
        // Cache for handle(); draw always runs before the next event
        self.state.last_height.set(height);

        let total = self.state.rows.len();
        let start = self.state.offset.min(total);
        let end = (start + height).min(total);

        let lines: Vec<Line<'static>> = self.state.rows[start..end]
            .iter()
            .enumerate()
            .map(|(row, result)| {
                let line = render_row(result, self.show_scores, self.theme);
                if start + row == self.state.selected {
                    line.patch_style(self.theme.result_selected)
                } else {
                    line
                }
            })
            .collect();

        let text_area = Rect { width: inner.width.saturating_sub(1), ..inner };
        let sb_area = Rect {
            x: inner.right().saturating_sub(1),
            width: 1,
            ..inner
        };

        Paragraph::new(lines).render(text_area, buf);

        if total > height {
            let mut sb_state = ScrollbarState::new(total)
                .position(start)
                .viewport_content_length(height);
            StatefulWidget::render(
                Scrollbar::new(ScrollbarOrientation::VerticalRight)
                    .begin_symbol(None)
                    .end_symbol(None),
                sb_area,
                buf,
                &mut sb_state,
            );
        }
    }
}

fn render_row(row: &ResultRow, show_score: bool, theme: &Theme) -> Line<'static> {
    let mut spans: Vec<Span<'static>> = Vec::new();
    if show_score {
        spans.push(Span::styled(format!("{:>5.3}  ", row.quality), theme.score));
    }
    spans.push(Span::styled(row.text.clone(), theme.tier_style(row.tier)));
    Line::from(spans)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn rows(n: usize) -> Vec<ResultRow> {
        (0..n)
            .map(|i| ResultRow {
                text: format!("entry {i}"),
                quality: 1.0 - i as f64 / 100.0,
                tier: MatchTier::Fuzzy,
            })
            .collect()
    }

    fn state_with(n: usize, height: usize) -> ResultListState {
        let mut state = ResultListState::default();
        state.replace(rows(n));
        state.last_height.set(height);
        state
    }

    #[test]
    fn selection_clamps_at_both_ends() {
        let mut state = state_with(3, 10);
        state.handle(&AppEvent::Select(Direction::Up));
        assert_eq!(state.selected, 0);
        for _ in 0..5 {
            state.handle(&AppEvent::Select(Direction::Down));
        }
        assert_eq!(state.selected, 2);
    }

    #[test]
    fn moving_past_window_scrolls() {
        let mut state = state_with(20, 5);
        for _ in 0..6 {
            state.handle(&AppEvent::Select(Direction::Down));
        }
        assert_eq!(state.selected, 6);
        assert_eq!(state.offset, 2);
        for _ in 0..6 {
            state.handle(&AppEvent::Select(Direction::Up));
        }
        assert_eq!(state.selected, 0);
        assert_eq!(state.offset, 0);
    }

    #[test]
    fn paging_moves_by_screenful() {
        let mut state = state_with(20, 5);
        state.handle(&AppEvent::PageDown);
        assert_eq!(state.selected, 5);
        state.handle(&AppEvent::PageDown);
        state.handle(&AppEvent::PageDown);
        state.handle(&AppEvent::PageDown);
        assert_eq!(state.selected, 19);
        state.handle(&AppEvent::PageUp);
        assert_eq!(state.selected, 14);
    }

    #[test]
    fn replace_resets_selection() {
        let mut state = state_with(20, 5);
        state.handle(&AppEvent::PageDown);
        state.replace(rows(2));
        assert_eq!(state.selected, 0);
        assert_eq!(state.offset, 0);
        assert_eq!(state.selected_row().map(|r| r.text.as_str()), Some("entry 0"));
    }

    #[test]
    fn empty_list_ignores_navigation() {
        let mut state = ResultListState::default();
        state.handle(&AppEvent::Select(Direction::Down));
        assert_eq!(state.selected, 0);
        assert!(state.selected_row().is_none());
    }

    #[test]
    fn renders_rows_in_given_order() {
        let mut state = ResultListState::default();
        state.replace(rows(3));
        let theme = Theme::load_default();
        let area = Rect::new(0, 0, 30, 6);
        let mut buf = Buffer::empty(area);
        ResultList::new(&state, false, &theme).render(area, &mut buf);
        let row = |y: u16| -> String {
            (1..29).map(|x| buf[(x, y)].symbol().to_string()).collect::<String>()
        };
        assert!(row(1).starts_with("entry 0"));
        assert!(row(2).starts_with("entry 1"));
        assert!(row(3).starts_with("entry 2"));
    }
}
