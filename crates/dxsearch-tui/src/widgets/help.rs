//! Help popup: centred floating overlay listing all keybindings.
//!
//! Toggle with `F1` (or `?` while the query is empty); any key closes it.

use crate::theme::Theme;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Clear, Paragraph, Widget},
};

const BINDINGS: &[(&str, &str)] = &[
    ("type", "Search as you type"),
    ("↑  /  Ctrl+p", "Previous result"),
    ("↓  /  Ctrl+n", "Next result"),
    ("PageUp / PageDown", "Move by one screen"),
    ("← / →  Home / End", "Move the text cursor"),
    ("Ctrl+u", "Clear the query"),
    ("Enter", "Choose the highlighted diagnosis"),
    ("Esc", "Clear the query, or quit when empty"),
    ("Ctrl+c", "Quit without choosing"),
    ("F1  /  ?", "Toggle this help popup"),
];

pub struct HelpPopup<'a> {
    theme: &'a Theme,
}

impl<'a> HelpPopup<'a> {
    pub fn new(theme: &'a Theme) -> Self {
        Self { theme }
    }
}

impl Widget for HelpPopup<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let popup = centered_rect(64, BINDINGS.len() as u16 + 2, area);
        Clear.render(popup, buf);

        let block = Block::bordered()
            .title(" dxsearch keybindings ")
            .border_style(self.theme.border_query);

        let inner = block.inner(popup);
        block.render(popup, buf);

        let lines: Vec<Line> = BINDINGS
            .iter()
            .map(|(key, desc)| {
                Line::from(vec![
                    Span::styled(
                        format!("  {:<22}", key),
                        Style::default().add_modifier(Modifier::BOLD),
                    ),
                    Span::raw(*desc),
                ])
            })
            .collect();

        Paragraph::new(lines).render(inner, buf);
    }
}

fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let x = area.x + area.width.saturating_sub(width) / 2;
    let y = area.y + area.height.saturating_sub(height) / 2;
    Rect {
        x,
        y,
        width: width.min(area.width),
        height: height.min(area.height),
    }
}
