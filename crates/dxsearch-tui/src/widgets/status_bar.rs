//! Status bar: one line at the bottom with the active tier and key hints.

use crate::theme::Theme;
use dxsearch_core::MatchTier;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Paragraph, Widget},
};

pub struct StatusBar<'a> {
    tier: Option<MatchTier>,
    vocabulary_size: usize,
    theme: &'a Theme,
}

impl<'a> StatusBar<'a> {
    pub fn new(tier: Option<MatchTier>, vocabulary_size: usize, theme: &'a Theme) -> Self {
        Self { tier, vocabulary_size, theme }
    }

    fn summary(&self) -> String {
        match self.tier {
            Some(MatchTier::Exact) => " exact matches".to_string(),
            Some(MatchTier::Fuzzy) => " fuzzy matches".to_string(),
            None => format!(" {} diagnoses", self.vocabulary_size),
        }
    }
}

impl Widget for StatusBar<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let style = match self.tier {
            Some(tier) => self.theme.tier_style(tier),
            None => self.theme.status,
        };
        Paragraph::new(Line::from(Span::styled(self.summary(), style))).render(area, buf);

        // Keybinding hints at the right edge
        let hint = " enter:choose  esc:clear  F1:help ";
        let hint_x = area.right().saturating_sub(hint.chars().count() as u16);
        buf.set_string(
            hint_x,
            area.y,
            hint,
            Style::default().add_modifier(Modifier::DIM),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn summary_reflects_tier() {
        let theme = Theme::load_default();
        assert_eq!(StatusBar::new(None, 88, &theme).summary(), " 88 diagnoses");
        assert_eq!(
            StatusBar::new(Some(MatchTier::Exact), 88, &theme).summary(),
            " exact matches"
        );
    }
}
