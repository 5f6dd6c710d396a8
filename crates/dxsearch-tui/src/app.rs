//! Top-level application state and the main event loop.
//!
//! [`App::run`] sets up the terminal, drives the crossterm event loop, and
//! tears everything down cleanly on exit or panic. Every edit of the query
//! runs one search against the shared [`QueryEngine`]; results are shown in
//! engine order.

use crate::{
    event::{self, AppEvent},
    theme::Theme,
    widgets::{
        help::HelpPopup,
        query_bar::{QueryBar, QueryBarState},
        result_list::{ResultList, ResultListState, ResultRow},
        status_bar::StatusBar,
    },
};
use crossterm::{
    event::{self as ct_event, Event, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use dxsearch_core::{config::Config, MatchTier, QueryEngine};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Direction as LayoutDir, Layout},
    Frame, Terminal,
};
use std::{io, time::Duration};

/// How the session ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// The user accepted a result; carries its display text.
    Chosen(String),
    Cancelled,
}

// ---------------------------------------------------------------------------
// AppState
// ---------------------------------------------------------------------------

pub struct AppState<'e> {
    pub engine: &'e QueryEngine,
    pub config: Config,
    pub theme: Theme,
    pub query: QueryBarState,
    pub results: ResultListState,
    /// Tier of the current result list; `None` when there are no results.
    pub tier: Option<MatchTier>,
    pub show_help: bool,
    pub outcome: Option<Outcome>,
}

impl AppState<'_> {
    /// Re-run the search for the current query text.
    fn refresh(&mut self) {
        let hits = self.engine.search_hits(&self.query.query);
        self.tier = hits.first().map(|hit| hit.tier);
        let rows: Vec<ResultRow> = hits.iter().map(ResultRow::from).collect();
        self.results.replace(self.config.search.limit(rows));
        tracing::debug!(
            query = %self.query.query,
            tier = ?self.tier,
            shown = self.results.rows.len(),
            "results refreshed"
        );
    }
}

// ---------------------------------------------------------------------------
// App
// ---------------------------------------------------------------------------

pub struct App<'e> {
    state: AppState<'e>,
}

impl<'e> App<'e> {
    pub fn new(engine: &'e QueryEngine, config: Config, theme: Theme) -> Self {
        let state = AppState {
            engine,
            config,
            theme,
            query: QueryBarState::default(),
            results: ResultListState::default(),
            tier: None,
            show_help: false,
            outcome: None,
        };
        App { state }
    }

    /// Start with `text` already typed into the query bar.
    pub fn with_query(mut self, text: &str) -> Self {
        self.state.query.set(text);
        self.state.refresh();
        self
    }

    pub fn state(&self) -> &AppState<'e> {
        &self.state
    }

    /// Set up the terminal, run the event loop, and restore the terminal on exit.
    pub fn run(mut self) -> anyhow::Result<Outcome> {
        install_panic_hook();

        enable_raw_mode()?;
        execute!(io::stdout(), EnterAlternateScreen)?;
        let backend = CrosstermBackend::new(io::stdout());
        let mut terminal = Terminal::new(backend)?;

        let result = self.event_loop(&mut terminal);

        // Always restore terminal, even if the loop returned an error
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
        let _ = terminal.show_cursor();

        result
    }

    fn event_loop(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    ) -> anyhow::Result<Outcome> {
        loop {
            {
                let s = &self.state;
                terminal.draw(|frame| draw(frame, s))?;
            }

            if let Some(outcome) = self.state.outcome.take() {
                tracing::debug!(?outcome, "session finished");
                return Ok(outcome);
            }

            if ct_event::poll(Duration::from_millis(16))? {
                let raw = ct_event::read()?;
                if let Event::Key(key) = &raw {
                    if key.kind != KeyEventKind::Press {
                        continue;
                    }
                }
                if let Some(ev) = event::to_app_event(raw) {
                    tracing::debug!(event = ?ev, "key event");
                    self.handle(ev);
                }
            }
        }
    }

    pub fn handle(&mut self, event: AppEvent) {
        let s = &mut self.state;

        // Help popup swallows the next key, whatever it is.
        if s.show_help {
            if !matches!(event, AppEvent::Resize(_, _)) {
                tracing::debug!("help popup closed");
                s.show_help = false;
            }
            return;
        }

        match event {
            AppEvent::Quit => s.outcome = Some(Outcome::Cancelled),

            AppEvent::Escape => {
                if s.query.query.is_empty() {
                    s.outcome = Some(Outcome::Cancelled);
                } else {
                    s.query.clear();
                    s.refresh();
                }
            }

            AppEvent::Accept => {
                if let Some(row) = s.results.selected_row() {
                    tracing::info!(choice = %row.text, "diagnosis chosen");
                    s.outcome = Some(Outcome::Chosen(row.text.clone()));
                }
            }

            AppEvent::ToggleHelp => s.show_help = true,
            AppEvent::Char('?') if s.query.query.is_empty() => s.show_help = true,

            AppEvent::Select(_) | AppEvent::PageUp | AppEvent::PageDown => {
                s.results.handle(&event);
            }

            // Terminal resize is handled automatically by ratatui
            AppEvent::Resize(_, _) => {}

            other => {
                if s.query.handle(&other) {
                    s.refresh();
                }
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Rendering
// ---------------------------------------------------------------------------

fn draw(frame: &mut Frame, state: &AppState) {
    let area = frame.area();

    // Vertical: 3-line query bar | results | 1-line status bar
    let vert = Layout::default()
        .direction(LayoutDir::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Fill(1),
            Constraint::Length(1),
        ])
        .split(area);

    let query_bar = QueryBar::new(
        &state.query,
        &state.config.ui.hint_text,
        state.results.rows.len(),
        &state.theme,
    );
    let (cx, cy) = query_bar.cursor_position(vert[0]);
    frame.render_widget(query_bar, vert[0]);
    frame.render_widget(
        ResultList::new(&state.results, state.config.ui.show_scores, &state.theme),
        vert[1],
    );
    frame.render_widget(
        StatusBar::new(state.tier, state.engine.vocabulary().len(), &state.theme),
        vert[2],
    );

    if state.show_help {
        frame.render_widget(HelpPopup::new(&state.theme), area);
        return;
    }

    frame.set_cursor_position((cx, cy));
}

// ---------------------------------------------------------------------------
// Terminal helpers
// ---------------------------------------------------------------------------

fn install_panic_hook() {
    let original = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
        original(info);
    }));
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::Direction;
    use dxsearch_core::Vocabulary;

    fn engine() -> QueryEngine {
        QueryEngine::new(Vocabulary::new([
            "AIDS",
            "chronic fatigue syndrome (CFS)",
            "cancer",
            "brain cancer",
            "lung cancer",
        ]))
    }

    fn type_text(app: &mut App, text: &str) {
        for c in text.chars() {
            app.handle(AppEvent::Char(c));
        }
    }

    fn shown(app: &App) -> Vec<String> {
        app.state().results.rows.iter().map(|r| r.text.clone()).collect()
    }

    #[test]
    fn typing_runs_a_search_per_keystroke() {
        let engine = engine();
        let mut app = App::new(&engine, Config::defaults(), Theme::load_default());
        type_text(&mut app, "cf");
        assert_eq!(shown(&app), ["chronic fatigue syndrome (CFS)"]);
        assert_eq!(app.state().tier, Some(MatchTier::Fuzzy));
        type_text(&mut app, "s");
        assert_eq!(shown(&app), ["chronic fatigue syndrome (CFS)"]);
        assert_eq!(app.state().tier, Some(MatchTier::Exact));
    }

    #[test]
    fn backspace_re_runs_search() {
        let engine = engine();
        let mut app = App::new(&engine, Config::defaults(), Theme::load_default());
        type_text(&mut app, "aidsx");
        app.handle(AppEvent::Backspace);
        assert_eq!(shown(&app), ["AIDS"]);
    }

    #[test]
    fn enter_chooses_selected_row() {
        let engine = engine();
        let mut app = App::new(&engine, Config::defaults(), Theme::load_default());
        type_text(&mut app, "cancer");
        app.handle(AppEvent::Select(Direction::Down));
        app.handle(AppEvent::Accept);
        assert_eq!(
            app.state().outcome,
            Some(Outcome::Chosen("brain cancer".to_string()))
        );
    }

    #[test]
    fn enter_without_results_does_nothing() {
        let engine = engine();
        let mut app = App::new(&engine, Config::defaults(), Theme::load_default());
        app.handle(AppEvent::Accept);
        assert_eq!(app.state().outcome, None);
    }

    #[test]
    fn escape_clears_then_quits() {
        let engine = engine();
        let mut app = App::new(&engine, Config::defaults(), Theme::load_default());
        type_text(&mut app, "aids");
        app.handle(AppEvent::Escape);
        assert!(app.state().query.query.is_empty());
        assert!(shown(&app).is_empty());
        assert_eq!(app.state().outcome, None);
        app.handle(AppEvent::Escape);
        assert_eq!(app.state().outcome, Some(Outcome::Cancelled));
    }

    #[test]
    fn question_mark_opens_help_only_on_empty_query() {
        let engine = engine();
        let mut app = App::new(&engine, Config::defaults(), Theme::load_default());
        app.handle(AppEvent::Char('?'));
        assert!(app.state().show_help);
        app.handle(AppEvent::Char('x'));
        assert!(!app.state().show_help);
        assert!(app.state().query.query.is_empty());

        type_text(&mut app, "a");
        app.handle(AppEvent::Char('?'));
        assert!(!app.state().show_help);
        assert_eq!(app.state().query.query, "a?");
    }

    #[test]
    fn max_results_truncates_list() {
        let engine = engine();
        let mut config = Config::defaults();
        config.search.max_results = 1;
        let app = App::new(&engine, config, Theme::load_default()).with_query("cancer");
        assert_eq!(shown(&app), ["cancer"]);
    }
}
