//! dxsearch TUI: ratatui search-as-you-type front end.
//!
//! A query bar over a ranked result list: every keystroke runs one search
//! through the shared [`QueryEngine`], and `Enter` hands the chosen
//! diagnosis back to the caller.

pub mod app;
pub mod event;
pub mod theme;
pub mod widgets;

pub use app::{App, Outcome};

use dxsearch_core::{config::Config, QueryEngine};

/// Run the interactive search until the user chooses an entry or quits.
///
/// `initial_query` is typed into the query bar before the first frame.
pub fn run(engine: &QueryEngine, config: Config, initial_query: &str) -> anyhow::Result<Outcome> {
    let theme = theme::Theme::by_name(&config.ui.theme);
    App::new(engine, config, theme).with_query(initial_query).run()
}
