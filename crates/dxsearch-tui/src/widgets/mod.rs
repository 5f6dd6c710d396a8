//! Ratatui widgets for the dxsearch TUI.

pub mod help;
pub mod query_bar;
pub mod result_list;
pub mod status_bar;
