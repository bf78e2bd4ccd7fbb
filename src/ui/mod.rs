//! Ratatui front end: the catalog grid, the editor dialog, and the terminal
//! event loop driving them.

mod app;
mod forms;
mod helpers;
mod terminal;

pub use app::App;
pub use terminal::run_app;
