//! Rendering functions for the TUI.

mod help;
mod results;

pub use help::render_help_overlay;
pub use results::render_results_ui;
