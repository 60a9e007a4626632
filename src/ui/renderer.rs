//! Top-level rendering coordinator.
//!
//! Rendering is a two-step process: compute the view model from `AppState`,
//! then hand it to the layout components. Output goes to stdout, which Zellij
//! captures as the plugin pane.

use crate::app::AppState;
use crate::ui::components;

/// Renders the plugin UI for a `rows` x `cols` pane.
pub fn render(state: &AppState, rows: usize, cols: usize) {
    let _span = tracing::trace_span!("render", rows, cols).entered();

    let viewmodel = state.compute_viewmodel(rows, cols);
    components::render_layout(&viewmodel, &state.theme, cols, rows);
}
