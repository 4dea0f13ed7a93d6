pub mod bars_panel;
pub mod grid_panel;
pub mod status_bar;
pub mod sweep_panel;
pub mod table_panel;

use crossterm::event::KeyEvent;
use ratatui::Frame;
use ratatui::layout::Rect;

use crate::state::DashboardState;

/// Result of handling an event
#[derive(Debug, Clone, PartialEq)]
pub enum EventResult {
    /// Event was handled, continue
    Handled,
    /// Event was not handled, pass to parent
    NotHandled,
}

/// Trait for components that can handle input and render
pub trait Component {
    fn handle_key(&mut self, key: KeyEvent, state: &mut DashboardState) -> EventResult;

    fn render(&mut self, frame: &mut Frame, area: Rect, state: &DashboardState);
}

/// First row to draw so that `selected` stays roughly centered in `visible` rows
pub fn centered_scroll(selected: usize, total: usize, visible: usize) -> usize {
    if total <= visible {
        return 0;
    }
    selected
        .saturating_sub(visible / 2)
        .min(total - visible)
}
