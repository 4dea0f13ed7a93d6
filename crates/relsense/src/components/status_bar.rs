use super::{Component, EventResult};
use crate::state::{DashboardState, Panel};
use crossterm::event::KeyEvent;
use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};

pub struct StatusBar;

impl StatusBar {
    pub fn new() -> Self {
        Self
    }

    fn help_text(state: &DashboardState) -> &'static str {
        match state.focused {
            Panel::Table | Panel::Bars | Panel::Sweep => {
                "j/k: select | Tab: panel | a/b/c: 3D slot | r: rerun | +/-: eps | e: export | q: quit"
            }
            Panel::Grid => {
                "j/k: slice | Tab: panel | r: rerun | +/-: eps | e: export | q: quit"
            }
        }
    }
}

impl Default for StatusBar {
    fn default() -> Self {
        Self::new()
    }
}

impl Component for StatusBar {
    fn handle_key(&mut self, _key: KeyEvent, _state: &mut DashboardState) -> EventResult {
        EventResult::NotHandled
    }

    fn render(&mut self, frame: &mut Frame, area: Rect, state: &DashboardState) {
        let content = if let Some(error) = &state.error_message {
            Line::from(vec![
                Span::styled("Error: ", Style::default().fg(Color::Red)),
                Span::raw(error.as_str()),
            ])
        } else if let Some(info) = &state.info_message {
            Line::from(Span::styled(info.as_str(), Style::default().fg(Color::Green)))
        } else {
            Line::from(vec![
                Span::styled(
                    format!("eps={:.3}  ", state.eps),
                    Style::default().fg(Color::Yellow),
                ),
                Span::styled(Self::help_text(state), Style::default().fg(Color::DarkGray)),
            ])
        };

        let paragraph = Paragraph::new(content).block(Block::default().borders(Borders::TOP));
        frame.render_widget(paragraph, area);
    }
}
