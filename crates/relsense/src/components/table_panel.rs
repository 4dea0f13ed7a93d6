//! Dimension table with totals underneath

use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
};
use relsense_core::sensitivity::Preference;

use super::{Component, EventResult, centered_scroll};
use crate::state::{DashboardState, Panel};
use crate::util::format::{format_diff, format_percentage, format_score};
use crate::util::styles::{CUR_COLOR, EX_COLOR, HEADER_COLOR, diff_color, focused_block};

const SLOT_LABELS: [char; 3] = ['a', 'b', 'c'];

pub struct TablePanel;

impl TablePanel {
    pub fn new() -> Self {
        Self
    }

    /// Letters of the 3D slots (a, b, c) a row occupies
    fn slot_marker(state: &DashboardState, idx: usize) -> String {
        state
            .triple
            .iter()
            .zip(SLOT_LABELS)
            .filter(|(row, _)| **row == idx)
            .map(|(_, label)| label)
            .collect()
    }

    fn render_rows(frame: &mut Frame, area: Rect, state: &DashboardState) {
        let rows = state.table.rows();
        let visible = area.height.saturating_sub(1) as usize;
        let scroll = centered_scroll(state.selected, rows.len(), visible);
        let name_width = area.width.saturating_sub(30).max(4) as usize;

        let mut lines = vec![Line::from(Span::styled(
            format!(
                "  {:<name_width$} {:>6} {:>6} {:>6}  3D",
                "Dimension", "Weight", "Ex", "Cur"
            ),
            Style::default().fg(HEADER_COLOR),
        ))];

        for (idx, row) in rows.iter().enumerate().skip(scroll).take(visible) {
            let prefix = if idx == state.selected { "> " } else { "  " };
            let name: String = row.name.chars().take(name_width).collect();
            let content = format!(
                "{}{:<name_width$} {:>6} {:>6} {:>6}  {}",
                prefix,
                name,
                format_percentage(row.weight),
                format_score(row.ex_score),
                format_score(row.cur_score),
                Self::slot_marker(state, idx),
            );

            let style = if idx == state.selected {
                Style::default().add_modifier(Modifier::REVERSED)
            } else {
                Style::default()
            };
            lines.push(Line::from(Span::styled(content, style)));
        }

        frame.render_widget(Paragraph::new(lines), area);
    }

    fn render_totals(frame: &mut Frame, area: Rect, state: &DashboardState) {
        let totals = state.totals;
        let diff = totals.diff();

        let lines = vec![
            Line::from(vec![
                Span::raw("  Ex total: "),
                Span::styled(format_score(totals.ex), Style::default().fg(EX_COLOR)),
                Span::raw("   Current total: "),
                Span::styled(format_score(totals.cur), Style::default().fg(CUR_COLOR)),
            ]),
            Line::from(vec![
                Span::raw("  diff: "),
                Span::styled(
                    format_diff(diff),
                    Style::default()
                        .fg(diff_color(diff, state.eps))
                        .add_modifier(Modifier::BOLD),
                ),
                Span::raw(format!("  ({} ahead)", Preference::of(diff).label())),
            ]),
        ];
        frame.render_widget(Paragraph::new(lines), area);
    }
}

impl Default for TablePanel {
    fn default() -> Self {
        Self::new()
    }
}

impl Component for TablePanel {
    fn handle_key(&mut self, key: KeyEvent, state: &mut DashboardState) -> EventResult {
        match key.code {
            KeyCode::Char('j') | KeyCode::Down => {
                state.select_next();
                EventResult::Handled
            }
            KeyCode::Char('k') | KeyCode::Up => {
                state.select_prev();
                EventResult::Handled
            }
            _ => EventResult::NotHandled,
        }
    }

    fn render(&mut self, frame: &mut Frame, area: Rect, state: &DashboardState) {
        let block = focused_block(
            " DIMENSIONS ",
            state.focused == Panel::Table,
            "[j/k] select [a/b/c] 3D slot",
        );
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(2), Constraint::Length(2)])
            .split(inner);

        Self::render_rows(frame, chunks[0], state);
        Self::render_totals(frame, chunks[1], state);
    }
}
