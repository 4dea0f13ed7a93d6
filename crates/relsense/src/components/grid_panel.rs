//! 3D grid heat map, one slice of the third dimension at a time
//!
//! Rows are the first driven dimension, columns the second. Cells show which
//! candidate is ahead and by how much; blank cells were excluded from the grid.

use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
};
use relsense_core::GridResult;
use relsense_core::sensitivity::linspace;

use super::{Component, EventResult};
use crate::state::{DashboardState, Panel};
use crate::util::styles::{BOUNDARY_COLOR, CUR_COLOR, EX_COLOR, HEADER_COLOR, diff_color, focused_block};

/// Magnitude ramp, weakest to strongest
const HEAT_CHARS: [char; 6] = ['.', ':', '+', '*', '#', '@'];

pub struct GridPanel;

impl GridPanel {
    pub fn new() -> Self {
        Self
    }

    fn heat_char(diff: f64, max_abs: f64) -> char {
        let normalized = (diff.abs() / max_abs.max(1e-9)).clamp(0.0, 1.0);
        let idx = (normalized * (HEAT_CHARS.len() - 1) as f64).round() as usize;
        HEAT_CHARS[idx.min(HEAT_CHARS.len() - 1)]
    }
}

/// `diff` per (first, second) sample at the third dimension's sample `slice`;
/// `None` where the point was excluded
pub fn slice_matrix(grid: &GridResult, samples: &[f64], slice: usize) -> Vec<Vec<Option<f64>>> {
    let n = samples.len();
    let mut matrix = vec![vec![None; n]; n];
    let Some(&w2) = samples.get(slice) else {
        return matrix;
    };

    let position = |w: f64| samples.iter().position(|&s| s == w);
    for r in grid.records.iter().filter(|r| r.weights[2] == w2) {
        if let (Some(i), Some(j)) = (position(r.weights[0]), position(r.weights[1])) {
            matrix[i][j] = Some(r.diff);
        }
    }
    matrix
}

impl Default for GridPanel {
    fn default() -> Self {
        Self::new()
    }
}

impl Component for GridPanel {
    fn handle_key(&mut self, key: KeyEvent, state: &mut DashboardState) -> EventResult {
        match key.code {
            KeyCode::Char('j') | KeyCode::Down => {
                state.next_slice();
                EventResult::Handled
            }
            KeyCode::Char('k') | KeyCode::Up => {
                state.prev_slice();
                EventResult::Handled
            }
            _ => EventResult::NotHandled,
        }
    }

    fn render(&mut self, frame: &mut Frame, area: Rect, state: &DashboardState) {
        let block = focused_block(" 3D GRID ", state.focused == Panel::Grid, "[j/k] slice");
        let inner = block.inner(area);

        let Some(grid) = &state.grid else {
            let paragraph = Paragraph::new(vec![Line::from("  No grid to display.")]).block(block);
            frame.render_widget(paragraph, area);
            return;
        };
        frame.render_widget(block, area);

        let range = state.settings.sweep_3d;
        let samples = linspace(range.low, range.high, range.steps);
        let slice = state.grid_slice.min(samples.len().saturating_sub(1));
        let matrix = slice_matrix(grid, &samples, slice);

        let max_abs = grid
            .records
            .iter()
            .map(|r| r.diff.abs())
            .fold(0.0f64, f64::max);
        let [dim_a, dim_b, dim_c] = &grid.dimensions;
        let (ex, cur, tie) = grid.preference_counts();
        let bold = Style::default().fg(HEADER_COLOR).add_modifier(Modifier::BOLD);

        let mut lines = vec![
            Line::from(vec![
                Span::styled(format!("  {}", dim_a), bold),
                Span::raw(" x "),
                Span::styled(dim_b.as_str(), bold),
                Span::raw(format!(
                    "  at {} = {:.3}",
                    dim_c,
                    samples.get(slice).copied().unwrap_or(0.0)
                )),
            ]),
            Line::from(Span::styled(
                format!(
                    "  {} points: Ex {} / Current {} / tie {} / boundary {}",
                    grid.len(),
                    ex,
                    cur,
                    tie,
                    grid.boundary_points(state.eps).count()
                ),
                Style::default().fg(Color::DarkGray),
            )),
        ];

        let max_rows = inner.height.saturating_sub(5) as usize;
        let max_cols = inner.width.saturating_sub(10) as usize / 2;
        for (i, row) in matrix.iter().enumerate().take(max_rows) {
            let mut spans = vec![
                Span::styled(
                    format!("{:>6.3}", samples[i]),
                    Style::default().fg(Color::DarkGray),
                ),
                Span::raw(" |"),
            ];
            for cell in row.iter().take(max_cols) {
                let span = match cell {
                    Some(diff) => Span::styled(
                        format!(" {}", Self::heat_char(*diff, max_abs)),
                        Style::default().fg(diff_color(*diff, state.eps)),
                    ),
                    None => Span::raw("  "),
                };
                spans.push(span);
            }
            lines.push(Line::from(spans));
        }

        lines.push(Line::from(Span::styled(
            format!("        {} ->", dim_b),
            Style::default().fg(Color::DarkGray),
        )));
        lines.push(Line::from(vec![
            Span::raw("  "),
            Span::styled("Ex ahead", Style::default().fg(EX_COLOR)),
            Span::raw("  "),
            Span::styled("Current ahead", Style::default().fg(CUR_COLOR)),
            Span::raw("  "),
            Span::styled("boundary", Style::default().fg(BOUNDARY_COLOR)),
            Span::raw("  blank: excluded"),
        ]));

        frame.render_widget(Paragraph::new(lines), inner);
    }
}
