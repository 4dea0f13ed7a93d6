//! diff-vs-weight chart for the selected dimension's 1D sweep

use crossterm::event::KeyEvent;
use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Style, Stylize},
    symbols,
    text::{Line, Span},
    widgets::{Axis, Block, Chart, Dataset, GraphType, Paragraph},
};
use relsense_core::SweepResult;

use super::{Component, EventResult};
use crate::state::{DashboardState, Panel};
use crate::util::format::{format_diff, format_weight};
use crate::util::styles::{BOUNDARY_COLOR, CUR_COLOR, focused_block};

pub struct SweepPanel;

impl SweepPanel {
    pub fn new() -> Self {
        Self
    }

    fn render_empty(frame: &mut Frame, area: Rect, block: Block) {
        let paragraph = Paragraph::new(vec![Line::from("  No sweep to display.")]).block(block);
        frame.render_widget(paragraph, area);
    }

    /// y bounds that always include zero, padded by 10%
    fn diff_bounds(sweep: &SweepResult) -> (f64, f64) {
        let (min, max) = sweep
            .diffs()
            .fold((0.0f64, 0.0f64), |(lo, hi), d| (lo.min(d), hi.max(d)));
        let padding = (max - min).abs().max(0.1) * 0.1;
        (min - padding, max + padding)
    }
}

impl Default for SweepPanel {
    fn default() -> Self {
        Self::new()
    }
}

impl Component for SweepPanel {
    fn handle_key(&mut self, _key: KeyEvent, _state: &mut DashboardState) -> EventResult {
        EventResult::NotHandled
    }

    fn render(&mut self, frame: &mut Frame, area: Rect, state: &DashboardState) {
        let title = format!(" 1D SWEEP: {} ", state.selected_name());
        let block = focused_block(&title, state.focused == Panel::Sweep, "[j/k] select");

        let Some(sweep) = state.sweep.as_ref().filter(|s| !s.is_empty()) else {
            Self::render_empty(frame, area, block);
            return;
        };

        let line: Vec<(f64, f64)> = sweep.records.iter().map(|r| (r.weight, r.diff)).collect();
        let boundary: Vec<(f64, f64)> = sweep
            .boundary_points(state.eps)
            .map(|r| (r.weight, r.diff))
            .collect();
        let closest: Vec<(f64, f64)> = sweep
            .closest_to_zero()
            .map(|r| vec![(r.weight, r.diff)])
            .unwrap_or_default();

        let x_min = line.first().map_or(0.0, |p| p.0);
        let x_max = line.last().map_or(1.0, |p| p.0);
        let x_padding = ((x_max - x_min).abs() * 0.02).max(1e-3);
        let (y_min, y_max) = Self::diff_bounds(sweep);

        let zero: Vec<(f64, f64)> = vec![(x_min, 0.0), (x_max, 0.0)];
        let baseline_weight = state.table.rows()[state.selected].weight;
        let baseline: Vec<(f64, f64)> = vec![(baseline_weight, y_min), (baseline_weight, y_max)];

        let datasets = vec![
            Dataset::default()
                .marker(symbols::Marker::Dot)
                .graph_type(GraphType::Line)
                .style(Style::default().fg(Color::DarkGray))
                .data(&zero),
            Dataset::default()
                .marker(symbols::Marker::Dot)
                .graph_type(GraphType::Line)
                .style(Style::default().fg(Color::Blue))
                .data(&baseline),
            Dataset::default()
                .name("diff")
                .marker(symbols::Marker::Braille)
                .graph_type(GraphType::Line)
                .style(Style::default().fg(CUR_COLOR))
                .data(&line),
            Dataset::default()
                .name(format!("|diff|<={}", state.eps))
                .marker(symbols::Marker::Dot)
                .graph_type(GraphType::Scatter)
                .style(Style::default().fg(BOUNDARY_COLOR))
                .data(&boundary),
            Dataset::default()
                .name("closest")
                .marker(symbols::Marker::Block)
                .graph_type(GraphType::Scatter)
                .style(Style::default().fg(Color::Red))
                .data(&closest),
        ];

        let x_labels = vec![
            Span::raw(format_weight(x_min)),
            Span::raw(format_weight((x_min + x_max) / 2.0)),
            Span::raw(format_weight(x_max)),
        ];
        let y_labels = vec![
            Span::raw(format_diff(y_min)),
            Span::raw(format_diff(0.0)),
            Span::raw(format_diff(y_max)),
        ];

        let chart = Chart::new(datasets)
            .block(block)
            .x_axis(
                Axis::default()
                    .title("weight".dark_gray())
                    .bounds([x_min - x_padding, x_max + x_padding])
                    .labels(x_labels),
            )
            .y_axis(
                Axis::default()
                    .title("cur - ex".dark_gray())
                    .bounds([y_min, y_max])
                    .labels(y_labels),
            );

        frame.render_widget(chart, area);
    }
}
