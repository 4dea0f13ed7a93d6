//! Per-dimension Ex/Current bars, weighted or raw

use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    Frame,
    layout::{Direction, Rect},
    style::{Modifier, Style},
    text::Line,
    widgets::{Bar, BarChart, BarGroup},
};
use relsense_core::scoring::weighted_breakdown;

use super::{Component, EventResult};
use crate::state::{DashboardState, Panel};
use crate::util::format::format_score;
use crate::util::styles::{CUR_COLOR, EX_COLOR, focused_block};

/// Bars are integer-valued, scores keep two decimals
const BAR_SCALE: f64 = 100.0;

pub struct BarsPanel;

impl BarsPanel {
    pub fn new() -> Self {
        Self
    }

    fn bar(value: f64, label: &'static str, style: Style) -> Bar<'static> {
        Bar::default()
            .value((value * BAR_SCALE).round().max(0.0) as u64)
            .label(Line::from(label))
            .text_value(format_score(value))
            .style(style)
            .value_style(style.add_modifier(Modifier::REVERSED))
    }
}

impl Default for BarsPanel {
    fn default() -> Self {
        Self::new()
    }
}

impl Component for BarsPanel {
    fn handle_key(&mut self, key: KeyEvent, state: &mut DashboardState) -> EventResult {
        match key.code {
            KeyCode::Char('w') => {
                state.weighted_bars = !state.weighted_bars;
                EventResult::Handled
            }
            _ => EventResult::NotHandled,
        }
    }

    fn render(&mut self, frame: &mut Frame, area: Rect, state: &DashboardState) {
        let title = if state.weighted_bars {
            " WEIGHTED SCORES "
        } else {
            " RAW SCORES "
        };
        let block = focused_block(
            title,
            state.focused == Panel::Bars,
            "[w] weighted/raw [j/k] select",
        );

        let ex_style = Style::default().fg(EX_COLOR);
        let cur_style = Style::default().fg(CUR_COLOR);

        let mut chart = BarChart::default()
            .block(block)
            .direction(Direction::Horizontal)
            .bar_width(1)
            .bar_gap(0)
            .group_gap(1);

        for row in weighted_breakdown(&state.table) {
            let (ex, cur) = if state.weighted_bars {
                (row.ex_weighted, row.cur_weighted)
            } else {
                (row.ex_score, row.cur_score)
            };
            let bars = [
                Self::bar(ex, "Ex", ex_style),
                Self::bar(cur, "Cur", cur_style),
            ];
            chart = chart.data(BarGroup::default().label(Line::from(row.name)).bars(&bars));
        }

        frame.render_widget(chart, area);
    }
}
