//! Shared styling for dashboard panels

use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders};

pub const FOCUS_COLOR: Color = Color::Yellow;
pub const HELP_COLOR: Color = Color::DarkGray;
pub const HEADER_COLOR: Color = Color::Cyan;

/// "Ex" series and "Ex ahead" cells
pub const EX_COLOR: Color = Color::Magenta;
/// "Current" series and "Current ahead" cells
pub const CUR_COLOR: Color = Color::Green;
/// Points within eps of a tie
pub const BOUNDARY_COLOR: Color = Color::Yellow;

/// Bordered block whose border turns yellow when focused. The help text is
/// shown along the bottom border only while focused.
pub fn focused_block(title: &str, focused: bool, help_text: &str) -> Block<'static> {
    let border_style = if focused {
        Style::default().fg(FOCUS_COLOR)
    } else {
        Style::default()
    };

    let mut block = Block::default()
        .borders(Borders::ALL)
        .border_style(border_style)
        .title(title.to_string());

    if focused && !help_text.is_empty() {
        block = block.title_bottom(Line::from(format!(" {} ", help_text)).fg(HELP_COLOR));
    }
    block
}

/// Color for a signed `cur - ex` difference
pub fn diff_color(diff: f64, eps: f64) -> Color {
    if diff.abs() <= eps {
        BOUNDARY_COLOR
    } else if diff > 0.0 {
        CUR_COLOR
    } else {
        EX_COLOR
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_diff_color() {
        assert_eq!(diff_color(0.01, 0.02), BOUNDARY_COLOR);
        assert_eq!(diff_color(-0.02, 0.02), BOUNDARY_COLOR);
        assert_eq!(diff_color(0.5, 0.02), CUR_COLOR);
        assert_eq!(diff_color(-0.5, 0.02), EX_COLOR);
    }
}
