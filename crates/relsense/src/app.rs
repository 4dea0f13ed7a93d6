use std::io;
use std::path::PathBuf;

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use ratatui::{
    DefaultTerminal, Frame,
    layout::{Constraint, Direction, Layout},
};
use relsense_core::DimensionTable;

use crate::components::{
    Component, EventResult, bars_panel::BarsPanel, grid_panel::GridPanel, status_bar::StatusBar,
    sweep_panel::SweepPanel, table_panel::TablePanel,
};
use crate::settings::Settings;
use crate::state::{DashboardState, EPS_STEP, Panel};

/// Interactive sensitivity dashboard
pub struct App {
    state: DashboardState,
    table_panel: TablePanel,
    bars_panel: BarsPanel,
    sweep_panel: SweepPanel,
    grid_panel: GridPanel,
    status_bar: StatusBar,
}

impl App {
    pub fn new(table: DimensionTable, settings: Settings, out_dir: PathBuf) -> Self {
        Self {
            state: DashboardState::new(table, settings, out_dir),
            table_panel: TablePanel::new(),
            bars_panel: BarsPanel::new(),
            sweep_panel: SweepPanel::new(),
            grid_panel: GridPanel::new(),
            status_bar: StatusBar::new(),
        }
    }

    pub fn state(&self) -> &DashboardState {
        &self.state
    }

    /// Runs the main loop until the user quits
    pub fn run(&mut self, terminal: &mut DefaultTerminal) -> color_eyre::Result<()> {
        tracing::info!("Dashboard started with {} dimensions", self.state.table.len());
        while !self.state.exit {
            terminal.draw(|frame| self.draw(frame))?;
            self.handle_events()?;
        }
        Ok(())
    }

    fn draw(&mut self, frame: &mut Frame) {
        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(0), Constraint::Length(2)])
            .split(frame.area());

        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(45), Constraint::Percentage(55)])
            .split(rows[0]);

        let left = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
            .split(columns[0]);

        let right = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Percentage(45), Constraint::Percentage(55)])
            .split(columns[1]);

        self.table_panel.render(frame, left[0], &self.state);
        self.bars_panel.render(frame, left[1], &self.state);
        self.sweep_panel.render(frame, right[0], &self.state);
        self.grid_panel.render(frame, right[1], &self.state);
        self.status_bar.render(frame, rows[1], &self.state);
    }

    fn handle_events(&mut self) -> io::Result<()> {
        match event::read()? {
            Event::Key(key_event) if key_event.kind == KeyEventKind::Press => {
                self.handle_key_event(key_event)
            }
            _ => {}
        };
        Ok(())
    }

    pub fn handle_key_event(&mut self, key: KeyEvent) {
        let state = &mut self.state;

        // Global key bindings
        match key.code {
            KeyCode::Char('q') if key.modifiers.is_empty() => {
                state.exit = true;
                return;
            }
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                state.exit = true;
                return;
            }
            KeyCode::Esc => {
                state.clear_error();
                state.info_message = None;
                return;
            }
            KeyCode::Tab => {
                state.focused = state.focused.next();
                return;
            }
            KeyCode::Char('r') => {
                state.rerun();
                return;
            }
            KeyCode::Char('+') | KeyCode::Char('=') => {
                state.adjust_eps(EPS_STEP);
                return;
            }
            KeyCode::Char('-') => {
                state.adjust_eps(-EPS_STEP);
                return;
            }
            KeyCode::Char('e') => {
                state.export();
                return;
            }
            KeyCode::Char(c @ ('a' | 'b' | 'c')) if key.modifiers.is_empty() => {
                state.assign_slot((c as u8 - b'a') as usize);
                return;
            }
            _ => {}
        }

        let result = match state.focused {
            Panel::Table => self.table_panel.handle_key(key, state),
            Panel::Bars => self.bars_panel.handle_key(key, state),
            Panel::Sweep => self.sweep_panel.handle_key(key, state),
            Panel::Grid => self.grid_panel.handle_key(key, state),
        };

        // Panels without their own selection keys drive the dimension list
        if result == EventResult::NotHandled && state.focused != Panel::Grid {
            self.table_panel.handle_key(key, state);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use relsense_core::{SweepRange, TableBuilder};
    use tempfile::tempdir;

    fn app(out_dir: PathBuf) -> App {
        let table = TableBuilder::new()
            .dimension("Love", 0.4, 8.0, 7.0)
            .dimension("Trust", 0.3, 9.0, 6.0)
            .dimension("Fun", 0.2, 6.0, 9.0)
            .dimension("Communication", 0.1, 5.0, 8.0)
            .build()
            .unwrap();
        let settings = Settings {
            sweep_1d: SweepRange::new(0.0, 0.5, 11),
            sweep_3d: SweepRange::new(0.05, 0.40, 4),
            ..Settings::default()
        };
        App::new(table, settings, out_dir)
    }

    fn press(app: &mut App, code: KeyCode) {
        app.handle_key_event(KeyEvent::new(code, KeyModifiers::NONE));
    }

    #[test]
    fn test_quit_keys() {
        let mut a = app(PathBuf::from("outputs"));
        press(&mut a, KeyCode::Char('q'));
        assert!(a.state().exit);

        let mut a = app(PathBuf::from("outputs"));
        a.handle_key_event(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL));
        assert!(a.state().exit);
    }

    #[test]
    fn test_selection_follows_focus() {
        let mut a = app(PathBuf::from("outputs"));
        press(&mut a, KeyCode::Char('j'));
        assert_eq!(a.state().selected, 1);

        // Sweep panel has no keys of its own, j still moves the selection
        press(&mut a, KeyCode::Tab);
        press(&mut a, KeyCode::Tab);
        assert_eq!(a.state().focused, Panel::Sweep);
        press(&mut a, KeyCode::Char('j'));
        assert_eq!(a.state().selected, 2);

        // Grid panel uses j/k for slices
        press(&mut a, KeyCode::Tab);
        press(&mut a, KeyCode::Char('j'));
        assert_eq!(a.state().selected, 2);
        assert_eq!(a.state().grid_slice, 1);
    }

    #[test]
    fn test_slot_assignment_and_error_clear() {
        let mut a = app(PathBuf::from("outputs"));
        press(&mut a, KeyCode::Char('b'));
        assert!(a.state().error_message.is_some());

        press(&mut a, KeyCode::Esc);
        assert!(a.state().error_message.is_none());

        press(&mut a, KeyCode::Char('k'));
        press(&mut a, KeyCode::Char('j'));
        press(&mut a, KeyCode::Char('j'));
        press(&mut a, KeyCode::Char('j'));
        press(&mut a, KeyCode::Char('b'));
        assert_eq!(a.state().triple, [0, 3, 2]);
        assert!(a.state().grid.is_some());
    }

    #[test]
    fn test_eps_and_export_keys() {
        let dir = tempdir().unwrap();
        let mut a = app(dir.path().to_path_buf());

        press(&mut a, KeyCode::Char('+'));
        assert_eq!(a.state().eps, 0.025);
        press(&mut a, KeyCode::Char('-'));
        press(&mut a, KeyCode::Char('-'));
        assert_eq!(a.state().eps, 0.015);

        press(&mut a, KeyCode::Char('e'));
        assert!(dir.path().join("tri_sensitivity.csv").exists());
    }

    #[test]
    fn test_bars_toggle() {
        let mut a = app(PathBuf::from("outputs"));
        press(&mut a, KeyCode::Tab);
        press(&mut a, KeyCode::Char('w'));
        assert!(!a.state().weighted_bars);
    }
}
