//! Dashboard state shared by every panel

use std::path::PathBuf;

use relsense_core::scoring::{weighted_breakdown, weighted_total};
use relsense_core::sensitivity::{sweep_1d, sweep_3d};
use relsense_core::{DimensionTable, GridResult, SweepResult, Totals};

use crate::data::export::{ExportError, ExportFormat, export_breakdown, export_grid, export_sweep};
use crate::data::names::resolve_dimension_name;
use crate::settings::Settings;

/// Step applied by `+` / `-` to the boundary tolerance
pub const EPS_STEP: f64 = 0.005;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Panel {
    #[default]
    Table,
    Bars,
    Sweep,
    Grid,
}

impl Panel {
    pub fn next(self) -> Self {
        match self {
            Panel::Table => Panel::Bars,
            Panel::Bars => Panel::Sweep,
            Panel::Sweep => Panel::Grid,
            Panel::Grid => Panel::Table,
        }
    }
}

pub struct DashboardState {
    pub table: DimensionTable,
    pub settings: Settings,
    pub out_dir: PathBuf,
    pub totals: Totals,

    pub focused: Panel,
    /// Index of the highlighted dimension
    pub selected: usize,
    /// Row indices driven by the 3D sweep, in slot order a/b/c
    pub triple: [usize; 3],
    /// Show weighted contributions in the bar panel instead of raw scores
    pub weighted_bars: bool,
    /// Index into the third dimension's samples shown by the heat map
    pub grid_slice: usize,
    pub eps: f64,

    pub sweep: Option<SweepResult>,
    pub grid: Option<GridResult>,

    pub error_message: Option<String>,
    pub info_message: Option<String>,
    pub exit: bool,
}

impl DashboardState {
    pub fn new(table: DimensionTable, settings: Settings, out_dir: PathBuf) -> Self {
        let last = table.len().saturating_sub(1);
        let fallback = [0, 1.min(last), 2.min(last)];
        let triple = settings
            .default_triple
            .as_ref()
            .and_then(|names| resolve_triple(&table, names))
            .unwrap_or(fallback);
        let selected = settings
            .default_dimension
            .as_deref()
            .and_then(|name| resolve_dimension_name(&table, name).ok())
            .and_then(|name| table.index_of(&name))
            .unwrap_or(0);

        let mut state = Self {
            totals: weighted_total(&table),
            eps: settings.eps,
            table,
            settings,
            out_dir,
            focused: Panel::default(),
            selected,
            triple,
            weighted_bars: true,
            grid_slice: 0,
            sweep: None,
            grid: None,
            error_message: None,
            info_message: None,
            exit: false,
        };
        state.rerun();
        state
    }

    pub fn selected_name(&self) -> &str {
        &self.table.rows()[self.selected].name
    }

    pub fn triple_names(&self) -> [&str; 3] {
        self.triple.map(|i| self.table.rows()[i].name.as_str())
    }

    pub fn select_next(&mut self) {
        if self.selected + 1 < self.table.len() {
            self.selected += 1;
            self.rerun_sweep();
        }
    }

    pub fn select_prev(&mut self) {
        if self.selected > 0 {
            self.selected -= 1;
            self.rerun_sweep();
        }
    }

    /// Put the highlighted dimension into 3D slot `slot` and recompute the grid
    pub fn assign_slot(&mut self, slot: usize) {
        if slot < self.triple.len() {
            self.triple[slot] = self.selected;
            self.rerun_grid();
        }
    }

    /// Change eps by `delta`, never below zero
    pub fn adjust_eps(&mut self, delta: f64) {
        let eps = ((self.eps + delta).max(0.0) * 1000.0).round() / 1000.0;
        self.eps = eps;
    }

    /// Number of samples per grid axis
    pub fn grid_axis_len(&self) -> usize {
        self.settings.sweep_3d.steps
    }

    pub fn next_slice(&mut self) {
        if self.grid_slice + 1 < self.grid_axis_len() {
            self.grid_slice += 1;
        }
    }

    pub fn prev_slice(&mut self) {
        self.grid_slice = self.grid_slice.saturating_sub(1);
    }

    pub fn rerun(&mut self) {
        self.clear_error();
        self.rerun_sweep();
        self.rerun_grid();
    }

    fn rerun_sweep(&mut self) {
        let range = self.settings.sweep_1d;
        let result = sweep_1d(
            &self.table,
            self.selected_name(),
            range.low,
            range.high,
            range.steps,
        );
        match result {
            Ok(result) => self.sweep = Some(result),
            Err(e) => {
                self.sweep = None;
                self.set_error(format!("1D sweep: {}", e));
            }
        }
    }

    fn rerun_grid(&mut self) {
        let range = self.settings.sweep_3d;
        let result = sweep_3d(
            &self.table,
            self.triple_names(),
            range.low,
            range.high,
            range.steps,
        );
        match result {
            Ok(result) => {
                tracing::debug!("3D grid recomputed: {} points", result.len());
                self.grid = Some(result);
            }
            Err(e) => {
                self.grid = None;
                self.set_error(format!("3D sweep: {}", e));
            }
        }
    }

    /// Write the breakdown and whichever sweeps are present into `out_dir`
    pub fn export(&mut self) {
        match self.write_exports(ExportFormat::Csv) {
            Ok(count) => {
                self.clear_error();
                self.info_message = Some(format!(
                    "Exported {} file(s) to {}",
                    count,
                    self.out_dir.display()
                ));
            }
            Err(e) => self.set_error(format!("Export failed: {}", e)),
        }
    }

    fn write_exports(&self, format: ExportFormat) -> Result<usize, ExportError> {
        let rows = weighted_breakdown(&self.table);
        export_breakdown(&self.out_dir, &rows, format)?;
        let mut count = 1;
        if let Some(sweep) = &self.sweep {
            export_sweep(&self.out_dir, sweep, format)?;
            count += 1;
        }
        if let Some(grid) = &self.grid {
            export_grid(&self.out_dir, grid, format)?;
            count += 1;
        }
        Ok(count)
    }

    pub fn set_error(&mut self, msg: String) {
        tracing::warn!("{}", msg);
        self.info_message = None;
        self.error_message = Some(msg);
    }

    pub fn clear_error(&mut self) {
        self.error_message = None;
    }
}

fn resolve_triple(table: &DimensionTable, names: &[String; 3]) -> Option<[usize; 3]> {
    let mut triple = [0; 3];
    for (slot, name) in triple.iter_mut().zip(names) {
        let canonical = resolve_dimension_name(table, name).ok()?;
        *slot = table.index_of(&canonical)?;
    }
    Some(triple)
}

#[cfg(test)]
mod tests {
    use super::*;
    use relsense_core::{SweepRange, TableBuilder};
    use tempfile::tempdir;

    fn table() -> DimensionTable {
        TableBuilder::new()
            .dimension("Love", 0.4, 8.0, 7.0)
            .dimension("Trust", 0.3, 9.0, 6.0)
            .dimension("Fun", 0.2, 6.0, 9.0)
            .dimension("Communication", 0.1, 5.0, 8.0)
            .build()
            .unwrap()
    }

    fn settings() -> Settings {
        Settings {
            sweep_1d: SweepRange::new(0.0, 0.5, 11),
            sweep_3d: SweepRange::new(0.05, 0.40, 4),
            ..Settings::default()
        }
    }

    #[test]
    fn test_new_runs_both_sweeps() {
        let state = DashboardState::new(table(), settings(), PathBuf::from("outputs"));

        assert!(state.error_message.is_none());
        assert_eq!(state.sweep.as_ref().unwrap().dimension, "Love");
        assert_eq!(state.grid.as_ref().unwrap().dimensions[2], "Fun");
        assert_eq!(state.triple_names(), ["Love", "Trust", "Fun"]);
    }

    #[test]
    fn test_defaults_from_settings() {
        let settings = Settings {
            default_dimension: Some("fun".to_string()),
            default_triple: Some([
                "communication".to_string(),
                "Fun".to_string(),
                "Love".to_string(),
            ]),
            ..settings()
        };
        let state = DashboardState::new(table(), settings, PathBuf::from("outputs"));

        assert_eq!(state.selected_name(), "Fun");
        assert_eq!(state.triple, [3, 2, 0]);
    }

    #[test]
    fn test_selection_reruns_sweep() {
        let mut state = DashboardState::new(table(), settings(), PathBuf::from("outputs"));
        state.select_next();
        assert_eq!(state.sweep.as_ref().unwrap().dimension, "Trust");

        state.select_prev();
        state.select_prev();
        assert_eq!(state.selected, 0);
    }

    #[test]
    fn test_duplicate_slot_reports_error() {
        let mut state = DashboardState::new(table(), settings(), PathBuf::from("outputs"));
        // Love is already in slot a
        state.assign_slot(1);

        assert!(state.grid.is_none());
        assert!(state.error_message.as_ref().unwrap().contains("3D sweep"));

        state.select_next();
        state.select_next();
        state.select_next();
        state.assign_slot(1);
        assert!(state.grid.is_some());
    }

    #[test]
    fn test_adjust_eps_clamps() {
        let mut state = DashboardState::new(table(), settings(), PathBuf::from("outputs"));
        state.adjust_eps(EPS_STEP);
        assert_eq!(state.eps, 0.025);

        for _ in 0..10 {
            state.adjust_eps(-EPS_STEP);
        }
        assert_eq!(state.eps, 0.0);
    }

    #[test]
    fn test_panel_cycle() {
        let mut panel = Panel::Table;
        for _ in 0..4 {
            panel = panel.next();
        }
        assert_eq!(panel, Panel::Table);
    }

    #[test]
    fn test_export_writes_files() {
        let dir = tempdir().unwrap();
        let mut state = DashboardState::new(table(), settings(), dir.path().to_path_buf());
        state.export();

        assert!(state.error_message.is_none());
        assert!(dir.path().join("breakdown.csv").exists());
        assert!(dir.path().join("boundary_love.csv").exists());
        assert!(dir.path().join("tri_sensitivity.csv").exists());
        assert!(state.info_message.unwrap().starts_with("Exported 3"));
    }
}
