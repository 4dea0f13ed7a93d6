//! Command-line runner and terminal dashboard for weight-sensitivity analysis
//!
//! Loads a dimension table from CSV, compares the "Ex" and "Current" totals,
//! runs the 1D boundary sweep and the 3D grid sweep from `relsense_core`, and
//! writes the results to CSV or JSON. The `dashboard` subcommand explores the
//! same analyses interactively.

pub mod app;
pub mod commands;
pub mod components;
pub mod data;
pub mod logging;
pub mod settings;
pub mod state;
pub mod util;

pub use app::App;
pub use logging::init_logging;
pub use settings::Settings;
