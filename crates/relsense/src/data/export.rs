//! Writing sweep and breakdown results to disk
//!
//! File names are fixed so repeated runs overwrite the previous output:
//! - `boundary_<normalized dimension>.csv` for a 1D sweep
//! - `tri_sensitivity.csv` for a 3D grid
//! - `breakdown.csv` for the per-dimension weighted breakdown
//!
//! JSON output uses the same stems with a `.json` extension.

use std::path::{Path, PathBuf};

use relsense_core::model::WeightedBreakdown;
use relsense_core::{GridResult, SweepResult};
use serde_json::{Map, Value};

use super::names::normalize_text;
use crate::util::io::atomic_write;

const GRID_STEM: &str = "tri_sensitivity";
const BREAKDOWN_STEM: &str = "breakdown";

#[derive(Debug)]
pub enum ExportError {
    Io(String),
    Csv(String),
    Json(String),
}

impl std::fmt::Display for ExportError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ExportError::Io(msg) => write!(f, "IO error: {}", msg),
            ExportError::Csv(msg) => write!(f, "CSV error: {}", msg),
            ExportError::Json(msg) => write!(f, "JSON error: {}", msg),
        }
    }
}

impl std::error::Error for ExportError {}

impl From<csv::Error> for ExportError {
    fn from(err: csv::Error) -> Self {
        ExportError::Csv(err.to_string())
    }
}

impl From<serde_json::Error> for ExportError {
    fn from(err: serde_json::Error) -> Self {
        ExportError::Json(err.to_string())
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum ExportFormat {
    #[default]
    Csv,
    Json,
}

impl ExportFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            ExportFormat::Csv => "csv",
            ExportFormat::Json => "json",
        }
    }
}

pub fn sweep_file_name(dimension: &str, format: ExportFormat) -> String {
    format!("boundary_{}.{}", normalize_text(dimension), format.extension())
}

pub fn grid_file_name(format: ExportFormat) -> String {
    format!("{}.{}", GRID_STEM, format.extension())
}

pub fn breakdown_file_name(format: ExportFormat) -> String {
    format!("{}.{}", BREAKDOWN_STEM, format.extension())
}

// ============================================================================
// Encoding
// ============================================================================

/// `weight,ex_total,cur_total,diff`, one row per sample
pub fn sweep_to_csv(sweep: &SweepResult) -> Result<Vec<u8>, ExportError> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    for record in &sweep.records {
        writer.serialize(record)?;
    }
    finish(writer)
}

/// `<dimA>,<dimB>,<dimC>,ex_total,cur_total,diff`, in grid order
pub fn grid_to_csv(grid: &GridResult) -> Result<Vec<u8>, ExportError> {
    let mut writer = csv::Writer::from_writer(Vec::new());

    let [a, b, c] = &grid.dimensions;
    writer.write_record([a.as_str(), b.as_str(), c.as_str(), "ex_total", "cur_total", "diff"])?;

    for r in &grid.records {
        writer.write_record([
            r.weights[0].to_string(),
            r.weights[1].to_string(),
            r.weights[2].to_string(),
            r.ex_total.to_string(),
            r.cur_total.to_string(),
            r.diff.to_string(),
        ])?;
    }
    finish(writer)
}

pub fn breakdown_to_csv(rows: &[WeightedBreakdown]) -> Result<Vec<u8>, ExportError> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record([
        "Dimension",
        "Weight",
        "ExScore",
        "CurScore",
        "ExWeighted",
        "CurWeighted",
    ])?;

    for r in rows {
        writer.write_record([
            r.name.clone(),
            r.weight.to_string(),
            r.ex_score.to_string(),
            r.cur_score.to_string(),
            r.ex_weighted.to_string(),
            r.cur_weighted.to_string(),
        ])?;
    }
    finish(writer)
}

/// JSON array of objects keyed by the grid's dimension names
pub fn grid_to_json(grid: &GridResult) -> Result<Vec<u8>, ExportError> {
    let records: Vec<Value> = grid
        .records
        .iter()
        .map(|r| {
            let mut obj = Map::new();
            for (name, weight) in grid.dimensions.iter().zip(r.weights) {
                obj.insert(name.clone(), Value::from(weight));
            }
            obj.insert("ex_total".into(), Value::from(r.ex_total));
            obj.insert("cur_total".into(), Value::from(r.cur_total));
            obj.insert("diff".into(), Value::from(r.diff));
            Value::Object(obj)
        })
        .collect();

    Ok(serde_json::to_vec_pretty(&records)?)
}

fn finish(writer: csv::Writer<Vec<u8>>) -> Result<Vec<u8>, ExportError> {
    writer
        .into_inner()
        .map_err(|e| ExportError::Csv(e.error().to_string()))
}

// ============================================================================
// Writing
// ============================================================================

/// Write a 1D sweep into `out_dir`, returning the file path
pub fn export_sweep(
    out_dir: &Path,
    sweep: &SweepResult,
    format: ExportFormat,
) -> Result<PathBuf, ExportError> {
    let content = match format {
        ExportFormat::Csv => sweep_to_csv(sweep)?,
        ExportFormat::Json => serde_json::to_vec_pretty(&sweep.records)?,
    };
    write_output(out_dir, &sweep_file_name(&sweep.dimension, format), &content)
}

/// Write a 3D grid into `out_dir`, returning the file path
pub fn export_grid(
    out_dir: &Path,
    grid: &GridResult,
    format: ExportFormat,
) -> Result<PathBuf, ExportError> {
    let content = match format {
        ExportFormat::Csv => grid_to_csv(grid)?,
        ExportFormat::Json => grid_to_json(grid)?,
    };
    write_output(out_dir, &grid_file_name(format), &content)
}

pub fn export_breakdown(
    out_dir: &Path,
    rows: &[WeightedBreakdown],
    format: ExportFormat,
) -> Result<PathBuf, ExportError> {
    let content = match format {
        ExportFormat::Csv => breakdown_to_csv(rows)?,
        ExportFormat::Json => serde_json::to_vec_pretty(rows)?,
    };
    write_output(out_dir, &breakdown_file_name(format), &content)
}

fn write_output(out_dir: &Path, file_name: &str, content: &[u8]) -> Result<PathBuf, ExportError> {
    let path = out_dir.join(file_name);
    atomic_write(&path, content)
        .map_err(|e| ExportError::Io(format!("Failed to write {}: {}", path.display(), e)))?;
    tracing::info!("Saved {}", path.display());
    Ok(path)
}
