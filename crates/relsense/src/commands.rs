//! Non-interactive subcommands
//!
//! Each command writes human-readable output to the given writer and any
//! export files into the context's output directory.

use std::io::Write;
use std::path::{Path, PathBuf};

use color_eyre::eyre::eyre;
use relsense_core::scoring::{weighted_breakdown, weighted_total};
use relsense_core::sensitivity::{CrossingDirection, Preference, sweep_1d, sweep_3d};
use relsense_core::{DimensionTable, GridResult, SweepRange, SweepResult};

use crate::data::export::{ExportFormat, export_breakdown, export_grid, export_sweep};
use crate::data::loader::load_table;
use crate::data::names::resolve_dimension_name;
use crate::settings::{Settings, SettingsError, validate_eps};
use crate::util::format::{format_diff, format_score, format_weight};

/// Everything a command needs: the loaded table and where results go
pub struct Context {
    pub table: DimensionTable,
    pub settings: Settings,
    pub out_dir: PathBuf,
}

impl Context {
    /// Load the CSV at `csv_path`, warning on stderr when weights were normalized
    pub fn load(csv_path: &Path, settings: Settings, out_dir: PathBuf) -> color_eyre::Result<Self> {
        let loaded = load_table(csv_path)?;
        if loaded.was_normalized() {
            eprintln!(
                "[warn] Weight sum = {:.4} is not 1. Normalizing.",
                loaded.original_weight_sum
            );
        }
        Ok(Self {
            table: loaded.table,
            settings,
            out_dir,
        })
    }
}

/// Sweep options after merging CLI flags over settings
#[derive(Debug, Clone, Copy)]
pub struct SweepOptions {
    pub range: SweepRange,
    pub eps: f64,
    pub format: ExportFormat,
}

impl SweepOptions {
    /// Override `base` with whichever flags were given
    pub fn merge(
        base: SweepRange,
        eps: f64,
        low: Option<f64>,
        high: Option<f64>,
        steps: Option<usize>,
        flag_eps: Option<f64>,
        format: ExportFormat,
    ) -> Result<Self, SettingsError> {
        let eps = flag_eps.unwrap_or(eps);
        validate_eps(eps)?;

        Ok(Self {
            range: SweepRange::new(
                low.unwrap_or(base.low),
                high.unwrap_or(base.high),
                steps.unwrap_or(base.steps),
            ),
            eps,
            format,
        })
    }
}

pub fn list<W: Write>(out: &mut W, table: &DimensionTable) -> color_eyre::Result<()> {
    writeln!(out, "Available Dimension values:")?;
    for (i, name) in table.names().enumerate() {
        writeln!(out, "  {:2}. {}", i + 1, name)?;
    }
    Ok(())
}

pub fn summary<W: Write>(
    out: &mut W,
    ctx: &Context,
    export: Option<ExportFormat>,
) -> color_eyre::Result<()> {
    let breakdown = weighted_breakdown(&ctx.table);
    let name_width = breakdown
        .iter()
        .map(|r| r.name.chars().count())
        .max()
        .unwrap_or(0)
        .max("Dimension".len());

    writeln!(
        out,
        "{:<name_width$}  {:>7}  {:>6}  {:>6}  {:>7}  {:>7}",
        "Dimension", "Weight", "Ex", "Cur", "Ex*w", "Cur*w"
    )?;
    for r in &breakdown {
        writeln!(
            out,
            "{:<name_width$}  {:>7}  {:>6}  {:>6}  {:>7}  {:>7}",
            r.name,
            format_weight(r.weight),
            format_score(r.ex_score),
            format_score(r.cur_score),
            format_score(r.ex_weighted),
            format_score(r.cur_weighted),
        )?;
    }

    let totals = weighted_total(&ctx.table);
    writeln!(out)?;
    writeln!(out, "Ex total:      {}", format_score(totals.ex))?;
    writeln!(out, "Current total: {}", format_score(totals.cur))?;
    writeln!(
        out,
        "diff:          {} ({} ahead)",
        format_diff(totals.diff()),
        Preference::of(totals.diff()).label()
    )?;

    if let Some(format) = export {
        let path = export_breakdown(&ctx.out_dir, &breakdown, format)?;
        writeln!(out, "[ok] breakdown -> {}", path.display())?;
    }
    Ok(())
}

/// Run and export a 1D sweep, returning the written file
pub fn sweep<W: Write>(
    out: &mut W,
    ctx: &Context,
    dim_query: &str,
    opts: &SweepOptions,
) -> color_eyre::Result<PathBuf> {
    let dimension = resolve_dimension_name(&ctx.table, dim_query)?;
    let SweepRange { low, high, steps } = opts.range;

    let result = sweep_1d(&ctx.table, &dimension, low, high, steps)?;
    let path = export_sweep(&ctx.out_dir, &result, opts.format)?;

    writeln!(
        out,
        "[ok] 1D boundary -> {} ({} rows)  dimension={}",
        path.display(),
        result.len(),
        dimension
    )?;
    describe_sweep(out, &result, opts.eps)?;
    Ok(path)
}

fn describe_sweep<W: Write>(out: &mut W, result: &SweepResult, eps: f64) -> std::io::Result<()> {
    if let Some(closest) = result.closest_to_zero() {
        writeln!(
            out,
            "     closest to tie: weight={} diff={}",
            format_weight(closest.weight),
            format_diff(closest.diff)
        )?;
    }
    for crossing in result.crossings() {
        let leader = match crossing.direction {
            CrossingDirection::TowardCurrent => "Current",
            CrossingDirection::TowardEx => "Ex",
        };
        writeln!(
            out,
            "     crossing at weight~{}: {} takes the lead",
            format_weight(crossing.weight),
            leader
        )?;
    }
    writeln!(
        out,
        "     {} points within eps={}",
        result.boundary_points(eps).count(),
        eps
    )
}

/// Run and export a 3D grid, returning the written file
pub fn grid<W: Write>(
    out: &mut W,
    ctx: &Context,
    dim_queries: [&str; 3],
    opts: &SweepOptions,
) -> color_eyre::Result<PathBuf> {
    let [a, b, c] = dim_queries;
    let dims = [
        resolve_dimension_name(&ctx.table, a)?,
        resolve_dimension_name(&ctx.table, b)?,
        resolve_dimension_name(&ctx.table, c)?,
    ];
    let SweepRange { low, high, steps } = opts.range;

    let driven = [dims[0].as_str(), dims[1].as_str(), dims[2].as_str()];
    let result = sweep_3d(&ctx.table, driven, low, high, steps)?;
    let path = export_grid(&ctx.out_dir, &result, opts.format)?;

    writeln!(
        out,
        "[ok] 3D sensitivity -> {} ({} rows)  dims={}",
        path.display(),
        result.len(),
        dims.join(", ")
    )?;
    describe_grid(out, &result, opts.eps)?;
    Ok(path)
}

fn describe_grid<W: Write>(out: &mut W, result: &GridResult, eps: f64) -> std::io::Result<()> {
    let (ex, cur, tie) = result.preference_counts();
    writeln!(out, "     Ex ahead: {ex}  Current ahead: {cur}  tied: {tie}")?;
    writeln!(
        out,
        "     {} points within eps={}",
        result.boundary_points(eps).count(),
        eps
    )
}

/// Both sweeps with the settings' defaults. A failure in one is reported and
/// does not stop the other.
pub fn run<W: Write>(out: &mut W, ctx: &Context, format: ExportFormat) -> color_eyre::Result<()> {
    let settings = &ctx.settings;
    let names: Vec<&str> = ctx.table.names().collect();

    let sweep_opts = SweepOptions {
        range: settings.sweep_1d,
        eps: settings.eps,
        format,
    };
    let dimension = settings
        .default_dimension
        .as_deref()
        .or_else(|| names.first().copied());
    let outcome = match dimension {
        Some(dim) => sweep(out, ctx, dim, &sweep_opts).map(|_| ()),
        None => Err(eyre!("table has no dimensions")),
    };
    if let Err(e) = outcome {
        tracing::error!("1D sweep failed: {e}");
        writeln!(out, "[err] 1D sweep failed: {e}")?;
    }

    let grid_opts = SweepOptions {
        range: settings.sweep_3d,
        ..sweep_opts
    };
    let triple: Option<[&str; 3]> = match &settings.default_triple {
        Some([a, b, c]) => Some([a.as_str(), b.as_str(), c.as_str()]),
        None => match names.as_slice() {
            [a, b, c, ..] => Some([*a, *b, *c]),
            _ => None,
        },
    };
    let outcome = match triple {
        Some(dims) => grid(out, ctx, dims, &grid_opts).map(|_| ()),
        None => Err(eyre!("need at least three dimensions for the 3D sweep")),
    };
    if let Err(e) = outcome {
        tracing::error!("3D sweep failed: {e}");
        writeln!(out, "[err] 3D sweep failed: {e}")?;
    }

    writeln!(
        out,
        "Tip: diff = cur_total - ex_total; diff>0 means Current ahead; ~0 is the boundary."
    )?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::{TempDir, tempdir};

    const SAMPLE: &str = "\
Dimension,Weight,ExScore,CurScore
Love,0.4,8,7
Trust,0.3,9,6
Fun,0.2,6,9
Shared values & life goals,0.1,5,8
";

    fn context(settings: Settings) -> (TempDir, Context) {
        let dir = tempdir().unwrap();
        let csv = dir.path().join("scores.csv");
        fs::write(&csv, SAMPLE).unwrap();
        let out_dir = dir.path().join("outputs");
        let ctx = Context::load(&csv, settings, out_dir).unwrap();
        (dir, ctx)
    }

    fn text(buf: Vec<u8>) -> String {
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn test_list() {
        let (_dir, ctx) = context(Settings::default());
        let mut buf = Vec::new();
        list(&mut buf, &ctx.table).unwrap();

        let out = text(buf);
        assert!(out.contains("   1. Love"));
        assert!(out.contains("   4. Shared values & life goals"));
    }

    #[test]
    fn test_summary_with_export() {
        let (_dir, ctx) = context(Settings::default());
        let mut buf = Vec::new();
        summary(&mut buf, &ctx, Some(ExportFormat::Csv)).unwrap();

        let out = text(buf);
        assert!(out.contains("Ex total:"));
        assert!(out.contains("breakdown ->"));
        assert!(ctx.out_dir.join("breakdown.csv").exists());
    }

    #[test]
    fn test_sweep_resolves_fuzzy_name() {
        let (_dir, ctx) = context(Settings::default());
        let opts = SweepOptions {
            range: SweepRange::new(0.0, 0.5, 11),
            eps: 0.02,
            format: ExportFormat::Csv,
        };
        let mut buf = Vec::new();
        let path = sweep(&mut buf, &ctx, "shared-values life goals", &opts).unwrap();

        assert_eq!(path.file_name().unwrap(), "boundary_sharedvalueslifegoals.csv");
        let out = text(buf);
        assert!(out.contains("(11 rows)"));
        assert!(out.contains("closest to tie"));
    }

    #[test]
    fn test_sweep_unknown_name_writes_nothing() {
        let (_dir, ctx) = context(Settings::default());
        let opts = SweepOptions {
            range: SweepRange::default_1d(),
            eps: 0.02,
            format: ExportFormat::Csv,
        };
        let mut buf = Vec::new();

        assert!(sweep(&mut buf, &ctx, "Aesthetics", &opts).is_err());
        assert!(!ctx.out_dir.exists());
    }

    #[test]
    fn test_grid_duplicate_after_resolution() {
        let (_dir, ctx) = context(Settings::default());
        let opts = SweepOptions {
            range: SweepRange::default_3d(),
            eps: 0.02,
            format: ExportFormat::Csv,
        };
        let mut buf = Vec::new();

        assert!(grid(&mut buf, &ctx, ["Love", "love", "Fun"], &opts).is_err());
    }

    #[test]
    fn test_run_continues_after_failure() {
        let settings = Settings {
            default_dimension: Some("Nope".to_string()),
            sweep_3d: SweepRange::new(0.05, 0.40, 4),
            ..Settings::default()
        };
        let (_dir, ctx) = context(settings);
        let mut buf = Vec::new();
        run(&mut buf, &ctx, ExportFormat::Csv).unwrap();

        let out = text(buf);
        assert!(out.contains("[err] 1D sweep failed"));
        assert!(out.contains("[ok] 3D sensitivity"));
        assert!(ctx.out_dir.join("tri_sensitivity.csv").exists());
    }

    #[test]
    fn test_merge_prefers_flags() {
        let opts = SweepOptions::merge(
            SweepRange::default_1d(),
            0.02,
            Some(0.1),
            None,
            Some(5),
            None,
            ExportFormat::Json,
        )
        .unwrap();
        assert_eq!(opts.range, SweepRange::new(0.1, 0.5, 5));
        assert_eq!(opts.eps, 0.02);
        assert_eq!(opts.format, ExportFormat::Json);
    }

    #[test]
    fn test_merge_rejects_bad_eps_flag() {
        for bad in [-0.01, f64::NAN] {
            let result = SweepOptions::merge(
                SweepRange::default_1d(),
                0.02,
                None,
                None,
                None,
                Some(bad),
                ExportFormat::Csv,
            );
            assert!(matches!(result, Err(SettingsError::Invalid(_))));
        }
    }
}
