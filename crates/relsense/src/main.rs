use std::io;
use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use color_eyre::eyre::eyre;
use relsense::commands::{self, Context, SweepOptions};
use relsense::data::export::ExportFormat;
use relsense::settings::SettingsError;
use relsense::{App, Settings, init_logging};

#[derive(Parser, Debug)]
#[command(name = "relsense")]
#[command(about = "Weighted two-candidate comparison with weight-sensitivity sweeps")]
struct Cli {
    /// Path to the data directory holding config.yaml and the log (default: ~/.relsense/)
    #[arg(short, long, global = true)]
    data_dir: Option<PathBuf>,

    /// Log level (debug, info, warn, error)
    #[arg(short, long, global = true, default_value = "info")]
    log_level: String,

    /// Directory for exported results (default: `out_dir` from settings)
    #[arg(short, long, global = true)]
    out_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print both totals and the per-dimension breakdown
    Summary {
        csv: PathBuf,
        /// Also write the breakdown file
        #[arg(long)]
        export: bool,
        #[arg(long, value_enum, default_value_t = ExportFormat::Csv)]
        format: ExportFormat,
    },
    /// List dimension names
    List { csv: PathBuf },
    /// Sweep one dimension's weight
    Sweep {
        csv: PathBuf,
        /// Dimension to sweep (default: `default_dimension` from settings)
        #[arg(long)]
        dim: Option<String>,
        #[command(flatten)]
        range: RangeArgs,
    },
    /// Sweep three dimensions' weights on a grid
    Grid {
        csv: PathBuf,
        /// Three comma-separated dimension names (default: `default_triple` from settings)
        #[arg(long, value_delimiter = ',')]
        dims: Option<Vec<String>>,
        #[command(flatten)]
        range: RangeArgs,
    },
    /// Run the 1D and 3D sweeps with the configured defaults
    Run {
        csv: PathBuf,
        #[arg(long, value_enum, default_value_t = ExportFormat::Csv)]
        format: ExportFormat,
    },
    /// Interactive terminal dashboard
    Dashboard { csv: PathBuf },
}

#[derive(Args, Debug)]
struct RangeArgs {
    #[arg(long)]
    low: Option<f64>,
    #[arg(long)]
    high: Option<f64>,
    #[arg(long)]
    steps: Option<usize>,
    /// Boundary tolerance on |diff|
    #[arg(long)]
    eps: Option<f64>,
    #[arg(long, value_enum, default_value_t = ExportFormat::Csv)]
    format: ExportFormat,
}

impl RangeArgs {
    fn options(
        &self,
        base: relsense_core::SweepRange,
        eps: f64,
    ) -> Result<SweepOptions, SettingsError> {
        SweepOptions::merge(base, eps, self.low, self.high, self.steps, self.eps, self.format)
    }
}

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;

    let cli = Cli::parse();
    let data_dir = cli.data_dir.unwrap_or_else(Settings::default_data_dir);

    init_logging(&data_dir, &cli.log_level)?;

    let settings = Settings::load(&data_dir)?;
    let out_dir = cli.out_dir.unwrap_or_else(|| settings.out_dir.clone());
    let mut stdout = io::stdout().lock();

    match cli.command {
        Command::Summary {
            csv,
            export,
            format,
        } => {
            let ctx = Context::load(&csv, settings, out_dir)?;
            commands::summary(&mut stdout, &ctx, export.then_some(format))?;
        }
        Command::List { csv } => {
            let ctx = Context::load(&csv, settings, out_dir)?;
            commands::list(&mut stdout, &ctx.table)?;
        }
        Command::Sweep { csv, dim, range } => {
            let opts = range.options(settings.sweep_1d, settings.eps)?;
            let ctx = Context::load(&csv, settings, out_dir)?;
            let dim = dim
                .or_else(|| ctx.settings.default_dimension.clone())
                .ok_or_else(|| eyre!("no dimension given; pass --dim or set default_dimension"))?;
            commands::sweep(&mut stdout, &ctx, &dim, &opts)?;
        }
        Command::Grid { csv, dims, range } => {
            let opts = range.options(settings.sweep_3d, settings.eps)?;
            let ctx = Context::load(&csv, settings, out_dir)?;
            let dims = match dims {
                Some(dims) => dims,
                None => ctx
                    .settings
                    .default_triple
                    .clone()
                    .map(Vec::from)
                    .ok_or_else(|| eyre!("no dimensions given; pass --dims or set default_triple"))?,
            };
            let [a, b, c] = dims.as_slice() else {
                return Err(eyre!(
                    "--dims needs exactly three names, got {}",
                    dims.len()
                ));
            };
            commands::grid(&mut stdout, &ctx, [a.trim(), b.trim(), c.trim()], &opts)?;
        }
        Command::Run { csv, format } => {
            let ctx = Context::load(&csv, settings, out_dir)?;
            commands::run(&mut stdout, &ctx, format)?;
        }
        Command::Dashboard { csv } => {
            let ctx = Context::load(&csv, settings, out_dir)?;
            drop(stdout);

            let mut app = App::new(ctx.table, ctx.settings, ctx.out_dir);
            ratatui::run(|terminal| app.run(terminal))?;

            tracing::info!("Dashboard shutting down");
            if let Err(err) = ratatui::try_restore() {
                tracing::error!("Failed to restore terminal: {err}");
            }
        }
    }

    Ok(())
}
