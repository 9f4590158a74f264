//! tabfit: ingest spreadsheets, clean them and fit a linear model.

use anyhow::Context;
use clap::Parser;
use std::path::PathBuf;
use tabfit::{PipelineConfig, read_spreadsheet};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "tabfit", version, about, long_about = None)]
struct Cli {
    /// Increase verbosity (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Only report errors
    #[arg(short, long, global = true)]
    quiet: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(clap::Subcommand, Debug)]
enum Commands {
    /// Run every configured cleaning branch and write the artifacts
    Run {
        /// Configuration file (TOML)
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Directory holding the input spreadsheets
        #[arg(long)]
        input_dir: Option<PathBuf>,

        /// Directory receiving tables, models and the report
        #[arg(long)]
        output_dir: Option<PathBuf>,

        /// Missing-value share above which `drop` removes a column
        #[arg(long)]
        threshold: Option<f64>,

        /// Cleaning strategy: drop or impute (repeatable)
        #[arg(long = "strategy")]
        strategies: Vec<String>,
    },
    /// Read one spreadsheet and print its summary
    Inspect {
        /// Spreadsheet to read
        file: PathBuf,
    },
}

fn init_tracing(verbose: u8, quiet: bool) {
    let default = match verbose {
        0 if quiet => "error",
        0 => "info",
        1 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_target(false)
        .with_env_filter(filter)
        .init();
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose, cli.quiet);

    match cli.command {
        Commands::Run {
            config,
            input_dir,
            output_dir,
            threshold,
            strategies,
        } => {
            let mut settings = match config {
                Some(path) => PipelineConfig::load(&path)
                    .with_context(|| format!("loading {}", path.display()))?,
                None => PipelineConfig::default(),
            };
            if let Some(dir) = input_dir {
                settings.input_dir = dir;
            }
            if let Some(dir) = output_dir {
                settings.output_dir = dir;
            }
            if let Some(threshold) = threshold {
                settings.threshold = threshold;
            }
            if !strategies.is_empty() {
                settings.strategies = strategies;
            }

            let report = tabfit::run(&settings)?;
            for branch in &report.branches {
                println!(
                    "{}: R2 {:.3}, adjusted R2 {:.3} ({} rows, {} features)",
                    branch.strategy,
                    branch.quality.r2,
                    branch.quality.adjusted_r2,
                    branch.quality.n_samples,
                    branch.quality.n_features
                );
            }
        }
        Commands::Inspect { file } => {
            let table = read_spreadsheet(&file)?;
            let summary = table.summary();
            println!(
                "{}: {} rows x {} columns",
                file.display(),
                summary.row_count,
                summary.column_count
            );
            for column in &summary.columns {
                println!(
                    "  {} ({}): {} missing",
                    column.name, column.column_type, column.missing
                );
            }
            println!("\n{}", summary.preview);
        }
    }

    Ok(())
}
