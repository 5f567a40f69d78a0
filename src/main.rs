use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::{error, info};

use absensi_extract::config::ExtractConfig;
use absensi_extract::domain::{dedupe_by_name_and_date, Period};
use absensi_extract::logging;
use absensi_extract::observability::{MetricsSink, TracingSink};
use absensi_extract::pipeline::{CalamineWorkbook, Extractor, Workbook};

#[derive(Parser)]
#[command(name = "absensi-extract")]
#[command(about = "Extract attendance records from fingerprint-machine spreadsheets")]
#[command(version = "0.1.0")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Extract attendance records from a workbook and print them as JSON
    Extract {
        /// Path to the .xlsx/.xls/.ods workbook
        #[arg(long)]
        file: PathBuf,
        /// Month of the attendance period (1-12)
        #[arg(long)]
        month: u32,
        /// Year of the attendance period
        #[arg(long)]
        year: i32,
        /// Config file (defaults to $ABSENSI_CONFIG, then built-in defaults)
        #[arg(long)]
        config: Option<PathBuf>,
        /// Keep only the last record per (name, date)
        #[arg(long)]
        dedupe: bool,
        /// Pretty-print the JSON output
        #[arg(long)]
        pretty: bool,
    },
    /// List the workbook's sheets and whether each would be scanned
    Sheets {
        #[arg(long)]
        file: PathBuf,
        #[arg(long)]
        config: Option<PathBuf>,
    },
}

fn load_config(path: Option<&Path>) -> Result<ExtractConfig> {
    let config = match path {
        Some(path) => ExtractConfig::load(path)
            .with_context(|| format!("Failed to load config {}", path.display()))?,
        None => ExtractConfig::from_env().context("Failed to load config from environment")?,
    };
    Ok(config)
}

fn open_workbook(path: &Path) -> Result<CalamineWorkbook> {
    CalamineWorkbook::open(path).with_context(|| format!("Failed to open {}", path.display()))
}

fn main() -> Result<()> {
    logging::init_logging();

    let cli = Cli::parse();

    match cli.command {
        Commands::Extract {
            file,
            month,
            year,
            config,
            dedupe,
            pretty,
        } => {
            let config = load_config(config.as_deref())?;
            let period = Period::new(month, year)?;
            let workbook = open_workbook(&file)?;

            let extractor =
                Extractor::new(config).with_sink(Arc::new(MetricsSink::new(TracingSink)));

            let records = match extractor.extract(&workbook, period) {
                Ok(records) => records,
                Err(e) => {
                    error!("Extraction failed: {}", e);
                    eprintln!("{}", e);
                    std::process::exit(1)
                }
            };
            let records = if dedupe {
                dedupe_by_name_and_date(records)
            } else {
                records
            };

            info!(records = records.len(), file = %file.display(), "Writing records");
            let json = if pretty {
                serde_json::to_string_pretty(&records)?
            } else {
                serde_json::to_string(&records)?
            };
            println!("{}", json);
        }
        Commands::Sheets { file, config } => {
            let config = load_config(config.as_deref())?;
            let workbook = open_workbook(&file)?;

            let names = workbook.sheet_names();
            let selected = Extractor::new(config).select_sheets(&names);
            for name in &names {
                let mark = if selected.contains(name) { "scan" } else { "skip" };
                println!("{}\t{}", mark, name);
            }
        }
    }
    Ok(())
}
