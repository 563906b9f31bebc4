use std::io::Read;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::Context;
use clap::{Parser, ValueEnum};
use loadprices_core::{LoadJob, MemorySheet, Notifier, UserChoice};
use loadprices_market_data::models::AssetClass;
use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt, EnvFilter};

use crate::config::Config;

#[derive(Parser, Debug)]
#[command(name = "loadprices")]
#[command(about = "Load quote prices next to a column of instrument labels")]
pub struct Args {
    /// Preset job selecting key range, data columns and asset class
    #[arg(value_enum, default_value_t = JobPreset::Stocks)]
    pub job: JobPreset,

    /// Tab-separated sheet to read (stdin when omitted)
    #[arg(long, short)]
    pub input: Option<PathBuf>,

    /// Sheet name
    #[arg(long)]
    pub sheet: Option<String>,

    /// Range holding the labels, e.g. A1:A200
    #[arg(long)]
    pub key_range: Option<String>,

    /// Destination columns, e.g. B,C
    #[arg(long, value_delimiter = ',')]
    pub data_columns: Vec<String>,

    /// Asset classes tried in order, e.g. stock,fx
    #[arg(long, value_delimiter = ',')]
    pub classes: Vec<String>,

    /// Timeout of the first attempt, in seconds
    #[arg(long)]
    pub timeout: Option<u64>,

    /// Attempts before giving up
    #[arg(long)]
    pub max_tries: Option<u32>,

    /// Write GBp as GBX
    #[arg(long)]
    pub normalize_pence: bool,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum JobPreset {
    Stocks,
    Fx,
    Indices,
}

impl JobPreset {
    pub fn asset_class(self) -> AssetClass {
        match self {
            Self::Stocks => AssetClass::Stock,
            Self::Fx => AssetClass::Fx,
            Self::Indices => AssetClass::Index,
        }
    }
}

/// Prints notifications to stderr.
pub struct ConsoleNotifier;

impl Notifier for ConsoleNotifier {
    fn notify(&self, message: &str, title: &str) -> UserChoice {
        eprintln!("{}: {}", title, message);
        UserChoice::Ok
    }
}

pub fn init_tracing() {
    let log_format =
        std::env::var("LOADPRICES_LOG_FORMAT").unwrap_or_else(|_| "text".to_string());
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let registry = tracing_subscriber::registry().with(filter);

    if log_format.eq_ignore_ascii_case("json") {
        registry
            .with(fmt::layer().json().with_current_span(false).with_writer(std::io::stderr))
            .init();
    } else {
        registry
            .with(
                fmt::layer()
                    .with_target(true)
                    .with_line_number(true)
                    .with_writer(std::io::stderr),
            )
            .init();
    }
}

/// Command-line flags take precedence over the environment.
pub fn apply_overrides(config: &mut Config, args: &Args) {
    if let Some(secs) = args.timeout {
        config.web_timeout = Duration::from_secs(secs);
    }
    if let Some(tries) = args.max_tries {
        config.max_tries = tries;
    }
    if args.normalize_pence {
        config.normalize_pence = true;
    }
}

/// Preset job for `args.job` with any explicit flags applied.
pub fn build_job(args: &Args) -> anyhow::Result<LoadJob> {
    let preset = LoadJob::preset(args.job.asset_class())?;

    let classes = if args.classes.is_empty() {
        preset.asset_classes.clone()
    } else {
        args.classes
            .iter()
            .map(|c| c.parse::<AssetClass>())
            .collect::<Result<Vec<_>, _>>()?
    };
    let sheet = args.sheet.clone().unwrap_or_else(|| preset.sheet.clone());
    let key_range = args
        .key_range
        .clone()
        .unwrap_or_else(|| preset.key_range.to_string());
    let data_columns = if args.data_columns.is_empty() {
        preset.data_columns.clone()
    } else {
        args.data_columns.clone()
    };

    Ok(LoadJob::new(&sheet, &key_range, &data_columns, &classes)?)
}

pub fn read_input(path: Option<&Path>) -> anyhow::Result<String> {
    match path {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display())),
        None => {
            let mut text = String::new();
            std::io::stdin()
                .read_to_string(&mut text)
                .context("Failed to read stdin")?;
            Ok(text)
        }
    }
}

/// Load tab-separated text into `sheet`, first line at row 1.
pub fn read_sheet(sheet: &str, text: &str) -> MemorySheet {
    let mut book = MemorySheet::with_sheet(sheet);
    for (row, line) in text.lines().enumerate() {
        for (col, cell) in line.split('\t').enumerate() {
            book.set_text(sheet, col as u32, row as u32, cell);
        }
    }
    book
}
