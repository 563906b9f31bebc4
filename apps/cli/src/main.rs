mod config;
mod main_lib;

use clap::Parser;
use config::Config;
use loadprices_core::{run_and_notify, PriceLoader};
use main_lib::{apply_overrides, build_job, init_tracing, read_input, read_sheet, Args, ConsoleNotifier};

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    let mut config = Config::from_env();
    init_tracing();
    apply_overrides(&mut config, &args);

    let job = build_job(&args)?;
    let text = read_input(args.input.as_deref())?;
    let mut book = read_sheet(&job.sheet, &text);

    let mut loader = PriceLoader::new(config.loader_config())?;
    let (result, _) = run_and_notify(&mut loader, &mut book, &job, &ConsoleNotifier);
    let report = result?;
    tracing::info!(
        "{} label(s), {} ticker(s), {} quote(s)",
        report.labels,
        report.tickers,
        report.quotes
    );

    println!("{}", book.to_tsv(&job.sheet)?);
    Ok(())
}
