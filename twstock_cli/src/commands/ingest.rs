//! The `twse` and `tpex` subcommands: ingest a date range into CSV files.

use std::path::PathBuf;

use anyhow::Result;
use clap::Args;
use twstock_lib::twstock_api::Client;
use twstock_lib::{
    validation, CsvSink, DateRange, Exchange, IngestSummary, IngestionDriver, SourceAdapter,
    Throttle, ThrottlePolicy, TpexAdapter, TwseAdapter,
};

use crate::output::{
    print_json, print_summary_csv, print_summary_markdown, print_summary_table, OutputFormat,
};

const DEFAULT_DELAY_MS: u64 = 5000;

/// Arguments shared by the `twse` and `tpex` subcommands.
#[derive(Args)]
pub struct IngestArgs {
    /// First day to fetch (YYYY-MM-DD)
    pub start_date: String,

    /// Last day to fetch, inclusive (YYYY-MM-DD)
    pub end_date: String,

    /// Directory the per-day CSV files are written to
    #[arg(long, default_value = ".")]
    pub out_dir: PathBuf,

    /// Pause between requests in milliseconds [env: TWSTOCK_REQUEST_DELAY_MS, default: 5000]
    #[arg(long)]
    pub delay_ms: Option<u64>,

    /// Sleep the full delay before every request, the first one included
    #[arg(long)]
    pub fixed_delay: bool,
}

fn delay_ms(args: &IngestArgs) -> Result<u64> {
    if let Some(ms) = args.delay_ms {
        return Ok(ms);
    }
    match std::env::var("TWSTOCK_REQUEST_DELAY_MS") {
        Ok(raw) => Ok(raw.trim().parse()?),
        Err(_) => Ok(DEFAULT_DELAY_MS),
    }
}

fn build_client() -> Client {
    let twse = std::env::var("TWSTOCK_TWSE_BASE_URL").ok();
    let tpex = std::env::var("TWSTOCK_TPEX_BASE_URL").ok();
    match (twse, tpex) {
        (None, None) => Client::new(),
        (twse, tpex) => Client::with_base_urls(
            twse.as_deref().unwrap_or("https://www.twse.com.tw"),
            tpex.as_deref().unwrap_or("https://www.tpex.org.tw"),
        ),
    }
}

pub async fn run(exchange: Exchange, args: &IngestArgs, format: &OutputFormat) -> Result<()> {
    let range = validation::validate_range(&args.start_date, &args.end_date)?;
    let delay = validation::validate_delay_ms(delay_ms(args)?)?;
    let policy = if args.fixed_delay {
        ThrottlePolicy::FixedDelay(delay)
    } else {
        ThrottlePolicy::MinInterval(delay)
    };

    eprintln!(
        "Ingesting {} from {} to {} into {}",
        exchange,
        range.start(),
        range.end(),
        args.out_dir.display()
    );

    let client = build_client();
    let throttle = Throttle::new(policy);
    let sink = CsvSink::new(&args.out_dir);
    let summary = match exchange {
        Exchange::Twse => drive(TwseAdapter::new(client, throttle), sink, &range).await?,
        Exchange::Tpex => drive(TpexAdapter::new(client, throttle), sink, &range).await?,
    };

    eprintln!(
        "Ingest complete: {} trading days, {} records",
        summary.persisted_days(),
        summary.total_records()
    );

    match format {
        OutputFormat::Table => print_summary_table(&summary),
        OutputFormat::Json => print_json(&summary),
        OutputFormat::Csv => print_summary_csv(&summary)?,
        OutputFormat::Markdown => print_summary_markdown(&summary),
    }
    Ok(())
}

async fn drive<A: SourceAdapter>(
    adapter: A,
    sink: CsvSink,
    range: &DateRange,
) -> Result<IngestSummary> {
    let mut driver = IngestionDriver::new(adapter, sink);
    Ok(driver.run(range).await?)
}
