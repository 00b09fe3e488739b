mod commands;
mod output;

use anyhow::Result;
use clap::{Parser, Subcommand};
use twstock_lib::Exchange;

use crate::output::OutputFormat;

#[derive(Parser)]
#[command(name = "twstock")]
#[command(about = "Download TWSE and TPEx daily closing quotes as one CSV per trading day")]
struct Cli {
    /// Run summary format: table, json, csv, or markdown
    #[arg(long, default_value = "table", global = true)]
    output: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Ingest the Taiwan Stock Exchange daily report
    Twse(commands::ingest::IngestArgs),
    /// Ingest the Taipei Exchange (OTC) daily report
    Tpex(commands::ingest::IngestArgs),
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("twstock=info".parse().unwrap()),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let format = match cli.output.as_str() {
        "json" => OutputFormat::Json,
        "csv" => OutputFormat::Csv,
        "markdown" | "md" => OutputFormat::Markdown,
        _ => OutputFormat::Table,
    };

    match &cli.command {
        Commands::Twse(args) => commands::ingest::run(Exchange::Twse, args, &format).await?,
        Commands::Tpex(args) => commands::ingest::run(Exchange::Tpex, args, &format).await?,
    }

    Ok(())
}
