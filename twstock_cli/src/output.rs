use anyhow::Result;
use serde::Serialize;
use tabled::settings::Style;
use tabled::{Table, Tabled};
use twstock_lib::sink::file_name;
use twstock_lib::{DayOutcome, IngestSummary};

#[derive(Clone, Debug)]
pub enum OutputFormat {
    Table,
    Json,
    Csv,
    Markdown,
}

#[derive(Tabled, Serialize)]
struct DayRow {
    #[tabled(rename = "Date")]
    #[serde(rename = "Date")]
    date: String,
    #[tabled(rename = "Status")]
    #[serde(rename = "Status")]
    status: String,
    #[tabled(rename = "Records")]
    #[serde(rename = "Records")]
    records: usize,
    #[tabled(rename = "File")]
    #[serde(rename = "File")]
    file: String,
}

// -- Row builders --

fn build_day_rows(summary: &IngestSummary) -> Vec<DayRow> {
    summary
        .days
        .iter()
        .map(|day| match day.outcome {
            DayOutcome::Persisted { records } => DayRow {
                date: day.date.to_string(),
                status: "persisted".to_string(),
                records,
                file: file_name(summary.exchange, day.date),
            },
            DayOutcome::NoData => DayRow {
                date: day.date.to_string(),
                status: "no data".to_string(),
                records: 0,
                file: String::new(),
            },
        })
        .collect()
}

// -- Table output --

pub fn print_summary_table(summary: &IngestSummary) {
    println!("{}", Table::new(build_day_rows(summary)));
}

// -- Markdown output --

pub fn print_summary_markdown(summary: &IngestSummary) {
    let mut table = Table::new(build_day_rows(summary));
    table.with(Style::markdown());
    println!("{}", table);
}

// -- CSV output --

pub fn print_summary_csv(summary: &IngestSummary) -> Result<()> {
    let mut wtr = csv::Writer::from_writer(std::io::stdout());
    for row in build_day_rows(summary) {
        wtr.serialize(row)?;
    }
    wtr.flush()?;
    Ok(())
}

// -- JSON output --

pub fn print_json<T: serde::Serialize>(data: &T) {
    match serde_json::to_string_pretty(data) {
        Ok(json) => println!("{}", json),
        Err(e) => eprintln!("Failed to serialize to JSON: {}", e),
    }
}
