//! Error types for the ingestion pipeline.

use chrono::NaiveDate;
use thiserror::Error;

/// Errors produced while ingesting a date range.
///
/// None of these are recovered from inside the pipeline: the driver stops at
/// the first one and returns it.
#[derive(Error, Debug)]
pub enum IngestError {
    /// User-provided input failed validation.
    #[error("Invalid input: {0}")]
    InvalidInput(String),
    /// The start of a date range lies after its end.
    #[error("Invalid date range: start {start} is after end {end}")]
    InvalidRange { start: NaiveDate, end: NaiveDate },
    /// The exchange could not be reached or answered with something unusable.
    #[error("API error: {0}")]
    Api(#[from] twstock_api::Error),
    /// The feed no longer has the layout the adapter was written against.
    #[error("Schema drift: {0}")]
    SchemaDrift(String),
    /// A cleaned field still does not parse as its target type.
    #[error("Row {row} ({stock_id}): column {column} has non-numeric value '{value}'")]
    Coercion {
        row: usize,
        stock_id: String,
        column: &'static str,
        value: String,
    },
    /// Writing a day's records failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// Rendering a day's records as CSV failed.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}
