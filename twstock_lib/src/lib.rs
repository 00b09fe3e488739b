//! Library layer for twstock: turns the TWSE and TPEx daily quote reports
//! into one typed record set per trading day.
//!
//! Wraps the `twstock_api` client with per-exchange adapters, the shared
//! field normalizer, schema validation, request throttling and the
//! per-day ingestion driver.

pub mod date_range;
pub mod driver;
pub mod error;
pub mod normalize;
pub mod record;
pub mod schema;
pub mod sink;
pub mod source;
pub mod throttle;
pub mod validation;

pub use twstock_api;
pub use twstock_api::calendar;
pub use twstock_api::types;

pub use date_range::DateRange;
pub use driver::{DayOutcome, DayReport, IngestSummary, IngestionDriver};
pub use error::IngestError;
pub use normalize::FieldNormalizer;
pub use record::{CanonicalQuoteRow, Column, TaiwanStockPriceRecord};
pub use schema::SchemaValidator;
pub use sink::{CsvSink, MemorySink, Sink};
pub use source::{Exchange, SourceAdapter, TpexAdapter, TwseAdapter};
pub use throttle::{Throttle, ThrottlePolicy};
