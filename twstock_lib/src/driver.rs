//! Sequential per-day ingestion: fetch, normalize, validate, persist.

use chrono::NaiveDate;
use serde::Serialize;

use crate::date_range::DateRange;
use crate::error::IngestError;
use crate::schema::SchemaValidator;
use crate::sink::Sink;
use crate::source::{Exchange, SourceAdapter};

/// What happened to one day.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case", tag = "status")]
pub enum DayOutcome {
    /// The exchange reported no trading; nothing was written.
    NoData,
    /// The day's full batch went to the sink.
    Persisted { records: usize },
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct DayReport {
    pub date: NaiveDate,
    #[serde(flatten)]
    pub outcome: DayOutcome,
}

/// Per-day results of a completed run, in date order.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct IngestSummary {
    pub exchange: Exchange,
    pub days: Vec<DayReport>,
}

impl IngestSummary {
    pub fn persisted_days(&self) -> usize {
        self.days
            .iter()
            .filter(|d| matches!(d.outcome, DayOutcome::Persisted { .. }))
            .count()
    }

    pub fn total_records(&self) -> usize {
        self.days
            .iter()
            .map(|d| match d.outcome {
                DayOutcome::Persisted { records } => records,
                DayOutcome::NoData => 0,
            })
            .sum()
    }
}

/// Drives one adapter over a date range into one sink.
///
/// Days are processed strictly in order and one at a time. The first error
/// ends the run; days already persisted stay persisted, the failing day
/// writes nothing.
pub struct IngestionDriver<A, S> {
    adapter: A,
    sink: S,
    validator: SchemaValidator,
}

impl<A, S> IngestionDriver<A, S>
where
    A: SourceAdapter,
    S: Sink,
{
    pub fn new(adapter: A, sink: S) -> Self {
        Self {
            adapter,
            sink,
            validator: SchemaValidator::new(),
        }
    }

    /// Runs the pipeline for a single day.
    pub async fn ingest_day(&mut self, date: NaiveDate) -> Result<DayOutcome, IngestError> {
        let exchange = self.adapter.exchange();
        let mut rows = self.adapter.fetch(date).await?;
        if rows.is_empty() {
            tracing::info!("{} {}: no data, skipping", exchange, date);
            return Ok(DayOutcome::NoData);
        }

        let normalizer = self.adapter.normalizer();
        for row in rows.iter_mut() {
            normalizer.normalize_row(row);
        }
        let records = self.validator.validate(&rows).map_err(|e| {
            tracing::error!("{} {}: validation failed: {}", exchange, date, e);
            e
        })?;
        tracing::debug!("{} {}: {} records validated", exchange, date, records.len());

        self.sink.write_day(exchange, date, &records)?;
        Ok(DayOutcome::Persisted {
            records: records.len(),
        })
    }

    /// Runs the pipeline for every day of `range`, in ascending order.
    pub async fn run(&mut self, range: &DateRange) -> Result<IngestSummary, IngestError> {
        let exchange = self.adapter.exchange();
        tracing::info!(
            "Ingesting {} from {} to {} ({} days)",
            exchange,
            range.start(),
            range.end(),
            range.len()
        );

        let mut days = Vec::new();
        for date in range {
            tracing::info!("{} {}", exchange, date);
            let outcome = self.ingest_day(date).await?;
            days.push(DayReport { date, outcome });
        }
        Ok(IngestSummary { exchange, days })
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    pub fn into_sink(self) -> S {
        self.sink
    }
}
