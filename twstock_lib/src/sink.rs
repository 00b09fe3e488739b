//! Destinations for validated daily record sets.

use std::fs;
use std::io::Write;
use std::path::PathBuf;

use chrono::NaiveDate;
use tempfile::NamedTempFile;

use crate::error::IngestError;
use crate::record::TaiwanStockPriceRecord;
use crate::source::Exchange;

/// Receives one complete, validated batch per exchange and day.
pub trait Sink {
    fn write_day(
        &mut self,
        exchange: Exchange,
        date: NaiveDate,
        records: &[TaiwanStockPriceRecord],
    ) -> Result<(), IngestError>;
}

/// File name for one day's batch, e.g. `taiwan_stock_price_twse_2024-01-02.csv`.
pub fn file_name(exchange: Exchange, date: NaiveDate) -> String {
    format!("taiwan_stock_price_{}_{}.csv", exchange, date.format("%Y-%m-%d"))
}

/// Renders records as CSV with the canonical header row.
pub fn render_csv(records: &[TaiwanStockPriceRecord]) -> Result<Vec<u8>, IngestError> {
    let mut wtr = csv::Writer::from_writer(Vec::new());
    for record in records {
        wtr.serialize(record)?;
    }
    wtr.into_inner().map_err(|e| IngestError::Io(e.into_error()))
}

/// Writes one CSV file per day into a directory.
///
/// Each file is written to a temporary file in the same directory and renamed
/// into place, so a failure never leaves a partial file for the day and never
/// clobbers an earlier good one.
pub struct CsvSink {
    dir: PathBuf,
}

impl CsvSink {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn path_for(&self, exchange: Exchange, date: NaiveDate) -> PathBuf {
        self.dir.join(file_name(exchange, date))
    }
}

impl Sink for CsvSink {
    fn write_day(
        &mut self,
        exchange: Exchange,
        date: NaiveDate,
        records: &[TaiwanStockPriceRecord],
    ) -> Result<(), IngestError> {
        let bytes = render_csv(records)?;
        fs::create_dir_all(&self.dir)?;
        let path = self.path_for(exchange, date);
        let mut tmp = NamedTempFile::new_in(&self.dir)?;
        tmp.write_all(&bytes)?;
        tmp.as_file().sync_all()?;
        tmp.persist(&path).map_err(|e| IngestError::Io(e.error))?;
        tracing::info!("Wrote {} records to {}", records.len(), path.display());
        Ok(())
    }
}

/// One batch as received by a [`MemorySink`].
#[derive(Clone, Debug, PartialEq)]
pub struct StoredDay {
    pub exchange: Exchange,
    pub date: NaiveDate,
    pub records: Vec<TaiwanStockPriceRecord>,
}

/// Keeps every batch in memory, in arrival order.
#[derive(Default)]
pub struct MemorySink {
    pub days: Vec<StoredDay>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Sink for MemorySink {
    fn write_day(
        &mut self,
        exchange: Exchange,
        date: NaiveDate,
        records: &[TaiwanStockPriceRecord],
    ) -> Result<(), IngestError> {
        self.days.push(StoredDay {
            exchange,
            date,
            records: records.to_vec(),
        });
        Ok(())
    }
}
