//! Coercion of cleaned canonical rows into [`TaiwanStockPriceRecord`]s.

use std::str::FromStr;

use crate::error::IngestError;
use crate::record::{CanonicalQuoteRow, Column, TaiwanStockPriceRecord};

/// Turns a day's cleaned rows into typed records, all or nothing.
///
/// A single field that does not coerce fails the whole batch: dropping the
/// security instead would misreport market coverage for that day.
#[derive(Clone, Copy, Debug, Default)]
pub struct SchemaValidator;

impl SchemaValidator {
    pub fn new() -> Self {
        Self
    }

    /// Validates every row. Empty input yields an empty batch.
    pub fn validate(
        &self,
        rows: &[CanonicalQuoteRow],
    ) -> Result<Vec<TaiwanStockPriceRecord>, IngestError> {
        rows.iter()
            .enumerate()
            .map(|(index, row)| self.validate_row(index, row))
            .collect()
    }

    /// Validates a single row; `index` is only used in error messages.
    pub fn validate_row(
        &self,
        index: usize,
        row: &CanonicalQuoteRow,
    ) -> Result<TaiwanStockPriceRecord, IngestError> {
        let stock_id = row.stock_id();
        if stock_id.trim().is_empty() {
            return Err(IngestError::Coercion {
                row: index,
                stock_id: String::new(),
                column: Column::StockId.name(),
                value: stock_id.to_string(),
            });
        }

        let cell = Cell { index, row };
        Ok(TaiwanStockPriceRecord {
            stock_id: stock_id.to_string(),
            trade_volume: cell.parse(Column::TradeVolume)?,
            transaction: cell.parse(Column::Transaction)?,
            trade_value: cell.parse(Column::TradeValue)?,
            open: cell.price(Column::Open)?,
            max: cell.price(Column::Max)?,
            min: cell.price(Column::Min)?,
            close: cell.price(Column::Close)?,
            change: cell.finite(Column::Change)?,
            date: row.date(),
        })
    }
}

struct Cell<'a> {
    index: usize,
    row: &'a CanonicalQuoteRow,
}

impl Cell<'_> {
    fn error(&self, column: Column) -> IngestError {
        IngestError::Coercion {
            row: self.index,
            stock_id: self.row.stock_id().to_string(),
            column: column.name(),
            value: self.row.get(column).to_string(),
        }
    }

    fn parse<T: FromStr>(&self, column: Column) -> Result<T, IngestError> {
        self.row
            .get(column)
            .parse::<T>()
            .map_err(|_| self.error(column))
    }

    /// Any finite float. `f64::from_str` accepts `NaN` and `inf`, neither of
    /// which is a quote.
    fn finite(&self, column: Column) -> Result<f64, IngestError> {
        let value: f64 = self.parse(column)?;
        if value.is_finite() {
            Ok(value)
        } else {
            Err(self.error(column))
        }
    }

    /// A finite, non-negative float. Zero stands for "no trade".
    fn price(&self, column: Column) -> Result<f64, IngestError> {
        let value = self.finite(column)?;
        if value < 0.0 {
            return Err(self.error(column));
        }
        Ok(value)
    }
}
