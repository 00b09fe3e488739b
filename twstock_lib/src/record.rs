//! The canonical row shape every feed converges to, and the typed record
//! produced from it.

use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::IngestError;

/// One column of the canonical schema, in canonical order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Column {
    StockId,
    TradeVolume,
    Transaction,
    TradeValue,
    Open,
    Max,
    Min,
    Close,
    Change,
}

impl Column {
    /// All canonical columns in output order (the `date` column is implicit).
    pub const ALL: [Column; 9] = [
        Column::StockId,
        Column::TradeVolume,
        Column::Transaction,
        Column::TradeValue,
        Column::Open,
        Column::Max,
        Column::Min,
        Column::Close,
        Column::Change,
    ];

    /// Columns that carry numbers and go through normalization.
    pub const MAGNITUDES: [Column; 8] = [
        Column::TradeVolume,
        Column::Transaction,
        Column::TradeValue,
        Column::Open,
        Column::Max,
        Column::Min,
        Column::Close,
        Column::Change,
    ];

    /// The canonical header name.
    pub fn name(self) -> &'static str {
        match self {
            Column::StockId => "StockID",
            Column::TradeVolume => "TradeVolume",
            Column::Transaction => "Transaction",
            Column::TradeValue => "TradeValue",
            Column::Open => "Open",
            Column::Max => "Max",
            Column::Min => "Min",
            Column::Close => "Close",
            Column::Change => "Change",
        }
    }

    fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for Column {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A quote row in canonical column order, values still textual.
///
/// The date is always the day that was requested, never one read from the
/// payload.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CanonicalQuoteRow {
    values: [String; 9],
    date: NaiveDate,
}

impl CanonicalQuoteRow {
    /// Builds a row from values already in canonical order.
    pub fn from_ordered(date: NaiveDate, values: [String; 9]) -> Self {
        Self { values, date }
    }

    /// Builds a row from `(column, value)` cells in any order. Every canonical
    /// column must appear exactly once.
    pub fn from_cells<I>(date: NaiveDate, cells: I) -> Result<Self, IngestError>
    where
        I: IntoIterator<Item = (Column, String)>,
    {
        let mut slots: [Option<String>; 9] = Default::default();
        for (column, value) in cells {
            let slot = &mut slots[column.index()];
            if slot.is_some() {
                return Err(IngestError::SchemaDrift(format!(
                    "column {} appears more than once",
                    column
                )));
            }
            *slot = Some(value);
        }

        let mut values: [String; 9] = Default::default();
        for column in Column::ALL {
            values[column.index()] = slots[column.index()].take().ok_or_else(|| {
                IngestError::SchemaDrift(format!("column {} is missing", column))
            })?;
        }
        Ok(Self { values, date })
    }

    pub fn get(&self, column: Column) -> &str {
        &self.values[column.index()]
    }

    pub fn set(&mut self, column: Column, value: String) {
        self.values[column.index()] = value;
    }

    pub fn stock_id(&self) -> &str {
        self.get(Column::StockId)
    }

    pub fn date(&self) -> NaiveDate {
        self.date
    }
}

/// A fully typed daily quote.
///
/// Field order is the on-disk column order.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TaiwanStockPriceRecord {
    #[serde(rename = "StockID")]
    pub stock_id: String,

    #[serde(rename = "TradeVolume")]
    pub trade_volume: u64,

    #[serde(rename = "Transaction")]
    pub transaction: u64,

    #[serde(rename = "TradeValue")]
    pub trade_value: u64,

    #[serde(rename = "Open")]
    pub open: f64,

    #[serde(rename = "Max")]
    pub max: f64,

    #[serde(rename = "Min")]
    pub min: f64,

    #[serde(rename = "Close")]
    pub close: f64,

    #[serde(rename = "Change")]
    pub change: f64,

    pub date: NaiveDate,
}
