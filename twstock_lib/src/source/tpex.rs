//! Adapter for the TPEx daily closing quotes report.

use chrono::NaiveDate;
use twstock_api::types::{cell_text, RawRow, TpexDailyResponse};
use twstock_api::{Client, TpexQuery};

use super::{Exchange, SourceAdapter};
use crate::error::IngestError;
use crate::normalize::FieldNormalizer;
use crate::record::{CanonicalQuoteRow, Column};
use crate::throttle::Throttle;

/// Where each canonical column sits in a TPEx row. TPEx sends no header, so
/// this table is the whole contract; a reordering upstream cannot be
/// detected here.
pub const TPEX_COLUMN_INDEX: [(usize, Column); 9] = [
    (0, Column::StockId),
    (2, Column::Close),
    (3, Column::Change),
    (4, Column::Open),
    (5, Column::Max),
    (6, Column::Min),
    (7, Column::TradeVolume),
    (8, Column::TradeValue),
    (9, Column::Transaction),
];

fn row_from_raw(
    index: usize,
    raw: &RawRow,
    date: NaiveDate,
) -> Result<CanonicalQuoteRow, IngestError> {
    let cells = TPEX_COLUMN_INDEX
        .iter()
        .map(|(position, column)| {
            raw.get(*position)
                .map(|value| (*column, cell_text(value)))
                .ok_or_else(|| {
                    IngestError::SchemaDrift(format!(
                        "TPEx row {} has {} fields, {} expected at position {}",
                        index,
                        raw.len(),
                        column,
                        position
                    ))
                })
        })
        .collect::<Result<Vec<_>, _>>()?;
    CanonicalQuoteRow::from_cells(date, cells)
}

/// Converts a decoded report into canonical rows dated `date`.
pub fn rows_from_response(
    resp: &TpexDailyResponse,
    date: NaiveDate,
) -> Result<Vec<CanonicalQuoteRow>, IngestError> {
    resp.aa_data
        .iter()
        .enumerate()
        .map(|(index, raw)| row_from_raw(index, raw, date))
        .collect()
}

/// The over-the-counter feed.
pub struct TpexAdapter {
    client: Client,
    throttle: Throttle,
}

impl TpexAdapter {
    pub fn new(client: Client, throttle: Throttle) -> Self {
        Self { client, throttle }
    }
}

impl SourceAdapter for TpexAdapter {
    fn exchange(&self) -> Exchange {
        Exchange::Tpex
    }

    fn normalizer(&self) -> FieldNormalizer {
        FieldNormalizer::padded()
    }

    async fn fetch(&self, date: NaiveDate) -> Result<Vec<CanonicalQuoteRow>, IngestError> {
        self.throttle.acquire().await;
        let resp = self.client.get_tpex_daily(&TpexQuery::new(date)).await?;
        if resp.is_no_data() {
            tracing::info!("TPEx reports no trading on {}", date);
        }
        rows_from_response(&resp, date)
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn jan_2() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, 2).unwrap()
    }

    fn report(rows: serde_json::Value) -> TpexDailyResponse {
        serde_json::from_value(json!({ "aaData": rows })).unwrap()
    }

    #[test]
    fn index_table_covers_every_column_once() {
        let mut columns: Vec<Column> = TPEX_COLUMN_INDEX.iter().map(|(_, c)| *c).collect();
        for column in Column::ALL {
            let pos = columns.iter().position(|c| *c == column).unwrap();
            columns.remove(pos);
        }
        assert!(columns.is_empty());
    }

    #[test]
    fn selects_and_reorders_positions() {
        let resp = report(json!([[
            "6488", "環球晶", "420.00", "+5.50 ", "415.00", "422.00", "413.50", "1,234,567",
            "512,345,678", "2,345", "420.00", "3", "420.50", "5", "2,000,000"
        ]]));
        let rows = rows_from_response(&resp, jan_2()).unwrap();
        assert_eq!(rows.len(), 1);
        let ordered: Vec<&str> = Column::ALL.iter().map(|c| rows[0].get(*c)).collect();
        assert_eq!(
            ordered,
            vec![
                "6488",
                "1,234,567",
                "2,345",
                "512,345,678",
                "415.00",
                "422.00",
                "413.50",
                "420.00",
                "+5.50 "
            ]
        );
        assert_eq!(rows[0].date(), jan_2());
    }

    #[test]
    fn empty_data_yields_empty() {
        let resp = report(json!([]));
        assert!(rows_from_response(&resp, jan_2()).unwrap().is_empty());
    }

    #[test]
    fn short_row_is_schema_drift() {
        let resp = report(json!([["6488", "環球晶", "420.00", "+5.50", "415.00"]]));
        match rows_from_response(&resp, jan_2()) {
            Err(IngestError::SchemaDrift(msg)) => assert!(msg.contains("position 5")),
            other => panic!("unexpected result: {:?}", other.map(|r| r.len())),
        }
    }

    #[test]
    fn padded_normalizer_cleans_tpex_fields() {
        let normalizer = FieldNormalizer::padded();
        assert_eq!(normalizer.normalize("+5.50 "), "5.50");
        assert_eq!(normalizer.normalize(" ---"), "0");
        assert_eq!(normalizer.normalize("-2.50 "), "-2.50");
    }
}
