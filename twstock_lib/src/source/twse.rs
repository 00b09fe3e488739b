//! Adapter for the TWSE `MI_INDEX` all-securities report.

use chrono::NaiveDate;
use twstock_api::types::{cell_text, TwseDailyResponse, TwseTable};
use twstock_api::{Client, TwseQuery};

use super::{Exchange, SourceAdapter};
use crate::error::IngestError;
use crate::normalize::{merge_direction, FieldNormalizer};
use crate::record::{CanonicalQuoteRow, Column};
use crate::throttle::Throttle;

/// Position of the per-security quote table among the report's tables.
pub const TWSE_QUOTE_TABLE_INDEX: usize = 8;

const STOCK_ID_HEADER: &str = "證券代號";

/// What a TWSE header becomes in the canonical row.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HeaderRole {
    Canonical(Column),
    /// The `+`/`-` markup column; folded into `Change`, then dropped.
    Direction,
    Drop,
}

/// Every header the quote table is known to carry. A header missing from
/// this table means the layout changed and is an error, not a drop.
pub const TWSE_HEADER_MAP: &[(&str, HeaderRole)] = &[
    ("證券代號", HeaderRole::Canonical(Column::StockId)),
    ("證券名稱", HeaderRole::Drop),
    ("成交股數", HeaderRole::Canonical(Column::TradeVolume)),
    ("成交筆數", HeaderRole::Canonical(Column::Transaction)),
    ("成交金額", HeaderRole::Canonical(Column::TradeValue)),
    ("開盤價", HeaderRole::Canonical(Column::Open)),
    ("最高價", HeaderRole::Canonical(Column::Max)),
    ("最低價", HeaderRole::Canonical(Column::Min)),
    ("收盤價", HeaderRole::Canonical(Column::Close)),
    ("漲跌(+/-)", HeaderRole::Direction),
    ("漲跌價差", HeaderRole::Canonical(Column::Change)),
    ("最後揭示買價", HeaderRole::Drop),
    ("最後揭示買量", HeaderRole::Drop),
    ("最後揭示賣價", HeaderRole::Drop),
    ("最後揭示賣量", HeaderRole::Drop),
    ("本益比", HeaderRole::Drop),
];

fn translate_header(header: &str) -> Result<HeaderRole, IngestError> {
    let header = header.trim();
    TWSE_HEADER_MAP
        .iter()
        .find(|(name, _)| *name == header)
        .map(|(_, role)| *role)
        .ok_or_else(|| IngestError::SchemaDrift(format!("unmapped TWSE header '{}'", header)))
}

/// Locates the quote table, refusing to guess when the report's table list
/// has shifted.
fn quote_table(resp: &TwseDailyResponse) -> Result<&TwseTable, IngestError> {
    let table = resp.tables.get(TWSE_QUOTE_TABLE_INDEX).ok_or_else(|| {
        IngestError::SchemaDrift(format!(
            "TWSE report (stat '{}') has {} tables, quote table expected at index {}",
            resp.stat,
            resp.tables.len(),
            TWSE_QUOTE_TABLE_INDEX
        ))
    })?;
    if !table.fields.iter().any(|f| f.trim() == STOCK_ID_HEADER) {
        return Err(IngestError::SchemaDrift(format!(
            "TWSE table {} ('{}') has no {} column",
            TWSE_QUOTE_TABLE_INDEX,
            table.title.as_deref().unwrap_or(""),
            STOCK_ID_HEADER
        )));
    }
    Ok(table)
}

/// Converts a decoded report into canonical rows dated `date`.
pub fn rows_from_response(
    resp: &TwseDailyResponse,
    date: NaiveDate,
) -> Result<Vec<CanonicalQuoteRow>, IngestError> {
    if resp.is_no_data() {
        return Ok(Vec::new());
    }

    let table = quote_table(resp)?;
    let roles = table
        .fields
        .iter()
        .map(|f| translate_header(f))
        .collect::<Result<Vec<_>, _>>()?;

    let mut rows = Vec::with_capacity(table.data.len());
    for (index, raw) in table.data.iter().enumerate() {
        if raw.len() != roles.len() {
            return Err(IngestError::SchemaDrift(format!(
                "TWSE row {} has {} fields, header has {}",
                index,
                raw.len(),
                roles.len()
            )));
        }

        let mut direction = None;
        let mut cells = Vec::with_capacity(Column::ALL.len());
        for (role, value) in roles.iter().zip(raw) {
            match role {
                HeaderRole::Canonical(column) => cells.push((*column, cell_text(value))),
                HeaderRole::Direction => direction = Some(cell_text(value)),
                HeaderRole::Drop => {}
            }
        }

        let mut row = CanonicalQuoteRow::from_cells(date, cells)?;
        let change = merge_direction(direction.as_deref(), row.get(Column::Change));
        row.set(Column::Change, change);
        rows.push(row);
    }
    Ok(rows)
}

/// The centralized-exchange feed.
pub struct TwseAdapter {
    client: Client,
    throttle: Throttle,
}

impl TwseAdapter {
    pub fn new(client: Client, throttle: Throttle) -> Self {
        Self { client, throttle }
    }
}

impl SourceAdapter for TwseAdapter {
    fn exchange(&self) -> Exchange {
        Exchange::Twse
    }

    fn normalizer(&self) -> FieldNormalizer {
        FieldNormalizer::standard()
    }

    async fn fetch(&self, date: NaiveDate) -> Result<Vec<CanonicalQuoteRow>, IngestError> {
        self.throttle.acquire().await;
        let resp = self.client.get_twse_daily(&TwseQuery::new(date)).await?;
        if resp.is_no_data() {
            tracing::info!("TWSE reports no trading on {}", date);
        }
        rows_from_response(&resp, date)
    }
}
