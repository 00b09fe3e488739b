//! Per-exchange adapters: fetch one day, hand back canonical rows.

use std::fmt;

use chrono::NaiveDate;
use serde::Serialize;

use crate::error::IngestError;
use crate::normalize::FieldNormalizer;
use crate::record::CanonicalQuoteRow;

pub mod tpex;
pub mod twse;

pub use self::tpex::{TpexAdapter, TPEX_COLUMN_INDEX};
pub use self::twse::{HeaderRole, TwseAdapter, TWSE_HEADER_MAP, TWSE_QUOTE_TABLE_INDEX};

/// The two upstream venues.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Exchange {
    /// Taiwan Stock Exchange, the centralized market.
    Twse,
    /// Taipei Exchange, the over-the-counter market.
    Tpex,
}

impl Exchange {
    /// Lowercase identifier used in file names and logs.
    pub fn id(self) -> &'static str {
        match self {
            Exchange::Twse => "twse",
            Exchange::Tpex => "tpex",
        }
    }
}

impl fmt::Display for Exchange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

impl Serialize for Exchange {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.id())
    }
}

/// A daily quote feed.
///
/// `fetch` returns an empty vector when the exchange says nothing traded that
/// day. Transport failures and layout changes are errors, never empty results.
#[allow(async_fn_in_trait)]
pub trait SourceAdapter {
    fn exchange(&self) -> Exchange;

    /// Cleaning rules matching this feed's formatting quirks.
    fn normalizer(&self) -> FieldNormalizer;

    /// Fetches the quotes for `date` in canonical column order, not yet normalized.
    async fn fetch(&self, date: NaiveDate) -> Result<Vec<CanonicalQuoteRow>, IngestError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exchange_ids() {
        assert_eq!(Exchange::Twse.to_string(), "twse");
        assert_eq!(Exchange::Tpex.to_string(), "tpex");
    }
}
