use serde::{Deserialize, Serialize};

use super::RawRow;

/// `stat` value TWSE returns for a day without trading (holidays, weekends).
pub const TWSE_NO_DATA_STAT: &str = "很抱歉，沒有符合條件的資料!";

/// Body of the `MI_INDEX` report: a status line plus a list of titled tables.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct TwseDailyResponse {
    pub stat: String,

    #[serde(default)]
    pub date: Option<String>,

    #[serde(default)]
    pub tables: Vec<TwseTable>,
}

impl TwseDailyResponse {
    /// True when the exchange reports that nothing traded on the requested day.
    pub fn is_no_data(&self) -> bool {
        self.stat.trim() == TWSE_NO_DATA_STAT
    }
}

/// One table of the report. Some entries are placeholders with neither
/// fields nor data, hence the defaults.
#[derive(Serialize, Deserialize, Debug, Clone, Default)]
pub struct TwseTable {
    #[serde(default)]
    pub title: Option<String>,

    #[serde(default)]
    pub fields: Vec<String>,

    #[serde(default)]
    pub data: Vec<RawRow>,
}
