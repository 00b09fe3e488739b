use serde::{Deserialize, Serialize};

use super::RawRow;

/// Body of the TPEx daily closing quotes report. Rows are purely positional.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct TpexDailyResponse {
    #[serde(rename = "reportDate", default)]
    pub report_date: Option<String>,

    #[serde(rename = "iTotalRecords", default)]
    pub total_records: Option<i64>,

    #[serde(rename = "aaData")]
    pub aa_data: Vec<RawRow>,
}

impl TpexDailyResponse {
    /// TPEx signals a non-trading day with an empty `aaData` array.
    pub fn is_no_data(&self) -> bool {
        self.aa_data.is_empty()
    }
}
