use chrono::NaiveDate;
use url::Url;

use crate::calendar::to_local_era;

use super::Query;

/// `se` segment code covering every OTC security.
const SEGMENT_ALL: &str = "AL";

/// Query for the TPEx daily closing quotes report (`stk_wn1430_result.php`).
#[derive(Clone, Debug)]
pub struct TpexQuery {
    pub date: NaiveDate,
}

impl TpexQuery {
    pub fn new(date: NaiveDate) -> Self {
        Self { date }
    }
}

impl Query for TpexQuery {
    fn add_to_url(&self, url: &Url) -> Url {
        let mut url = url.clone();
        url.query_pairs_mut()
            .append_pair("l", "zh-tw")
            .append_pair("d", &to_local_era(self.date))
            .append_pair("se", SEGMENT_ALL);
        url
    }
}
