use chrono::NaiveDate;
use url::Url;

use crate::calendar::to_compact;

use super::Query;

/// `type` selector asking for every listed security, warrants and ETFs included.
const SELECT_ALL: &str = "ALL";

/// Query for the TWSE daily all-securities report (`MI_INDEX`).
#[derive(Clone, Debug)]
pub struct TwseQuery {
    pub date: NaiveDate,
}

impl TwseQuery {
    pub fn new(date: NaiveDate) -> Self {
        Self { date }
    }
}

impl Query for TwseQuery {
    fn add_to_url(&self, url: &Url) -> Url {
        let mut url = url.clone();
        url.query_pairs_mut()
            .append_pair("date", &to_compact(self.date))
            .append_pair("type", SELECT_ALL)
            .append_pair("response", "json");
        url
    }
}
