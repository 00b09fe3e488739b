//! HTTP client for the TWSE and TPEx daily quote endpoints.

use std::time::Duration;

use serde::de::DeserializeOwned;
use url::Url;

use crate::{
    query::{Query, TpexQuery, TwseQuery},
    types::{TpexDailyResponse, TwseDailyResponse},
    user_agent::get_user_agent,
    Error,
};

const TWSE_DAILY_PATH: &str = "/rwd/zh/afterTrading/MI_INDEX";
const TPEX_DAILY_PATH: &str = "/web/stock/aftertrading/otc_quotes_no1430/stk_wn1430_result.php";

/// Which exchange a request goes to; selects the browser-like referer.
#[derive(Clone, Copy)]
enum Feed {
    Twse,
    Tpex,
}

impl Feed {
    fn referer(self) -> &'static str {
        match self {
            Feed::Twse => "https://www.twse.com.tw/zh/trading/historical/mi-index.html",
            Feed::Tpex => "https://www.tpex.org.tw/web/stock/aftertrading/otc_quotes_no1430/stk_wn1430.php?l=zh-tw",
        }
    }
}

/// HTTP client for the two exchange report endpoints.
///
/// Sends requests with browser-like headers and a randomized user agent, as
/// both sites reject bare clients. Each request builds a fresh
/// `reqwest::Client` with a 30-second timeout. No throttling happens here;
/// callers pace their requests.
pub struct Client {
    /// Base URL for TWSE. Defaults to `https://www.twse.com.tw`.
    twse_base_url: String,
    /// Base URL for TPEx. Defaults to `https://www.tpex.org.tw`.
    tpex_base_url: String,
}

impl Default for Client {
    fn default() -> Self {
        Self::new()
    }
}

impl Client {
    /// Creates a new client pointing at the production exchange sites.
    pub fn new() -> Self {
        Self {
            twse_base_url: "https://www.twse.com.tw".to_string(),
            tpex_base_url: "https://www.tpex.org.tw".to_string(),
        }
    }

    /// Creates a new client serving both feeds from one base URL. Used for testing with wiremock.
    pub fn with_base_url(base_url: &str) -> Self {
        Self::with_base_urls(base_url, base_url)
    }

    /// Creates a new client with separate base URLs per exchange.
    pub fn with_base_urls(twse_base_url: &str, tpex_base_url: &str) -> Self {
        Self {
            twse_base_url: twse_base_url.trim_end_matches('/').to_string(),
            tpex_base_url: tpex_base_url.trim_end_matches('/').to_string(),
        }
    }

    fn get_url(&self, base: &str, path: &str, query: &impl Query) -> Result<Url, Error> {
        let url = Url::parse(format!("{}{}", base, path).as_str()).map_err(|e| {
            tracing::error!("Invalid URL constructed: {}", e);
            Error::RequestFailed
        })?;
        Ok(query.add_to_url(&url))
    }

    async fn get<T>(&self, feed: Feed, url: Url) -> Result<T, Error>
    where
        T: DeserializeOwned,
    {
        let client = reqwest::Client::builder()
            .user_agent(get_user_agent())
            .timeout(Duration::from_secs(30))
            .build()
            .map_err(|e| {
                tracing::error!("Failed to build HTTP client: {}", e);
                Error::RequestFailed
            })?;
        tracing::debug!("GET {}", url);
        let resp = client
            .get(url)
            .header("accept", "application/json, text/javascript, */*; q=0.01")
            .header(
                "accept-language",
                "zh-TW,zh;q=0.9,en-US;q=0.8,en;q=0.7,zh-CN;q=0.6",
            )
            .header("referer", feed.referer())
            .header("x-requested-with", "XMLHttpRequest")
            .send()
            .await
            .map_err(|e| {
                tracing::error!("Failed to get resource: {}", e);
                Error::RequestFailed
            })?;

        let status = resp.status();
        let body = resp.text().await.map_err(|e| {
            tracing::error!("Failed to read response body: {}", e);
            Error::RequestFailed
        })?;

        if !status.is_success() {
            let snippet = truncate_body(&body);
            tracing::error!("Request failed with status {}: {}", status, snippet);
            return Err(Error::HttpStatus {
                status: status.as_u16(),
                body: snippet,
            });
        }

        serde_json::from_str::<T>(&body).map_err(|e| {
            let snippet = truncate_body(&body);
            tracing::error!("Failed to parse resource: {} | body: {}", e, snippet);
            Error::ParseFailed(e.to_string())
        })
    }

    /// Fetches the TWSE all-securities report for one day.
    pub async fn get_twse_daily(&self, query: &TwseQuery) -> Result<TwseDailyResponse, Error> {
        let url = self.get_url(&self.twse_base_url, TWSE_DAILY_PATH, query)?;
        self.get::<TwseDailyResponse>(Feed::Twse, url).await
    }

    /// Fetches the TPEx closing quotes report for one day.
    pub async fn get_tpex_daily(&self, query: &TpexQuery) -> Result<TpexDailyResponse, Error> {
        let url = self.get_url(&self.tpex_base_url, TPEX_DAILY_PATH, query)?;
        self.get::<TpexDailyResponse>(Feed::Tpex, url).await
    }
}

fn truncate_body(body: &str) -> String {
    const MAX: usize = 2000;
    if body.len() <= MAX {
        return body.to_string();
    }
    let mut end = MAX;
    while !body.is_char_boundary(end) {
        end -= 1;
    }
    format!("{}...[truncated]", &body[..end])
}
