use chrono::NaiveDate;
use twstock_api::{Client, Error, TpexQuery, TwseQuery};
use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn load_fixture(name: &str) -> String {
    std::fs::read_to_string(format!("tests/fixtures/{}", name)).unwrap()
}

fn jan_2() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 1, 2).unwrap()
}

#[tokio::test]
async fn get_twse_daily_success() {
    let mock_server = MockServer::start().await;
    let body = load_fixture("twse_daily.json");

    Mock::given(method("GET"))
        .and(path("/rwd/zh/afterTrading/MI_INDEX"))
        .and(query_param("date", "20240102"))
        .and(query_param("type", "ALL"))
        .and(query_param("response", "json"))
        .and(header("x-requested-with", "XMLHttpRequest"))
        .respond_with(ResponseTemplate::new(200).set_body_string(&body))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = Client::with_base_url(&mock_server.uri());
    let result = client.get_twse_daily(&TwseQuery::new(jan_2())).await;
    assert!(result.is_ok());

    let resp = result.unwrap();
    assert_eq!(resp.stat, "OK");
    assert!(!resp.is_no_data());
    assert_eq!(resp.tables.len(), 9);
    assert_eq!(resp.tables[8].fields[0], "證券代號");
    assert_eq!(resp.tables[8].data.len(), 4);
}

#[tokio::test]
async fn get_twse_daily_no_data() {
    let mock_server = MockServer::start().await;
    let body = load_fixture("twse_no_data.json");

    Mock::given(method("GET"))
        .and(path("/rwd/zh/afterTrading/MI_INDEX"))
        .respond_with(ResponseTemplate::new(200).set_body_string(&body))
        .mount(&mock_server)
        .await;

    let client = Client::with_base_url(&mock_server.uri());
    let resp = client.get_twse_daily(&TwseQuery::new(jan_2())).await.unwrap();
    assert!(resp.is_no_data());
    assert!(resp.tables.is_empty());
}

#[tokio::test]
async fn get_twse_daily_server_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/rwd/zh/afterTrading/MI_INDEX"))
        .respond_with(ResponseTemplate::new(503).set_body_string("Service Unavailable"))
        .mount(&mock_server)
        .await;

    let client = Client::with_base_url(&mock_server.uri());
    let result = client.get_twse_daily(&TwseQuery::new(jan_2())).await;
    match result {
        Err(Error::HttpStatus { status, body }) => {
            assert_eq!(status, 503);
            assert_eq!(body, "Service Unavailable");
        }
        _ => panic!("expected HttpStatus error"),
    }
}

#[tokio::test]
async fn get_twse_daily_malformed_json() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/rwd/zh/afterTrading/MI_INDEX"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>blocked</html>"))
        .mount(&mock_server)
        .await;

    let client = Client::with_base_url(&mock_server.uri());
    let result = client.get_twse_daily(&TwseQuery::new(jan_2())).await;
    assert!(matches!(result, Err(Error::ParseFailed(_))));
}

#[tokio::test]
async fn get_tpex_daily_success() {
    let mock_server = MockServer::start().await;
    let body = load_fixture("tpex_daily.json");

    Mock::given(method("GET"))
        .and(path(
            "/web/stock/aftertrading/otc_quotes_no1430/stk_wn1430_result.php",
        ))
        .and(query_param("d", "113/01/02"))
        .and(query_param("se", "AL"))
        .and(query_param("l", "zh-tw"))
        .respond_with(ResponseTemplate::new(200).set_body_string(&body))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = Client::with_base_url(&mock_server.uri());
    let resp = client.get_tpex_daily(&TpexQuery::new(jan_2())).await.unwrap();
    assert!(!resp.is_no_data());
    assert_eq!(resp.aa_data.len(), 4);
    assert_eq!(resp.aa_data[0][0], "6488");
}

#[tokio::test]
async fn get_tpex_daily_no_data() {
    let mock_server = MockServer::start().await;
    let body = load_fixture("tpex_no_data.json");

    Mock::given(method("GET"))
        .and(path(
            "/web/stock/aftertrading/otc_quotes_no1430/stk_wn1430_result.php",
        ))
        .respond_with(ResponseTemplate::new(200).set_body_string(&body))
        .mount(&mock_server)
        .await;

    let client = Client::with_base_url(&mock_server.uri());
    let resp = client.get_tpex_daily(&TpexQuery::new(jan_2())).await.unwrap();
    assert!(resp.is_no_data());
}

#[tokio::test]
async fn separate_base_urls_route_each_feed() {
    let twse_server = MockServer::start().await;
    let tpex_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/rwd/zh/afterTrading/MI_INDEX"))
        .respond_with(ResponseTemplate::new(200).set_body_string(load_fixture("twse_no_data.json")))
        .expect(1)
        .mount(&twse_server)
        .await;
    Mock::given(method("GET"))
        .and(path(
            "/web/stock/aftertrading/otc_quotes_no1430/stk_wn1430_result.php",
        ))
        .respond_with(ResponseTemplate::new(200).set_body_string(load_fixture("tpex_no_data.json")))
        .expect(1)
        .mount(&tpex_server)
        .await;

    let client = Client::with_base_urls(&twse_server.uri(), &format!("{}/", tpex_server.uri()));
    assert!(client.get_twse_daily(&TwseQuery::new(jan_2())).await.is_ok());
    assert!(client.get_tpex_daily(&TpexQuery::new(jan_2())).await.is_ok());
}
