use chrono::NaiveDate;
use serde_json::{json, Value};
use std::path::{Path, PathBuf};
use twstock_lib::source::{tpex, twse};
use twstock_lib::types::{TpexDailyResponse, TwseDailyResponse};
use twstock_lib::{CanonicalQuoteRow, FieldNormalizer, SchemaValidator, TaiwanStockPriceRecord};

fn workspace_root() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .parent()
        .expect("CLI crate should be inside workspace")
        .to_path_buf()
}

fn load_fixture(name: &str) -> String {
    let path = workspace_root()
        .join("twstock_api/tests/fixtures")
        .join(name);
    std::fs::read_to_string(&path)
        .unwrap_or_else(|e| panic!("read fixture {}: {}", path.display(), e))
}

fn load_schema() -> Value {
    let path = workspace_root()
        .join("schema")
        .join("taiwan_stock_price.schema.json");
    let text = std::fs::read_to_string(&path)
        .unwrap_or_else(|e| panic!("read schema {}: {}", path.display(), e));
    serde_json::from_str(&text).expect("schema is valid JSON")
}

fn jan_2() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 1, 2).unwrap()
}

/// Runs rows through the same cleaning and validation the CLI uses.
fn validate(rows: Vec<CanonicalQuoteRow>, normalizer: FieldNormalizer) -> Value {
    let mut rows = rows;
    for row in rows.iter_mut() {
        normalizer.normalize_row(row);
    }
    let records: Vec<TaiwanStockPriceRecord> = SchemaValidator::new().validate(&rows).unwrap();
    serde_json::to_value(records).unwrap()
}

fn tpex_rows() -> Vec<CanonicalQuoteRow> {
    let resp: TpexDailyResponse = serde_json::from_str(&load_fixture("tpex_daily.json")).unwrap();
    tpex::rows_from_response(&resp, jan_2()).unwrap()
}

fn twse_rows() -> Vec<CanonicalQuoteRow> {
    let resp: TwseDailyResponse = serde_json::from_str(&load_fixture("twse_daily.json")).unwrap();
    twse::rows_from_response(&resp, jan_2()).unwrap()
}

fn assert_conforms(data: &Value, label: &str) {
    let schema = load_schema();
    let validator = jsonschema::draft202012::new(&schema).expect("schema compiles");
    if let Err(e) = validator.validate(data) {
        panic!("{label} records failed validation: {e}");
    }
}

// ---------------------------------------------------------------------------
// Positive validation: records built from fixtures conform to the schema
// ---------------------------------------------------------------------------

#[test]
fn test_tpex_records_conform_to_schema() {
    let data = validate(tpex_rows(), FieldNormalizer::padded());
    assert_eq!(data.as_array().unwrap().len(), 4);
    assert_conforms(&data, "tpex");
}

#[test]
fn test_twse_records_conform_to_schema() {
    let data = validate(twse_rows(), FieldNormalizer::standard());
    assert_eq!(data.as_array().unwrap().len(), 4);
    assert_conforms(&data, "twse");
}

#[test]
fn test_twse_change_keeps_direction_sign() {
    let data = validate(twse_rows(), FieldNormalizer::standard());
    let change_of = |id: &str| {
        data.as_array()
            .unwrap()
            .iter()
            .find(|r| r["StockID"] == id)
            .map(|r| r["Change"].as_f64().unwrap())
            .unwrap()
    };
    assert_eq!(change_of("2330"), 5.0);
    assert_eq!(change_of("2317"), -1.5);
    assert_eq!(change_of("1101B"), 0.0);
}

#[test]
fn test_record_dates_render_as_iso() {
    for data in [
        validate(tpex_rows(), FieldNormalizer::padded()),
        validate(twse_rows(), FieldNormalizer::standard()),
    ] {
        for record in data.as_array().unwrap() {
            assert_eq!(record["date"], "2024-01-02");
        }
    }
}

// ---------------------------------------------------------------------------
// Negative validation: the schema rejects malformed records
// ---------------------------------------------------------------------------

fn sample_record() -> Value {
    json!({
        "StockID": "2330",
        "TradeVolume": 12345678,
        "Transaction": 1234,
        "TradeValue": 9999999999u64,
        "Open": 600.0,
        "Max": 610.0,
        "Min": 590.0,
        "Close": 605.0,
        "Change": -5.0,
        "date": "2024-01-02"
    })
}

#[test]
fn test_schema_accepts_negative_change() {
    let schema = load_schema();
    let validator = jsonschema::draft202012::new(&schema).expect("schema compiles");
    assert!(validator.is_valid(&json!([sample_record()])));
}

#[test]
fn test_schema_rejects_negative_volume() {
    let schema = load_schema();
    let validator = jsonschema::draft202012::new(&schema).expect("schema compiles");
    let mut record = sample_record();
    record["TradeVolume"] = json!(-1);
    assert!(!validator.is_valid(&json!([record])));
}

#[test]
fn test_schema_rejects_textual_price() {
    let schema = load_schema();
    let validator = jsonschema::draft202012::new(&schema).expect("schema compiles");
    let mut record = sample_record();
    record["Close"] = json!("605.00");
    assert!(!validator.is_valid(&json!([record])));
}

#[test]
fn test_schema_rejects_missing_date() {
    let schema = load_schema();
    let validator = jsonschema::draft202012::new(&schema).expect("schema compiles");
    let mut record = sample_record();
    record.as_object_mut().unwrap().remove("date");
    assert!(!validator.is_valid(&json!([record])));
}

#[test]
fn test_schema_rejects_extra_columns() {
    let schema = load_schema();
    let validator = jsonschema::draft202012::new(&schema).expect("schema compiles");
    let mut record = sample_record();
    record["StockName"] = json!("台積電");
    assert!(!validator.is_valid(&json!([record])));
}
