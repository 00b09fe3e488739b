mod twse;
pub use self::twse::{TwseDailyResponse, TwseTable, TWSE_NO_DATA_STAT};

mod tpex;
pub use self::tpex::TpexDailyResponse;

use serde_json::Value;

/// One untyped row exactly as a feed returned it.
pub type RawRow = Vec<Value>;

/// Renders a raw cell as text. Feeds send strings almost everywhere, but a
/// number or `null` must not abort decoding; `null` becomes empty text.
pub fn cell_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}
