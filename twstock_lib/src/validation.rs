use std::time::Duration;

use chrono::NaiveDate;

use crate::date_range::DateRange;
use crate::error::IngestError;

/// Longest accepted pause between requests (one minute).
pub const MAX_DELAY_MS: u64 = 60_000;

/// Parse a `YYYY-MM-DD` date.
pub fn validate_date(input: &str) -> Result<NaiveDate, IngestError> {
    let trimmed = input.trim();
    NaiveDate::parse_from_str(trimmed, "%Y-%m-%d").map_err(|_| {
        IngestError::InvalidInput(format!(
            "invalid date '{}'. Expected format: YYYY-MM-DD (e.g., 2024-01-02)",
            trimmed
        ))
    })
}

/// Parse both ends of a range and check their order.
pub fn validate_range(start: &str, end: &str) -> Result<DateRange, IngestError> {
    let start = validate_date(start)?;
    let end = validate_date(end)?;
    DateRange::new(start, end)
}

/// Validate the pause between requests: 0..=60000 milliseconds.
pub fn validate_delay_ms(delay_ms: u64) -> Result<Duration, IngestError> {
    if delay_ms > MAX_DELAY_MS {
        return Err(IngestError::InvalidInput(format!(
            "delay must be at most {} ms, got {}",
            MAX_DELAY_MS, delay_ms
        )));
    }
    Ok(Duration::from_millis(delay_ms))
}
