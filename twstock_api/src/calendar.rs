//! Date renderings required by the two exchange endpoints.
//!
//! TWSE takes a compact Gregorian date (`20240102`); TPEx takes a date in the
//! Minguo era (`113/01/02`), whose year 1 is Gregorian 1912.

use chrono::{Datelike, NaiveDate};

/// Years between the Gregorian calendar and the Minguo era.
pub const LOCAL_ERA_OFFSET: i32 = 1911;

/// Renders `date` as `YYYYMMDD`.
pub fn to_compact(date: NaiveDate) -> String {
    date.format("%Y%m%d").to_string()
}

/// Renders `date` as `year/MM/DD` in the Minguo era.
pub fn to_local_era(date: NaiveDate) -> String {
    format!(
        "{}/{:02}/{:02}",
        date.year() - LOCAL_ERA_OFFSET,
        date.month(),
        date.day()
    )
}
