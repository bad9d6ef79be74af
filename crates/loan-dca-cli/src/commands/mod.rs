pub mod grid;
pub mod loan;
pub mod scan;
pub mod simulate;

use chrono::{NaiveDate, NaiveDateTime};
use loan_dca_core::series::PriceSeries;

/// Parse a `--window-end` flag: datetime, or date (midnight).
pub fn parse_window_end(raw: &str) -> Result<NaiveDateTime, Box<dyn std::error::Error>> {
    if let Ok(dt) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S") {
        return Ok(dt);
    }
    if let Ok(dt) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S") {
        return Ok(dt);
    }
    if let Ok(d) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        if let Some(dt) = d.and_hms_opt(0, 0, 0) {
            return Ok(dt);
        }
    }
    Err(format!("Cannot parse '{raw}' as a date or datetime").into())
}

/// The window end to anchor a simulation at: an explicit flag, or the last
/// sample of the series.
pub fn resolve_window_end(
    series: &PriceSeries,
    flag: &Option<String>,
) -> Result<NaiveDateTime, Box<dyn std::error::Error>> {
    match flag {
        Some(raw) => parse_window_end(raw),
        None => Ok(series.latest()?.timestamp),
    }
}
