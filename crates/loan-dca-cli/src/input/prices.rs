//! Price-history CSV loader.
//!
//! Parsing, type coercion, row validation, sorting, and deduplication all
//! happen here; the core only ever sees a clean [`PriceSeries`]. The
//! tolerated shape matches common exchange exports (e.g. Gemini hourly
//! candles): an optional leading URL line before the header, a
//! `date`/`timestamp`/`unix` column, and `high`/`low` columns; any other
//! columns (open, close, volume) are ignored.

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;
use std::fs;
use std::str::FromStr;

use loan_dca_core::series::{PricePoint, PriceSeries};

/// Load a price history CSV into a normalized series.
pub fn load_csv(path: &str) -> Result<PriceSeries, Box<dyn std::error::Error>> {
    let raw = fs::read_to_string(path).map_err(|e| format!("Failed to read '{path}': {e}"))?;

    // Some exports prepend a single non-CSV line (typically the source URL).
    let data = match raw.split_once('\n') {
        Some((first, rest)) if !looks_like_header(first) && looks_like_header(first_line(rest)) => {
            rest
        }
        _ => raw.as_str(),
    };

    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(data.as_bytes());

    let headers = reader.headers()?.clone();
    let date_col = find_column(&headers, &["date", "timestamp", "time", "datetime"])
        .or_else(|| find_column(&headers, &["unix"]))
        .ok_or("No date/timestamp column found in price CSV")?;
    let high_col = find_column(&headers, &["high"]).ok_or("No 'high' column found in price CSV")?;
    let low_col = find_column(&headers, &["low"]).ok_or("No 'low' column found in price CSV")?;

    let mut points = Vec::new();
    let mut dropped = 0usize;
    for record in reader.records() {
        let record = match record {
            Ok(r) => r,
            Err(_) => {
                dropped += 1;
                continue;
            }
        };
        match parse_row(&record, date_col, high_col, low_col) {
            Some(point) => points.push(point),
            None => dropped += 1,
        }
    }

    if points.is_empty() {
        return Err(format!(
            "No usable price rows in '{path}' ({dropped} invalid row(s) dropped)"
        )
        .into());
    }

    Ok(PriceSeries::new(points))
}

fn parse_row(
    record: &csv::StringRecord,
    date_col: usize,
    high_col: usize,
    low_col: usize,
) -> Option<PricePoint> {
    let timestamp = parse_timestamp(record.get(date_col)?)?;
    let high = parse_decimal(record.get(high_col)?)?;
    let low = parse_decimal(record.get(low_col)?)?;
    if low < Decimal::ZERO || high < low {
        return None;
    }
    Some(PricePoint {
        timestamp,
        high,
        low,
    })
}

/// Accepted timestamp shapes, in order: US short date with time (the Gemini
/// export format), ISO date-times, bare ISO date, unix seconds or millis.
fn parse_timestamp(raw: &str) -> Option<NaiveDateTime> {
    let raw = raw.trim();
    for format in ["%m/%d/%y %H:%M", "%Y-%m-%d %H:%M:%S", "%Y-%m-%d %H:%M", "%Y-%m-%dT%H:%M:%S"] {
        if let Ok(dt) = NaiveDateTime::parse_from_str(raw, format) {
            return Some(dt);
        }
    }
    if let Ok(d) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return d.and_hms_opt(0, 0, 0);
    }
    if let Ok(epoch) = raw.parse::<i64>() {
        // Heuristic: 13+ digits is milliseconds.
        let seconds = if epoch.abs() >= 100_000_000_000 {
            epoch / 1000
        } else {
            epoch
        };
        return DateTime::from_timestamp(seconds, 0).map(|dt| dt.naive_utc());
    }
    None
}

fn parse_decimal(raw: &str) -> Option<Decimal> {
    Decimal::from_str(raw.trim().trim_start_matches('$').replace(',', "").as_str()).ok()
}

fn looks_like_header(line: &str) -> bool {
    let lower = line.to_ascii_lowercase();
    ["date", "timestamp", "time", "unix"]
        .iter()
        .any(|c| lower.split(',').any(|f| f.trim() == *c))
}

fn first_line(s: &str) -> &str {
    s.split('\n').next().unwrap_or("")
}

fn find_column(headers: &csv::StringRecord, candidates: &[&str]) -> Option<usize> {
    headers.iter().position(|h| {
        let h = h.trim().to_ascii_lowercase();
        candidates.iter().any(|c| h == *c)
    })
}
