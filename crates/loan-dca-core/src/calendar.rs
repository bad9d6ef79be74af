//! Calendar arithmetic for monthly payment schedules.
//!
//! Loan schedules and purchase-date generation need "N months later" with
//! day-of-month clamping (a payment scheduled for the 31st degrades to the
//! 30th or 28th/29th in short months) and leap-year-correct "N years later".
//! Time-of-day is always preserved, since price samples are hourly.

use chrono::{Datelike, NaiveDate, NaiveDateTime};

pub fn is_leap_year(year: i32) -> bool {
    year % 4 == 0 && (year % 100 != 0 || year % 400 == 0)
}

/// Number of days in the given month, leap-year aware.
pub fn days_in_month(year: i32, month: u32) -> u32 {
    match month {
        4 | 6 | 9 | 11 => 30,
        2 => {
            if is_leap_year(year) {
                29
            } else {
                28
            }
        }
        _ => 31,
    }
}

/// Clamp a requested day-of-month to the last valid day of the target month.
pub fn clamp_day(day: u32, year: i32, month: u32) -> u32 {
    day.min(days_in_month(year, month))
}

/// Shift a datetime by whole calendar months, preserving day-of-month
/// (clamped to the target month's length) and time-of-day. Negative shifts
/// are supported.
pub fn add_months(dt: NaiveDateTime, months: i32) -> NaiveDateTime {
    let zero_based = dt.date().year() * 12 + dt.date().month0() as i32 + months;
    let year = zero_based.div_euclid(12);
    let month = zero_based.rem_euclid(12) as u32 + 1;
    let day = clamp_day(dt.date().day(), year, month);
    NaiveDate::from_ymd_opt(year, month, day)
        .map(|d| d.and_time(dt.time()))
        .unwrap_or(dt)
}

/// Shift a datetime by whole calendar years. Feb 29 clamps to Feb 28 when
/// the target year is not a leap year.
pub fn add_years(dt: NaiveDateTime, years: i32) -> NaiveDateTime {
    add_months(dt, years * 12)
}

/// The last day of the datetime's month, preserving time-of-day.
pub fn month_end(dt: NaiveDateTime) -> NaiveDateTime {
    let year = dt.date().year();
    let month = dt.date().month();
    NaiveDate::from_ymd_opt(year, month, days_in_month(year, month))
        .map(|d| d.and_time(dt.time()))
        .unwrap_or(dt)
}
