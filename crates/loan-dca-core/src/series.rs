//! Immutable, time-ordered price history with binary-search lookups.
//!
//! Two lookup policies coexist on purpose and must not be merged:
//!
//! - [`PriceSeries::nearest_index`] resolves to the closest sample by
//!   absolute time difference (ties to the earlier sample). Used for
//!   purchase execution, where the realistic fill is the nearest market
//!   print before or after the scheduled payment time.
//! - [`PriceSeries::first_at_or_after`] is right-biased: the first sample at
//!   or after the target. Used for fixed-horizon return measurement, where
//!   rounding down to an earlier sample would introduce look-ahead bias.

use chrono::NaiveDateTime;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::error::LoanDcaError;
use crate::types::Money;
use crate::LoanDcaResult;

/// One hourly sample: timestamp plus the high/low range of that hour.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PricePoint {
    pub timestamp: NaiveDateTime,
    pub high: Money,
    pub low: Money,
}

impl PricePoint {
    /// Midpoint of the hour's range, the working price for every
    /// calculation.
    pub fn mid(&self) -> Money {
        (self.high + self.low) / dec!(2)
    }
}

/// Strictly increasing, duplicate-free sequence of price points.
///
/// Never mutated after construction; share by reference across scanners and
/// simulators.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PriceSeries {
    points: Vec<PricePoint>,
}

impl PriceSeries {
    /// Build a series from raw points. Parsing, coercion, and invalid-row
    /// dropping belong to the loader; this constructor only restores
    /// ordering (sorts by timestamp, keeps the earlier of any duplicate) so
    /// the binary searches below stay sound.
    pub fn new(mut points: Vec<PricePoint>) -> Self {
        points.sort_by_key(|p| p.timestamp);
        points.dedup_by_key(|p| p.timestamp);
        Self { points }
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// First (oldest) point.
    pub fn earliest(&self) -> LoanDcaResult<&PricePoint> {
        self.points.first().ok_or(LoanDcaError::EmptySeries)
    }

    /// Last (newest) point.
    pub fn latest(&self) -> LoanDcaResult<&PricePoint> {
        self.points.last().ok_or(LoanDcaError::EmptySeries)
    }

    pub fn timestamp_at(&self, index: usize) -> NaiveDateTime {
        self.points[index].timestamp
    }

    /// Mid price at the given index.
    pub fn price_at(&self, index: usize) -> Money {
        self.points[index].mid()
    }

    /// Index of the first sample whose timestamp is >= `target`, or `None`
    /// if the target lies beyond the last sample. Right-biased by design;
    /// see the module docs.
    pub fn first_at_or_after(&self, target: NaiveDateTime) -> Option<usize> {
        let idx = self.points.partition_point(|p| p.timestamp < target);
        (idx < self.points.len()).then_some(idx)
    }

    /// Index of the sample closest to `target` by absolute time difference;
    /// ties break toward the earlier sample.
    pub fn nearest_index(&self, target: NaiveDateTime) -> LoanDcaResult<usize> {
        if self.points.is_empty() {
            return Err(LoanDcaError::EmptySeries);
        }
        let idx = self.points.partition_point(|p| p.timestamp < target);
        if idx == 0 {
            return Ok(0);
        }
        if idx == self.points.len() {
            return Ok(self.points.len() - 1);
        }
        let before = target - self.points[idx - 1].timestamp;
        let after = self.points[idx].timestamp - target;
        if after < before {
            Ok(idx)
        } else {
            Ok(idx - 1)
        }
    }

    /// Mid price of the sample closest to `target`.
    pub fn nearest_price(&self, target: NaiveDateTime) -> LoanDcaResult<Money> {
        Ok(self.price_at(self.nearest_index(target)?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use pretty_assertions::assert_eq;
    use rust_decimal::Decimal;

    fn dt(d: u32, h: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2023, 6, d)
            .unwrap()
            .and_hms_opt(h, 0, 0)
            .unwrap()
    }

    fn point(d: u32, h: u32, price: i64) -> PricePoint {
        PricePoint {
            timestamp: dt(d, h),
            high: Decimal::from(price),
            low: Decimal::from(price),
        }
    }

    #[test]
    fn mid_is_average_of_high_and_low() {
        let p = PricePoint {
            timestamp: dt(1, 0),
            high: dec!(110),
            low: dec!(90),
        };
        assert_eq!(p.mid(), dec!(100));
    }

    #[test]
    fn constructor_sorts_and_dedups() {
        let series = PriceSeries::new(vec![point(3, 0, 30), point(1, 0, 10), point(3, 0, 99)]);
        assert_eq!(series.len(), 2);
        assert_eq!(series.timestamp_at(0), dt(1, 0));
        // the earlier of the duplicate rows wins
        assert_eq!(series.price_at(1), dec!(30));
    }

    #[test]
    fn nearest_ties_break_earlier() {
        let series = PriceSeries::new(vec![point(1, 0, 10), point(1, 2, 20)]);
        // 01:00 is equidistant from 00:00 and 02:00
        assert_eq!(series.nearest_index(dt(1, 1)).unwrap(), 0);
        assert_eq!(series.nearest_price(dt(1, 1)).unwrap(), dec!(10));
    }

    #[test]
    fn nearest_clamps_to_ends() {
        let series = PriceSeries::new(vec![point(5, 0, 10), point(10, 0, 20)]);
        assert_eq!(series.nearest_index(dt(1, 0)).unwrap(), 0);
        assert_eq!(series.nearest_index(dt(28, 0)).unwrap(), 1);
    }

    #[test]
    fn nearest_on_empty_series_fails() {
        let series = PriceSeries::new(vec![]);
        assert!(matches!(
            series.nearest_index(dt(1, 0)),
            Err(LoanDcaError::EmptySeries)
        ));
    }

    #[test]
    fn first_at_or_after_is_right_biased() {
        let series = PriceSeries::new(vec![point(1, 0, 10), point(5, 0, 20), point(9, 0, 30)]);
        // exact hit
        assert_eq!(series.first_at_or_after(dt(5, 0)), Some(1));
        // between samples: never rounds down
        assert_eq!(series.first_at_or_after(dt(5, 1)), Some(2));
        // beyond the last sample
        assert_eq!(series.first_at_or_after(dt(9, 1)), None);
    }
}
