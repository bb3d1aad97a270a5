//! Aggregate derivation over record collections
//!
//! All functions take a borrowed slice and a field name; nothing here mutates input.
//! Empty-input policy:
//! - `sum` of an empty collection is 0
//! - `average` and `extremum_by` of an empty collection fail with `EmptyCollection`

use serde::Serialize;

use crate::error::{MetricsError, Result};
use crate::records::Record;

/// Decimal places used by [`share_of_total`]
pub const SHARE_DECIMALS: u32 = 1;

/// Which end of the range [`extremum_by`] looks for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Max,
    Min,
}

/// Percentage share of one record in a collection total
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Share {
    pub key: String,
    pub value: f64,
    pub percent: f64,
}

/// Round half up (towards positive infinity) to `decimals` places
///
/// Decimal halves such as 1.005 are not exact in binary, so the scaled value is
/// snapped onto the half it came from before flooring.
pub fn round_half_up(value: f64, decimals: u32) -> f64 {
    let factor = 10f64.powi(decimals as i32);
    let scaled = value * factor;
    if !scaled.is_finite() {
        return value;
    }
    (snap_to_half(scaled) + 0.5).floor() / factor
}

/// Nearest multiple of 0.5 when `scaled` sits within float error of it
fn snap_to_half(scaled: f64) -> f64 {
    let half = (scaled * 2.0).round() / 2.0;
    let tolerance = (scaled.abs() * 8.0 * f64::EPSILON).max(1e-12);
    if (scaled - half).abs() <= tolerance { half } else { scaled }
}

/// Ensure the record type carries `field`
pub(crate) fn check_field<R: Record>(field: &str) -> Result<()> {
    if R::FIELDS.contains(&field) {
        Ok(())
    } else {
        Err(MetricsError::missing_field(field))
    }
}

/// Read `field` from a single record
pub(crate) fn value_of<R: Record>(record: &R, field: &str) -> Result<f64> {
    record.field(field).ok_or_else(|| MetricsError::missing_field(field))
}

/// Total of `field` across all records (0 for an empty collection)
pub fn sum<R: Record>(records: &[R], field: &str) -> Result<f64> {
    check_field::<R>(field)?;
    records.iter().try_fold(0.0, |acc, r| Ok(acc + value_of(r, field)?))
}

/// Mean of `field`; fails with `EmptyCollection` when there are no records
pub fn average<R: Record>(records: &[R], field: &str) -> Result<f64> {
    check_field::<R>(field)?;
    if records.is_empty() {
        return Err(MetricsError::empty("average"));
    }
    Ok(sum(records, field)? / records.len() as f64)
}

/// First record holding the largest (or smallest) value of `field`
///
/// Ties resolve to the earliest record in insertion order.
pub fn extremum_by<'a, R: Record>(records: &'a [R], field: &str, direction: Direction) -> Result<&'a R> {
    check_field::<R>(field)?;
    let mut iter = records.iter();
    let first = iter.next().ok_or_else(|| MetricsError::empty("extremum_by"))?;

    let mut best = first;
    let mut best_value = value_of(first, field)?;
    for record in iter {
        let value = value_of(record, field)?;
        let better = match direction {
            Direction::Max => value > best_value,
            Direction::Min => value < best_value,
        };
        if better {
            best = record;
            best_value = value;
        }
    }
    Ok(best)
}

/// Each record's share of the `field` total, in percent rounded to [`SHARE_DECIMALS`]
pub fn share_of_total<R: Record>(records: &[R], field: &str) -> Result<Vec<Share>> {
    share_of_total_with_precision(records, field, SHARE_DECIMALS)
}

/// Each record's share of the `field` total at `decimals` places
///
/// Shares are apportioned by largest remainder: every share is floored to the
/// requested precision and the units still missing from 100 go to the records with
/// the largest remainders, earlier records first on ties. The percents therefore add
/// up to exactly 100 at that precision, however many records there are.
pub fn share_of_total_with_precision<R: Record>(records: &[R], field: &str, decimals: u32) -> Result<Vec<Share>> {
    check_field::<R>(field)?;
    if records.is_empty() {
        return Err(MetricsError::empty("share_of_total"));
    }

    let total = sum(records, field)?;
    if total == 0.0 {
        return Err(MetricsError::divide_by_zero("share_of_total"));
    }

    let factor = 10f64.powi(decimals as i32);
    let values = records
        .iter()
        .map(|record| value_of(record, field))
        .collect::<Result<Vec<f64>>>()?;
    let exact: Vec<f64> = values.iter().map(|v| snap_to_half(v / total * 100.0 * factor)).collect();
    let mut units: Vec<f64> = exact.iter().map(|e| e.floor()).collect();

    let leftover = (100.0 * factor - units.iter().sum::<f64>()).round().max(0.0) as usize;
    let mut by_remainder: Vec<usize> = (0..units.len()).collect();
    // sort_by is stable, so equal remainders keep input order
    by_remainder.sort_by(|&a, &b| (exact[b] - units[b]).total_cmp(&(exact[a] - units[a])));
    for &idx in by_remainder.iter().take(leftover) {
        units[idx] += 1.0;
    }

    Ok(records
        .iter()
        .zip(values)
        .zip(units)
        .map(|((record, value), unit)| Share {
            key: record.key().to_string(),
            value,
            percent: unit / factor,
        })
        .collect())
}

/// `numerator / denominator`, failing instead of producing Infinity or NaN
pub fn ratio(numerator: f64, denominator: f64, operation: &'static str) -> Result<f64> {
    if denominator == 0.0 {
        return Err(MetricsError::divide_by_zero(operation));
    }
    Ok(numerator / denominator)
}

/// Total revenue divided by total orders
pub fn average_order_value<R: Record>(records: &[R]) -> Result<f64> {
    let revenue = sum(records, "revenue")?;
    let orders = sum(records, "orders")?;
    ratio(revenue, orders, "average_order_value")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::records::{ChannelMetric, MonthlyMetric, RegionMetric};
    use proptest::prelude::*;

    fn two_months() -> Vec<MonthlyMetric> {
        vec![
            MonthlyMetric::new("Dec 23", 1_240_000.0, 565, 0.23),
            MonthlyMetric::new("Jan 24", 690_000.0, 310, 0.12),
        ]
    }

    fn regions() -> Vec<RegionMetric> {
        vec![
            RegionMetric::new("Cairo", 3_900_000.0, 1700),
            RegionMetric::new("Giza", 1_600_000.0, 720),
            RegionMetric::new("Alexandria", 1_200_000.0, 520),
            RegionMetric::new("Dakahlia", 600_000.0, 270),
            RegionMetric::new("Sharqia", 480_000.0, 210),
        ]
    }

    #[test]
    fn test_sum_revenue() {
        assert_eq!(sum(&two_months(), "revenue").unwrap(), 1_930_000.0);
        assert_eq!(sum(&two_months(), "orders").unwrap(), 875.0);
    }

    #[test]
    fn test_sum_empty_is_zero() {
        let empty: Vec<MonthlyMetric> = Vec::new();
        assert_eq!(sum(&empty, "revenue").unwrap(), 0.0);
    }

    #[test]
    fn test_missing_field() {
        assert_eq!(
            sum(&two_months(), "spend"),
            Err(MetricsError::MissingField {
                field: "spend".to_string()
            })
        );
        let empty: Vec<MonthlyMetric> = Vec::new();
        assert!(matches!(average(&empty, "spend"), Err(MetricsError::MissingField { .. })));
    }

    #[test]
    fn test_average() {
        assert_eq!(average(&two_months(), "revenue").unwrap(), 965_000.0);
    }

    #[test]
    fn test_average_empty_is_error() {
        let empty: Vec<MonthlyMetric> = Vec::new();
        assert_eq!(
            average(&empty, "revenue"),
            Err(MetricsError::EmptyCollection { operation: "average" })
        );
    }

    #[test]
    fn test_extremum_max_picks_december() {
        let months = two_months();
        let best = extremum_by(&months, "revenue", Direction::Max).unwrap();
        assert_eq!(best.label, "Dec 23");
        let slowest = extremum_by(&months, "revenue", Direction::Min).unwrap();
        assert_eq!(slowest.label, "Jan 24");
    }

    #[test]
    fn test_extremum_ties_keep_first() {
        let months = vec![
            MonthlyMetric::new("Mar 24", 890_000.0, 385, 0.14),
            MonthlyMetric::new("Apr 24", 960_000.0, 420, 0.13),
            MonthlyMetric::new("May 24", 960_000.0, 435, 0.12),
            MonthlyMetric::new("Jun 24", 890_000.0, 392, 0.13),
        ];
        assert_eq!(extremum_by(&months, "revenue", Direction::Max).unwrap().label, "Apr 24");
        assert_eq!(extremum_by(&months, "revenue", Direction::Min).unwrap().label, "Mar 24");
    }

    #[test]
    fn test_extremum_empty() {
        let empty: Vec<MonthlyMetric> = Vec::new();
        assert!(matches!(
            extremum_by(&empty, "revenue", Direction::Max),
            Err(MetricsError::EmptyCollection { .. })
        ));
    }

    #[test]
    fn test_share_of_total_regions() {
        let shares = share_of_total(&regions(), "revenue").unwrap();
        let percents: Vec<f64> = shares.iter().map(|s| s.percent).collect();
        // 7.78M total
        assert_eq!(percents, vec![50.1, 20.6, 15.4, 7.7, 6.2]);
        assert_eq!(shares[0].key, "Cairo");
    }

    #[test]
    fn test_share_of_total_many_equal_records() {
        let sixty: Vec<RegionMetric> = (0..60).map(|i| RegionMetric::new(&format!("R{i}"), 1.0, 1)).collect();
        let shares = share_of_total(&sixty, "revenue").unwrap();
        let units: i64 = shares.iter().map(|s| (s.percent * 10.0).round() as i64).sum();
        assert_eq!(units, 1000);
        // 100 / 60 = 1.666..., the first 40 records take the spare tenths
        assert_eq!(shares[0].percent, 1.7);
        assert_eq!(shares[39].percent, 1.7);
        assert_eq!(shares[40].percent, 1.6);
    }

    #[test]
    fn test_share_of_total_whole_percents() {
        let shares = share_of_total_with_precision(&regions(), "revenue", 0).unwrap();
        let percents: Vec<f64> = shares.iter().map(|s| s.percent).collect();
        assert_eq!(percents, vec![50.0, 21.0, 15.0, 8.0, 6.0]);
    }

    #[test]
    fn test_share_of_total_zero_total() {
        let channels = vec![ChannelMetric::new("Email", 0.0, 0, 70_000.0)];
        assert_eq!(
            share_of_total(&channels, "revenue"),
            Err(MetricsError::DivideByZero {
                operation: "share_of_total"
            })
        );
    }

    #[test]
    fn test_share_of_total_empty() {
        let empty: Vec<RegionMetric> = Vec::new();
        assert!(matches!(
            share_of_total(&empty, "revenue"),
            Err(MetricsError::EmptyCollection { .. })
        ));
    }

    #[test]
    fn test_round_half_up() {
        assert_eq!(round_half_up(18.5, 0), 19.0);
        assert_eq!(round_half_up(18.4, 0), 18.0);
        assert_eq!(round_half_up(4.1935, 2), 4.19);
        assert_eq!(round_half_up(58.25, 1), 58.3);
    }

    #[test]
    fn test_round_half_up_decimal_halves() {
        assert_eq!(round_half_up(1.005, 2), 1.01);
        assert_eq!(round_half_up(28.499999999999996, 0), 29.0);
        assert_eq!(round_half_up(0.145 * 100.0, 0), 15.0);
        assert_eq!(round_half_up(28.4, 0), 28.0);
        assert_eq!(round_half_up(1_000_000.4995, 3), 1_000_000.5);
        assert_eq!(round_half_up(1_000_000.4994, 0), 1_000_000.0);
    }

    #[test]
    fn test_average_order_value() {
        let aov = average_order_value(&two_months()).unwrap();
        assert_eq!(aov.round(), 2206.0);
    }

    #[test]
    fn test_average_order_value_without_orders() {
        let empty: Vec<MonthlyMetric> = Vec::new();
        assert!(matches!(
            average_order_value(&empty),
            Err(MetricsError::DivideByZero { .. })
        ));
    }

    #[test]
    fn test_inputs_not_mutated() {
        let months = two_months();
        let before = months.clone();
        let _ = sum(&months, "revenue");
        let _ = share_of_total(&months, "revenue");
        let _ = extremum_by(&months, "orders", Direction::Min);
        assert_eq!(months, before);
    }

    fn arb_regions() -> impl Strategy<Value = Vec<RegionMetric>> {
        prop::collection::vec((0u32..5_000_000, 0u64..5_000), 1..200).prop_map(|rows| {
            rows.into_iter()
                .enumerate()
                .map(|(i, (revenue, orders))| RegionMetric::new(&format!("R{i}"), revenue as f64, orders))
                .collect()
        })
    }

    proptest! {
        #[test]
        fn sum_matches_fold(regions in arb_regions()) {
            let folded = regions.iter().fold(0.0, |acc, r| acc + r.revenue);
            prop_assert_eq!(sum(&regions, "revenue").unwrap(), folded);
        }

        #[test]
        fn shares_add_up_to_hundred(regions in arb_regions(), decimals in 0u32..=4) {
            prop_assume!(regions.iter().any(|r| r.revenue > 0.0));
            let shares = share_of_total_with_precision(&regions, "revenue", decimals).unwrap();
            let factor = 10f64.powi(decimals as i32);
            let units: i64 = shares.iter().map(|s| (s.percent * factor).round() as i64).sum();
            prop_assert_eq!(units, (100.0 * factor) as i64);
            let total: f64 = shares.iter().map(|s| s.percent).sum();
            prop_assert!((total - 100.0).abs() <= 1.0, "shares summed to {}", total);
        }

        #[test]
        fn extremum_max_is_first_maximum(regions in arb_regions()) {
            let best = extremum_by(&regions, "orders", Direction::Max).unwrap();
            let max = regions.iter().map(|r| r.orders).max().unwrap();
            let first = regions.iter().position(|r| r.orders == max).unwrap();
            prop_assert_eq!(best.region.clone(), format!("R{first}"));
        }
    }
}
