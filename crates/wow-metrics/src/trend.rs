//! Period-over-period change

use serde::Serialize;

use crate::aggregate::{check_field, ratio, value_of};
use crate::error::Result;
use crate::records::Record;

/// Value of one period and its change against the period before
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PeriodChange {
    pub key: String,
    pub value: f64,
    /// Percent change vs the previous record, `None` for the first period
    pub change: Option<f64>,
}

/// `(current − previous) / previous × 100`
pub fn percent_change(previous: f64, current: f64) -> Result<f64> {
    Ok(ratio(current - previous, previous, "percent_change")? * 100.0)
}

/// Change of `field` between consecutive records
///
/// Fails with `DivideByZero` if any period after the first follows a zero value.
pub fn period_changes<R: Record>(records: &[R], field: &str) -> Result<Vec<PeriodChange>> {
    check_field::<R>(field)?;
    let mut previous: Option<f64> = None;
    let mut changes = Vec::with_capacity(records.len());

    for record in records {
        let value = value_of(record, field)?;
        let change = match previous {
            Some(prev) => Some(percent_change(prev, value)?),
            None => None,
        };
        changes.push(PeriodChange {
            key: record.key().to_string(),
            value,
            change,
        });
        previous = Some(value);
    }

    Ok(changes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aggregate::round_half_up;
    use crate::error::MetricsError;
    use crate::records::MonthlyMetric;

    fn growth() -> Vec<MonthlyMetric> {
        [("Jan", 3800.0), ("Feb", 4200.0), ("Mar", 4650.0), ("Apr", 4850.0), ("May", 5014.0)]
            .into_iter()
            .map(|(label, revenue)| MonthlyMetric::new(label, revenue, 0, 0.0))
            .collect()
    }

    #[test]
    fn test_percent_change() {
        assert_eq!(round_half_up(percent_change(3800.0, 4200.0).unwrap(), 1), 10.5);
        assert_eq!(percent_change(100.0, 80.0).unwrap(), -20.0);
    }

    #[test]
    fn test_percent_change_from_zero() {
        assert!(matches!(
            percent_change(0.0, 10.0),
            Err(MetricsError::DivideByZero { .. })
        ));
    }

    #[test]
    fn test_period_changes_revenue_growth() {
        let changes = period_changes(&growth(), "revenue").unwrap();
        let rounded: Vec<Option<f64>> = changes.iter().map(|c| c.change.map(|v| round_half_up(v, 1))).collect();
        assert_eq!(rounded, vec![None, Some(10.5), Some(10.7), Some(4.3), Some(3.4)]);
        assert_eq!(changes[4].key, "May");
    }

    #[test]
    fn test_period_changes_empty() {
        let empty: Vec<MonthlyMetric> = Vec::new();
        assert!(period_changes(&empty, "revenue").unwrap().is_empty());
    }
}
