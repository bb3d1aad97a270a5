//! Inventory derivations for the supply chain view
//!
//! Reorder point = avg daily sales × lead time + safety stock.
//! Reorder quantity is the gap between the reorder point and stock on hand, never negative.

use serde::Serialize;

use crate::aggregate::ratio;
use crate::error::{MetricsError, Result};
use crate::records::{SkuInventoryRecord, SlowMoverRecord};

/// Days of cover at or below which a SKU counts as at risk of stocking out
pub const DEFAULT_AT_RISK_DAYS: f64 = 5.0;

/// Thirty-day turnover below which a SKU counts as a slow mover
pub const SLOW_MOVER_TURNOVER: f64 = 0.05;

/// Stock position relative to the reorder point
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum StockStatus {
    BelowReorderPoint,
    Healthy,
}

impl std::fmt::Display for StockStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StockStatus::BelowReorderPoint => write!(f, "Below ROP"),
            StockStatus::Healthy => write!(f, "Healthy"),
        }
    }
}

/// One row of the restock recommendation table
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RestockLine {
    pub sku: String,
    pub stock_on_hand: u64,
    pub avg_daily_sales: f64,
    /// `None` when the SKU has no sales velocity
    pub days_left: Option<f64>,
    pub lead_time_days: f64,
    pub safety_stock: u64,
    pub reorder_point: f64,
    pub recommended: f64,
    pub status: StockStatus,
}

/// Units expected to sell during the lead time plus the safety buffer
pub fn reorder_point(sku: &SkuInventoryRecord) -> f64 {
    sku.avg_daily_sales * sku.lead_time_days + sku.safety_stock as f64
}

/// `avg_daily_sales × lead_time_days + safety_stock − stock_on_hand`, clamped to ≥ 0
pub fn reorder_quantity(sku: &SkuInventoryRecord) -> f64 {
    (reorder_point(sku) - sku.stock_on_hand as f64).max(0.0)
}

/// Days until stock runs out at the current velocity
pub fn days_of_stock(sku: &SkuInventoryRecord) -> Result<f64> {
    ratio(sku.stock_on_hand as f64, sku.avg_daily_sales, "days_of_stock")
}

pub fn stock_status(sku: &SkuInventoryRecord) -> StockStatus {
    if (sku.stock_on_hand as f64) < reorder_point(sku) {
        StockStatus::BelowReorderPoint
    } else {
        StockStatus::Healthy
    }
}

/// True when days of cover are at or below `threshold_days`
///
/// A SKU with no sales never depletes, so it is not at risk.
pub fn at_risk(sku: &SkuInventoryRecord, threshold_days: f64) -> bool {
    days_of_stock(sku).map(|days| days <= threshold_days).unwrap_or(false)
}

/// Thirty-day sales per unit on hand
pub fn turnover(record: &SlowMoverRecord) -> Result<f64> {
    ratio(record.sales_30d as f64, record.on_hand as f64, "turnover")
}

/// True when stock on hand turns over slower than [`SLOW_MOVER_TURNOVER`]
///
/// An empty shelf has nothing to move and is never a slow mover.
pub fn is_slow_mover(record: &SlowMoverRecord) -> bool {
    turnover(record).map(|t| t < SLOW_MOVER_TURNOVER).unwrap_or(false)
}

/// Mean days of cover over SKUs that are selling
///
/// Fails with `EmptyCollection` when no SKU has sales velocity.
pub fn average_days_of_stock(skus: &[SkuInventoryRecord]) -> Result<f64> {
    let days: Vec<f64> = skus.iter().filter_map(|sku| days_of_stock(sku).ok()).collect();
    if days.is_empty() {
        return Err(MetricsError::empty("average_days_of_stock"));
    }
    Ok(days.iter().sum::<f64>() / days.len() as f64)
}

/// Restock lines for every SKU with a positive reorder quantity, in input order
pub fn restock_plan(skus: &[SkuInventoryRecord]) -> Vec<RestockLine> {
    skus.iter()
        .filter(|sku| reorder_quantity(sku) > 0.0)
        .map(|sku| RestockLine {
            sku: sku.sku.clone(),
            stock_on_hand: sku.stock_on_hand,
            avg_daily_sales: sku.avg_daily_sales,
            days_left: days_of_stock(sku).ok(),
            lead_time_days: sku.lead_time_days,
            safety_stock: sku.safety_stock,
            reorder_point: reorder_point(sku),
            recommended: reorder_quantity(sku),
            status: stock_status(sku),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sku_1029() -> SkuInventoryRecord {
        SkuInventoryRecord::new("SKU-1029", 18, 6.0, 7.0, 10)
    }

    #[test]
    fn test_reorder_quantity_sample_skus() {
        assert_eq!(reorder_quantity(&sku_1029()), 34.0);
        assert_eq!(reorder_quantity(&SkuInventoryRecord::new("SKU-2044", 22, 4.0, 10.0, 12)), 30.0);
        assert_eq!(reorder_quantity(&SkuInventoryRecord::new("SKU-7781", 15, 3.0, 8.0, 8)), 17.0);
    }

    #[test]
    fn test_reorder_quantity_clamped_at_zero() {
        let overstocked = SkuInventoryRecord::new("SKU-8800", 460, 2.0, 5.0, 10);
        assert_eq!(reorder_quantity(&overstocked), 0.0);
    }

    #[test]
    fn test_days_of_stock() {
        assert_eq!(days_of_stock(&sku_1029()).unwrap(), 3.0);
        assert_eq!(days_of_stock(&SkuInventoryRecord::new("SKU-2044", 22, 4.0, 10.0, 12)).unwrap(), 5.5);
    }

    #[test]
    fn test_days_of_stock_without_sales() {
        let idle = SkuInventoryRecord::new("SKU-9907", 60, 0.0, 14.0, 0);
        assert_eq!(
            days_of_stock(&idle),
            Err(MetricsError::DivideByZero {
                operation: "days_of_stock"
            })
        );
        assert!(!at_risk(&idle, DEFAULT_AT_RISK_DAYS));
    }

    #[test]
    fn test_at_risk_threshold_inclusive() {
        assert!(at_risk(&sku_1029(), DEFAULT_AT_RISK_DAYS));
        let five_days = SkuInventoryRecord::new("SKU-7781", 15, 3.0, 8.0, 8);
        assert!(at_risk(&five_days, 5.0));
        assert!(!at_risk(&five_days, 4.0));
    }

    #[test]
    fn test_stock_status() {
        assert_eq!(stock_status(&sku_1029()), StockStatus::BelowReorderPoint);
        let healthy = SkuInventoryRecord::new("SKU-8800", 46, 2.0, 10.0, 10);
        assert_eq!(stock_status(&healthy), StockStatus::Healthy);
        assert_eq!(StockStatus::BelowReorderPoint.to_string(), "Below ROP");
    }

    #[test]
    fn test_turnover() {
        let slow = SlowMoverRecord::new("SKU-5512", 2, 240);
        assert_eq!((turnover(&slow).unwrap() * 100.0).round() / 100.0, 0.01);
        let empty_shelf = SlowMoverRecord::new("SKU-0000", 4, 0);
        assert!(matches!(turnover(&empty_shelf), Err(MetricsError::DivideByZero { .. })));
    }

    #[test]
    fn test_slow_movers() {
        assert!(is_slow_mover(&SlowMoverRecord::new("SKU-5512", 2, 240)));
        assert!(is_slow_mover(&SlowMoverRecord::new("SKU-9907", 0, 60)));
        assert!(!is_slow_mover(&SlowMoverRecord::new("SKU-1029", 180, 18)));
        assert!(!is_slow_mover(&SlowMoverRecord::new("SKU-0000", 0, 0)));
    }

    #[test]
    fn test_average_days_of_stock_skips_idle_skus() {
        let skus = vec![
            sku_1029(),
            SkuInventoryRecord::new("SKU-2044", 22, 4.0, 10.0, 12),
            SkuInventoryRecord::new("SKU-9907", 60, 0.0, 14.0, 0),
        ];
        assert_eq!(average_days_of_stock(&skus).unwrap(), 4.25);
    }

    #[test]
    fn test_average_days_of_stock_without_velocity() {
        let idle = vec![SkuInventoryRecord::new("SKU-9907", 60, 0.0, 14.0, 0)];
        assert!(matches!(
            average_days_of_stock(&idle),
            Err(MetricsError::EmptyCollection { .. })
        ));
    }

    #[test]
    fn test_restock_plan_skips_healthy_skus() {
        let skus = vec![
            sku_1029(),
            SkuInventoryRecord::new("SKU-8800", 460, 2.0, 5.0, 10),
            SkuInventoryRecord::new("SKU-2044", 22, 4.0, 10.0, 12),
        ];
        let plan = restock_plan(&skus);
        assert_eq!(plan.len(), 2);
        assert_eq!(plan[0].sku, "SKU-1029");
        assert_eq!(plan[0].recommended, 34.0);
        assert_eq!(plan[0].days_left, Some(3.0));
        assert_eq!(plan[1].sku, "SKU-2044");
        assert_eq!(plan[1].reorder_point, 52.0);
    }
}
