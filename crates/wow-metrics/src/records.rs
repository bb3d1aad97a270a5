//! Flat record shapes consumed by the derivations
//!
//! Collections are ordered; for monthly data insertion order is chronological order.
//! Field names double as CSV column headers.

use serde::{Deserialize, Serialize};

use crate::error::{MetricsError, Result};

/// A flat record with a display key and numeric fields selectable by name
pub trait Record {
    /// Numeric field names accepted by [`Record::field`]
    const FIELDS: &'static [&'static str];

    /// Identifying label (month label, channel name, SKU, ...)
    fn key(&self) -> &str;

    /// Numeric value of a named field, `None` when the record has no such field
    fn field(&self, name: &str) -> Option<f64>;

    /// Check every numeric field is finite and non-negative
    fn validate(&self) -> Result<()> {
        for name in Self::FIELDS {
            match self.field(name) {
                Some(value) if value.is_finite() && value >= 0.0 => {}
                _ => return Err(invalid(self.key(), name)),
            }
        }
        Ok(())
    }
}

fn invalid(key: &str, field: &str) -> MetricsError {
    MetricsError::InvalidValue {
        key: key.to_string(),
        field: field.to_string(),
    }
}

// =============================================================================
// Sales
// =============================================================================

/// One month of store sales
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthlyMetric {
    /// Month label, e.g. "Dec 23"
    pub label: String,
    pub revenue: f64,
    pub orders: u64,
    /// Average discount as a fraction of revenue (0.0 - 1.0)
    pub discount_share: f64,
}

impl MonthlyMetric {
    pub fn new(label: &str, revenue: f64, orders: u64, discount_share: f64) -> Self {
        Self {
            label: label.to_string(),
            revenue,
            orders,
            discount_share,
        }
    }
}

impl Record for MonthlyMetric {
    const FIELDS: &'static [&'static str] = &["revenue", "orders", "discount_share"];

    fn key(&self) -> &str {
        &self.label
    }

    fn field(&self, name: &str) -> Option<f64> {
        match name {
            "revenue" => Some(self.revenue),
            "orders" => Some(self.orders as f64),
            "discount_share" => Some(self.discount_share),
            _ => None,
        }
    }

    fn validate(&self) -> Result<()> {
        if !self.revenue.is_finite() || self.revenue < 0.0 {
            return Err(invalid(&self.label, "revenue"));
        }
        if !(0.0..=1.0).contains(&self.discount_share) {
            return Err(invalid(&self.label, "discount_share"));
        }
        Ok(())
    }
}

/// Marketing channel performance
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChannelMetric {
    pub name: String,
    pub revenue: f64,
    pub orders: u64,
    /// Marketing spend; zero is accepted here and surfaces later as a failed return on spend
    pub spend: f64,
}

impl ChannelMetric {
    pub fn new(name: &str, revenue: f64, orders: u64, spend: f64) -> Self {
        Self {
            name: name.to_string(),
            revenue,
            orders,
            spend,
        }
    }
}

impl Record for ChannelMetric {
    const FIELDS: &'static [&'static str] = &["revenue", "orders", "spend"];

    fn key(&self) -> &str {
        &self.name
    }

    fn field(&self, name: &str) -> Option<f64> {
        match name {
            "revenue" => Some(self.revenue),
            "orders" => Some(self.orders as f64),
            "spend" => Some(self.spend),
            _ => None,
        }
    }
}

/// Customer geography
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegionMetric {
    pub region: String,
    pub revenue: f64,
    pub orders: u64,
}

impl RegionMetric {
    pub fn new(region: &str, revenue: f64, orders: u64) -> Self {
        Self {
            region: region.to_string(),
            revenue,
            orders,
        }
    }
}

impl Record for RegionMetric {
    const FIELDS: &'static [&'static str] = &["revenue", "orders"];

    fn key(&self) -> &str {
        &self.region
    }

    fn field(&self, name: &str) -> Option<f64> {
        match name {
            "revenue" => Some(self.revenue),
            "orders" => Some(self.orders as f64),
            _ => None,
        }
    }
}

// =============================================================================
// Inventory
// =============================================================================

/// Stock position and velocity for a single SKU
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SkuInventoryRecord {
    pub sku: String,
    pub stock_on_hand: u64,
    pub avg_daily_sales: f64,
    pub lead_time_days: f64,
    pub safety_stock: u64,
}

impl SkuInventoryRecord {
    pub fn new(sku: &str, stock_on_hand: u64, avg_daily_sales: f64, lead_time_days: f64, safety_stock: u64) -> Self {
        Self {
            sku: sku.to_string(),
            stock_on_hand,
            avg_daily_sales,
            lead_time_days,
            safety_stock,
        }
    }
}

impl Record for SkuInventoryRecord {
    const FIELDS: &'static [&'static str] = &["stock_on_hand", "avg_daily_sales", "lead_time_days", "safety_stock"];

    fn key(&self) -> &str {
        &self.sku
    }

    fn field(&self, name: &str) -> Option<f64> {
        match name {
            "stock_on_hand" => Some(self.stock_on_hand as f64),
            "avg_daily_sales" => Some(self.avg_daily_sales),
            "lead_time_days" => Some(self.lead_time_days),
            "safety_stock" => Some(self.safety_stock as f64),
            _ => None,
        }
    }
}

/// Thirty-day sales against on-hand units, used to spot slow movers
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SlowMoverRecord {
    pub sku: String,
    pub sales_30d: u64,
    pub on_hand: u64,
}

impl SlowMoverRecord {
    pub fn new(sku: &str, sales_30d: u64, on_hand: u64) -> Self {
        Self {
            sku: sku.to_string(),
            sales_30d,
            on_hand,
        }
    }
}

impl Record for SlowMoverRecord {
    const FIELDS: &'static [&'static str] = &["sales_30d", "on_hand"];

    fn key(&self) -> &str {
        &self.sku
    }

    fn field(&self, name: &str) -> Option<f64> {
        match name {
            "sales_30d" => Some(self.sales_30d as f64),
            "on_hand" => Some(self.on_hand as f64),
            _ => None,
        }
    }
}

// =============================================================================
// Finance
// =============================================================================

/// Monthly operating cost line
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CostLine {
    pub category: String,
    pub value: f64,
}

impl CostLine {
    pub fn new(category: &str, value: f64) -> Self {
        Self {
            category: category.to_string(),
            value,
        }
    }
}

impl Record for CostLine {
    const FIELDS: &'static [&'static str] = &["value"];

    fn key(&self) -> &str {
        &self.category
    }

    fn field(&self, name: &str) -> Option<f64> {
        match name {
            "value" => Some(self.value),
            _ => None,
        }
    }
}

/// Platform subscription figures for one month
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubscriptionSnapshot {
    pub paid_brands: u32,
    pub freemium_brands: u32,
    /// Average revenue per brand
    pub arpu: f64,
    pub ai_costs: f64,
    pub data_costs: f64,
    /// Brands flagged as likely to churn
    pub at_risk_brands: u32,
}

impl SubscriptionSnapshot {
    pub fn total_brands(&self) -> u64 {
        u64::from(self.paid_brands) + u64::from(self.freemium_brands)
    }
}
