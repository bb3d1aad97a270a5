//! Subscription economics for the platform financial view

use serde::Serialize;

use crate::aggregate::ratio;
use crate::error::Result;
use crate::records::SubscriptionSnapshot;

/// Headline figures derived from a [`SubscriptionSnapshot`]
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FinanceSummary {
    pub monthly_recurring_revenue: f64,
    pub gross_profit: f64,
    pub gross_margin: f64,
    pub ai_cost_per_brand: f64,
    pub data_cost_per_brand: f64,
    pub churn_rate: f64,
    pub upgrade_rate: f64,
}

/// All brands × average revenue per brand
pub fn monthly_recurring_revenue(snapshot: &SubscriptionSnapshot) -> f64 {
    snapshot.total_brands() as f64 * snapshot.arpu
}

/// MRR less AI and data costs
pub fn gross_profit(snapshot: &SubscriptionSnapshot) -> f64 {
    monthly_recurring_revenue(snapshot) - snapshot.ai_costs - snapshot.data_costs
}

/// Gross profit as a fraction of MRR
pub fn gross_margin(snapshot: &SubscriptionSnapshot) -> Result<f64> {
    ratio(gross_profit(snapshot), monthly_recurring_revenue(snapshot), "gross_margin")
}

/// Monthly cost spread evenly over all brands
pub fn cost_per_brand(total_cost: f64, snapshot: &SubscriptionSnapshot) -> Result<f64> {
    ratio(total_cost, snapshot.total_brands() as f64, "cost_per_brand")
}

/// Fraction of brands flagged as likely to churn
pub fn churn_rate(snapshot: &SubscriptionSnapshot) -> Result<f64> {
    ratio(snapshot.at_risk_brands as f64, snapshot.total_brands() as f64, "churn_rate")
}

/// Freemium brands relative to paying brands
pub fn upgrade_rate(snapshot: &SubscriptionSnapshot) -> Result<f64> {
    ratio(snapshot.freemium_brands as f64, snapshot.paid_brands as f64, "upgrade_rate")
}

pub fn summarize(snapshot: &SubscriptionSnapshot) -> Result<FinanceSummary> {
    Ok(FinanceSummary {
        monthly_recurring_revenue: monthly_recurring_revenue(snapshot),
        gross_profit: gross_profit(snapshot),
        gross_margin: gross_margin(snapshot)?,
        ai_cost_per_brand: cost_per_brand(snapshot.ai_costs, snapshot)?,
        data_cost_per_brand: cost_per_brand(snapshot.data_costs, snapshot)?,
        churn_rate: churn_rate(snapshot)?,
        upgrade_rate: upgrade_rate(snapshot)?,
    })
}
