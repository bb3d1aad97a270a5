//! Report generation (CSV and JSON outputs, console summary)
//!
//! Every figure is derived from the loaded record collections. A derivation that
//! fails renders as the placeholder in the console and as an empty CSV cell.

use anyhow::{Context, Result};
use csv::Writer;
use serde::Serialize;
use std::path::{Path, PathBuf};

use wow_metrics::aggregate::share_of_total_with_precision;
use wow_metrics::finance;
use wow_metrics::format::{
    format_money_with_decimals, format_multiple, format_number, format_percent_value, format_signed_percent,
    group_thousands,
};
use wow_metrics::inventory::{at_risk, turnover};
use wow_metrics::{
    Direction, RestockLine, average, average_order_value, extremum_by, format_money, format_percent, or_placeholder,
    percent_change, period_changes, rank_by_return_on_spend, ratio, restock_plan, return_on_spend, sum,
};

use crate::config::Config;
use crate::constants;
use crate::loader::Dataset;

/// A labelled figure ready for display
pub type Line = (String, String);

/// Console-ready audit figures
#[derive(Debug, Clone, Serialize)]
pub struct AuditSummary {
    pub store_name: String,
    pub total_revenue: String,
    pub total_orders: String,
    pub average_order_value: String,
    pub best_month: String,
    pub slowest_month: String,
    pub average_discount: String,
    pub last_month_change: String,
    /// Channels ranked by return on spend, or in input order when ranking fails
    pub channels: Vec<Line>,
    pub regions: Vec<Line>,
    pub restock: Vec<RestockLine>,
    pub at_risk_skus: usize,
    pub slow_movers: Vec<Line>,
    pub finance: Vec<Line>,
    pub cost_shares: Vec<Line>,
}

impl AuditSummary {
    pub fn build(data: &Dataset, config: &Config) -> Self {
        let currency = config.currency.as_str();
        let monthly = &data.monthly;

        let month_with_revenue = |direction| {
            or_placeholder(
                extremum_by(monthly, "revenue", direction)
                    .map(|m| format!("{} ({})", m.label, format_money(m.revenue, currency))),
            )
        };

        let last_month_change = or_placeholder(period_changes(monthly, "revenue").and_then(|changes| {
            changes
                .last()
                .and_then(|c| c.change)
                .map(|change| format_signed_percent(change, 0))
                .ok_or(wow_metrics::MetricsError::empty("last_month_change"))
        }));

        Self {
            store_name: config.store_name.clone(),
            total_revenue: or_placeholder(sum(monthly, "revenue").map(|v| format_money(v, currency))),
            total_orders: or_placeholder(sum(monthly, "orders").map(|v| group_thousands(v as i64))),
            average_order_value: or_placeholder(average_order_value(monthly).map(|v| format_money(v, currency))),
            best_month: month_with_revenue(Direction::Max),
            slowest_month: month_with_revenue(Direction::Min),
            average_discount: or_placeholder(average(monthly, "discount_share").map(format_percent)),
            last_month_change,
            channels: channel_lines(data),
            regions: region_lines(data, config),
            restock: restock_plan(&data.skus),
            at_risk_skus: data.skus.iter().filter(|s| at_risk(s, config.at_risk_days)).count(),
            slow_movers: data
                .slow_movers
                .iter()
                .map(|s| (s.sku.clone(), or_placeholder(turnover(s).map(|t| format_number(t, 2)))))
                .collect(),
            finance: finance_lines(data, config),
            cost_shares: cost_share_lines(data, config),
        }
    }
}

fn channel_lines(data: &Dataset) -> Vec<Line> {
    match rank_by_return_on_spend(&data.channels) {
        Ok(ranked) => ranked
            .into_iter()
            .map(|c| (c.name, format_multiple(c.return_on_spend)))
            .collect(),
        Err(e) => {
            tracing::warn!(error = %e, "cannot rank channels, listing in file order");
            data.channels
                .iter()
                .map(|c| (c.name.clone(), or_placeholder(return_on_spend(c).map(format_multiple))))
                .collect()
        }
    }
}

fn region_lines(data: &Dataset, config: &Config) -> Vec<Line> {
    match share_of_total_with_precision(&data.regions, "revenue", config.share_decimals) {
        Ok(shares) => shares
            .into_iter()
            .map(|s| (s.key, format_percent_value(s.percent, config.share_decimals)))
            .collect(),
        Err(e) => {
            tracing::warn!(error = %e, "cannot derive region shares");
            data.regions
                .iter()
                .map(|r| (r.region.clone(), wow_metrics::PLACEHOLDER.to_string()))
                .collect()
        }
    }
}

fn finance_lines(data: &Dataset, config: &Config) -> Vec<Line> {
    let s = &data.subscription;
    let money = |v: f64| format_money(v, &config.platform_currency);
    let cents = |v: f64| format_money_with_decimals(v, &config.platform_currency, 2);

    vec![
        ("MRR".to_string(), money(finance::monthly_recurring_revenue(s))),
        ("Gross Profit".to_string(), money(finance::gross_profit(s))),
        (
            "Gross Margin".to_string(),
            or_placeholder(finance::gross_margin(s).map(format_percent)),
        ),
        (
            "Churn Rate".to_string(),
            or_placeholder(finance::churn_rate(s).map(format_percent)),
        ),
        (
            "Upgraded".to_string(),
            or_placeholder(finance::upgrade_rate(s).map(format_percent)),
        ),
        (
            "AI Cost / Brand".to_string(),
            or_placeholder(finance::cost_per_brand(s.ai_costs, s).map(cents)),
        ),
        (
            "Data Cost / Brand".to_string(),
            or_placeholder(finance::cost_per_brand(s.data_costs, s).map(cents)),
        ),
    ]
}

fn cost_share_lines(data: &Dataset, config: &Config) -> Vec<Line> {
    let lines = shared::cost_lines_for(&data.subscription);
    match share_of_total_with_precision(&lines, "value", config.share_decimals) {
        Ok(shares) => shares
            .into_iter()
            .map(|s| {
                let value = format!(
                    "{}  {}",
                    format_money(s.value, &config.platform_currency),
                    format_percent_value(s.percent, config.share_decimals)
                );
                (s.key, value)
            })
            .collect(),
        Err(_) => lines
            .into_iter()
            .map(|l| (l.category, wow_metrics::PLACEHOLDER.to_string()))
            .collect(),
    }
}

/// Print summary to console
pub fn print_summary(summary: &AuditSummary) {
    println!("\n============================================================");
    println!("            STORE AUDIT: {}", summary.store_name);
    println!("============================================================\n");

    println!("SALES:");
    println!("  Total Revenue:      {:>22}", summary.total_revenue);
    println!("  Total Orders:       {:>22}", summary.total_orders);
    println!("  Avg Order Value:    {:>22}", summary.average_order_value);
    println!("  Avg Discount:       {:>22}", summary.average_discount);
    println!("  Last MoM Revenue:   {:>22}", summary.last_month_change);
    println!("  Best Month:         {:>22}", summary.best_month);
    println!("  Slowest Month:      {:>22}", summary.slowest_month);

    println!("\nCHANNELS (return on spend):");
    for (name, ros) in &summary.channels {
        println!("  {:<20}{:>22}", name, ros);
    }

    println!("\nREGIONS (revenue share):");
    for (region, share) in &summary.regions {
        println!("  {:<20}{:>22}", region, share);
    }

    println!("\nRESTOCK:");
    if summary.restock.is_empty() {
        println!("  Nothing below reorder point.");
    } else {
        println!(
            "  {:<10} {:>6} {:>8} {:>9} {:>5} {:>7} {:>12}",
            "SKU", "Stock", "Avg/Day", "Days Left", "Lead", "Safety", "Recommended"
        );
        for line in &summary.restock {
            let days_left = line
                .days_left
                .map(|d| format!("{d:.1}"))
                .unwrap_or_else(|| wow_metrics::PLACEHOLDER.to_string());
            println!(
                "  {:<10} {:>6} {:>8.1} {:>9} {:>5.0} {:>7} {:>12.0}",
                line.sku,
                line.stock_on_hand,
                line.avg_daily_sales,
                days_left,
                line.lead_time_days,
                line.safety_stock,
                line.recommended
            );
        }
    }
    println!("  At risk of stockout: {}", summary.at_risk_skus);

    println!("\nSLOW MOVERS (30d turnover):");
    for (sku, rate) in &summary.slow_movers {
        println!("  {:<20}{:>22}", sku, rate);
    }

    println!("\nPLATFORM FINANCES:");
    for (label, value) in &summary.finance {
        println!("  {:<20}{:>22}", label, value);
    }
    println!("  ─────────────────────────────────────────────");
    for (label, value) in &summary.cost_shares {
        println!("  {:<20}{:>22}", label, value);
    }

    println!("============================================================");
}

// =============================================================================
// CSV Reports
// =============================================================================

/// Generate the CSV reports and the JSON summary, returning the paths written
pub fn generate_all_reports(output_dir: &Path, data: &Dataset, config: &Config) -> Result<Vec<PathBuf>> {
    Ok(vec![
        generate_monthly_summary(output_dir, data, config)?,
        generate_channel_summary(output_dir, data, config)?,
        generate_region_shares(output_dir, data, config)?,
        generate_restock_plan(output_dir, data)?,
        generate_summary_json(output_dir, data, config)?,
    ])
}

/// Generate audit_summary.json with the same figures the console summary prints
fn generate_summary_json(output_dir: &Path, data: &Dataset, config: &Config) -> Result<PathBuf> {
    let path = output_dir.join(constants::SUMMARY_JSON_FILENAME);
    let summary = AuditSummary::build(data, config);
    let json = serde_json::to_string_pretty(&summary)?;
    std::fs::write(&path, json).with_context(|| format!("failed to write {}", path.display()))?;

    println!("  Generated: {}", path.display());
    Ok(path)
}

fn cell(value: Option<f64>, decimals: usize) -> String {
    value.map(|v| format!("{:.prec$}", v, prec = decimals)).unwrap_or_default()
}

/// Generate monthly_summary.csv (one row per month plus a TOTAL row)
fn generate_monthly_summary(output_dir: &Path, data: &Dataset, config: &Config) -> Result<PathBuf> {
    let path = output_dir.join(constants::MONTHLY_SUMMARY_FILENAME);
    let mut wtr = Writer::from_path(&path)?;
    let monthly = &data.monthly;

    wtr.write_record([
        "Month",
        "Revenue",
        "Orders",
        "AOV",
        "Discount_Pct",
        "Revenue_Change_Pct",
        "Revenue_Share_Pct",
    ])?;

    let shares = share_of_total_with_precision(monthly, "revenue", config.share_decimals).ok();
    let mut previous: Option<f64> = None;

    for (idx, month) in monthly.iter().enumerate() {
        let aov = ratio(month.revenue, month.orders as f64, "aov").ok();
        let change = previous.and_then(|prev| percent_change(prev, month.revenue).ok());
        let share = shares.as_ref().map(|s| s[idx].percent);
        previous = Some(month.revenue);

        wtr.write_record([
            month.label.as_str(),
            &format!("{:.2}", month.revenue),
            &month.orders.to_string(),
            &cell(aov, 2),
            &format!("{:.1}", month.discount_share * 100.0),
            &cell(change, 1),
            &cell(share, config.share_decimals as usize),
        ])?;
    }

    // Totals come from the same aggregates as the console summary
    wtr.write_record([
        "TOTAL",
        &cell(sum(monthly, "revenue").ok(), 2),
        &cell(sum(monthly, "orders").ok(), 0),
        &cell(average_order_value(monthly).ok(), 2),
        &cell(average(monthly, "discount_share").ok().map(|d| d * 100.0), 1),
        "",
        "",
    ])?;

    wtr.flush()?;
    println!("  Generated: {}", path.display());

    Ok(path)
}

/// Generate channel_summary.csv (input order)
fn generate_channel_summary(output_dir: &Path, data: &Dataset, config: &Config) -> Result<PathBuf> {
    let path = output_dir.join(constants::CHANNEL_SUMMARY_FILENAME);
    let mut wtr = Writer::from_path(&path)?;

    wtr.write_record([
        "Channel",
        "Revenue",
        "Orders",
        "Spend",
        "Return_On_Spend",
        "Revenue_Share_Pct",
    ])?;

    let shares = share_of_total_with_precision(&data.channels, "revenue", config.share_decimals).ok();

    for (idx, channel) in data.channels.iter().enumerate() {
        wtr.write_record([
            channel.name.as_str(),
            &format!("{:.2}", channel.revenue),
            &channel.orders.to_string(),
            &format!("{:.2}", channel.spend),
            &cell(return_on_spend(channel).ok(), 2),
            &cell(shares.as_ref().map(|s| s[idx].percent), config.share_decimals as usize),
        ])?;
    }

    wtr.flush()?;
    println!("  Generated: {}", path.display());

    Ok(path)
}

/// Generate region_shares.csv
fn generate_region_shares(output_dir: &Path, data: &Dataset, config: &Config) -> Result<PathBuf> {
    let path = output_dir.join(constants::REGION_SHARES_FILENAME);
    let mut wtr = Writer::from_path(&path)?;

    wtr.write_record(["Region", "Revenue", "Orders", "AOV", "Share_Pct"])?;

    let shares = share_of_total_with_precision(&data.regions, "revenue", config.share_decimals).ok();

    for (idx, region) in data.regions.iter().enumerate() {
        wtr.write_record([
            region.region.as_str(),
            &format!("{:.2}", region.revenue),
            &region.orders.to_string(),
            &cell(ratio(region.revenue, region.orders as f64, "aov").ok(), 2),
            &cell(shares.as_ref().map(|s| s[idx].percent), config.share_decimals as usize),
        ])?;
    }

    wtr.flush()?;
    println!("  Generated: {}", path.display());

    Ok(path)
}

/// Generate restock_plan.csv
fn generate_restock_plan(output_dir: &Path, data: &Dataset) -> Result<PathBuf> {
    let path = output_dir.join(constants::RESTOCK_PLAN_FILENAME);
    let mut wtr = Writer::from_path(&path)?;

    for line in restock_plan(&data.skus) {
        wtr.serialize(&line)?;
    }

    wtr.flush()?;
    println!("  Generated: {}", path.display());

    Ok(path)
}
