use leptos::prelude::*;
use shared::CONFIG;
use wow_metrics::format::{format_number, group_thousands};
use wow_metrics::inventory::{
    DEFAULT_AT_RISK_DAYS, at_risk, average_days_of_stock, days_of_stock, is_slow_mover, reorder_point, stock_status,
    turnover,
};
use wow_metrics::{PLACEHOLDER, RestockLine, SkuInventoryRecord, SlowMoverRecord, StockStatus, or_placeholder, restock_plan};

use crate::chart::{Bar, bars, use_renderer};
use crate::components::{Kpi, KpiGrid, Nav, Section};

/// Whole units, as the warehouse counts them
fn units(value: f64) -> String {
    group_thousands(value.round() as i64)
}

fn days(value: f64) -> String {
    format!("{} days", format_number(value, 1))
}

pub fn inventory_kpis(skus: &[SkuInventoryRecord], slow: &[SlowMoverRecord], threshold_days: f64) -> Vec<Kpi> {
    let below = skus
        .iter()
        .filter(|s| stock_status(s) == StockStatus::BelowReorderPoint)
        .count();
    let risky = skus.iter().filter(|s| at_risk(s, threshold_days)).count();
    let slow_count = slow.iter().filter(|s| is_slow_mover(s)).count();
    let cover = or_placeholder(average_days_of_stock(skus).map(days));

    vec![
        Kpi::new("Below Reorder Point", below.to_string()).with_subtext(format!("of {} SKUs tracked", skus.len())),
        Kpi::new("At Risk of Stockout", risky.to_string())
            .with_subtext(format!("{} days of cover or less", threshold_days)),
        Kpi::new("Avg Days of Stock", cover),
        Kpi::new("Slow Movers", slow_count.to_string()),
    ]
}

/// One rendered row of the restock table
#[derive(Debug, Clone, PartialEq)]
pub struct RestockRow {
    pub sku: String,
    pub stock_on_hand: String,
    pub avg_daily_sales: String,
    pub days_left: String,
    pub reorder_point: String,
    pub recommended: String,
    pub status: String,
    pub at_risk: bool,
}

impl RestockRow {
    fn from_line(line: RestockLine, threshold_days: f64) -> Self {
        Self {
            at_risk: line.days_left.is_some_and(|d| d <= threshold_days),
            days_left: line.days_left.map(days).unwrap_or_else(|| PLACEHOLDER.to_string()),
            sku: line.sku,
            stock_on_hand: group_thousands(line.stock_on_hand as i64),
            avg_daily_sales: format_number(line.avg_daily_sales, 1),
            reorder_point: units(line.reorder_point),
            recommended: units(line.recommended),
            status: line.status.to_string(),
        }
    }
}

/// Restock recommendations, optionally narrowed to SKUs at risk of stocking out
pub fn restock_rows(skus: &[SkuInventoryRecord], threshold_days: f64, at_risk_only: bool) -> Vec<RestockRow> {
    restock_plan(skus)
        .into_iter()
        .map(|line| RestockRow::from_line(line, threshold_days))
        .filter(|row| !at_risk_only || row.at_risk)
        .collect()
}

/// SKU, 30-day sales, on hand and turnover for each slow mover
pub fn slow_mover_rows(slow: &[SlowMoverRecord]) -> Vec<(String, String, String, String)> {
    slow.iter()
        .filter(|s| is_slow_mover(s))
        .map(|s| {
            let rate = or_placeholder(turnover(s).map(|t| format_number(t, 2)));
            (
                s.sku.clone(),
                group_thousands(s.sales_30d as i64),
                group_thousands(s.on_hand as i64),
                rate,
            )
        })
        .collect()
}

/// Days of cover per SKU; idle SKUs are left out
pub fn stock_cover_bars(skus: &[SkuInventoryRecord]) -> Vec<Bar> {
    let rows: Vec<(String, f64, String)> = skus
        .iter()
        .filter_map(|s| {
            let cover = days_of_stock(s).ok()?;
            let label = format!("{} · ROP {}", days(cover), units(reorder_point(s)));
            Some((s.sku.clone(), cover, label))
        })
        .collect();
    bars(&rows)
}

#[component]
pub fn InventoryPage() -> impl IntoView {
    let renderer = use_renderer();
    let skus = shared::sku_inventory();
    let slow = shared::slow_movers();
    let threshold = DEFAULT_AT_RISK_DAYS;

    let (at_risk_only, set_at_risk_only) = signal(false);

    let kpis = inventory_kpis(&skus, &slow, threshold);
    let cover_chart = renderer.bars(stock_cover_bars(&skus));
    let slow_rows = slow_mover_rows(&slow);

    view! {
        <main class="max-w-[100ch] mx-auto px-4 py-8 md:py-12">
            <header class="mb-6">
                <h1 class="text-2xl font-bold">{CONFIG.name} " · Supply Chain Agent"</h1>
                <div class="text-[var(--ink-light)]">{CONFIG.tagline}</div>
            </header>
            <Nav />

            <Section id="stock" title="Stock Position">
                <KpiGrid kpis=kpis />
            </Section>

            <Section id="restock" title="Restock Recommendations">
                <label class="text-sm">
                    <input
                        type="checkbox"
                        class="mr-2"
                        on:change=move |_| set_at_risk_only.update(|v| *v = !*v)
                    />
                    "only SKUs at risk of stockout"
                </label>
                <table class="w-full mt-3 text-sm">
                    <thead>
                        <tr class="text-left text-[var(--ink-light)]">
                            <th>"SKU"</th>
                            <th>"On Hand"</th>
                            <th>"Daily Sales"</th>
                            <th>"Days Left"</th>
                            <th>"ROP"</th>
                            <th>"Reorder"</th>
                            <th>"Status"</th>
                        </tr>
                    </thead>
                    <tbody>
                        {move || {
                            restock_rows(&skus, threshold, at_risk_only.get())
                                .into_iter()
                                .map(|row| {
                                    let class = if row.at_risk { "font-bold" } else { "" };
                                    view! {
                                        <tr class=class>
                                            <td>{row.sku}</td>
                                            <td>{row.stock_on_hand}</td>
                                            <td>{row.avg_daily_sales}</td>
                                            <td>{row.days_left}</td>
                                            <td>{row.reorder_point}</td>
                                            <td>{row.recommended}</td>
                                            <td>{row.status}</td>
                                        </tr>
                                    }
                                })
                                .collect_view()
                        }}
                    </tbody>
                </table>
            </Section>

            <Section id="cover" title="Days of Cover">
                {cover_chart}
            </Section>

            <Section id="slow-movers" title="Slow Movers">
                <table class="w-full text-sm">
                    <thead>
                        <tr class="text-left text-[var(--ink-light)]">
                            <th>"SKU"</th>
                            <th>"Sales (30d)"</th>
                            <th>"On Hand"</th>
                            <th>"Turnover"</th>
                        </tr>
                    </thead>
                    <tbody>
                        {slow_rows.into_iter().map(|(sku, sales, on_hand, rate)| view! {
                            <tr>
                                <td>{sku}</td>
                                <td>{sales}</td>
                                <td>{on_hand}</td>
                                <td>{rate}</td>
                            </tr>
                        }).collect_view()}
                    </tbody>
                </table>
            </Section>
        </main>
    }
}
