use leptos::prelude::*;
use shared::CONFIG;
use wow_metrics::format::{format_multiple, format_percent_value, format_signed_percent, group_thousands};
use wow_metrics::{
    ChannelMetric, Direction, MonthlyMetric, PLACEHOLDER, Record, average, average_order_value, extremum_by,
    format_money, format_percent, or_placeholder, period_changes, rank_by_return_on_spend, return_on_spend,
    share_of_total, sum,
};

use crate::chart::{Bar, bars, sparkline_points, use_renderer};
use crate::components::{Kpi, KpiGrid, Nav, Section};

/// One row of the monthly breakdown table
#[derive(Debug, Clone, PartialEq)]
pub struct MonthRow {
    pub label: String,
    pub revenue: String,
    pub orders: String,
    pub change: String,
}

/// Headline sales figures for the audit period
pub fn sales_kpis(monthly: &[MonthlyMetric], currency: &str) -> Vec<Kpi> {
    let total_revenue = or_placeholder(sum(monthly, "revenue").map(|v| format_money(v, currency)));
    let total_orders = or_placeholder(sum(monthly, "orders").map(|v| group_thousands(v as i64)));
    let aov = or_placeholder(average_order_value(monthly).map(|v| format_money(v, currency)));

    vec![
        Kpi::new("Total Revenue", total_revenue),
        Kpi::new("Total Orders", total_orders),
        Kpi::new("Avg Order Value", aov),
    ]
}

/// Best and slowest months plus the average discount share
pub fn growth_kpis(monthly: &[MonthlyMetric], currency: &str) -> Vec<Kpi> {
    let month = |label, direction| match extremum_by(monthly, "revenue", direction) {
        Ok(m) => Kpi::new(label, m.label.clone()).with_subtext(format_money(m.revenue, currency)),
        Err(_) => Kpi::new(label, PLACEHOLDER.to_string()),
    };
    let discount = or_placeholder(average(monthly, "discount_share").map(format_percent));

    vec![
        month("Best Month", Direction::Max),
        month("Slowest Month", Direction::Min),
        Kpi::new("Avg Discount Share", discount),
    ]
}

pub fn month_rows(monthly: &[MonthlyMetric], currency: &str) -> Vec<MonthRow> {
    // A zero month leaves every later change unknown
    let changes = period_changes(monthly, "revenue").ok();

    monthly
        .iter()
        .enumerate()
        .map(|(i, m)| {
            let change = changes
                .as_ref()
                .and_then(|c| c[i].change)
                .map(|pct| format_signed_percent(pct, 1))
                .unwrap_or_else(|| PLACEHOLDER.to_string());
            MonthRow {
                label: m.label.clone(),
                revenue: format_money(m.revenue, currency),
                orders: group_thousands(m.orders as i64),
                change,
            }
        })
        .collect()
}

/// Bars for each record's share of `field`, labelled with amount and percent
pub fn share_bars<R: Record>(records: &[R], field: &str, currency: &str) -> Vec<Bar> {
    let Ok(shares) = share_of_total(records, field) else {
        return Vec::new();
    };
    let rows: Vec<(String, f64, String)> = shares
        .into_iter()
        .map(|s| {
            let label = format!("{} · {}", format_money(s.value, currency), format_percent_value(s.percent, 1));
            (s.key, s.value, label)
        })
        .collect();
    bars(&rows)
}

/// Channel name, revenue and return on spend; ranked best first when `ranked`
///
/// A channel without spend cannot be ranked, so the rows then keep input order.
pub fn channel_rows(channels: &[ChannelMetric], currency: &str, ranked: bool) -> Vec<(String, String, String)> {
    match rank_by_return_on_spend(channels) {
        Ok(ranking) if ranked => {
            return ranking
                .into_iter()
                .map(|c| (c.name, format_money(c.revenue, currency), format_multiple(c.return_on_spend)))
                .collect();
        }
        _ => {}
    }

    channels
        .iter()
        .map(|c| {
            let ros = or_placeholder(return_on_spend(c).map(format_multiple));
            (c.name.clone(), format_money(c.revenue, currency), ros)
        })
        .collect()
}

#[component]
pub fn AuditPage() -> impl IntoView {
    let renderer = use_renderer();
    let currency = CONFIG.currency;
    let monthly = shared::monthly_metrics();
    let channels = shared::channel_metrics();
    let regions = shared::region_metrics();

    let (show_months, set_show_months) = signal(false);
    let (ranked, set_ranked) = signal(true);

    let kpis = sales_kpis(&monthly, currency);
    let growth = growth_kpis(&monthly, currency);
    let revenues: Vec<f64> = monthly.iter().map(|m| m.revenue).collect();
    let trend = renderer.sparkline(sparkline_points(&revenues));
    let rows = month_rows(&monthly, currency);
    let channel_chart = renderer.bars(share_bars(&channels, "revenue", currency));
    let region_chart = renderer.bars(share_bars(&regions, "revenue", currency));

    view! {
        <main class="max-w-[100ch] mx-auto px-4 py-8 md:py-12">
            <header class="mb-6">
                <h1 class="text-2xl font-bold">{CONFIG.name} " · Store Audit"</h1>
                <div class="text-[var(--ink-light)]">{CONFIG.audit_period}</div>
            </header>
            <Nav />

            <Section id="sales" title="Sales Performance">
                <KpiGrid kpis=kpis />
            </Section>

            <Section id="growth" title="Growth">
                <KpiGrid kpis=growth />
                <div class="mt-4">{trend}</div>
                <button class="mt-3 text-sm underline" on:click=move |_| set_show_months.update(|v| *v = !*v)>
                    {move || if show_months.get() { "hide monthly breakdown" } else { "show monthly breakdown" }}
                </button>
                {move || show_months.get().then(|| {
                    let rows = rows.clone();
                    view! {
                        <table class="w-full mt-3 text-sm">
                            <thead>
                                <tr class="text-left text-[var(--ink-light)]">
                                    <th>"Month"</th>
                                    <th>"Revenue"</th>
                                    <th>"Orders"</th>
                                    <th>"MoM"</th>
                                </tr>
                            </thead>
                            <tbody>
                                {rows.into_iter().map(|row| view! {
                                    <tr>
                                        <td>{row.label}</td>
                                        <td>{row.revenue}</td>
                                        <td>{row.orders}</td>
                                        <td>{row.change}</td>
                                    </tr>
                                }).collect_view()}
                            </tbody>
                        </table>
                    }
                })}
            </Section>

            <Section id="channels" title="Marketing Channels">
                {channel_chart}
                <button class="mt-4 text-sm underline" on:click=move |_| set_ranked.update(|v| *v = !*v)>
                    {move || if ranked.get() { "show input order" } else { "rank by return on spend" }}
                </button>
                <table class="w-full mt-3 text-sm">
                    <thead>
                        <tr class="text-left text-[var(--ink-light)]">
                            <th>"Channel"</th>
                            <th>"Revenue"</th>
                            <th>"Return on Spend"</th>
                        </tr>
                    </thead>
                    <tbody>
                        {move || {
                            channel_rows(&channels, currency, ranked.get())
                                .into_iter()
                                .map(|(name, revenue, ros)| view! {
                                    <tr>
                                        <td>{name}</td>
                                        <td>{revenue}</td>
                                        <td>{ros}</td>
                                    </tr>
                                })
                                .collect_view()
                        }}
                    </tbody>
                </table>
            </Section>

            <Section id="regions" title="Regional Split">
                {region_chart}
            </Section>
        </main>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sales_kpis_from_fixtures() {
        let kpis = sales_kpis(&shared::monthly_metrics(), "EGP");
        let values: Vec<&str> = kpis.iter().map(|k| k.value.as_str()).collect();
        assert_eq!(values, vec!["EGP 10,990,000", "4,882", "EGP 2,251"]);
    }

    #[test]
    fn test_sales_kpis_empty_show_placeholders() {
        let kpis = sales_kpis(&[], "EGP");
        assert_eq!(kpis[0].value, "EGP 0");
        assert_eq!(kpis[2].value, PLACEHOLDER);
    }

    #[test]
    fn test_growth_kpis() {
        let kpis = growth_kpis(&shared::monthly_metrics(), "EGP");
        assert_eq!(kpis[0].label, "Best Month");
        assert_eq!(kpis[0].value, "Dec 23");
        assert_eq!(kpis[0].subtext.as_deref(), Some("EGP 1,240,000"));
        assert_eq!(kpis[1].value, "Jan 24");
        assert_eq!(kpis[2].value, "15%");
    }

    #[test]
    fn test_growth_kpis_empty() {
        let kpis = growth_kpis(&[], "EGP");
        assert!(kpis.iter().all(|k| k.value == PLACEHOLDER));
        assert_eq!(kpis[1].label, "Slowest Month");
    }

    #[test]
    fn test_month_rows_first_change_is_placeholder() {
        let rows = month_rows(&shared::monthly_metrics(), "EGP");
        assert_eq!(rows.len(), 12);
        assert_eq!(rows[0].change, PLACEHOLDER);
        assert_eq!(rows[1].change, "+3.8%");
        assert_eq!(rows[11].orders, "388");
    }

    #[test]
    fn test_share_bars_regions() {
        let region_bars = share_bars(&shared::region_metrics(), "revenue", "EGP");
        assert_eq!(region_bars.len(), 5);
        assert_eq!(region_bars[0].label, "Cairo");
        assert_eq!(region_bars[0].value_label, "EGP 3,900,000 · 50.1%");
        assert_eq!(region_bars[0].width, 100.0);
    }

    #[test]
    fn test_share_bars_unknown_field() {
        assert!(share_bars(&shared::region_metrics(), "margin", "EGP").is_empty());
    }

    #[test]
    fn test_channel_rows_ranked_and_unranked() {
        let channels = shared::channel_metrics();
        let ranked = channel_rows(&channels, "EGP", true);
        assert_eq!(ranked[0].0, "Referral");
        assert_eq!(ranked[0].2, "34.00x");
        let unranked = channel_rows(&channels, "EGP", false);
        assert_eq!(unranked[0].0, "Paid Search");
        assert_eq!(unranked[0].2, "4.19x");
    }

    #[test]
    fn test_channel_rows_zero_spend_falls_back() {
        let channels = vec![
            ChannelMetric::new("Organic", 1_850_000.0, 850, 0.0),
            ChannelMetric::new("Email", 1_450_000.0, 720, 70_000.0),
        ];
        let rows = channel_rows(&channels, "EGP", true);
        assert_eq!(rows[0].0, "Organic");
        assert_eq!(rows[0].2, PLACEHOLDER);
        assert_eq!(rows[1].2, "20.71x");
    }
}
