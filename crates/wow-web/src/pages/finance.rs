use leptos::prelude::*;
use shared::CONFIG;
use wow_metrics::finance::{
    churn_rate, cost_per_brand, gross_margin, gross_profit, monthly_recurring_revenue, upgrade_rate,
};
use wow_metrics::format::{format_money_with_decimals, format_percent_value, format_signed_percent};
use wow_metrics::{
    CostLine, MonthlyMetric, PLACEHOLDER, SubscriptionSnapshot, format_money, format_percent, or_placeholder,
    period_changes, share_of_total, sum,
};

use crate::chart::{Bar, DONUT_RADIUS, Donut, bars, donut, use_renderer};
use crate::components::{Kpi, KpiGrid, Nav, Section};

pub fn finance_kpis(snapshot: &SubscriptionSnapshot, currency: &str) -> Vec<Kpi> {
    let money = |v: f64| format_money(v, currency);
    let cents = |v: f64| format_money_with_decimals(v, currency, 2);
    let total_brands = snapshot.total_brands();

    vec![
        Kpi::new("Monthly Recurring Revenue", money(monthly_recurring_revenue(snapshot)))
            .with_subtext(format!("{total_brands} brands × {} ARPU", money(snapshot.arpu))),
        Kpi::new(
            "Subscription Mix",
            format!("{} paid / {} freemium", snapshot.paid_brands, snapshot.freemium_brands),
        )
        .with_subtext(format!("{} upgrade rate", or_placeholder(upgrade_rate(snapshot).map(format_percent)))),
        Kpi::new("Churn Rate", or_placeholder(churn_rate(snapshot).map(format_percent)))
            .with_subtext(format!("{} brands at risk", snapshot.at_risk_brands)),
        Kpi::new("Avg Data Cost / Brand", or_placeholder(cost_per_brand(snapshot.data_costs, snapshot).map(cents)))
            .with_subtext(format!("{} total / month", money(snapshot.data_costs))),
        Kpi::new("Avg AI Cost / Brand", or_placeholder(cost_per_brand(snapshot.ai_costs, snapshot).map(cents)))
            .with_subtext(format!("{} total / month", money(snapshot.ai_costs))),
        Kpi::new("Gross Profit", money(gross_profit(snapshot)))
            .with_subtext(format!("{} gross margin", or_placeholder(gross_margin(snapshot).map(format_percent)))),
    ]
}

/// MRR per month, labelled with the change against the month before
pub fn growth_bars(growth: &[MonthlyMetric], currency: &str) -> Vec<Bar> {
    let Ok(changes) = period_changes(growth, "revenue") else {
        return Vec::new();
    };
    let rows: Vec<(String, f64, String)> = changes
        .into_iter()
        .map(|p| {
            let label = match p.change {
                Some(change) => format!("{} · {}", format_money(p.value, currency), format_signed_percent(change, 1)),
                None => format_money(p.value, currency),
            };
            (p.key, p.value, label)
        })
        .collect();
    bars(&rows)
}

/// Donut geometry and caption for each cost line's share of the total
pub fn cost_donuts(lines: &[CostLine], currency: &str) -> Vec<(Donut, String)> {
    share_of_total(lines, "value")
        .map(|shares| {
            shares
                .into_iter()
                .map(|s| {
                    let caption = format!(
                        "{} · {} · {}",
                        s.key,
                        format_money(s.value, currency),
                        format_percent_value(s.percent, 1)
                    );
                    (donut(s.percent, DONUT_RADIUS), caption)
                })
                .collect()
        })
        .unwrap_or_default()
}

pub fn total_costs(lines: &[CostLine], currency: &str) -> String {
    or_placeholder(sum(lines, "value").map(|v| format_money(v, currency)))
}

#[component]
pub fn FinancePage() -> impl IntoView {
    let renderer = use_renderer();
    let currency = CONFIG.platform_currency;
    let snapshot = shared::subscription_snapshot();
    let lines = shared::cost_lines_for(&snapshot);

    let (show_totals, set_show_totals) = signal(false);

    let kpis = finance_kpis(&snapshot, currency);
    let growth_chart = renderer.bars(growth_bars(&shared::revenue_growth(), currency));
    let donuts = cost_donuts(&lines, currency)
        .into_iter()
        .map(|(geometry, caption)| renderer.donut(geometry, caption))
        .collect_view();
    let total = total_costs(&lines, currency);
    let line_totals: Vec<(String, String)> = lines
        .iter()
        .map(|l| (l.category.clone(), format_money(l.value, currency)))
        .collect();

    view! {
        <main class="max-w-[100ch] mx-auto px-4 py-8 md:py-12">
            <header class="mb-6">
                <h1 class="text-2xl font-bold">{CONFIG.name} " · Platform Financials"</h1>
                <div class="text-[var(--ink-light)]">"Monthly subscription economics"</div>
            </header>
            <Nav />

            <Section id="subscriptions" title="Subscriptions">
                <KpiGrid kpis=kpis />
            </Section>

            <Section id="revenue-growth" title="Revenue Growth">
                {growth_chart}
            </Section>

            <Section id="costs" title="Cost Breakdown">
                <div class="flex gap-6 justify-center">{donuts}</div>
                <button class="mt-4 text-sm underline" on:click=move |_| set_show_totals.update(|v| *v = !*v)>
                    {move || if show_totals.get() { "hide cost lines" } else { "show cost lines" }}
                </button>
                {move || show_totals.get().then(|| {
                    let line_totals = line_totals.clone();
                    view! {
                        <div class="mt-3 text-sm">
                            {line_totals.into_iter().map(|(category, value)| view! {
                                <div class="flex justify-between">
                                    <span>{category}</span>
                                    <span>{value}</span>
                                </div>
                            }).collect_view()}
                        </div>
                    }
                })}
                <div class="mt-3 flex justify-between border-t border-[var(--rule)] pt-2">
                    <strong>"Total Monthly Costs"</strong>
                    <strong>{total}</strong>
                </div>
            </Section>
        </main>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_finance_kpis_from_snapshot() {
        let kpis = finance_kpis(&shared::subscription_snapshot(), "$");
        let values: Vec<&str> = kpis.iter().map(|k| k.value.as_str()).collect();
        assert_eq!(values, vec!["$5,014", "38 paid / 8 freemium", "7%", "$3.80", "$5.39", "$4,591"]);
        assert_eq!(kpis[0].subtext.as_deref(), Some("46 brands × $109 ARPU"));
        assert_eq!(kpis[1].subtext.as_deref(), Some("21% upgrade rate"));
        assert_eq!(kpis[5].subtext.as_deref(), Some("92% gross margin"));
    }

    #[test]
    fn test_finance_kpis_without_brands() {
        let empty = SubscriptionSnapshot {
            paid_brands: 0,
            freemium_brands: 0,
            arpu: 109.0,
            ai_costs: 0.0,
            data_costs: 0.0,
            at_risk_brands: 0,
        };
        let kpis = finance_kpis(&empty, "$");
        assert_eq!(kpis[0].value, "$0");
        assert_eq!(kpis[2].value, PLACEHOLDER);
        assert_eq!(kpis[3].value, PLACEHOLDER);
        assert_eq!(kpis[5].subtext.as_deref(), Some("— gross margin"));
    }

    #[test]
    fn test_growth_bars() {
        let growth = growth_bars(&shared::revenue_growth(), "$");
        let labels: Vec<&str> = growth.iter().map(|b| b.value_label.as_str()).collect();
        assert_eq!(
            labels,
            vec!["$3,800", "$4,200 · +10.5%", "$4,650 · +10.7%", "$4,850 · +4.3%", "$5,014 · +3.4%"]
        );
        assert_eq!(growth[4].width, 100.0);
    }

    #[test]
    fn test_cost_donuts_are_derived() {
        let donuts = cost_donuts(&shared::cost_lines(), "$");
        assert_eq!(donuts.len(), 2);
        assert_eq!(donuts[0].1, "AI Costs · $248 · 58.6%");
        assert_eq!(donuts[1].1, "Data Costs · $175 · 41.4%");
        assert!(donuts[0].0.dash_offset < donuts[1].0.dash_offset);
    }

    #[test]
    fn test_cost_donuts_zero_total() {
        let lines = vec![CostLine::new("AI Costs", 0.0), CostLine::new("Data Costs", 0.0)];
        assert!(cost_donuts(&lines, "$").is_empty());
        assert_eq!(total_costs(&lines, "$"), "$0");
    }

    #[test]
    fn test_total_costs() {
        assert_eq!(total_costs(&shared::cost_lines(), "$"), "$423");
    }
}
