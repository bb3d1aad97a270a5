use leptos::prelude::*;

/// One headline figure with an optional caption
#[derive(Debug, Clone, PartialEq)]
pub struct Kpi {
    pub label: String,
    pub value: String,
    pub subtext: Option<String>,
}

impl Kpi {
    pub fn new(label: &str, value: String) -> Self {
        Self {
            label: label.to_string(),
            value,
            subtext: None,
        }
    }

    pub fn with_subtext(mut self, subtext: String) -> Self {
        self.subtext = Some(subtext);
        self
    }
}

#[component]
pub fn KpiCard(kpi: Kpi) -> impl IntoView {
    view! {
        <div class="border border-[var(--rule)] p-3">
            <div class="text-sm text-[var(--ink-light)]">{kpi.label}</div>
            <div class="text-2xl font-bold">{kpi.value}</div>
            {kpi.subtext.map(|text| view! {
                <div class="text-sm text-[var(--ink-light)]">{text}</div>
            })}
        </div>
    }
}

#[component]
pub fn KpiGrid(kpis: Vec<Kpi>) -> impl IntoView {
    view! {
        <div class="grid grid-cols-1 md:grid-cols-3 gap-3">
            {kpis.into_iter().map(|kpi| view! { <KpiCard kpi=kpi /> }).collect_view()}
        </div>
    }
}
