use leptos::prelude::*;
use shared::CONFIG;
use wow_metrics::{AgentRecord, AgentStatus, configured_count, filter_agents};

use crate::components::{Nav, Section};

pub fn setup_progress(agents: &[AgentRecord]) -> String {
    let (configured, total) = configured_count(agents);
    format!("Setup progress: {configured} / {total} agents configured")
}

fn badge_class(status: AgentStatus) -> &'static str {
    match status {
        AgentStatus::Active => "text-green-700 border-green-200",
        AgentStatus::Scheduled => "text-yellow-700 border-yellow-200",
        AgentStatus::Paused => "text-red-700 border-red-200",
        AgentStatus::NeedsSetup => "text-[var(--ink-light)] border-[var(--rule)]",
    }
}

/// One rendered agent card
#[derive(Debug, Clone, PartialEq)]
pub struct AgentCard {
    pub name: String,
    pub description: String,
    pub status: String,
    pub badge_class: &'static str,
    pub kpi: String,
    pub meta: String,
}

/// Cards for the agents matching the search text and the status filter
pub fn agent_cards(agents: &[AgentRecord], query: &str, status: Option<AgentStatus>) -> Vec<AgentCard> {
    filter_agents(agents, query, status)
        .into_iter()
        .map(|a| AgentCard {
            name: a.name.clone(),
            description: a.description.clone(),
            status: a.status.to_string(),
            badge_class: badge_class(a.status),
            kpi: a.kpi.clone(),
            meta: a.meta.clone(),
        })
        .collect()
}

#[component]
pub fn AgentsPage() -> impl IntoView {
    let agents = shared::agents();
    let progress = setup_progress(&agents);

    let (query, set_query) = signal(String::new());
    let (status, set_status) = signal(None::<AgentStatus>);

    view! {
        <main class="max-w-[100ch] mx-auto px-4 py-8 md:py-12">
            <header class="mb-6">
                <h1 class="text-2xl font-bold">{CONFIG.name} " · Agents"</h1>
                <div class="text-[var(--ink-light)]">"Automate routine work across inventory, pricing, fulfillment and finance"</div>
            </header>
            <Nav />

            <Section id="agents" title="Your Agents">
                <div class="text-sm mb-3">{progress}</div>
                <div class="flex flex-wrap gap-3 mb-4 text-sm">
                    <input
                        type="search"
                        placeholder="Search agents…"
                        class="border border-[var(--rule)] px-2 py-1"
                        prop:value=query
                        on:input=move |ev| set_query.set(event_target_value(&ev))
                    />
                    <select
                        class="border border-[var(--rule)] px-2 py-1"
                        on:change=move |ev| set_status.set(AgentStatus::from_slug(&event_target_value(&ev)))
                    >
                        <option value="all">"All statuses"</option>
                        {AgentStatus::ALL
                            .into_iter()
                            .map(|s| view! { <option value=s.slug()>{s.to_string()}</option> })
                            .collect_view()}
                    </select>
                </div>
                <div class="grid gap-4 md:grid-cols-2">
                    {move || {
                        agent_cards(&agents, &query.get(), status.get())
                            .into_iter()
                            .map(|card| view! {
                                <div class="border border-[var(--rule)] p-3">
                                    <div class="flex justify-between gap-2">
                                        <strong>{card.name}</strong>
                                        <span class=format!("text-xs border px-2 {}", card.badge_class)>{card.status}</span>
                                    </div>
                                    <p class="text-sm text-[var(--ink-light)] my-2">{card.description}</p>
                                    <div class="flex justify-between text-sm">
                                        <span class="font-bold">{card.kpi}</span>
                                        <span class="text-[var(--ink-light)]">{card.meta}</span>
                                    </div>
                                </div>
                            })
                            .collect_view()
                    }}
                </div>
            </Section>
        </main>
    }
}
