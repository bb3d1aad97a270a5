use leptos::prelude::*;
use leptos_router::components::A;
use shared::CONFIG;

/// Links between the dashboard pages
#[component]
pub fn Nav() -> impl IntoView {
    view! {
        <nav class="flex gap-4 mb-6 text-sm">
            <A href=CONFIG.links.audit>"store audit"</A>
            <A href=CONFIG.links.inventory>"supply chain agent"</A>
            <A href=CONFIG.links.finance>"financials"</A>
            <A href=CONFIG.links.agents>"agents"</A>
        </nav>
    }
}
