use std::sync::Arc;

use leptos::prelude::*;
use leptos_router::components::{Route, Router, Routes};
use leptos_router::path;

use crate::chart::{CssChartRenderer, SharedRenderer};
use crate::pages::{AgentsPage, AuditPage, FinancePage, InventoryPage};

#[component]
pub fn App() -> impl IntoView {
    provide_context::<SharedRenderer>(Arc::new(CssChartRenderer));

    view! {
        <Router>
            <Routes fallback=|| view! { <p>"404 - Page not found"</p> }>
                <Route path=path!("/") view=AuditPage />
                <Route path=path!("/inventory") view=InventoryPage />
                <Route path=path!("/finance") view=FinancePage />
                <Route path=path!("/agents") view=AgentsPage />
            </Routes>
        </Router>
    }
}
