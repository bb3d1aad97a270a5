use leptos::prelude::*;

/// Titled dashboard card
#[component]
pub fn Section(#[prop(into)] id: String, #[prop(into)] title: String, children: Children) -> impl IntoView {
    view! {
        <section id=id class="mb-8 border border-[var(--rule)] p-4">
            <h2 class="font-bold uppercase mb-3">{title}</h2>
            <div>{children()}</div>
        </section>
    }
}
