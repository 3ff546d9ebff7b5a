//! Navigation Bar Component

use leptos::prelude::*;

use crate::context::{use_app_context, Page};
use crate::store::{use_app_store, AppStateStoreFields};
use super::NotificationBadge;

#[component]
pub fn NavBar() -> impl IntoView {
    let ctx = use_app_context();
    let store = use_app_store();

    let tab = move |label: &'static str, target: Page| {
        let active_target = target.clone();
        let is_active = move || match (&ctx.page.get(), &active_target) {
            (Page::Case(_), Page::Cases) => true,
            (current, wanted) => current == wanted,
        };
        view! {
            <button
                class=move || if is_active() { "nav-tab active" } else { "nav-tab" }
                on:click=move |_| ctx.navigate(target.clone())
            >
                {label}
            </button>
        }
    };

    view! {
        <nav class="nav-bar">
            <span class="brand">"LitDocket"</span>
            {tab("Dashboard", Page::Dashboard)}
            {tab("Cases", Page::Cases)}
            {tab("Assistant", Page::Assistant)}
            {tab("Health", Page::Health)}

            <div class="recent-cases">
                <For
                    each={move || store.recent_cases().get().into_iter().take(3).collect::<Vec<_>>()}
                    key=|entry| entry.id.clone()
                    children=move |entry| {
                        let id = entry.id.clone();
                        let title = entry.subtitle.clone().unwrap_or_default();
                        view! {
                            <button
                                class="recent-chip"
                                title=title
                                on:click=move |_| ctx.navigate(Page::Case(id.clone()))
                            >
                                {entry.label}
                            </button>
                        }
                    }
                />
            </div>

            <NotificationBadge />
        </nav>
    }
}
