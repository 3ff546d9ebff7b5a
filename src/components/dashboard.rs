//! Dashboard Component
//!
//! Polled summary cards plus the recently opened cases.

use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::api;
use crate::bus::use_bus;
use crate::config::app_config;
use crate::context::{use_app_context, Page};
use crate::models::DashboardStats;
use crate::polling::poll_while_visible;
use crate::storage::{recent_cases, recent_tools};
use crate::store::{use_app_store, AppStateStoreFields};

async fn refresh_stats(store: crate::store::AppStore, set_error: WriteSignal<Option<String>>) {
    match api::get_dashboard_stats().await {
        Ok(stats) => {
            store.dashboard().set(Some(stats));
            set_error.set(None);
        }
        Err(e) => {
            tracing::warn!("dashboard stats failed: {}", e);
            set_error.set(Some(e.to_string()));
        }
    }
}

#[component]
fn StatCard(label: &'static str, value: u32, #[prop(optional)] alert: bool) -> impl IntoView {
    view! {
        <div class={if alert && value > 0 { "stat-card alert" } else { "stat-card" }}>
            <span class="stat-value">{value}</span>
            <span class="stat-label">{label}</span>
        </div>
    }
}

#[component]
pub fn Dashboard() -> impl IntoView {
    let ctx = use_app_context();
    let store = use_app_store();
    let (error, set_error) = signal::<Option<String>>(None);

    poll_while_visible(app_config().polling.dashboard_secs, move || refresh_stats(store, set_error));

    use_bus(move |event| {
        if event.invalidates_deadlines() {
            spawn_local(refresh_stats(store, set_error));
        }
    });

    let forget_recent = move |id: String| match recent_cases().forget(&id) {
        Ok(list) => store.recent_cases().set(list),
        Err(e) => tracing::warn!("could not update recent cases: {}", e),
    };

    view! {
        <section class="dashboard">
            <h1>"Dashboard"</h1>

            {move || error.get().map(|msg| view! { <div class="error-panel">{msg}</div> })}

            {move || match store.dashboard().get() {
                Some(stats) => {
                    let DashboardStats {
                        total_cases,
                        total_documents,
                        pending_deadlines,
                        overdue_deadlines,
                        deadlines_this_week,
                        completed_this_month,
                    } = stats;
                    view! {
                        <div class="stat-grid">
                            <StatCard label="Overdue" value=overdue_deadlines alert=true />
                            <StatCard label="Due this week" value=deadlines_this_week />
                            <StatCard label="Pending" value=pending_deadlines />
                            <StatCard label="Completed this month" value=completed_this_month />
                            <StatCard label="Cases" value=total_cases />
                            <StatCard label="Documents" value=total_documents />
                        </div>
                    }
                    .into_any()
                }
                None => view! { <p class="loading">"Loading…"</p> }.into_any(),
            }}

            <div class="recent-tools">
                {recent_tools()
                    .list()
                    .into_iter()
                    .filter_map(|entry| Page::from_tool(&entry.id).map(|page| (entry.label, page)))
                    .map(|(label, page)| view! {
                        <button class="tool-link" on:click=move |_| ctx.navigate(page.clone())>{label}</button>
                    })
                    .collect_view()}
            </div>

            <h2>"Recent cases"</h2>
            <Show
                when=move || !store.recent_cases().get().is_empty()
                fallback=|| view! { <p class="empty-hint">"Cases you open show up here."</p> }
            >
                <ul class="recent-list">
                    <For
                        each=move || store.recent_cases().get()
                        key=|entry| entry.id.clone()
                        children=move |entry| {
                            let open_id = entry.id.clone();
                            let forget_id = entry.id.clone();
                            view! {
                                <li>
                                    <a href="#" on:click=move |ev| {
                                        ev.prevent_default();
                                        ctx.navigate(Page::Case(open_id.clone()));
                                    }>
                                        <strong>{entry.label}</strong>
                                        " "
                                        <span class="muted">{entry.subtitle.unwrap_or_default()}</span>
                                    </a>
                                    <button class="forget-btn" on:click=move |_| forget_recent(forget_id.clone())>"×"</button>
                                </li>
                            }
                        }
                    />
                </ul>
            </Show>
        </section>
    }
}
