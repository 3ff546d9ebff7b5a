//! Case List Component
//!
//! Per-case `_stats` are aggregated client-side after the list arrives.

use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::actions::load_case_stats;
use crate::api;
use crate::context::{use_app_context, Page};
use crate::store::{use_app_store, AppStateStoreFields};

#[component]
pub fn CaseList() -> impl IntoView {
    let ctx = use_app_context();
    let store = use_app_store();
    let (loading, set_loading) = signal(true);
    let (error, set_error) = signal::<Option<String>>(None);
    let (query, set_query) = signal(String::new());

    spawn_local(async move {
        match api::list_cases().await {
            Ok(cases) => {
                let ids = cases.iter().map(|c| c.id.clone()).collect();
                store.cases().set(cases);
                load_case_stats(store, ids);
            }
            Err(e) => set_error.set(Some(format!("Could not load cases: {}", e))),
        }
        set_loading.set(false);
    });

    let visible = Memo::new(move |_| {
        let q = query.get().trim().to_lowercase();
        store.cases().with(|cases| {
            cases
                .iter()
                .filter(|c| {
                    q.is_empty()
                        || c.case_number.to_lowercase().contains(&q)
                        || c.title.to_lowercase().contains(&q)
                })
                .cloned()
                .collect::<Vec<_>>()
        })
    });

    view! {
        <section class="case-list">
            <h1>"Cases"</h1>
            <input
                type="search"
                class="case-search"
                placeholder="Search by number or title"
                prop:value=move || query.get()
                on:input=move |ev| set_query.set(event_target_value(&ev))
            />

            {move || error.get().map(|msg| view! { <div class="error-panel">{msg}</div> })}
            <Show when=move || loading.get()>
                <p class="loading">"Loading cases…"</p>
            </Show>

            <table class="case-table">
                <thead>
                    <tr>
                        <th>"Case"</th>
                        <th>"Title"</th>
                        <th>"Court"</th>
                        <th>"Documents"</th>
                        <th>"Pending"</th>
                        <th>"Next deadline"</th>
                    </tr>
                </thead>
                <tbody>
                    <For
                        each=move || visible.get()
                        key=|case| (case.id.clone(), case.stats.as_ref().map(|s| (s.document_count, s.pending_deadline_count, s.next_deadline)))
                        children=move |case| {
                            let id = case.id.clone();
                            let stats = case.stats.clone();
                            let cell = move |f: fn(&docket_core::CaseStats) -> String| {
                                stats.as_ref().map(f).unwrap_or_else(|| "…".to_string())
                            };
                            view! {
                                <tr class="case-row" on:click=move |_| ctx.navigate(Page::Case(id.clone()))>
                                    <td>{case.case_number.clone()}</td>
                                    <td>{case.title.clone()}</td>
                                    <td>{case.court.clone().or(case.jurisdiction.clone()).unwrap_or_default()}</td>
                                    <td>{cell(|s| s.document_count.to_string())}</td>
                                    <td>{cell(|s| s.pending_deadline_count.to_string())}</td>
                                    <td>{cell(|s| s.next_deadline.map(|d| d.format("%b %-d, %Y").to_string()).unwrap_or_else(|| "-".to_string()))}</td>
                                </tr>
                            }
                        }
                    />
                </tbody>
            </table>
        </section>
    }
}
