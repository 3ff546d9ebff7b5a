//! Assistant Page Component
//!
//! Full-width assistant with an optional case scope picker.

use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::api;
use crate::store::{use_app_store, AppStateStoreFields};
use super::ChatPanel;

#[component]
pub fn AssistantPage() -> impl IntoView {
    let store = use_app_store();
    let scope = RwSignal::new(None::<String>);

    if store.cases().with_untracked(Vec::is_empty) {
        spawn_local(async move {
            match api::list_cases().await {
                Ok(cases) => store.cases().set(cases),
                Err(e) => tracing::debug!("case list for assistant scope unavailable: {}", e),
            }
        });
    }

    view! {
        <section class="assistant-page">
            <select
                class="assistant-scope"
                on:change=move |ev| {
                    let value = event_target_value(&ev);
                    scope.set((!value.is_empty()).then_some(value));
                }
            >
                <option value="">"All cases"</option>
                <For
                    each=move || store.cases().get()
                    key=|c| c.id.clone()
                    children=move |c| view! { <option value=c.id.clone()>{format!("{} · {}", c.case_number, c.title)}</option> }
                />
            </select>
            // Remount the panel so history reloads for the new scope
            {move || {
                match scope.get() {
                    Some(case_id) => view! { <ChatPanel case_id=case_id /> }.into_any(),
                    None => view! { <ChatPanel /> }.into_any(),
                }
            }}
        </section>
    }
}
