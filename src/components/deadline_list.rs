//! Deadline List Component
//!
//! Grouped, collapsible docket list with multi-select bulk actions.

use std::collections::BTreeSet;

use chrono::NaiveDate;
use docket_core::filters::{DeadlineView, GroupExpansion};
use leptos::prelude::*;

use crate::actions;
use crate::context::use_app_context;
use crate::models::DeadlineStatus;
use crate::store::use_app_store;
use super::{ConfirmButton, DeadlineRow};

#[component]
pub fn DeadlineList(
    case_id: String,
    #[prop(into)] docket: Signal<DeadlineView>,
    expansion: RwSignal<GroupExpansion>,
    today: NaiveDate,
) -> impl IntoView {
    let ctx = use_app_context();
    let store = use_app_store();
    let selected = RwSignal::new(BTreeSet::<String>::new());

    let bulk = {
        let case_id = case_id.clone();
        move |status: DeadlineStatus| {
            let ids: Vec<String> = selected.get_untracked().into_iter().collect();
            actions::bulk_status(store, ctx, case_id.clone(), ids, status);
            selected.set(BTreeSet::new());
        }
    };
    let bulk_complete = bulk.clone();
    let bulk_cancel = Callback::new(move |_: ()| bulk(DeadlineStatus::Cancelled));

    let expand_all = move |_| {
        let keys: Vec<String> = docket.with_untracked(|v| v.groups.iter().map(|g| g.key.clone()).collect());
        expansion.update(|e| e.expand_all(keys.iter().map(String::as_str)));
    };

    view! {
        <div class="deadline-list">
            <div class="list-header">
                <span class="list-count">
                    {move || docket.with(|v| {
                        if v.visible == v.total {
                            format!("{} deadlines", v.total)
                        } else {
                            format!("{} of {} deadlines", v.visible, v.total)
                        }
                    })}
                </span>
                <button class="link-btn" on:click=expand_all>"Expand all"</button>
                <button class="link-btn" on:click=move |_| expansion.update(GroupExpansion::collapse_all)>"Collapse all"</button>
            </div>

            <Show when=move || selected.with(|s| !s.is_empty())>
                <div class="bulk-bar">
                    <span>{move || format!("{} selected", selected.with(BTreeSet::len))}</span>
                    <button class="action-btn" on:click={
                        let bulk_complete = bulk_complete.clone();
                        move |_| bulk_complete(DeadlineStatus::Completed)
                    }>"Complete selected"</button>
                    <ConfirmButton label="Cancel selected" prompt="Cancel all selected?" on_confirm=bulk_cancel />
                    <button class="link-btn" on:click=move |_| selected.set(BTreeSet::new())>"Clear"</button>
                </div>
            </Show>

            <Show
                when=move || docket.with(|v| !v.groups.is_empty())
                fallback=|| view! { <p class="empty-hint">"No deadlines match the current filters."</p> }
            >
                {move || {
                    docket
                        .get()
                        .groups
                        .into_iter()
                        .map(|group| {
                            let key = group.key.clone();
                            let toggle_key = group.key.clone();
                            let open = move || expansion.with(|e| e.is_expanded(&key));
                            let items = group.items;
                            view! {
                                <section class="deadline-group">
                                    <h3
                                        class="group-header"
                                        on:click=move |_| expansion.update(|e| e.toggle(&toggle_key))
                                    >
                                        <span class="caret">{
                                            let open = open.clone();
                                            move || if open() { "▾" } else { "▸" }
                                        }</span>
                                        {group.label}
                                    </h3>
                                    <Show when=open>
                                        {items
                                            .clone()
                                            .into_iter()
                                            .map(|deadline| view! { <DeadlineRow deadline=deadline today=today selected=selected /> })
                                            .collect_view()}
                                    </Show>
                                </section>
                            }
                        })
                        .collect_view()
                }}
            </Show>
        </div>
    }
}
