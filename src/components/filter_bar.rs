//! Filter Bar Component
//!
//! Search, multi-select facets, trigger, sort and group-by controls for a docket.

use docket_core::filters::{DeadlineFilters, GroupBy, SortDirection, SortKey};
use leptos::prelude::*;

use crate::models::{DeadlineStatus, Priority, Trigger};

#[component]
pub fn FilterBar(
    filters: RwSignal<DeadlineFilters>,
    sort: RwSignal<(SortKey, SortDirection)>,
    group_by: RwSignal<GroupBy>,
    #[prop(into)] type_facets: Signal<Vec<(String, usize)>>,
    #[prop(into)] triggers: Signal<Vec<Trigger>>,
) -> impl IntoView {
    let priority_chips = Priority::KNOWN
        .into_iter()
        .map(|priority| {
            let label = priority.label().to_string();
            let chip = priority.clone();
            let active = move || filters.with(|f| f.priorities.contains(&chip));
            view! {
                <button
                    class=move || if active() { "chip active" } else { "chip" }
                    on:click=move |_| filters.update(|f| f.toggle_priority(priority.clone()))
                >
                    {label}
                </button>
            }
        })
        .collect_view();

    let status_chips = DeadlineStatus::ALL
        .into_iter()
        .map(|status| {
            let active = move || filters.with(|f| f.statuses.contains(&status));
            view! {
                <button
                    class=move || if active() { "chip active" } else { "chip" }
                    on:click=move |_| filters.update(|f| f.toggle_status(status))
                >
                    {status.as_str()}
                </button>
            }
        })
        .collect_view();

    view! {
        <div class="filter-bar">
            <input
                type="search"
                class="filter-search"
                placeholder="Search title, rule, action…"
                prop:value=move || filters.with(|f| f.search.clone())
                on:input=move |ev| filters.update(|f| f.search = event_target_value(&ev))
            />

            <div class="filter-group">
                <span class="filter-label">"Priority"</span>
                {priority_chips}
            </div>

            <div class="filter-group">
                <span class="filter-label">"Status"</span>
                {status_chips}
            </div>

            <div class="filter-group">
                <span class="filter-label">"Type"</span>
                <For
                    each=move || type_facets.get()
                    key=|(name, count)| (name.clone(), *count)
                    children=move |(name, count)| {
                        let chip = name.clone();
                        let toggled = name.clone();
                        let active = move || filters.with(|f| f.types.contains(&chip));
                        view! {
                            <button
                                class=move || if active() { "chip active" } else { "chip" }
                                on:click=move |_| filters.update(|f| f.toggle_type(toggled.clone()))
                            >
                                {format!("{} ({})", name, count)}
                            </button>
                        }
                    }
                />
            </div>

            <select
                class="filter-trigger"
                on:change=move |ev| {
                    let value = event_target_value(&ev);
                    filters.update(|f| f.trigger_id = (!value.is_empty()).then_some(value));
                }
            >
                <option value="" selected=move || filters.with(|f| f.trigger_id.is_none())>"All triggers"</option>
                <For
                    each=move || triggers.get()
                    key=|t| t.id.clone()
                    children=move |t| {
                        let id = t.id.clone();
                        let selected_id = t.id.clone();
                        view! {
                            <option
                                value=id
                                selected=move || filters.with(|f| f.trigger_id.as_deref() == Some(selected_id.as_str()))
                            >
                                {t.display_name()}
                            </option>
                        }
                    }
                />
            </select>

            <select
                class="filter-sort"
                on:change=move |ev| sort.update(|s| s.0 = SortKey::from_str(&event_target_value(&ev)))
            >
                {SortKey::ALL
                    .into_iter()
                    .map(|key| view! {
                        <option value=key.as_str() selected=move || sort.with(|s| s.0 == key)>{key.label()}</option>
                    })
                    .collect_view()}
            </select>
            <button
                class="sort-direction"
                title="Toggle sort direction"
                on:click=move |_| sort.update(|s| s.1 = s.1.flipped())
            >
                {move || if sort.with(|s| s.1 == SortDirection::Asc) { "↑" } else { "↓" }}
            </button>

            <select
                class="filter-group-by"
                on:change=move |ev| group_by.set(GroupBy::from_str(&event_target_value(&ev)))
            >
                {GroupBy::ALL
                    .into_iter()
                    .map(|g| view! {
                        <option value=g.as_str() selected=move || group_by.get() == g>{g.label()}</option>
                    })
                    .collect_view()}
            </select>

            <Show when=move || filters.with(DeadlineFilters::is_active)>
                <button class="clear-filters" on:click=move |_| filters.update(DeadlineFilters::clear)>
                    "Clear filters"
                </button>
            </Show>
        </div>
    }
}
