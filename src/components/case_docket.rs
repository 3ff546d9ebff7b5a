//! Case Docket Component
//!
//! One case: presence, filters, grouped deadline list or month calendar, and the
//! case-scoped assistant.

use chrono::NaiveDate;
use docket_core::calendar::CalendarFilters;
use docket_core::filters::{type_facets, DeadlineFilters, DeadlineView, GroupBy, GroupExpansion, SortDirection, SortKey};
use docket_core::DocketEvent;
use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::actions::{self, refetch_deadlines};
use crate::api;
use crate::bus::use_bus;
use crate::clock::today;
use crate::config::app_config;
use crate::context::use_app_context;
use crate::socket::use_case_presence;
use crate::store::{store_open_case, store_touch_recent_case, store_update_case, use_app_store, AppStateStoreFields};
use super::{CalendarView, ChatPanel, DeadlineList, FilterBar, PresenceBar};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum DocketTab {
    List,
    Calendar,
}

#[component]
pub fn CaseDocket(case_id: String) -> impl IntoView {
    let ctx = use_app_context();
    let store = use_app_store();
    let today = today();

    store_open_case(&store, &case_id);
    actions::load_case(store, ctx, case_id.clone());

    let (load_error, set_load_error) = signal::<Option<String>>(None);
    {
        let case_id = case_id.clone();
        spawn_local(async move {
            match api::get_case(&case_id).await {
                Ok(case) => {
                    store_touch_recent_case(&store, &case);
                    // Keep client-side stats if the list already computed them
                    let mut case = case;
                    if case.stats.is_none() {
                        case.stats = store
                            .cases()
                            .with_untracked(|cases| cases.iter().find(|c| c.id == case.id).and_then(|c| c.stats.clone()));
                    }
                    store_update_case(&store, case);
                }
                Err(e) => set_load_error.set(Some(format!("Could not load case: {}", e))),
            }
        });
    }

    let presence = use_case_presence(case_id.clone());

    // Remote edits to this case's deadlines
    {
        let case_id = case_id.clone();
        use_bus(move |event| {
            if let DocketEvent::DeadlineUpdated { case_id: changed, deadline_id } = event {
                if *changed == case_id {
                    tracing::debug!(%deadline_id, "deadline changed remotely, reloading");
                    let case_id = case_id.clone();
                    spawn_local(async move {
                        if let Err(e) = refetch_deadlines(store, &case_id).await {
                            tracing::warn!("reload after remote change failed: {}", e);
                        }
                    });
                }
            }
        });
    }

    let filters = RwSignal::new(DeadlineFilters::default());
    let sort = RwSignal::new((SortKey::Date, SortDirection::Asc));
    let group_by = RwSignal::new(GroupBy::DateRange);
    let tab = RwSignal::new(DocketTab::List);
    let expansion = RwSignal::new(GroupExpansion::default());

    let deadlines = Signal::derive(move || store.deadlines().with(|cache| cache.items().to_vec()));
    let triggers = Signal::derive(move || store.triggers().get());
    let calendar_filters = Signal::derive(move || filters.with(CalendarFilters::from_list));
    let facets = Signal::derive(move || store.deadlines().with(|cache| type_facets(cache.items())));

    let docket = Memo::new(move |_| {
        store.deadlines().with(|cache| {
            store.triggers().with(|triggers| {
                DeadlineView::compute(cache.items(), &filters.get(), sort.get(), group_by.get(), triggers, today)
            })
        })
    });

    // Date buckets open with their defaults; other groupings open fully
    Effect::new(move |previous: Option<GroupBy>| {
        let current = group_by.get();
        if previous.is_some_and(|p| p != current) {
            let mut next = GroupExpansion::default();
            if current != GroupBy::DateRange {
                next.collapse_all();
                docket.with_untracked(|v| next.expand_all(v.groups.iter().map(|g| g.key.as_str())));
            }
            expansion.set(next);
        }
        current
    });

    let header = {
        let case_id = case_id.clone();
        move || {
            store.cases().with(|cases| {
                cases.iter().find(|c| c.id == case_id).map(|c| {
                    let meta = [c.court.clone(), c.jurisdiction.clone(), c.case_type.clone()]
                        .into_iter()
                        .flatten()
                        .collect::<Vec<_>>()
                        .join(" · ");
                    view! {
                        <header class="docket-header">
                            <h1>{format!("{} · {}", c.case_number, c.title)}</h1>
                            <p class="muted">{meta}</p>
                        </header>
                    }
                })
            })
        }
    };

    let reschedule_case = case_id.clone();
    let on_reschedule = Callback::new(move |(deadline_id, date): (String, NaiveDate)| {
        actions::reschedule(store, ctx, reschedule_case.clone(), deadline_id, date);
    });

    let on_typing = Callback::new(move |typing: bool| presence.send_typing(typing));

    view! {
        <section class="case-docket">
            {header}
            {move || load_error.get().map(|msg| view! { <div class="error-panel">{msg}</div> })}
            <PresenceBar presence=presence />

            <div class="docket-body">
                <div class="docket-main">
                    <div class="docket-tabs">
                        <button
                            class=move || if tab.get() == DocketTab::List { "tab active" } else { "tab" }
                            on:click=move |_| tab.set(DocketTab::List)
                        >
                            "List"
                        </button>
                        <button
                            class=move || if tab.get() == DocketTab::Calendar { "tab active" } else { "tab" }
                            on:click=move |_| tab.set(DocketTab::Calendar)
                        >
                            "Calendar"
                        </button>
                    </div>

                    <FilterBar filters=filters sort=sort group_by=group_by type_facets=facets triggers=triggers />

                    {
                        let case_id = case_id.clone();
                        move || match tab.get() {
                            DocketTab::List => view! {
                                <DeadlineList case_id=case_id.clone() docket=docket expansion=expansion today=today />
                            }
                            .into_any(),
                            DocketTab::Calendar => view! {
                                <CalendarView
                                    deadlines=deadlines
                                    filters=calendar_filters
                                    today=today
                                    week_start=app_config().calendar.week_start
                                    on_reschedule=on_reschedule
                                />
                            }
                            .into_any(),
                        }
                    }
                </div>

                <ChatPanel case_id=case_id.clone() on_typing=on_typing />
            </div>
        </section>
    }
}
