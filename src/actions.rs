//! Deadline Actions
//!
//! Optimistic mutations: the cache changes first, the request follows, and a failed
//! request puts the captured records back, toasts, then re-fetches the case's deadlines.

use chrono::NaiveDate;
use docket_core::calendar::plan_reschedule;
use docket_core::DocketEvent;
use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::api::{self, ApiResult};
use crate::bus;
use crate::context::AppContext;
use crate::models::{Deadline, DeadlineStatus};
use crate::store::{store_is_active_case, store_refresh_active_stats, store_update_case_stats, AppStore, AppStateStoreFields};
use crate::clock::today;

/// Authoritative reload of the active case's deadlines
pub async fn refetch_deadlines(store: AppStore, case_id: &str) -> ApiResult<()> {
    let deadlines = api::list_case_deadlines(case_id).await?;
    if store_is_active_case(&store, case_id) {
        store.deadlines().write().replace_all(deadlines);
        store_refresh_active_stats(&store, case_id);
    }
    Ok(())
}

pub async fn refetch_triggers(store: AppStore, case_id: &str) -> ApiResult<()> {
    let triggers = api::list_case_triggers(case_id).await?;
    if store_is_active_case(&store, case_id) {
        store.triggers().set(triggers);
    }
    Ok(())
}

/// Deadlines and triggers load independently; one failing does not stop the other
pub fn load_case(store: AppStore, ctx: AppContext, case_id: String) {
    let id = case_id.clone();
    spawn_local(async move {
        if let Err(e) = refetch_deadlines(store, &id).await {
            ctx.toast_error(format!("Could not load deadlines: {}", e));
        }
    });
    spawn_local(async move {
        if let Err(e) = refetch_triggers(store, &case_id).await {
            ctx.toast_error(format!("Could not load triggers: {}", e));
        }
    });
}

async fn recover(store: AppStore, ctx: AppContext, case_id: &str, previous: Vec<Deadline>, what: &str, err: api::ApiError) {
    if store_is_active_case(&store, case_id) {
        {
            let deadlines = store.deadlines();
            let mut cache = deadlines.write();
            for deadline in previous {
                cache.restore(deadline);
            }
        }
        changed(&store, case_id);
    }
    ctx.toast_error(format!("Could not {}: {}", what, err));
    if let Err(e) = refetch_deadlines(store, case_id).await {
        tracing::warn!(case_id, "re-fetch after failed update also failed: {}", e);
    }
}

fn changed(store: &AppStore, case_id: &str) {
    store_refresh_active_stats(store, case_id);
    bus::publish(DocketEvent::DeadlinesChanged { case_id: case_id.to_string() });
}

pub fn change_status(store: AppStore, ctx: AppContext, case_id: String, deadline_id: String, status: DeadlineStatus) {
    let applied = store.deadlines().write().set_status(&deadline_id, status);
    let previous = match applied {
        Ok(previous) => previous,
        Err(e) => {
            ctx.toast_error(e.to_string());
            return;
        }
    };
    changed(&store, &case_id);

    spawn_local(async move {
        match api::update_deadline_status(&deadline_id, status).await {
            Ok(updated) => {
                if store_is_active_case(&store, &case_id) {
                    store.deadlines().write().upsert(updated);
                }
            }
            Err(e) => recover(store, ctx, &case_id, vec![previous], "update the deadline", e).await,
        }
    });
}

/// Calendar drop or date edit; dropping on the same day is a no-op
pub fn reschedule(store: AppStore, ctx: AppContext, case_id: String, deadline_id: String, new_date: NaiveDate) {
    let request = store
        .deadlines()
        .with_untracked(|cache| cache.get(&deadline_id).and_then(|d| plan_reschedule(d, new_date)));
    let Some(request) = request else {
        return;
    };

    let applied = store.deadlines().write().reschedule(&request.deadline_id, request.new_date);
    let previous = match applied {
        Ok(previous) => previous,
        Err(e) => {
            ctx.toast_error(e.to_string());
            return;
        }
    };
    changed(&store, &case_id);

    spawn_local(async move {
        match api::reschedule_deadline(&request.deadline_id, request.new_date, None).await {
            Ok(updated) => {
                if store_is_active_case(&store, &case_id) {
                    store.deadlines().write().upsert(updated);
                }
                ctx.toast_info(format!("Moved to {}", request.new_date.format("%b %-d, %Y")));
            }
            Err(e) => recover(store, ctx, &case_id, vec![previous], "reschedule the deadline", e).await,
        }
    });
}

/// Snooze is computed server-side, so the cache waits for the response
pub fn snooze(store: AppStore, ctx: AppContext, case_id: String, deadline_id: String, days: u32) {
    spawn_local(async move {
        match api::snooze_deadline(&deadline_id, days).await {
            Ok(updated) => {
                if store_is_active_case(&store, &case_id) {
                    store.deadlines().write().upsert(updated);
                    changed(&store, &case_id);
                }
                ctx.toast_info(format!("Snoozed {} day{}", days, if days == 1 { "" } else { "s" }));
            }
            Err(e) => ctx.toast_error(format!("Could not snooze the deadline: {}", e)),
        }
    });
}

pub fn bulk_status(store: AppStore, ctx: AppContext, case_id: String, deadline_ids: Vec<String>, status: DeadlineStatus) {
    if deadline_ids.is_empty() {
        return;
    }
    let previous = store.deadlines().write().set_status_many(&deadline_ids, status);
    changed(&store, &case_id);

    spawn_local(async move {
        match api::bulk_update_status(&deadline_ids, status).await {
            Ok(result) if result.failed.is_empty() => {
                ctx.toast_info(format!("Updated {} deadline{}", result.updated, if result.updated == 1 { "" } else { "s" }));
            }
            Ok(result) => {
                ctx.toast_error(format!("{} of {} deadlines could not be updated", result.failed.len(), deadline_ids.len()));
                if let Err(e) = refetch_deadlines(store, &case_id).await {
                    tracing::warn!(case_id = %case_id, "re-fetch after partial bulk update failed: {}", e);
                }
            }
            Err(e) => recover(store, ctx, &case_id, previous, "update the selected deadlines", e).await,
        }
    });
}

/// Per-case document and deadline counts for the case list.
/// Both requests start at once and each half is stored as soon as it arrives.
pub fn load_case_stats(store: AppStore, case_ids: Vec<String>) {
    for case_id in case_ids {
        let docs_case = case_id.clone();
        spawn_local(async move {
            match api::list_case_documents(&docs_case).await {
                Ok(documents) => {
                    store_update_case_stats(&store, &docs_case, |stats| stats.with_document_count(documents.len()));
                }
                Err(e) => tracing::warn!(case_id = %docs_case, "document count unavailable: {}", e),
            }
        });
        spawn_local(async move {
            match api::list_case_deadlines(&case_id).await {
                Ok(deadlines) => {
                    store_update_case_stats(&store, &case_id, |stats| stats.with_deadlines(&deadlines, today()));
                }
                Err(e) => tracing::warn!(case_id = %case_id, "deadline stats unavailable: {}", e),
            }
        });
    }
}
