//! Global Application State Store
//!
//! Uses Leptos reactive_stores for fine-grained reactivity.

use docket_core::cache::DeadlineCache;
use docket_core::recent::RecentEntry;
use leptos::prelude::*;
use reactive_stores::Store;

use crate::clock::{now_ms, today};
use crate::models::{Case, CaseStats, DashboardStats, Trigger};
use crate::storage::recent_cases;

/// Global application state with field-level reactivity
#[derive(Clone, Debug, Default, Store)]
pub struct AppState {
    /// Cases visible to the user, `_stats` filled in client-side
    pub cases: Vec<Case>,
    /// Case whose docket is loaded into `deadlines`/`triggers`
    pub active_case: Option<String>,
    /// Deadlines of the active case
    pub deadlines: DeadlineCache,
    /// Triggers of the active case
    pub triggers: Vec<Trigger>,
    pub dashboard: Option<DashboardStats>,
    pub unread_notifications: u32,
    pub recent_cases: Vec<RecentEntry>,
}

impl AppState {
    pub fn new() -> Self {
        Self {
            recent_cases: recent_cases().list(),
            ..Default::default()
        }
    }
}

/// Type alias for the store
pub type AppStore = Store<AppState>;

/// Get the app store from context
pub fn use_app_store() -> AppStore {
    expect_context::<AppStore>()
}

// ========================
// Store Helper Functions
// ========================

/// Responses for a case the user already left are dropped
pub fn store_is_active_case(store: &AppStore, case_id: &str) -> bool {
    store.active_case().get_untracked().as_deref() == Some(case_id)
}

/// Switch the docket to another case, clearing the previous case's data
pub fn store_open_case(store: &AppStore, case_id: &str) {
    if store_is_active_case(store, case_id) {
        return;
    }
    store.active_case().set(Some(case_id.to_string()));
    store.deadlines().write().replace_all(Vec::new());
    store.triggers().write().clear();
}

/// Update a case in the store by ID
pub fn store_update_case(store: &AppStore, updated: Case) {
    let cases_field = store.cases();
    let mut cases = cases_field.write();
    match cases.iter_mut().find(|c| c.id == updated.id) {
        Some(case) => *case = updated,
        None => cases.push(updated),
    }
}

/// Merge a partial stats update into a case, starting from empty stats if none arrived yet
pub fn store_update_case_stats(store: &AppStore, case_id: &str, update: impl FnOnce(CaseStats) -> CaseStats) {
    if let Some(case) = store.cases().write().iter_mut().find(|c| c.id == case_id) {
        let current = case.stats.take().unwrap_or_default();
        case.stats = Some(update(current));
    }
}

/// Recompute the active case's pending count and next deadline from the cache
pub fn store_refresh_active_stats(store: &AppStore, case_id: &str) {
    let deadlines = store.deadlines().with_untracked(|cache| cache.items().to_vec());
    store_update_case_stats(store, case_id, |stats| stats.with_deadlines(&deadlines, today()));
}

/// Record a visit in the persisted recent-cases list and mirror it into the store
pub fn store_touch_recent_case(store: &AppStore, case: &Case) {
    let entry = RecentEntry {
        id: case.id.clone(),
        label: case.case_number.clone(),
        subtitle: Some(case.title.clone()),
        visited_at_ms: now_ms(),
    };
    match recent_cases().touch(entry) {
        Ok(list) => store.recent_cases().set(list),
        Err(e) => tracing::warn!("could not persist recent cases: {}", e),
    }
}
