//! Application Context
//!
//! Shared state provided via Leptos Context API.

use docket_core::recent::RecentEntry;
use gloo_timers::callback::Timeout;
use leptos::prelude::*;

use crate::clock::now_ms;
use crate::storage::recent_tools;

const TOAST_MS: u32 = 5_000;

/// Top-level screens
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Page {
    Dashboard,
    Cases,
    Case(String),
    Assistant,
    Health,
}

impl Page {
    /// Screens remembered in the recent-tools list
    pub fn tool(&self) -> Option<(&'static str, &'static str)> {
        match self {
            Page::Cases => Some(("cases", "Cases")),
            Page::Assistant => Some(("assistant", "Assistant")),
            Page::Health => Some(("health", "Scraper health")),
            Page::Dashboard | Page::Case(_) => None,
        }
    }

    pub fn from_tool(id: &str) -> Option<Self> {
        match id {
            "cases" => Some(Page::Cases),
            "assistant" => Some(Page::Assistant),
            "health" => Some(Page::Health),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastKind {
    Info,
    Error,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Toast {
    pub id: u64,
    pub kind: ToastKind,
    pub message: String,
}

/// App-wide signals provided via context
#[derive(Clone, Copy)]
pub struct AppContext {
    /// Current screen
    pub page: RwSignal<Page>,
    /// Non-blocking messages, oldest first
    pub toasts: RwSignal<Vec<Toast>>,
    next_toast: StoredValue<u64>,
}

impl AppContext {
    pub fn new() -> Self {
        Self {
            page: RwSignal::new(Page::Dashboard),
            toasts: RwSignal::new(Vec::new()),
            next_toast: StoredValue::new(1),
        }
    }

    pub fn navigate(&self, page: Page) {
        if self.page.with_untracked(|current| *current == page) {
            return;
        }
        if let Some((id, label)) = page.tool() {
            let entry = RecentEntry { id: id.to_string(), label: label.to_string(), subtitle: None, visited_at_ms: now_ms() };
            if let Err(e) = recent_tools().touch(entry) {
                tracing::debug!("recent tools not persisted: {}", e);
            }
        }
        self.page.set(page);
    }

    /// Case id of the docket on screen, if any
    pub fn current_case(&self) -> Option<String> {
        match self.page.get() {
            Page::Case(id) => Some(id),
            _ => None,
        }
    }

    fn push_toast(&self, kind: ToastKind, message: String) {
        let id = self.next_toast.get_value();
        self.next_toast.set_value(id + 1);
        self.toasts.update(|t| t.push(Toast { id, kind, message }));

        let toasts = self.toasts;
        Timeout::new(TOAST_MS, move || {
            toasts.try_update(|t| t.retain(|toast| toast.id != id));
        })
        .forget();
    }

    pub fn toast_info(&self, message: impl Into<String>) {
        self.push_toast(ToastKind::Info, message.into());
    }

    pub fn toast_error(&self, message: impl Into<String>) {
        let message = message.into();
        tracing::warn!("{}", message);
        self.push_toast(ToastKind::Error, message);
    }

    pub fn dismiss_toast(&self, id: u64) {
        self.toasts.update(|t| t.retain(|toast| toast.id != id));
    }
}

pub fn use_app_context() -> AppContext {
    expect_context::<AppContext>()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tool_ids_round_trip_pages() {
        for page in [Page::Cases, Page::Assistant, Page::Health] {
            let (id, _) = page.tool().unwrap();
            assert_eq!(Page::from_tool(id), Some(page));
        }
        assert!(Page::Case("c1".to_string()).tool().is_none());
        assert!(Page::from_tool("settings").is_none());
    }
}
