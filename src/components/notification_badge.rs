//! Notification Badge Component
//!
//! Polls the unread count while the tab is visible; the dropdown lists unread items.

use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::api;
use crate::config::app_config;
use crate::context::{use_app_context, Page};
use crate::models::Notification;
use crate::polling::poll_while_visible;
use crate::store::{use_app_store, AppStateStoreFields};

#[component]
pub fn NotificationBadge() -> impl IntoView {
    let ctx = use_app_context();
    let store = use_app_store();
    let (open, set_open) = signal(false);
    let (items, set_items) = signal(Vec::<Notification>::new());

    poll_while_visible(app_config().polling.notifications_secs, move || async move {
        match api::unread_count().await {
            Ok(count) => store.unread_notifications().set(count),
            Err(e) => tracing::debug!("unread count unavailable: {}", e),
        }
    });

    let toggle = move |_| {
        let opening = !open.get_untracked();
        set_open.set(opening);
        if opening {
            spawn_local(async move {
                match api::list_notifications(10, true).await {
                    Ok(list) => set_items.set(list),
                    Err(e) => ctx.toast_error(format!("Could not load notifications: {}", e)),
                }
            });
        }
    };

    let open_notification = move |n: Notification| {
        set_items.update(|list| list.retain(|item| item.id != n.id));
        store.unread_notifications().update(|c| *c = c.saturating_sub(1));
        if let Some(case_id) = n.case_id.clone() {
            ctx.navigate(Page::Case(case_id));
            set_open.set(false);
        }
        spawn_local(async move {
            if let Err(e) = api::mark_read(&n.id).await {
                tracing::warn!("mark read failed: {}", e);
            }
        });
    };

    view! {
        <div class="notification-badge">
            <button class="notification-btn" on:click=toggle>
                "🔔"
                <Show when=move || { store.unread_notifications().get() > 0 }>
                    <span class="badge-count">{move || store.unread_notifications().get()}</span>
                </Show>
            </button>
            <Show when=move || open.get()>
                <div class="notification-dropdown">
                    <Show
                        when=move || !items.get().is_empty()
                        fallback=|| view! { <p class="empty-hint">"No unread notifications"</p> }
                    >
                        <For
                            each=move || items.get()
                            key=|n| n.id.clone()
                            children=move |n| {
                                let title = n.title.clone();
                                let message = n.message.clone().unwrap_or_default();
                                view! {
                                    <div class="notification-item" on:click=move |_| open_notification(n.clone())>
                                        <strong>{title}</strong>
                                        <p>{message}</p>
                                    </div>
                                }
                            }
                        />
                    </Show>
                </div>
            </Show>
        </div>
    }
}
