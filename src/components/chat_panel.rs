//! Assistant Chat Panel Component
//!
//! Case-scoped when a case id is given. Responses render as sanitized Markdown.

use docket_core::DocketEvent;
use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::actions::refetch_deadlines;
use crate::api;
use crate::bus;
use crate::context::use_app_context;
use crate::markdown::render_markdown;
use crate::models::{ChatMessage, ChatRole};
use crate::store::{use_app_store, AppStateStoreFields};

const HISTORY_LIMIT: u32 = 50;

#[component]
pub fn ChatPanel(
    #[prop(optional, into)] case_id: Option<String>,
    /// Fires with `true` while the user types and `false` once the draft is sent or cleared
    #[prop(optional, into)] on_typing: Option<Callback<bool>>,
) -> impl IntoView {
    let ctx = use_app_context();
    let store = use_app_store();
    let (messages, set_messages) = signal(Vec::<ChatMessage>::new());
    let (draft, set_draft) = signal(String::new());
    let (sending, set_sending) = signal(false);
    let case_id = StoredValue::new(case_id);

    spawn_local(async move {
        let scope = case_id.get_value();
        match api::chat_history(scope.as_deref(), HISTORY_LIMIT).await {
            Ok(history) => set_messages.set(history),
            Err(e) => tracing::debug!("chat history unavailable: {}", e),
        }
    });

    let notify_typing = move |typing: bool| {
        if let Some(cb) = on_typing {
            cb.run(typing);
        }
    };

    let on_submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        let text = draft.get_untracked().trim().to_string();
        if text.is_empty() || sending.get_untracked() {
            return;
        }
        set_draft.set(String::new());
        notify_typing(false);
        set_messages.update(|m| m.push(ChatMessage::user(text.clone())));
        set_sending.set(true);

        spawn_local(async move {
            let scope = case_id.get_value();
            match api::send_message(&text, scope.as_deref()).await {
                Ok(reply) => {
                    set_messages.update(|m| m.push(ChatMessage::assistant(reply.response)));
                    if let (true, Some(case)) = (reply.deadlines_changed, scope) {
                        if let Err(e) = refetch_deadlines(store, &case).await {
                            tracing::warn!("deadline refresh after chat failed: {}", e);
                        }
                        bus::publish(DocketEvent::DeadlinesChanged { case_id: case });
                    }
                }
                Err(e) => ctx.toast_error(format!("Assistant unavailable: {}", e)),
            }
            set_sending.set(false);
        });
    };

    let scope_label = move || {
        let scope = case_id.get_value()?;
        let number = store
            .cases()
            .with(|cases| cases.iter().find(|c| c.id == scope).map(|c| c.case_number.clone()));
        Some(format!("Scoped to case {}", number.unwrap_or(scope)))
    };

    view! {
        <aside class="chat-panel">
            <header class="chat-header">
                <h2>"Assistant"</h2>
                <span class="chat-scope">{scope_label}</span>
            </header>
            <div class="chat-messages">
                <For
                    each={move || messages.get().into_iter().enumerate().collect::<Vec<_>>()}
                    key=|(i, m)| (*i, m.content.len())
                    children={move |(_, message): (usize, ChatMessage)| {
                        match message.role {
                            ChatRole::User => view! { <div class="chat-message user">{message.content}</div> }.into_any(),
                            ChatRole::Assistant => {
                                let html = render_markdown(&message.content);
                                view! { <div class="chat-message assistant markdown-body" inner_html=html></div> }.into_any()
                            }
                        }
                    }}
                />
                <Show when=move || sending.get()>
                    <div class="chat-message assistant pending">"Thinking…"</div>
                </Show>
            </div>
            <form class="chat-form" on:submit=on_submit>
                <textarea
                    class="chat-input"
                    placeholder="Ask about deadlines, rules, filings…"
                    prop:value=move || draft.get()
                    on:input=move |ev| {
                        let value = event_target_value(&ev);
                        notify_typing(!value.trim().is_empty());
                        set_draft.set(value);
                    }
                ></textarea>
                <button type="submit" disabled=move || sending.get()>"Send"</button>
            </form>
        </aside>
    }
}
