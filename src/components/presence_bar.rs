//! Presence Bar Component
//!
//! Who else has the case open, who is typing, and the socket state.

use docket_core::presence::ConnectionStatus;
use leptos::prelude::*;

use crate::socket::PresenceHandle;

#[component]
pub fn PresenceBar(presence: PresenceHandle) -> impl IntoView {
    let state = presence.state;

    let status_class = move || match state.with(|s| s.status) {
        ConnectionStatus::Connected => "presence-status connected",
        ConnectionStatus::Connecting => "presence-status connecting",
        ConnectionStatus::Error => "presence-status error",
        ConnectionStatus::Offline => "presence-status offline",
    };

    view! {
        <div class="presence-bar">
            <span class=status_class title=move || state.with(|s| s.last_error.clone().unwrap_or_default())>
                {move || state.with(|s| s.status.label())}
            </span>
            <div class="presence-avatars">
                <For
                    each=move || state.with(|s| s.users.clone())
                    key=|user| user.user_id.clone()
                    children=move |user| {
                        view! {
                            <span class="avatar" title=user.display_name().to_string()>
                                {user.initials()}
                            </span>
                        }
                    }
                />
            </div>
            <span class="typing-line">{move || state.with(|s| s.typing_line()).unwrap_or_default()}</span>
        </div>
    }
}
