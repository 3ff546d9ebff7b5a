//! Case Presence Socket
//!
//! One WebSocket per case, shared by every component showing that case. Server messages
//! are folded into a `PresenceState` signal and relayed on the app bus. Teardown waits
//! `teardown_grace_ms` so an unmount immediately followed by a remount keeps the socket.

use std::cell::RefCell;

use docket_core::presence::{ClientMessage, ConnectionStatus, PresenceState, SocketEvent};
use docket_core::registry::LeaseRegistry;
use docket_core::DocketEvent;
use gloo_timers::callback::{Interval, Timeout};
use leptos::prelude::*;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{CloseEvent, Event, MessageEvent, WebSocket};

use crate::api::seg;
use crate::bus;
use crate::clock::now_ms;
use crate::config::app_config;
use crate::storage::token_store;

struct Connection {
    socket: Option<WebSocket>,
    state: ArcRwSignal<PresenceState>,
    _on_open: Closure<dyn FnMut(Event)>,
    _on_message: Closure<dyn FnMut(MessageEvent)>,
    _on_error: Closure<dyn FnMut(Event)>,
    _on_close: Closure<dyn FnMut(CloseEvent)>,
    _prune: Interval,
}

thread_local! {
    static CONNECTIONS: RefCell<LeaseRegistry<String, Connection>> = RefCell::new(LeaseRegistry::new());
}

/// Apply a state transition and relay its event after the signal write is done
fn update_and_relay(state: &ArcRwSignal<PresenceState>, f: impl FnOnce(&mut PresenceState) -> Option<DocketEvent>) {
    if let Some(event) = state.try_update(f).flatten() {
        bus::publish(event);
    }
}

fn socket_url(endpoint: &str, case_id: &str, token: Option<&str>) -> String {
    let mut url = format!("{}/ws/cases/{}", endpoint.trim_end_matches('/'), seg(case_id));
    if let Some(token) = token {
        url.push_str("?token=");
        url.push_str(&seg(token));
    }
    url
}

impl Connection {
    fn open(endpoint: &str, case_id: &str) -> Self {
        let config = &app_config().realtime;
        let state = ArcRwSignal::new(PresenceState::new(case_id, config.typing_timeout_ms));

        let on_open = {
            let state = state.clone();
            Closure::<dyn FnMut(Event)>::new(move |_: Event| {
                update_and_relay(&state, |s| {
                    s.last_error = None;
                    s.set_status(ConnectionStatus::Connected)
                });
            })
        };

        let on_message = {
            let state = state.clone();
            Closure::<dyn FnMut(MessageEvent)>::new(move |ev: MessageEvent| {
                let Some(text) = ev.data().as_string() else {
                    tracing::debug!("ignoring binary realtime frame");
                    return;
                };
                match serde_json::from_str::<SocketEvent>(&text) {
                    Ok(event) => update_and_relay(&state, |s| s.apply(event, now_ms())),
                    Err(e) => tracing::warn!("undecodable realtime message: {}", e),
                }
            })
        };

        let on_error = {
            let state = state.clone();
            Closure::<dyn FnMut(Event)>::new(move |_: Event| {
                update_and_relay(&state, |s| {
                    s.last_error = Some("connection error".to_string());
                    s.set_status(ConnectionStatus::Error)
                });
            })
        };

        let on_close = {
            let state = state.clone();
            Closure::<dyn FnMut(CloseEvent)>::new(move |ev: CloseEvent| {
                tracing::info!(code = ev.code(), "realtime socket closed");
                update_and_relay(&state, |s| match s.status {
                    ConnectionStatus::Error => None,
                    _ => s.go_offline(),
                });
            })
        };

        let prune = {
            let state = state.clone();
            Interval::new(config.typing_prune_ms, move || {
                let has_typing = state.with_untracked(|s| !s.typing().is_empty());
                if has_typing {
                    state.update(|s| {
                        s.prune(now_ms());
                    });
                }
            })
        };

        let url = socket_url(endpoint, case_id, token_store().token().as_deref());
        let socket = match WebSocket::new(&url) {
            Ok(socket) => {
                socket.set_onopen(Some(on_open.as_ref().unchecked_ref()));
                socket.set_onmessage(Some(on_message.as_ref().unchecked_ref()));
                socket.set_onerror(Some(on_error.as_ref().unchecked_ref()));
                socket.set_onclose(Some(on_close.as_ref().unchecked_ref()));
                state.update(|s| {
                    s.set_status(ConnectionStatus::Connecting);
                });
                tracing::info!(case_id, "realtime socket opening");
                Some(socket)
            }
            Err(e) => {
                tracing::warn!(case_id, "realtime socket rejected: {:?}", e);
                state.update(|s| {
                    s.last_error = Some("could not open realtime connection".to_string());
                    s.set_status(ConnectionStatus::Error);
                });
                None
            }
        };

        Self {
            socket,
            state,
            _on_open: on_open,
            _on_message: on_message,
            _on_error: on_error,
            _on_close: on_close,
            _prune: prune,
        }
    }

    fn send(&self, message: &ClientMessage) {
        let Some(socket) = self.socket.as_ref().filter(|s| s.ready_state() == WebSocket::OPEN) else {
            return;
        };
        match serde_json::to_string(message) {
            Ok(text) => {
                if let Err(e) = socket.send_with_str(&text) {
                    tracing::debug!("realtime send failed: {:?}", e);
                }
            }
            Err(e) => tracing::warn!("could not encode realtime message: {}", e),
        }
    }

    /// Detach handlers before closing so no callback outlives its closure
    fn shutdown(self) {
        if let Some(socket) = &self.socket {
            socket.set_onopen(None);
            socket.set_onmessage(None);
            socket.set_onerror(None);
            socket.set_onclose(None);
            let _ = socket.close();
        }
        update_and_relay(&self.state, |s| s.go_offline());
    }
}

/// Presence of one case, valid while the calling component is mounted
#[derive(Clone, Copy)]
pub struct PresenceHandle {
    case_id: StoredValue<String>,
    pub state: ReadSignal<PresenceState>,
}

impl PresenceHandle {
    pub fn send_typing(&self, is_typing: bool) {
        let case_id = self.case_id.get_value();
        CONNECTIONS.with(|registry| {
            if let Some(connection) = registry.borrow().get(&case_id) {
                connection.send(&ClientMessage::Typing { is_typing });
            }
        });
    }
}

/// Join the presence channel of `case_id` for the lifetime of the current component
pub fn use_case_presence(case_id: String) -> PresenceHandle {
    let realtime = &app_config().realtime;
    let Some(endpoint) = realtime.endpoint() else {
        tracing::debug!("no realtime endpoint configured, presence stays offline");
        let offline = RwSignal::new(PresenceState::new(case_id.clone(), realtime.typing_timeout_ms));
        return PresenceHandle { case_id: StoredValue::new(case_id), state: offline.read_only() };
    };

    let state = CONNECTIONS.with(|registry| {
        let mut registry = registry.borrow_mut();
        if registry.acquire(case_id.clone(), || Connection::open(endpoint, &case_id)) {
            tracing::debug!(case_id = %case_id, "created realtime connection");
        }
        registry.get(&case_id).map(|c| c.state.clone())
    });
    let state = state.unwrap_or_else(|| ArcRwSignal::new(PresenceState::new(case_id.clone(), realtime.typing_timeout_ms)));

    let grace = realtime.teardown_grace_ms;
    let key = case_id.clone();
    on_cleanup(move || {
        let remaining = CONNECTIONS.with(|registry| registry.borrow_mut().release(&key));
        if remaining > 0 {
            return;
        }
        Timeout::new(grace, move || {
            let reclaimed = CONNECTIONS.with(|registry| registry.borrow_mut().reclaim(&key));
            if let Some(connection) = reclaimed {
                tracing::debug!(case_id = %key, "closing realtime connection");
                connection.shutdown();
            }
        })
        .forget();
    });

    PresenceHandle { case_id: StoredValue::new(case_id), state: RwSignal::from(state).read_only() }
}
