//! Visibility-Gated Polling
//!
//! Re-runs a fetch on a fixed interval while the tab is visible. No backoff; a failing
//! task simply runs again on the next tick.

use std::future::Future;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use gloo_timers::future::TimeoutFuture;
use leptos::prelude::*;
use leptos::task::spawn_local;
use web_sys::VisibilityState;

fn page_visible() -> bool {
    web_sys::window()
        .and_then(|w| w.document())
        .map_or(true, |d| d.visibility_state() == VisibilityState::Visible)
}

/// Runs `task` now and then every `interval_secs` while visible, until the owner is cleaned up
pub fn poll_while_visible<F, Fut>(interval_secs: u32, task: F)
where
    F: Fn() -> Fut + 'static,
    Fut: Future<Output = ()> + 'static,
{
    let stopped = Arc::new(AtomicBool::new(false));
    let flag = stopped.clone();
    on_cleanup(move || flag.store(true, Ordering::Relaxed));

    let delay_ms = interval_secs.max(1).saturating_mul(1_000);
    spawn_local(async move {
        task().await;
        loop {
            TimeoutFuture::new(delay_ms).await;
            if stopped.load(Ordering::Relaxed) {
                break;
            }
            if page_visible() {
                task().await;
            }
        }
    });
}
