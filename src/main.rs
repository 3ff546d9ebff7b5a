//! LitDocket Frontend Entry Point

mod models;
mod config;
mod clock;
mod storage;
mod api;
mod bus;
mod socket;
mod polling;
mod context;
mod store;
mod actions;
mod components;
mod app;
mod markdown;

use app::App;
use leptos::prelude::*;

fn main() {
    console_error_panic_hook::set_once();
    wasm_tracing::set_as_global_default();

    tracing::info!(api = %config::app_config().api.base_url, "starting LitDocket frontend");
    mount_to_body(App);
}
