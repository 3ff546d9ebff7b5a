//! LitDocket Frontend App
//!
//! Shell: navigation, the active screen, and the toast host.

use leptos::prelude::*;
use reactive_stores::Store;

use crate::components::{AssistantPage, CaseDocket, CaseList, Dashboard, HealthDashboard, NavBar, ToastHost};
use crate::context::{AppContext, Page};
use crate::store::AppState;

#[component]
pub fn App() -> impl IntoView {
    let ctx = AppContext::new();
    provide_context(ctx);
    provide_context(Store::new(AppState::new()));

    view! {
        <div class="app-layout">
            <NavBar />
            <main class="main-content">
                {move || match ctx.page.get() {
                    Page::Dashboard => view! { <Dashboard /> }.into_any(),
                    Page::Cases => view! { <CaseList /> }.into_any(),
                    Page::Case(case_id) => view! { <CaseDocket case_id=case_id /> }.into_any(),
                    Page::Assistant => view! { <AssistantPage /> }.into_any(),
                    Page::Health => view! { <HealthDashboard /> }.into_any(),
                }}
            </main>
            <ToastHost />
        </div>
    }
}
