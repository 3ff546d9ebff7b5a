//! Scraper Health Component
//!
//! Court-rule scraper status from the backend monitor, polled while the tab is visible.

use leptos::prelude::*;

use crate::api;
use crate::config::app_config;
use crate::models::{HealthStatus, ScraperHealth, ScraperSource};
use crate::polling::poll_while_visible;

#[component]
fn SourceRow(source: ScraperSource) -> impl IntoView {
    let status = source.effective_status();
    let failures = source.consecutive_failures;
    view! {
        <tr class={status.css_class()}>
            <td>{source.name}</td>
            <td>{source.jurisdiction.unwrap_or_else(|| "—".to_string())}</td>
            <td><span class="health-pill">{status.label()}</span></td>
            <td>{source.last_success_at.unwrap_or_else(|| "never".to_string())}</td>
            <td>{(failures > 0).then(|| failures.to_string())}</td>
            <td class="health-error">{source.last_error.unwrap_or_default()}</td>
        </tr>
    }
}

#[component]
pub fn HealthDashboard() -> impl IntoView {
    let (health, set_health) = signal::<Option<ScraperHealth>>(None);
    let (error, set_error) = signal::<Option<String>>(None);

    // The last good report stays on screen while a poll fails
    poll_while_visible(app_config().polling.health_secs, move || async move {
        match api::get_scraper_health().await {
            Ok(report) => {
                set_health.set(Some(report));
                set_error.set(None);
            }
            Err(e) => {
                tracing::warn!("scraper health unavailable: {}", e);
                set_error.set(Some(e.to_string()));
            }
        }
    });

    view! {
        <section class="health-dashboard">
            <h1>"Scraper health"</h1>

            {move || error.get().map(|msg| view! { <div class="error-panel">{msg}</div> })}

            {move || match health.get() {
                Some(report) => {
                    let overall: HealthStatus = report.overall();
                    let counts = report.counts();
                    let checked = report.checked_at.clone().unwrap_or_default();
                    view! {
                        <div class={format!("health-summary {}", overall.css_class())}>
                            <strong>{overall.label()}</strong>
                            <span>{format!(
                                "{} healthy · {} degraded · {} down · {} unknown",
                                counts.healthy, counts.degraded, counts.down, counts.unknown,
                            )}</span>
                            <span class="health-checked">{checked}</span>
                        </div>
                        <table class="health-table">
                            <thead>
                                <tr>
                                    <th>"Source"</th>
                                    <th>"Jurisdiction"</th>
                                    <th>"Status"</th>
                                    <th>"Last success"</th>
                                    <th>"Failures"</th>
                                    <th>"Last error"</th>
                                </tr>
                            </thead>
                            <tbody>
                                {report
                                    .by_severity()
                                    .into_iter()
                                    .map(|source| view! { <SourceRow source=source /> })
                                    .collect_view()}
                            </tbody>
                        </table>
                    }
                    .into_any()
                }
                None => view! { <p class="loading">"Loading…"</p> }.into_any(),
            }}
        </section>
    }
}
