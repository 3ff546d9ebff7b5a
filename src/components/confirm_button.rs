//! Confirm Button Component
//!
//! Inline two-step confirmation for actions that are awkward to undo (cancelling a deadline,
//! bulk edits).

use leptos::prelude::*;

/// Shows `label`; once clicked, asks `prompt` with ✓/✗ before running `on_confirm`
#[component]
pub fn ConfirmButton(
    #[prop(into)] label: String,
    #[prop(into)] prompt: String,
    #[prop(into)] on_confirm: Callback<()>,
    #[prop(optional, into)] button_class: Option<String>,
) -> impl IntoView {
    let (confirming, set_confirming) = signal(false);
    let button_class = button_class.unwrap_or_else(|| "action-btn".to_string());

    view! {
        <Show
            when=move || confirming.get()
            fallback=move || {
                let label = label.clone();
                view! {
                    <button
                        class=button_class.clone()
                        on:click=move |ev| {
                            ev.stop_propagation();
                            set_confirming.set(true);
                        }
                    >
                        {label}
                    </button>
                }
            }
        >
            <span class="confirm-inline">
                <span class="confirm-text">{prompt.clone()}</span>
                <button
                    class="confirm-btn"
                    on:click=move |ev| {
                        ev.stop_propagation();
                        set_confirming.set(false);
                        on_confirm.run(());
                    }
                >
                    "✓"
                </button>
                <button
                    class="cancel-btn"
                    on:click=move |ev| {
                        ev.stop_propagation();
                        set_confirming.set(false);
                    }
                >
                    "✗"
                </button>
            </span>
        </Show>
    }
}
