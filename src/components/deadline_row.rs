//! Deadline Row Component

use std::collections::BTreeSet;

use chrono::NaiveDate;
use leptos::prelude::*;

use crate::actions;
use crate::context::use_app_context;
use crate::models::{Deadline, DeadlineStatus};
use crate::store::use_app_store;
use super::ConfirmButton;

const SNOOZE_CHOICES: [u32; 3] = [1, 3, 7];

fn due_label(deadline: &Deadline, today: NaiveDate) -> String {
    let Some(date) = deadline.deadline_date else {
        return "No date".to_string();
    };
    let formatted = date.format("%b %-d, %Y");
    if deadline.is_completed() {
        return formatted.to_string();
    }
    match deadline.days_until(today) {
        Some(0) => format!("{} · today", formatted),
        Some(1) => format!("{} · tomorrow", formatted),
        Some(n) if n > 1 => format!("{} · in {} days", formatted, n),
        Some(n) if deadline.is_overdue(today) => format!("{} · {} days overdue", formatted, -n),
        _ => formatted.to_string(),
    }
}

#[component]
pub fn DeadlineRow(
    deadline: Deadline,
    today: NaiveDate,
    selected: RwSignal<BTreeSet<String>>,
) -> impl IntoView {
    let ctx = use_app_context();
    let store = use_app_store();

    let id = deadline.id.clone();
    let case_id = deadline.case_id.clone();
    let status = deadline.status;
    let overdue = deadline.is_overdue(today);

    let row_class = format!(
        "deadline-row priority-{}{}{}",
        deadline.priority.as_str(),
        if overdue { " overdue" } else { "" },
        if deadline.is_completed() { " completed" } else { "" },
    );

    let select_id = id.clone();
    let is_selected = {
        let id = id.clone();
        move || selected.with(|s| s.contains(&id))
    };

    let set_status = {
        let (id, case_id) = (id.clone(), case_id.clone());
        move |status: DeadlineStatus| actions::change_status(store, ctx, case_id.clone(), id.clone(), status)
    };
    let complete = set_status.clone();
    let reopen = set_status.clone();
    let cancel = Callback::new(move |_: ()| set_status(DeadlineStatus::Cancelled));

    let on_date = {
        let (id, case_id) = (id.clone(), case_id.clone());
        move |ev: web_sys::Event| {
            let value = event_target_value(&ev);
            match NaiveDate::parse_from_str(&value, "%Y-%m-%d") {
                Ok(date) => actions::reschedule(store, ctx, case_id.clone(), id.clone(), date),
                Err(_) => ctx.toast_error(format!("Not a valid date: {}", value)),
            }
        }
    };

    let on_snooze = {
        let (id, case_id) = (id.clone(), case_id.clone());
        move |ev: web_sys::Event| {
            if let Ok(days) = event_target_value(&ev).parse::<u32>() {
                actions::snooze(store, ctx, case_id.clone(), id.clone(), days);
            }
        }
    };

    let citation = deadline.citation().map(str::to_string);
    let action = deadline.action_required.clone();
    let date_value = deadline.deadline_date.map(|d| d.format("%Y-%m-%d").to_string()).unwrap_or_default();

    view! {
        <div class=row_class>
            <input
                type="checkbox"
                prop:checked=is_selected
                on:change=move |_| selected.update(|s| {
                    if !s.remove(&select_id) {
                        s.insert(select_id.clone());
                    }
                })
            />
            <span class="priority-badge">{deadline.priority.label().to_string()}</span>
            <div class="deadline-main">
                <span class="deadline-title">{deadline.title.clone()}</span>
                {citation.map(|c| view! { <span class="deadline-citation">{c}</span> })}
                {action.map(|a| view! { <p class="deadline-action">{a}</p> })}
            </div>
            <span class="deadline-due">{due_label(&deadline, today)}</span>

            <div class="deadline-actions">
                {match status {
                    DeadlineStatus::Pending => view! {
                        <button class="action-btn" on:click=move |_| complete(DeadlineStatus::Completed)>"Complete"</button>
                        <input type="date" class="reschedule-input" value=date_value on:change=on_date />
                        <select class="snooze-select" on:change=on_snooze>
                            <option value="" selected=true>"Snooze…"</option>
                            {SNOOZE_CHOICES
                                .into_iter()
                                .map(|d| view! { <option value=d.to_string()>{format!("{} day{}", d, if d == 1 { "" } else { "s" })}</option> })
                                .collect_view()}
                        </select>
                        <ConfirmButton label="Cancel" prompt="Cancel deadline?" on_confirm=cancel />
                    }
                    .into_any(),
                    _ => view! {
                        <span class="status-label">{status.as_str()}</span>
                        <button class="action-btn" on:click=move |_| reopen(DeadlineStatus::Pending)>"Reopen"</button>
                    }
                    .into_any(),
                }}
            </div>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 3, 10).unwrap()
    }

    #[test]
    fn test_due_label() {
        let mut d = Deadline::new("d1", "c1", "Answer");
        assert_eq!(due_label(&d, today()), "No date");

        d.deadline_date = NaiveDate::from_ymd_opt(2026, 3, 13);
        assert_eq!(due_label(&d, today()), "Mar 13, 2026 · in 3 days");

        d.deadline_date = NaiveDate::from_ymd_opt(2026, 3, 8);
        assert_eq!(due_label(&d, today()), "Mar 8, 2026 · 2 days overdue");

        d.status = DeadlineStatus::Completed;
        assert_eq!(due_label(&d, today()), "Mar 8, 2026");
    }
}
