//! Calendar View Component
//!
//! Month grid of deadline chips with per-day indicator dots. Dragging a chip onto another
//! day hands `(deadline_id, new_date)` to `on_reschedule`; persisting it is the caller's job.

use chrono::{Datelike, NaiveDate};
use docket_core::calendar::{month_grid, shift_month, to_calendar_events, CalendarFilters, DayIndex, EventStyle, WeekStart};
use leptos::prelude::*;
use leptos_dragdrop::{bind_global_mouseup, create_dnd_signals, make_on_mousedown, make_on_mouseleave, make_on_target_mouseenter};

use crate::models::Deadline;

/// Chips shown per cell before collapsing into "+N more"
const MAX_CHIPS: usize = 3;

#[component]
pub fn CalendarView(
    #[prop(into)] deadlines: Signal<Vec<Deadline>>,
    /// Priority/status selections shared with the list view
    #[prop(into)] filters: Signal<CalendarFilters>,
    today: NaiveDate,
    week_start: WeekStart,
    #[prop(into)] on_reschedule: Callback<(String, NaiveDate)>,
) -> impl IntoView {
    let month = RwSignal::new((today.year(), today.month()));

    let index = Memo::new(move |_| {
        let events = deadlines.with(|d| filters.with(|f| to_calendar_events(d, f, today)));
        DayIndex::from_events(&events, today)
    });

    let dnd = create_dnd_signals::<NaiveDate>();
    bind_global_mouseup(dnd, move |deadline_id, date| on_reschedule.run((deadline_id, date)));

    let shift = move |delta: i32| month.update(|(y, m)| (*y, *m) = shift_month(*y, *m, delta));

    let headers = week_start
        .headers()
        .into_iter()
        .map(|h| view! { <div class="calendar-header-cell">{h}</div> })
        .collect_view();

    view! {
        <div class="calendar-view" class:dragging=move || dnd.is_dragging()>
            <div class="calendar-toolbar">
                <button on:click=move |_| shift(-1)>"‹"</button>
                <span class="calendar-title">
                    {move || {
                        let (y, m) = month.get();
                        NaiveDate::from_ymd_opt(y, m, 1).map(|d| d.format("%B %Y").to_string()).unwrap_or_default()
                    }}
                </span>
                <button on:click=move |_| shift(1)>"›"</button>
                <button on:click=move |_| month.set((today.year(), today.month()))>"Today"</button>
            </div>

            <div class="calendar-grid">
                {headers}
                {move || {
                    let (year, m) = month.get();
                    month_grid(year, m, week_start)
                        .into_iter()
                        .flatten()
                        .map(|day| {
                            let in_month = day.month() == m;
                            let cell_class = move || {
                                let mut class = String::from("calendar-cell");
                                if !in_month { class.push_str(" outside"); }
                                if day == today { class.push_str(" today"); }
                                if dnd.is_target(&day) { class.push_str(" drop-target"); }
                                class
                            };
                            let indicator = index.with(|i| i.indicator(day));
                            let deadlines = index.with(|i| i.on(day).to_vec());
                            let more = deadlines.len().saturating_sub(MAX_CHIPS);

                            view! {
                                <div
                                    class=cell_class
                                    title=indicator.tooltip()
                                    on:mouseenter=make_on_target_mouseenter(dnd, day)
                                    on:mouseleave=make_on_mouseleave(dnd)
                                >
                                    <div class="cell-head">
                                        <span class="day-number">{day.day()}</span>
                                        <span class="indicator-dots">
                                            {(indicator.overdue > 0).then(|| view! { <span class="dot dot-overdue"></span> })}
                                            {(indicator.urgent > 0).then(|| view! { <span class="dot dot-urgent"></span> })}
                                            {(indicator.total > indicator.urgent + indicator.completed).then(|| view! { <span class="dot dot-normal"></span> })}
                                            {(indicator.completed > 0).then(|| view! { <span class="dot dot-completed"></span> })}
                                        </span>
                                    </div>
                                    {deadlines
                                        .into_iter()
                                        .take(MAX_CHIPS)
                                        .map(|d| {
                                            let style = EventStyle::for_deadline(&d, today).to_css();
                                            let id = d.id.clone();
                                            let draggable = !d.is_completed();
                                            let title = d.title.clone();
                                            let tooltip = d.title.clone();
                                            view! {
                                                <div
                                                    class="event-chip"
                                                    class:dragging={
                                                        let id = id.clone();
                                                        move || dnd.is_dragging_id(&id)
                                                    }
                                                    style=style
                                                    title=tooltip
                                                    on:mousedown={
                                                        let handler = make_on_mousedown(dnd, id.clone());
                                                        move |ev: web_sys::MouseEvent| {
                                                            if draggable {
                                                                handler(ev);
                                                            }
                                                        }
                                                    }
                                                >
                                                    {title}
                                                </div>
                                            }
                                        })
                                        .collect_view()}
                                    {(more > 0).then(|| view! { <span class="more-events">{format!("+{} more", more)}</span> })}
                                </div>
                            }
                        })
                        .collect_view()
                }}
            </div>
        </div>
    }
}
