//! Leptos DragDrop Utilities
//!
//! Mouse-driven drag-and-drop for Leptos, generic over the drop target
//! (a calendar day, a list slot, ...). A movement threshold separates a click
//! from a drag, so chips stay clickable.

use leptos::ev;
use leptos::prelude::*;
use wasm_bindgen::JsCast;

/// Movement threshold in pixels to start dragging
const DRAG_THRESHOLD_PX: i32 = 5;

/// How long `drag_just_ended` stays set so the trailing click can be swallowed
const DRAG_END_CLICK_GUARD_MS: i32 = 100;

/// DnD state signals. `T` is the drop target type.
pub struct DndSignals<T: Send + Sync + 'static> {
    pub dragging_id: RwSignal<Option<String>>,
    pub drop_target: RwSignal<Option<T>>,
    pub drag_just_ended: RwSignal<bool>,
    /// Pending id (mousedown but not yet dragging)
    pub pending_id: RwSignal<Option<String>>,
    /// Start position for movement detection
    pub start: RwSignal<(i32, i32)>,
}

impl<T: Send + Sync + 'static> Clone for DndSignals<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T: Send + Sync + 'static> Copy for DndSignals<T> {}

pub fn create_dnd_signals<T: Send + Sync + 'static>() -> DndSignals<T> {
    DndSignals {
        dragging_id: RwSignal::new(None),
        drop_target: RwSignal::new(None),
        drag_just_ended: RwSignal::new(false),
        pending_id: RwSignal::new(None),
        start: RwSignal::new((0, 0)),
    }
}

impl<T: Clone + PartialEq + Send + Sync + 'static> DndSignals<T> {
    pub fn is_dragging(&self) -> bool {
        self.dragging_id.get().is_some()
    }

    pub fn is_dragging_id(&self, id: &str) -> bool {
        self.dragging_id.with(|d| d.as_deref() == Some(id))
    }

    pub fn is_target(&self, target: &T) -> bool {
        self.drop_target.with(|t| t.as_ref() == Some(target))
    }
}

/// End drag operation
pub fn end_drag<T: Send + Sync + 'static>(dnd: &DndSignals<T>) {
    dnd.dragging_id.set(None);
    dnd.drop_target.set(None);
    dnd.pending_id.set(None);
    dnd.drag_just_ended.set(true);

    if let Some(win) = web_sys::window() {
        let clear = dnd.drag_just_ended;
        let cb = wasm_bindgen::closure::Closure::<dyn FnMut()>::new(move || {
            clear.try_set(false);
        });
        let _ = win.set_timeout_with_callback_and_timeout_and_arguments_0(
            cb.as_ref().unchecked_ref(),
            DRAG_END_CLICK_GUARD_MS,
        );
        cb.forget();
    }
}

/// Mousedown handler for a draggable element: records a pending drag and where it started
pub fn make_on_mousedown<T: Send + Sync + 'static>(
    dnd: DndSignals<T>,
    id: String,
) -> impl Fn(web_sys::MouseEvent) + Clone + 'static {
    move |ev: web_sys::MouseEvent| {
        if ev.button() != 0 {
            return;
        }
        // Ignore if target is input or button
        if let Some(target) = ev.target() {
            if target.dyn_ref::<web_sys::HtmlInputElement>().is_some() { return; }
            if target.dyn_ref::<web_sys::HtmlButtonElement>().is_some() { return; }
        }
        dnd.pending_id.set(Some(id.clone()));
        dnd.start.set((ev.client_x(), ev.client_y()));
    }
}

/// Window mousemove: promotes a pending drag once the pointer moved far enough
fn bind_global_mousemove<T: Send + Sync + 'static>(dnd: DndSignals<T>) -> WindowListenerHandle {
    window_event_listener(ev::mousemove, move |ev: web_sys::MouseEvent| {
        let Some(pending) = dnd.pending_id.try_get_untracked().flatten() else {
            return;
        };
        if dnd.dragging_id.try_with_untracked(Option::is_some).unwrap_or(true) {
            return;
        }
        let Some((start_x, start_y)) = dnd.start.try_get_untracked() else {
            return;
        };
        let dx = (ev.client_x() - start_x).abs();
        let dy = (ev.client_y() - start_y).abs();
        if dx > DRAG_THRESHOLD_PX || dy > DRAG_THRESHOLD_PX {
            dnd.dragging_id.try_set(Some(pending));
        }
    })
}

/// Hands listener handles to the current owner; each is removed when the owner is disposed
fn release_with_owner<H: Send + Sync + 'static>(handles: Vec<H>, remove: fn(H)) {
    on_cleanup(move || {
        for handle in handles {
            remove(handle);
        }
    });
}

/// Create mouseenter handler for a drop target
pub fn make_on_target_mouseenter<T: Clone + Send + Sync + 'static>(
    dnd: DndSignals<T>,
    target: T,
) -> impl Fn(web_sys::MouseEvent) + Clone + 'static {
    move |_ev: web_sys::MouseEvent| {
        if dnd.dragging_id.with_untracked(Option::is_some) {
            dnd.drop_target.set(Some(target.clone()));
        }
    }
}

/// Create mouseleave handler
pub fn make_on_mouseleave<T: Send + Sync + 'static>(dnd: DndSignals<T>) -> impl Fn(web_sys::MouseEvent) + Copy + 'static {
    move |_ev: web_sys::MouseEvent| {
        if dnd.dragging_id.with_untracked(Option::is_some) {
            dnd.drop_target.set(None);
        }
    }
}

/// Bind global mouseup handler for drop detection, plus the mousemove that starts drags.
/// `on_drop` receives the dragged id and the target it was released over.
/// Both listeners are removed when the calling component unmounts.
pub fn bind_global_mouseup<T, F>(dnd: DndSignals<T>, on_drop: F)
where
    T: Clone + Send + Sync + 'static,
    F: Fn(String, T) + 'static,
{
    let on_mouseup = window_event_listener(ev::mouseup, move |_ev: web_sys::MouseEvent| {
        let Some(dragging_id) = dnd.dragging_id.try_get_untracked() else {
            return;
        };
        let drop_target = dnd.drop_target.try_get_untracked().flatten();

        if dragging_id.is_none() {
            dnd.pending_id.try_set(None);
            return;
        }
        end_drag(&dnd);

        // Only a real drag (not a click) over a target drops
        if let (Some(dragged), Some(target)) = (dragging_id, drop_target) {
            on_drop(dragged, target);
        }
    });
    let on_mousemove = bind_global_mousemove(dnd);

    release_with_owner(vec![on_mouseup, on_mousemove], WindowListenerHandle::remove);
}
