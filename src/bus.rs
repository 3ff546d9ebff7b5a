//! App Event Bus
//!
//! One `EventBus<DocketEvent>` per thread. Components subscribe through `use_bus`, which
//! unsubscribes when the owning component is dropped.

use std::cell::RefCell;

use docket_core::{DocketEvent, EventBus, SubscriptionId};
use leptos::prelude::*;

thread_local! {
    static BUS: RefCell<EventBus<DocketEvent>> = RefCell::new(EventBus::new());
}

/// Handlers may publish or subscribe while they run
pub fn publish(event: DocketEvent) {
    let delivered = BUS.with(|bus| EventBus::publish(bus, &event));
    tracing::debug!(?event, delivered, "bus publish");
}

pub fn subscribe(handler: impl Fn(&DocketEvent) + 'static) -> SubscriptionId {
    BUS.with(|bus| bus.borrow_mut().subscribe(handler))
}

pub fn unsubscribe(id: SubscriptionId) -> bool {
    BUS.with(|bus| bus.borrow_mut().unsubscribe(id))
}

/// Subscribe for the lifetime of the current reactive owner
pub fn use_bus(handler: impl Fn(&DocketEvent) + 'static) {
    let id = subscribe(handler);
    on_cleanup(move || {
        unsubscribe(id);
    });
}
