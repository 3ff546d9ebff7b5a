//! Typed Event Bus
//!
//! Cross-component signalling without prop drilling. Subscribers register a handler and
//! get an id back; publishing dispatches over a snapshot of the handlers so a handler may
//! subscribe or unsubscribe while it runs.

use std::cell::RefCell;
use std::rc::Rc;

use crate::presence::ConnectionStatus;

/// Events relayed between sibling components
#[derive(Debug, Clone, PartialEq)]
pub enum DocketEvent {
    /// Another client changed a deadline
    DeadlineUpdated { case_id: String, deadline_id: String },
    /// Another client changed a document
    DocumentUpdated { case_id: String, document_id: String },
    /// This client changed the deadline list of a case (status, reschedule, bulk edit)
    DeadlinesChanged { case_id: String },
    PresenceChanged { case_id: String, online: usize },
    ConnectionChanged { case_id: String, status: ConnectionStatus },
    RealtimeError { case_id: String, message: String },
}

impl DocketEvent {
    pub fn case_id(&self) -> &str {
        match self {
            DocketEvent::DeadlineUpdated { case_id, .. }
            | DocketEvent::DocumentUpdated { case_id, .. }
            | DocketEvent::DeadlinesChanged { case_id }
            | DocketEvent::PresenceChanged { case_id, .. }
            | DocketEvent::ConnectionChanged { case_id, .. }
            | DocketEvent::RealtimeError { case_id, .. } => case_id,
        }
    }

    /// Whether the cached deadline list of the case is stale after this event
    pub fn invalidates_deadlines(&self) -> bool {
        matches!(self, DocketEvent::DeadlineUpdated { .. } | DocketEvent::DeadlinesChanged { .. })
    }
}

pub type SubscriptionId = u64;
pub type Handler<E> = Rc<dyn Fn(&E)>;

pub struct EventBus<E> {
    next_id: SubscriptionId,
    subscribers: Vec<(SubscriptionId, Handler<E>)>,
}

impl<E> Default for EventBus<E> {
    fn default() -> Self {
        Self {
            next_id: 1,
            subscribers: Vec::new(),
        }
    }
}

impl<E> EventBus<E> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe(&mut self, handler: impl Fn(&E) + 'static) -> SubscriptionId {
        let id = self.next_id;
        self.next_id += 1;
        self.subscribers.push((id, Rc::new(handler)));
        id
    }

    /// Returns false if the id was not subscribed
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.subscribers.len();
        self.subscribers.retain(|(sid, _)| *sid != id);
        self.subscribers.len() != before
    }

    /// Snapshot of the current handlers, in subscription order
    fn handlers(&self) -> Vec<Handler<E>> {
        self.subscribers.iter().map(|(_, h)| Rc::clone(h)).collect()
    }

    /// Dispatch to every handler; returns how many ran.
    /// The borrow is released before any handler runs.
    pub fn publish(bus: &RefCell<Self>, event: &E) -> usize {
        let handlers = bus.borrow().handlers();
        for handler in &handlers {
            handler(event);
        }
        handlers.len()
    }

    pub fn subscriber_count(&self) -> usize {
        self.subscribers.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_publish_reaches_all_subscribers_in_order() {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let bus = RefCell::new(EventBus::<DocketEvent>::new());

        let log = Rc::clone(&seen);
        bus.borrow_mut().subscribe(move |e| log.borrow_mut().push(format!("a:{}", e.case_id())));
        let log = Rc::clone(&seen);
        bus.borrow_mut().subscribe(move |e| log.borrow_mut().push(format!("b:{}", e.case_id())));

        let ran = EventBus::publish(&bus, &DocketEvent::DeadlinesChanged { case_id: "c1".to_string() });
        assert_eq!(ran, 2);
        assert_eq!(*seen.borrow(), vec!["a:c1".to_string(), "b:c1".to_string()]);
    }

    #[test]
    fn test_unsubscribe_stops_delivery() {
        let count = Rc::new(RefCell::new(0));
        let bus = RefCell::new(EventBus::<u32>::new());
        let c = Rc::clone(&count);
        let id = bus.borrow_mut().subscribe(move |n| *c.borrow_mut() += n);

        EventBus::publish(&bus, &2);
        assert!(bus.borrow_mut().unsubscribe(id));
        assert!(!bus.borrow_mut().unsubscribe(id));
        assert_eq!(EventBus::publish(&bus, &5), 0);
        assert_eq!(*count.borrow(), 2);
        assert_eq!(bus.borrow().subscriber_count(), 0);
    }

    #[test]
    fn test_handler_may_mutate_bus_during_dispatch() {
        let bus = Rc::new(RefCell::new(EventBus::<u32>::new()));
        let inner = Rc::clone(&bus);
        bus.borrow_mut().subscribe(move |_| {
            inner.borrow_mut().subscribe(|_| {});
        });

        assert_eq!(EventBus::publish(&bus, &1), 1);
        assert_eq!(bus.borrow().subscriber_count(), 2);
    }

    #[test]
    fn test_invalidation_kinds() {
        let changed = DocketEvent::DeadlinesChanged { case_id: "c".into() };
        let presence = DocketEvent::PresenceChanged { case_id: "c".into(), online: 2 };
        assert!(changed.invalidates_deadlines());
        assert!(!presence.invalidates_deadlines());
    }
}
