//! LitDocket Core
//!
//! Browser-independent logic behind the LitDocket frontend:
//! - domain: DTOs mirrored from the backend
//! - filters: deadline filter / sort / group engine
//! - calendar: deadline -> calendar event adapter
//! - presence: realtime channel reducer
//! - event_bus: typed cross-component signalling
//! - registry: shared connection leases with deferred teardown
//! - recent: local preference store behind an injectable backend
//! - cache: optimistic deadline cache
//! - config: application configuration

pub mod domain;
pub mod filters;
pub mod calendar;
pub mod presence;
pub mod event_bus;
pub mod registry;
pub mod recent;
pub mod cache;
pub mod config;

pub use domain::{Case, CaseStats, Deadline, DeadlineStatus, DomainError, DomainResult, Priority, Trigger};
pub use event_bus::{DocketEvent, EventBus, SubscriptionId};
pub use presence::{ConnectionStatus, PresenceState, SocketEvent};
