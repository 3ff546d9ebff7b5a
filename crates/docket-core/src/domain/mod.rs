//! Domain Layer
//!
//! DTOs mirrored from the LitDocket backend plus the shared error type.
//! This layer has NO browser dependencies.

mod error;
mod deadline;
mod trigger;
mod case;

pub use error::{DomainError, DomainResult};
pub use deadline::{Deadline, DeadlineStatus, Priority, CalculationMeta};
pub use trigger::Trigger;
pub use case::{Case, CaseStats};
