//! Domain layer - health model and event taxonomy.
//!
//! No I/O and no framework types here (hexagonal architecture inner ring).
//! Everything in this layer is testable in isolation.

pub mod event;
pub mod health;

pub use event::EventKind;
pub use health::{DependencyStatus, HealthReport, ProbeResult};
