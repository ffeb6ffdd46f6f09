//! Ports Layer - Hexagonal Architecture Boundaries
//!
//! Defines the interfaces (traits) that the usecases and HTTP layer
//! require from the outside world. Adapters implement these traits.
//!
//! Port categories:
//! - `DependencyProbe`: One bounded round-trip against a dependency
//! - `ProductCatalog`: Read-only product listing

pub mod catalog;
pub mod probe;

pub use catalog::{CatalogError, ProductCatalog};
pub use probe::{DependencyProbe, ProbeError};
