//! Product Catalog Port - Read Access to Product Data
//!
//! The `/products` route only needs product names. The table itself is
//! owned by the external database; this service never writes to it.

use async_trait::async_trait;
use thiserror::Error;

/// Failure while reading the catalog.
#[derive(Debug, Error)]
pub enum CatalogError {
  /// The query could not be executed.
  #[error("catalog query failed: {0}")]
  Query(String),
}

/// Trait for product catalog providers.
#[async_trait]
pub trait ProductCatalog: Send + Sync + 'static {
  /// List every product name in storage order.
  async fn list_product_names(&self) -> Result<Vec<String>, CatalogError>;
}
