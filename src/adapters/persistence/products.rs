//! Product Catalog Adapter - PostgreSQL `products` Table

use async_trait::async_trait;
use sqlx::{PgPool, Row};
use tracing::{instrument, warn};

use crate::domain::EventKind;
use crate::ports::catalog::{CatalogError, ProductCatalog};

/// Reads product names from the shared PostgreSQL pool.
#[derive(Debug, Clone)]
pub struct PgProductCatalog {
    pool: PgPool,
}

impl PgProductCatalog {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ProductCatalog for PgProductCatalog {
    /// Rows whose `name` can't be decoded are logged and skipped.
    #[instrument(skip(self))]
    async fn list_product_names(&self) -> Result<Vec<String>, CatalogError> {
        let rows = sqlx::query("SELECT name FROM products")
            .fetch_all(&self.pool)
            .await
            .map_err(|e| CatalogError::Query(e.to_string()))?;

        let mut names = Vec::with_capacity(rows.len());
        for row in &rows {
            match row.try_get::<String, _>("name") {
                Ok(name) => names.push(name),
                Err(e) => {
                    warn!(
                        event = %EventKind::QueryFailure,
                        error = %e,
                        "Row decode failed, skipping"
                    );
                }
            }
        }

        Ok(names)
    }
}
