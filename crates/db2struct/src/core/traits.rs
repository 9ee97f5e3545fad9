//! Core traits.
//!
//! - [`SchemaSource`]: reads column metadata for one table
//!
//! Implementations live in `drivers/`: a MySQL reader that queries
//! `INFORMATION_SCHEMA.COLUMNS`, and a snapshot reader for YAML files.

use async_trait::async_trait;

use crate::error::Result;

use super::schema::TableColumns;

/// Source of table column metadata.
#[async_trait]
pub trait SchemaSource: Send + Sync {
    /// Short name of the source for log messages (e.g., "mysql", "snapshot").
    fn source_type(&self) -> &str;

    /// Fetch all columns of `schema.table`.
    ///
    /// # Errors
    ///
    /// - [`GenError::Source`](crate::GenError::Source) when the query cannot run
    /// - [`GenError::TableNotFound`](crate::GenError::TableNotFound) when no
    ///   columns come back
    async fn fetch_columns(&self, schema: &str, table: &str) -> Result<TableColumns>;
}
