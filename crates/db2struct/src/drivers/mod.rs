//! Schema source implementations.
//!
//! - [`mysql`]: live MySQL/MariaDB catalog
//! - [`snapshot`]: YAML snapshot file
//!
//! # Static dispatch
//!
//! [`SourceImpl`] wraps the concrete sources in an enum and implements
//! [`SchemaSource`] with a match per method, so callers hold one concrete
//! type instead of a `Box<dyn SchemaSource>`.

pub mod mysql;
pub mod snapshot;

pub use mysql::MysqlReader;
pub use snapshot::{to_snapshot, SnapshotReader};

use std::path::Path;

use async_trait::async_trait;

use crate::config::Config;
use crate::core::schema::TableColumns;
use crate::core::traits::SchemaSource;
use crate::error::{GenError, Result};

/// Enum-based static dispatch for schema sources.
pub enum SourceImpl {
    Mysql(MysqlReader),
    Snapshot(SnapshotReader),
}

impl SourceImpl {
    /// Open the source: the snapshot file if one is given, otherwise the
    /// configured database.
    ///
    /// # Errors
    ///
    /// Returns a config error when neither a snapshot nor a `source` section
    /// is available.
    pub async fn open(config: &Config, snapshot: Option<&Path>) -> Result<Self> {
        if let Some(path) = snapshot {
            return Ok(SourceImpl::Snapshot(SnapshotReader::load(path)?));
        }
        let source = config.source.as_ref().ok_or_else(|| {
            GenError::Config("a source section (or a snapshot file) is required".into())
        })?;
        Ok(SourceImpl::Mysql(MysqlReader::new(source).await?))
    }

    /// Release any held connections.
    pub async fn close(&self) {
        if let SourceImpl::Mysql(reader) = self {
            reader.close().await;
        }
    }
}

#[async_trait]
impl SchemaSource for SourceImpl {
    fn source_type(&self) -> &str {
        match self {
            SourceImpl::Mysql(s) => s.source_type(),
            SourceImpl::Snapshot(s) => s.source_type(),
        }
    }

    async fn fetch_columns(&self, schema: &str, table: &str) -> Result<TableColumns> {
        match self {
            SourceImpl::Mysql(s) => s.fetch_columns(schema, table).await,
            SourceImpl::Snapshot(s) => s.fetch_columns(schema, table).await,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::schema::ColumnDescriptor;
    use std::io::Write;

    #[tokio::test]
    async fn test_open_without_source_or_snapshot() {
        let err = SourceImpl::open(&Config::default(), None).await.err().unwrap();
        assert!(matches!(err, GenError::Config(_)));
    }

    #[tokio::test]
    async fn test_open_snapshot_dispatches() {
        let columns = TableColumns::from_descriptors(
            "shop",
            "users",
            vec![ColumnDescriptor::new("id", "int", "int(11)", false)],
        )
        .unwrap();
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(to_snapshot(&columns).unwrap().as_bytes())
            .unwrap();

        let source = SourceImpl::open(&Config::default(), Some(file.path()))
            .await
            .unwrap();
        assert_eq!(source.source_type(), "snapshot");
        assert_eq!(source.fetch_columns("shop", "users").await.unwrap(), columns);
        source.close().await;
    }
}
