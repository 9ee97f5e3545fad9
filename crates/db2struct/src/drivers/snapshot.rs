//! Snapshot schema source.
//!
//! A snapshot is the YAML form of [`TableColumns`], as written by the
//! `columns` command. It lets generation run without a database.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tracing::info;

use crate::core::schema::TableColumns;
use crate::core::traits::SchemaSource;
use crate::error::{GenError, Result};

/// Schema source backed by one snapshot file.
#[derive(Debug, Clone)]
pub struct SnapshotReader {
    path: PathBuf,
    columns: TableColumns,
}

impl SnapshotReader {
    /// Read and parse a snapshot file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)?;
        let columns = Self::parse(&content)?;
        info!(
            "Loaded snapshot {} ({} columns from {})",
            path.display(),
            columns.len(),
            columns.full_name()
        );
        Ok(Self {
            path: path.to_path_buf(),
            columns,
        })
    }

    /// Parse snapshot YAML.
    pub fn parse(yaml: &str) -> Result<TableColumns> {
        let columns: TableColumns = serde_yaml::from_str(yaml)?;
        Ok(columns)
    }

    pub fn from_columns(columns: TableColumns) -> Self {
        Self {
            path: PathBuf::new(),
            columns,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// The snapshot's table.
    pub fn columns(&self) -> &TableColumns {
        &self.columns
    }
}

#[async_trait]
impl SchemaSource for SnapshotReader {
    fn source_type(&self) -> &str {
        "snapshot"
    }

    /// A snapshot holds one table; any other name is not found. An empty
    /// schema matches whatever schema the snapshot recorded.
    async fn fetch_columns(&self, schema: &str, table: &str) -> Result<TableColumns> {
        let schema_matches = schema.is_empty() || schema == self.columns.schema;
        if !schema_matches || table != self.columns.table || self.columns.is_empty() {
            return Err(GenError::table_not_found(schema, table));
        }
        Ok(self.columns.clone())
    }
}

/// Serialize columns as snapshot YAML.
pub fn to_snapshot(columns: &TableColumns) -> Result<String> {
    Ok(serde_yaml::to_string(columns)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::schema::ColumnDescriptor;
    use std::io::Write;

    fn users() -> TableColumns {
        TableColumns::from_descriptors(
            "shop",
            "users",
            vec![
                ColumnDescriptor::new("id", "int", "int(11)", false).with_extra("auto_increment"),
                ColumnDescriptor::new("email", "varchar", "varchar(255)", true),
            ],
        )
        .unwrap()
    }

    #[tokio::test]
    async fn test_fetch_matching_table() {
        let reader = SnapshotReader::from_columns(users());
        let columns = reader.fetch_columns("shop", "users").await.unwrap();
        assert_eq!(columns, users());

        let columns = reader.fetch_columns("", "users").await.unwrap();
        assert_eq!(columns.len(), 2);
    }

    #[tokio::test]
    async fn test_fetch_other_table_is_not_found() {
        let reader = SnapshotReader::from_columns(users());
        let err = reader.fetch_columns("shop", "orders").await.unwrap_err();
        assert!(matches!(err, GenError::TableNotFound { .. }));

        let err = reader.fetch_columns("archive", "users").await.unwrap_err();
        assert!(matches!(err, GenError::TableNotFound { .. }));
    }

    #[test]
    fn test_snapshot_file_round_trip() {
        let yaml = to_snapshot(&users()).unwrap();
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(yaml.as_bytes()).unwrap();

        let reader = SnapshotReader::load(file.path()).unwrap();
        assert_eq!(reader.columns(), &users());
        assert_eq!(reader.path(), file.path());
    }

    #[test]
    fn test_missing_snapshot_file() {
        let err = SnapshotReader::load("/nonexistent/users.yaml").unwrap_err();
        assert!(matches!(err, GenError::Io(_)));
    }
}
