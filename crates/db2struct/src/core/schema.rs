//! Column metadata as read from the source catalog.
//!
//! Descriptors are immutable once retrieved. A [`TableColumns`] keeps them in a
//! `BTreeMap` so iteration is always lexicographic by column name, whatever
//! order the catalog returned them in.

use std::collections::btree_map;
use std::collections::BTreeMap;

use serde::{Deserialize, Serialize, Serializer};

use crate::error::{GenError, Result};

/// Column metadata.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnDescriptor {
    /// Column name.
    pub name: String,

    /// Native data type (e.g., "int", "varchar", "datetime").
    pub native_type: String,

    /// Full column type with size or precision (e.g., "int(11)", "decimal(10,2)").
    #[serde(default)]
    pub modifier: String,

    /// Whether the column allows NULL.
    #[serde(default)]
    pub nullable: bool,

    /// Column default as reported by the catalog, empty when absent.
    #[serde(default)]
    pub default: String,

    /// Extra attributes (e.g., "auto_increment").
    #[serde(default)]
    pub extra: String,
}

impl ColumnDescriptor {
    /// Create a descriptor with no default and no extra attributes.
    pub fn new(
        name: impl Into<String>,
        native_type: impl Into<String>,
        modifier: impl Into<String>,
        nullable: bool,
    ) -> Self {
        Self {
            name: name.into(),
            native_type: native_type.into(),
            modifier: modifier.into(),
            nullable,
            default: String::new(),
            extra: String::new(),
        }
    }

    /// Set the default value.
    pub fn with_default(mut self, default: impl Into<String>) -> Self {
        self.default = default.into();
        self
    }

    /// Set the extra attributes.
    pub fn with_extra(mut self, extra: impl Into<String>) -> Self {
        self.extra = extra.into();
        self
    }
}

/// All columns of one table, keyed and ordered by column name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawTableColumns")]
pub struct TableColumns {
    /// Schema (database) name.
    pub schema: String,

    /// Table name.
    pub table: String,

    #[serde(serialize_with = "serialize_columns")]
    columns: BTreeMap<String, ColumnDescriptor>,
}

/// Snapshot form: columns as a plain list rather than a name-keyed map.
#[derive(Deserialize)]
struct RawTableColumns {
    schema: String,
    table: String,
    columns: Vec<ColumnDescriptor>,
}

impl TryFrom<RawTableColumns> for TableColumns {
    type Error = GenError;

    fn try_from(raw: RawTableColumns) -> Result<Self> {
        TableColumns::from_descriptors(raw.schema, raw.table, raw.columns)
    }
}

impl TableColumns {
    /// Build from descriptors in any order.
    ///
    /// Fails with [`GenError::TableNotFound`] when there are no descriptors, since
    /// the catalog returns an empty result for a table that does not exist.
    pub fn from_descriptors<I>(
        schema: impl Into<String>,
        table: impl Into<String>,
        descriptors: I,
    ) -> Result<Self>
    where
        I: IntoIterator<Item = ColumnDescriptor>,
    {
        let schema = schema.into();
        let table = table.into();
        let mut columns = BTreeMap::new();
        for col in descriptors {
            if let Some(previous) = columns.insert(col.name.clone(), col) {
                return Err(GenError::Config(format!(
                    "column '{}' appears more than once in {}.{}",
                    previous.name, schema, table
                )));
            }
        }

        if columns.is_empty() {
            return Err(GenError::TableNotFound { schema, table });
        }

        Ok(Self {
            schema,
            table,
            columns,
        })
    }

    /// Get the fully qualified table name.
    pub fn full_name(&self) -> String {
        format!("{}.{}", self.schema, self.table)
    }

    /// Look up a column by name.
    pub fn get(&self, name: &str) -> Option<&ColumnDescriptor> {
        self.columns.get(name)
    }

    /// Number of columns.
    pub fn len(&self) -> usize {
        self.columns.len()
    }

    /// Always false for a successfully constructed value.
    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    /// Iterate columns in lexicographic name order.
    pub fn iter(&self) -> btree_map::Values<'_, String, ColumnDescriptor> {
        self.columns.values()
    }
}

impl<'a> IntoIterator for &'a TableColumns {
    type Item = &'a ColumnDescriptor;
    type IntoIter = btree_map::Values<'a, String, ColumnDescriptor>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

fn serialize_columns<S>(
    columns: &BTreeMap<String, ColumnDescriptor>,
    serializer: S,
) -> std::result::Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.collect_seq(columns.values())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_iteration_is_lexicographic() {
        let cols = TableColumns::from_descriptors(
            "shop",
            "users",
            vec![
                ColumnDescriptor::new("zip", "varchar", "varchar(10)", true),
                ColumnDescriptor::new("id", "int", "int(11)", false),
                ColumnDescriptor::new("email", "varchar", "varchar(255)", false),
            ],
        )
        .unwrap();

        let names: Vec<&str> = cols.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["email", "id", "zip"]);
        assert_eq!(cols.full_name(), "shop.users");
    }

    #[test]
    fn test_empty_descriptors_is_table_not_found() {
        let err = TableColumns::from_descriptors("shop", "ghost", Vec::new()).unwrap_err();
        match err {
            GenError::TableNotFound { schema, table } => {
                assert_eq!(schema, "shop");
                assert_eq!(table, "ghost");
            }
            other => panic!("expected TableNotFound, got {:?}", other),
        }
    }

    #[test]
    fn test_snapshot_yaml_defaults() {
        let yaml = r#"
schema: shop
table: users
columns:
  - name: id
    native_type: int
    modifier: int(11)
    extra: auto_increment
  - name: nickname
    native_type: varchar
    nullable: true
"#;
        let cols: TableColumns = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(cols.len(), 2);

        let id = cols.get("id").unwrap();
        assert!(!id.nullable);
        assert_eq!(id.extra, "auto_increment");

        let nick = cols.get("nickname").unwrap();
        assert!(nick.nullable);
        assert_eq!(nick.modifier, "");
        assert_eq!(nick.default, "");
    }

    #[test]
    fn test_duplicate_descriptors_are_rejected() {
        let err = TableColumns::from_descriptors(
            "shop",
            "users",
            vec![
                ColumnDescriptor::new("id", "int", "int(11)", false),
                ColumnDescriptor::new("id", "bigint", "bigint(20)", false),
            ],
        )
        .unwrap_err();
        assert!(matches!(err, GenError::Config(_)));
        assert!(err.to_string().contains("'id'"));
    }

    #[test]
    fn test_snapshot_yaml_enforces_construction_rules() {
        let empty = "schema: shop\ntable: users\ncolumns: []\n";
        let err = serde_yaml::from_str::<TableColumns>(empty).unwrap_err();
        assert!(err.to_string().contains("not found"));

        let duplicate = "\
schema: shop
table: users
columns:
  - name: id
    native_type: int
  - name: id
    native_type: bigint
";
        let err = serde_yaml::from_str::<TableColumns>(duplicate).unwrap_err();
        assert!(err.to_string().contains("more than once"));
    }

    #[test]
    fn test_snapshot_serializes_as_list() {
        let cols = TableColumns::from_descriptors(
            "shop",
            "users",
            vec![
                ColumnDescriptor::new("name", "varchar", "varchar(64)", true),
                ColumnDescriptor::new("id", "int", "int(11)", false),
            ],
        )
        .unwrap();
        let value = serde_json::to_value(&cols).unwrap();
        assert_eq!(value["columns"][0]["name"], "id");
        assert_eq!(value["columns"][1]["name"], "name");

        let back: TableColumns = serde_json::from_value(value).unwrap();
        assert_eq!(back, cols);
    }
}
