//! MySQL/MariaDB schema reader implementation.
//!
//! Implements [`SchemaSource`] by querying `INFORMATION_SCHEMA.COLUMNS`.
//! Uses SQLx for connection pooling and async query execution.

use std::time::Duration;

use async_trait::async_trait;
use sqlx::mysql::{MySqlConnectOptions, MySqlPool, MySqlPoolOptions, MySqlRow, MySqlSslMode};
use sqlx::Row;
use tracing::{debug, info};

use crate::config::SourceConfig;
use crate::core::identifier::validate_identifier;
use crate::core::schema::{ColumnDescriptor, TableColumns};
use crate::core::traits::SchemaSource;
use crate::error::{GenError, Result};

/// Connection pool timeout.
const POOL_CONNECTION_TIMEOUT: Duration = Duration::from_secs(30);

/// A single statement runs at a time.
const MAX_CONNECTIONS: u32 = 1;

// CAST string columns to CHAR to handle collation and binary-string differences
const COLUMNS_QUERY: &str = r#"
    SELECT
        CAST(COLUMN_NAME AS CHAR(255)) AS COLUMN_NAME,
        CAST(DATA_TYPE AS CHAR(255)) AS DATA_TYPE,
        CAST(COLUMN_TYPE AS CHAR(1024)) AS COLUMN_TYPE,
        IF(IS_NULLABLE = 'YES', 1, 0) AS is_nullable,
        CAST(COALESCE(COLUMN_DEFAULT, '') AS CHAR(4096)) AS COLUMN_DEFAULT,
        CAST(EXTRA AS CHAR(255)) AS EXTRA
    FROM INFORMATION_SCHEMA.COLUMNS
    WHERE TABLE_SCHEMA = ? AND TABLE_NAME = ?
    ORDER BY ORDINAL_POSITION
"#;

/// One catalog row, decoupled from the driver's row type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogRow {
    pub name: String,
    pub data_type: String,
    pub column_type: String,
    pub is_nullable: bool,
    pub default: String,
    pub extra: String,
}

impl CatalogRow {
    fn from_row(row: &MySqlRow) -> Result<Self> {
        let get = |name: &str| -> Result<String> {
            row.try_get::<String, _>(name)
                .map_err(|e| GenError::source(e, format!("reading MySQL column {}", name)))
        };
        let is_nullable: i64 = row
            .try_get("is_nullable")
            .map_err(|e| GenError::source(e, "reading MySQL column is_nullable"))?;

        Ok(Self {
            name: get("COLUMN_NAME")?,
            data_type: get("DATA_TYPE")?,
            column_type: get("COLUMN_TYPE")?,
            is_nullable: is_nullable == 1,
            default: get("COLUMN_DEFAULT")?,
            extra: get("EXTRA")?,
        })
    }
}

/// Build the column set for `schema.table` from catalog rows.
///
/// An empty row set means the table does not exist (or has no visible
/// columns) and yields [`GenError::TableNotFound`].
pub fn columns_from_rows(
    schema: &str,
    table: &str,
    rows: impl IntoIterator<Item = CatalogRow>,
) -> Result<TableColumns> {
    let descriptors = rows.into_iter().map(|row| {
        ColumnDescriptor::new(row.name, row.data_type, row.column_type, row.is_nullable)
            .with_default(row.default)
            .with_extra(ddl_extra(&row.extra))
    });
    TableColumns::from_descriptors(schema, table, descriptors)
}

/// Keep the parts of `EXTRA` that are valid column DDL.
///
/// MySQL 8 adds informational markers (`DEFAULT_GENERATED`,
/// `VIRTUAL GENERATED`, `STORED GENERATED`) next to `auto_increment` and
/// `on update ...`; the markers are dropped.
pub fn ddl_extra(extra: &str) -> String {
    let tokens: Vec<&str> = extra.split_whitespace().collect();
    let mut kept = Vec::with_capacity(tokens.len());
    let mut i = 0;
    while i < tokens.len() {
        let token = tokens[i];
        let next_is_generated = tokens
            .get(i + 1)
            .is_some_and(|t| t.eq_ignore_ascii_case("GENERATED"));
        if token.eq_ignore_ascii_case("DEFAULT_GENERATED") {
            i += 1;
        } else if (token.eq_ignore_ascii_case("VIRTUAL") || token.eq_ignore_ascii_case("STORED"))
            && next_is_generated
        {
            i += 2;
        } else {
            kept.push(token);
            i += 1;
        }
    }
    kept.join(" ")
}

/// Map a configured `ssl_mode` to the SQLx setting. Unknown values were
/// rejected by config validation and fall back to `Preferred`.
pub fn ssl_mode_for(mode: &str) -> MySqlSslMode {
    match mode.to_lowercase().as_str() {
        "disabled" | "disable" => MySqlSslMode::Disabled,
        "required" | "require" => MySqlSslMode::Required,
        _ => MySqlSslMode::Preferred,
    }
}

/// MySQL/MariaDB schema reader.
pub struct MysqlReader {
    pool: MySqlPool,
}

impl MysqlReader {
    /// Create a new MySQL reader from configuration.
    pub async fn new(config: &SourceConfig) -> Result<Self> {
        let options = MySqlConnectOptions::new()
            .host(&config.host)
            .port(config.port)
            .database(&config.database)
            .username(&config.user)
            .password(&config.password)
            .ssl_mode(ssl_mode_for(&config.ssl_mode));

        let pool = MySqlPoolOptions::new()
            .max_connections(MAX_CONNECTIONS)
            .acquire_timeout(POOL_CONNECTION_TIMEOUT)
            .connect_with(options)
            .await
            .map_err(|e| GenError::source(e, "creating MySQL pool"))?;

        info!("Connected to MySQL: {}", config.display_url());

        Ok(Self { pool })
    }

    /// Test the database connection.
    pub async fn test_connection(&self) -> Result<()> {
        sqlx::query("SELECT 1")
            .fetch_one(&self.pool)
            .await
            .map_err(|e| GenError::source(e, "testing MySQL connection"))?;
        Ok(())
    }

    pub async fn close(&self) {
        self.pool.close().await;
    }
}

#[async_trait]
impl SchemaSource for MysqlReader {
    fn source_type(&self) -> &str {
        "mysql"
    }

    async fn fetch_columns(&self, schema: &str, table: &str) -> Result<TableColumns> {
        validate_identifier(schema)?;
        validate_identifier(table)?;

        let rows: Vec<MySqlRow> = sqlx::query(COLUMNS_QUERY)
            .bind(schema)
            .bind(table)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| GenError::source(e, "loading MySQL columns"))?;

        debug!("{} catalog rows for {}.{}", rows.len(), schema, table);

        let rows = rows
            .iter()
            .map(CatalogRow::from_row)
            .collect::<Result<Vec<_>>>()?;
        let columns = columns_from_rows(schema, table, rows)?;

        info!("Loaded {} columns from {}", columns.len(), columns.full_name());
        Ok(columns)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codegen::Annotation;

    fn row(name: &str, data_type: &str, column_type: &str, nullable: bool) -> CatalogRow {
        CatalogRow {
            name: name.to_string(),
            data_type: data_type.to_string(),
            column_type: column_type.to_string(),
            is_nullable: nullable,
            default: String::new(),
            extra: String::new(),
        }
    }

    #[test]
    fn test_columns_from_rows() {
        let mut id = row("id", "int", "int(11)", false);
        id.extra = "auto_increment".to_string();
        let mut status = row("status", "varchar", "varchar(16)", false);
        status.default = "new".to_string();

        let columns = columns_from_rows("shop", "orders", vec![status, id]).unwrap();
        assert_eq!(columns.full_name(), "shop.orders");
        assert_eq!(columns.len(), 2);

        let id = columns.get("id").unwrap();
        assert_eq!(id.native_type, "int");
        assert_eq!(id.modifier, "int(11)");
        assert_eq!(id.extra, "auto_increment");
        assert!(!id.nullable);

        assert_eq!(columns.get("status").unwrap().default, "new");
    }

    #[test]
    fn test_generated_markers_stay_out_of_gorm_type() {
        let mut created = row("created_at", "timestamp", "timestamp", false);
        created.default = "CURRENT_TIMESTAMP".to_string();
        created.extra = "DEFAULT_GENERATED on update CURRENT_TIMESTAMP".to_string();
        let mut total = row("total", "int", "int", true);
        total.extra = "STORED GENERATED".to_string();

        let columns = columns_from_rows("shop", "orders", vec![created, total]).unwrap();
        let created = columns.get("created_at").unwrap();
        assert_eq!(created.extra, "on update CURRENT_TIMESTAMP");
        assert_eq!(columns.get("total").unwrap().extra, "");

        let tag = Annotation::gorm(created).to_string();
        assert!(!tag.contains("DEFAULT_GENERATED"));
        assert_eq!(
            tag,
            "gorm:\"column:created_at;type:timestamp on update CURRENT_TIMESTAMP;default:'CURRENT_TIMESTAMP'\""
        );
    }

    #[test]
    fn test_ddl_extra() {
        assert_eq!(ddl_extra("auto_increment"), "auto_increment");
        assert_eq!(ddl_extra("VIRTUAL GENERATED"), "");
        assert_eq!(ddl_extra("DEFAULT_GENERATED"), "");
        assert_eq!(ddl_extra("  "), "");
        assert_eq!(
            ddl_extra("DEFAULT_GENERATED on update CURRENT_TIMESTAMP(3)"),
            "on update CURRENT_TIMESTAMP(3)"
        );
    }

    #[test]
    fn test_no_rows_is_table_not_found() {
        let err = columns_from_rows("shop", "missing", Vec::new()).unwrap_err();
        assert!(matches!(err, GenError::TableNotFound { .. }));
    }

    #[test]
    fn test_ssl_mode_for() {
        assert!(matches!(ssl_mode_for("disabled"), MySqlSslMode::Disabled));
        assert!(matches!(ssl_mode_for("REQUIRED"), MySqlSslMode::Required));
        assert!(matches!(ssl_mode_for("preferred"), MySqlSslMode::Preferred));
    }
}
