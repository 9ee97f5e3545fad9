//! MySQL/MariaDB schema source.
//!
//! Reads column metadata from `INFORMATION_SCHEMA.COLUMNS` through an SQLx
//! pool holding a single connection.
//!
//! # Supported Versions
//!
//! - MySQL 5.7+, 8.0+
//! - MariaDB 10.2+

mod reader;

pub use reader::{columns_from_rows, ddl_extra, ssl_mode_for, CatalogRow, MysqlReader};
