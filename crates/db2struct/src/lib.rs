//! # db2struct
//!
//! Generate Go struct declarations from MySQL table metadata.
//!
//! Column metadata comes from `INFORMATION_SCHEMA.COLUMNS` (or a YAML
//! snapshot of it). Each column resolves to a Go type according to a set of
//! style flags:
//!
//! - **json** / **gorm** struct tags
//! - **rich nullable** types from `gopkg.in/guregu/null.v4` instead of `database/sql`
//! - **dual** mode: a storage record, a plain-value record, and conversion
//!   functions between the two
//!
//! ## Example
//!
//! ```rust,no_run
//! use db2struct::{Config, Generator, SourceImpl};
//!
//! #[tokio::main]
//! async fn main() -> db2struct::Result<()> {
//!     let config = Config::load("db2struct.yaml")?;
//!     let source = SourceImpl::open(&config, None).await?;
//!     let generator = Generator::new(config.generate.clone());
//!     let generated = generator.run(&source, "shop", "users").await?;
//!     print!("{}", generated.source);
//!     Ok(())
//! }
//! ```

pub mod codegen;
pub mod config;
pub mod core;
pub mod dialect;
pub mod drivers;
pub mod error;
pub mod generator;

// Re-exports for convenient access
pub use codegen::{Assembler, Assembly, GoFile};
pub use config::{Config, GenerateConfig, SourceConfig};
pub use crate::core::{ColumnDescriptor, SchemaSource, StyleFlags, TableColumns};
pub use dialect::{resolve, ResolvedType, TypeResolver};
pub use drivers::{MysqlReader, SnapshotReader, SourceImpl};
pub use error::{GenError, Result};
pub use generator::{Generated, Generator};
