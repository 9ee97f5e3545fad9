//! Core abstractions shared by the drivers and the code generator.
//!
//! - [`schema`]: column descriptors and the ordered per-table mapping
//! - [`identifier`]: identifier validation and Go field name derivation
//! - [`style`]: style flags selecting annotations and type style
//! - [`traits`]: the [`SchemaSource`] trait implemented by drivers

pub mod identifier;
pub mod schema;
pub mod style;
pub mod traits;

pub use schema::{ColumnDescriptor, TableColumns};
pub use style::StyleFlags;
pub use traits::SchemaSource;
