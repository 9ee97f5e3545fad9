//! Type resolution from MySQL column types to Go types.
//!
//! - [`canonical`]: canonical Go types and the static (style, type) lookup table
//! - [`typemap`]: classification of MySQL types and the resolution rules
//!
//! # Usage
//!
//! ```rust
//! use db2struct::core::StyleFlags;
//! use db2struct::dialect::resolve;
//!
//! let flags = StyleFlags::default();
//! assert_eq!(resolve("int", "int(11)", false, &flags).ident(), "int");
//! assert_eq!(resolve("tinyint", "tinyint(1)", false, &flags).ident(), "bool");
//! ```

pub mod canonical;
pub mod typemap;

pub use canonical::{GoType, NullStyle, ResolvedType, Scalar, TypeSpec, Wrapped};
pub use typemap::{
    display_width, resolve, resolve_plain, resolve_real, ColumnTypes, NativeFamily, TypeResolver,
};
