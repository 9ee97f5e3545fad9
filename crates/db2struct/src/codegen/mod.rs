//! Go source generation.
//!
//! - [`field`]: one struct field line with its tags
//! - [`stmt`]: Go statement values and their renderer
//! - [`convert`]: storage/logic conversion statements for dual mode
//! - [`assemble`]: whole-table declarations
//! - [`file`]: the final `.go` file

pub mod assemble;
pub mod convert;
pub mod field;
pub mod file;
pub mod stmt;

pub use assemble::{Assembler, Assembly};
pub use convert::{synthesize, ConversionKind, ConversionPair};
pub use field::{Annotation, FieldDecl};
pub use file::GoFile;
pub use stmt::Stmt;
