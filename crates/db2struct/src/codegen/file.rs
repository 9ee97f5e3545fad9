//! Complete Go source file rendering.
//!
//! Wraps an [`Assembly`] in a package clause, an import block and named type
//! declarations. In dual mode the storage record is `<Struct>Model` and the
//! plain record gets `ToModel` / `FromModel` methods built from the
//! assembled statement blocks.

use std::fmt::Write as _;

use crate::core::identifier::field_name;

use super::assemble::Assembly;
use super::convert::{LOGIC_VAR, STORAGE_VAR};
use super::stmt::go_string_literal;

/// First line of every generated file.
pub const GENERATED_HEADER: &str = "// Code generated by db2struct. DO NOT EDIT.";

/// Suffix of the storage record's type name in dual mode.
pub const MODEL_SUFFIX: &str = "Model";

/// Naming for one generated file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GoFile {
    pub package: String,
    pub struct_name: String,
    pub table: String,
}

impl GoFile {
    pub fn new(
        package: impl Into<String>,
        struct_name: impl Into<String>,
        table: impl Into<String>,
    ) -> Self {
        Self {
            package: package.into(),
            struct_name: struct_name.into(),
            table: table.into(),
        }
    }

    /// Default struct name for a table: the table name with its first letter
    /// upper-cased.
    pub fn default_struct_name(table: &str) -> String {
        field_name(table)
    }

    /// Render the file. `gorm` adds a `TableName()` method on the storage
    /// record.
    pub fn render(&self, assembly: &Assembly, gorm: bool) -> String {
        let dual = !assembly.logic_declaration.is_empty();
        let storage_name = if dual {
            format!("{}{}", self.struct_name, MODEL_SUFFIX)
        } else {
            self.struct_name.clone()
        };

        let mut out = String::new();
        let _ = writeln!(out, "{}\n", GENERATED_HEADER);
        let _ = writeln!(out, "package {}\n", self.package);
        write_imports(&mut out, assembly.imports.iter().map(String::as_str));

        let _ = writeln!(out, "type {} {}", storage_name, assembly.declaration);

        if gorm {
            let _ = writeln!(
                out,
                "\nfunc ({} {}) TableName() string {{\n\treturn {}\n}}",
                receiver(&storage_name),
                storage_name,
                go_string_literal(&self.table)
            );
        }

        if dual {
            let _ = writeln!(
                out,
                "\ntype {} {}",
                self.struct_name, assembly.logic_declaration
            );
            self.write_method(&mut out, "ToModel", &storage_name, &assembly.to_storage);
            self.write_method(&mut out, "FromModel", &storage_name, &assembly.from_storage);
        }

        out
    }

    fn write_method(&self, out: &mut String, name: &str, storage_name: &str, body: &str) {
        let _ = writeln!(
            out,
            "\nfunc ({} *{}) {}({} *{}) error {{",
            LOGIC_VAR, self.struct_name, name, STORAGE_VAR, storage_name
        );
        out.push_str(body);
        out.push_str("\treturn nil\n}\n");
    }
}

/// Standard library packages first, then the rest, each group sorted.
fn write_imports<'a>(out: &mut String, imports: impl Iterator<Item = &'a str>) {
    let (mut std, mut external): (Vec<&str>, Vec<&str>) = imports.partition(|p| is_stdlib(p));
    if std.is_empty() && external.is_empty() {
        return;
    }
    std.sort_unstable();
    external.sort_unstable();

    out.push_str("import (\n");
    for path in &std {
        let _ = writeln!(out, "\t{}", go_string_literal(path));
    }
    if !std.is_empty() && !external.is_empty() {
        out.push('\n');
    }
    for path in &external {
        let _ = writeln!(out, "\t{}", go_string_literal(path));
    }
    out.push_str(")\n\n");
}

/// Stdlib import paths have no dot in their first element.
fn is_stdlib(path: &str) -> bool {
    let first = path.split('/').next().unwrap_or(path);
    !first.contains('.')
}

/// Receiver name: the type's first letter, lower-cased.
fn receiver(type_name: &str) -> String {
    type_name
        .chars()
        .next()
        .map(|c| c.to_lowercase().collect())
        .unwrap_or_else(|| "t".to_string())
}
