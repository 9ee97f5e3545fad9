//! Declaration assembly for a whole table.

use std::collections::{BTreeSet, HashMap};

use serde::Serialize;
use tracing::debug;

use crate::core::identifier::field_name;
use crate::core::schema::TableColumns;
use crate::core::style::StyleFlags;
use crate::dialect::TypeResolver;
use crate::error::{GenError, Result};

use super::convert::synthesize;
use super::field::{annotations_for, Annotation, FieldDecl};
use super::stmt;

/// Indentation of statements inside the generated conversion functions.
const STATEMENT_DEPTH: usize = 1;

/// Text produced for one table.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Assembly {
    /// `struct { ... }` for the storage record (or the only record).
    pub declaration: String,
    /// `struct { ... }` for the plain record; empty unless dual mode.
    pub logic_declaration: String,
    /// Statements filling the logic record from the storage record.
    pub from_storage: String,
    /// Statements filling the storage record from the logic record.
    pub to_storage: String,
    /// Go packages the declarations and statements use.
    pub imports: BTreeSet<String>,
}

/// Runs resolution, rendering and conversion over every column.
#[derive(Debug, Clone, Default)]
pub struct Assembler {
    resolver: TypeResolver,
}

impl Assembler {
    pub fn new(flags: StyleFlags) -> Self {
        Self {
            resolver: TypeResolver::new(flags),
        }
    }

    pub fn flags(&self) -> &StyleFlags {
        self.resolver.flags()
    }

    /// Assemble the declarations for `columns`, nested `depth` levels deep.
    ///
    /// Columns are visited in name order. Unsupported native types still get a
    /// line, with an empty type.
    ///
    /// # Errors
    ///
    /// Returns [`GenError::FieldCollision`] when two columns derive the same
    /// field name.
    pub fn assemble(&self, columns: &TableColumns, depth: usize) -> Result<Assembly> {
        let flags = *self.flags();
        let logic_flags = StyleFlags {
            gorm: false,
            ..flags
        };

        let mut seen: HashMap<String, &str> = HashMap::new();
        let mut fields = Vec::with_capacity(columns.len());
        let mut logic_fields = Vec::new();
        let mut from_storage = String::new();
        let mut to_storage = String::new();
        let mut imports = BTreeSet::new();

        for col in columns {
            let name = field_name(&col.name);
            if let Some(first) = seen.insert(name.clone(), &col.name) {
                return Err(GenError::FieldCollision {
                    field: name,
                    first: first.to_string(),
                    second: col.name.clone(),
                });
            }

            let types = self.resolver.resolve_column(col);
            debug!(
                "Column {}: {} -> display '{}', real '{}'",
                col.name,
                col.modifier,
                types.display,
                types.real
            );
            if let Some(import) = types.display.import() {
                imports.insert(import.to_string());
            }

            fields.push(FieldDecl::new(
                name.clone(),
                types.display.ident(),
                annotations_for(col, &flags),
            ));

            if flags.dual {
                let pair = synthesize(&col.name, &name, &types);
                stmt::render_block(&pair.to_storage, &mut to_storage, STATEMENT_DEPTH);
                stmt::render_block(&pair.from_storage, &mut from_storage, STATEMENT_DEPTH);
                imports.extend(pair.imports.iter().map(|i| i.to_string()));
                if let Some(import) = pair.logic_type.import() {
                    imports.insert(import.to_string());
                }

                let annotations: Vec<Annotation> = annotations_for(col, &logic_flags);
                logic_fields.push(FieldDecl::new(name, pair.logic_type.ident(), annotations));
            }
        }

        Ok(Assembly {
            declaration: render_struct(&fields, depth),
            logic_declaration: if flags.dual {
                render_struct(&logic_fields, depth)
            } else {
                String::new()
            },
            from_storage,
            to_storage,
            imports,
        })
    }
}

/// `struct {` + one line per field + `}`.
fn render_struct(fields: &[FieldDecl], depth: usize) -> String {
    let field_indent = "\t".repeat(depth + 1);
    let mut out = String::from("struct {");
    for field in fields {
        out.push('\n');
        out.push_str(&field_indent);
        out.push_str(&field.to_string());
    }
    out.push('\n');
    out.push_str(&"\t".repeat(depth));
    out.push('}');
    out
}
