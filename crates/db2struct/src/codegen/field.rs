//! Field declaration rendering.
//!
//! A [`FieldDecl`] is one line of a Go struct: name, type and an optional tag
//! made of [`Annotation`]s. The gorm annotation always precedes the json one.

use std::fmt;

use crate::core::identifier::field_name;
use crate::core::schema::ColumnDescriptor;
use crate::core::style::StyleFlags;
use crate::dialect::ResolvedType;

/// A struct tag entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Annotation {
    /// `gorm:"column:<name>;type:<type> <extra>;default:'<value>'"`
    Gorm {
        column: String,
        column_type: String,
        extra: String,
        default: Option<String>,
    },
    /// `json:"<key>"`
    Json { key: String },
}

impl Annotation {
    /// Gorm annotation for a column. The modifier is used as the column type,
    /// falling back to the native type when the catalog gave no modifier.
    pub fn gorm(col: &ColumnDescriptor) -> Self {
        let column_type = if col.modifier.is_empty() {
            col.native_type.clone()
        } else {
            col.modifier.clone()
        };
        Annotation::Gorm {
            column: col.name.clone(),
            column_type,
            extra: col.extra.clone(),
            default: (!col.default.is_empty()).then(|| col.default.clone()),
        }
    }

    pub fn json(col: &ColumnDescriptor) -> Self {
        Annotation::Json {
            key: col.name.clone(),
        }
    }
}

impl fmt::Display for Annotation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Annotation::Gorm {
                column,
                column_type,
                extra,
                default,
            } => {
                write!(
                    f,
                    "gorm:\"column:{};type:{}",
                    escape_tag_value(column),
                    escape_tag_value(column_type)
                )?;
                if !extra.is_empty() {
                    write!(f, " {}", escape_tag_value(extra))?;
                }
                if let Some(default) = default {
                    write!(f, ";default:'{}'", escape_tag_value(default))?;
                }
                f.write_str("\"")
            }
            Annotation::Json { key } => write!(f, "json:\"{}\"", escape_tag_value(key)),
        }
    }
}

/// Escape a value for use inside a quoted struct tag value.
///
/// Struct tags live in a raw string literal, so a backtick cannot appear at
/// all; it is written as `\x60`, which `reflect.StructTag` unquotes back.
pub fn escape_tag_value(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '"' => out.push_str("\\\""),
            '`' => out.push_str("\\x60"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            c => out.push(c),
        }
    }
    out
}

/// Annotations enabled by `flags`, in tag order.
pub fn annotations_for(col: &ColumnDescriptor, flags: &StyleFlags) -> Vec<Annotation> {
    let mut annotations = Vec::new();
    if flags.gorm {
        annotations.push(Annotation::gorm(col));
    }
    if flags.json {
        annotations.push(Annotation::json(col));
    }
    annotations
}

/// One struct field line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldDecl {
    pub name: String,
    pub ty: String,
    pub annotations: Vec<Annotation>,
}

impl FieldDecl {
    pub fn new(name: impl Into<String>, ty: impl Into<String>, annotations: Vec<Annotation>) -> Self {
        Self {
            name: name.into(),
            ty: ty.into(),
            annotations,
        }
    }
}

impl fmt::Display for FieldDecl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.name, self.ty)?;
        if !self.annotations.is_empty() {
            f.write_str(" `")?;
            for (i, annotation) in self.annotations.iter().enumerate() {
                if i > 0 {
                    f.write_str(" ")?;
                }
                write!(f, "{}", annotation)?;
            }
            f.write_str("`")?;
        }
        Ok(())
    }
}

/// Render the declaration line for one column.
pub fn render(col: &ColumnDescriptor, resolved: ResolvedType, flags: &StyleFlags) -> String {
    FieldDecl::new(
        field_name(&col.name),
        resolved.ident(),
        annotations_for(col, flags),
    )
    .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dialect::resolve;

    fn flags(json: bool, gorm: bool) -> StyleFlags {
        StyleFlags {
            json,
            gorm,
            ..StyleFlags::default()
        }
    }

    #[test]
    fn test_render_plain_field() {
        let col = ColumnDescriptor::new("id", "int", "(11)", false);
        let f = flags(false, false);
        let line = render(&col, resolve("int", "(11)", false, &f), &f);
        assert_eq!(line, "Id int");
    }

    #[test]
    fn test_render_json_tag() {
        let col = ColumnDescriptor::new("active", "tinyint", "(1)", false);
        let f = flags(true, false);
        let line = render(&col, resolve("tinyint", "(1)", false, &f), &f);
        assert_eq!(line, "Active bool `json:\"active\"`");
    }

    #[test]
    fn test_gorm_precedes_json() {
        let col = ColumnDescriptor::new("id", "int", "int(11)", false).with_extra("auto_increment");
        let f = flags(true, true);
        let line = render(&col, resolve("int", "int(11)", false, &f), &f);
        assert_eq!(
            line,
            "Id int `gorm:\"column:id;type:int(11) auto_increment\" json:\"id\"`"
        );
    }

    #[test]
    fn test_gorm_default_is_embedded_and_escaped() {
        let col = ColumnDescriptor::new("status", "varchar", "varchar(16)", false)
            .with_default("say \"hi\"");
        let annotation = Annotation::gorm(&col);
        assert_eq!(
            annotation.to_string(),
            "gorm:\"column:status;type:varchar(16);default:'say \\\"hi\\\"'\""
        );

        let col = ColumnDescriptor::new("note", "varchar", "varchar(16)", false).with_default("`x`");
        assert_eq!(
            Annotation::gorm(&col).to_string(),
            "gorm:\"column:note;type:varchar(16);default:'\\x60x\\x60'\""
        );
    }

    #[test]
    fn test_gorm_falls_back_to_native_type() {
        let col = ColumnDescriptor::new("body", "text", "", true);
        assert_eq!(
            Annotation::gorm(&col).to_string(),
            "gorm:\"column:body;type:text\""
        );
    }

    #[test]
    fn test_unsupported_type_renders_empty() {
        let col = ColumnDescriptor::new("shape", "geometry", "", false);
        let f = flags(true, false);
        let line = render(&col, resolve("geometry", "", false, &f), &f);
        assert_eq!(line, "Shape  `json:\"shape\"`");
    }
}
