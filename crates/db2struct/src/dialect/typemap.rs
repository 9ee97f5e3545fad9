//! MySQL → Go type resolution.
//!
//! Resolution runs in two steps: the native type name is classified into a
//! [`NativeFamily`], then the family, display width, nullability and style pick
//! a [`GoType`]. The Go spelling comes from the static table in
//! [`super::canonical`].

use tracing::warn;

use crate::core::schema::ColumnDescriptor;
use crate::core::style::StyleFlags;

use super::canonical::{GoType, NullStyle, ResolvedType};

/// Big-integer display widths at or above this use a 64-bit nullable wrapper.
const INT64_WRAPPER_MIN_WIDTH: u32 = 18;

/// Families of MySQL types that resolve the same way.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NativeFamily {
    Integer,
    BigInt,
    Text,
    Temporal,
    /// `decimal`: like [`NativeFamily::Double`], but arbitrary precision in dual mode.
    Decimal,
    Double,
    Float,
    Binary,
}

impl NativeFamily {
    /// Classify a MySQL `DATA_TYPE` value. Unknown names return `None`.
    pub fn classify(native_type: &str) -> Option<Self> {
        let family = match native_type.to_ascii_lowercase().as_str() {
            "tinyint" | "smallint" | "mediumint" | "int" => NativeFamily::Integer,
            "bigint" => NativeFamily::BigInt,
            "char" | "enum" | "varchar" | "longtext" | "mediumtext" | "text" | "tinytext" => {
                NativeFamily::Text
            }
            "date" | "datetime" | "time" | "timestamp" => NativeFamily::Temporal,
            "decimal" => NativeFamily::Decimal,
            "double" => NativeFamily::Double,
            "float" => NativeFamily::Float,
            "binary" | "blob" | "longblob" | "mediumblob" | "varbinary" => NativeFamily::Binary,
            _ => return None,
        };
        Some(family)
    }
}

/// Extract the display width from a column type such as `int(11)`.
///
/// Takes the text between the first `(` and the next `)` and returns it only
/// when it is all digits, so `decimal(10,2)` has no width.
pub fn display_width(modifier: &str) -> Option<u32> {
    let open = modifier.find('(')?;
    let rest = &modifier[open + 1..];
    let close = rest.find(')')?;
    let digits = &rest[..close];
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    digits.parse().ok()
}

/// Pick the canonical Go type for a classified column.
fn select(
    family: NativeFamily,
    width: Option<u32>,
    nullable: bool,
    style: NullStyle,
    dual: bool,
) -> GoType {
    let rich = style == NullStyle::Rich;
    match family {
        NativeFamily::Integer => match (width == Some(1), nullable) {
            (true, true) => GoType::NullBool,
            (true, false) => GoType::Bool,
            (false, true) => GoType::NullInt,
            (false, false) => GoType::Int,
        },
        NativeFamily::BigInt => {
            if !nullable {
                GoType::Int64
            } else if rich || width.unwrap_or(0) >= INT64_WRAPPER_MIN_WIDTH {
                GoType::NullInt64
            } else {
                GoType::NullInt
            }
        }
        NativeFamily::Text => {
            if !nullable {
                GoType::String
            } else if dual && !rich {
                GoType::OptionalString
            } else {
                GoType::NullString
            }
        }
        NativeFamily::Temporal => {
            if nullable && rich {
                GoType::NullTime
            } else {
                GoType::Time
            }
        }
        NativeFamily::Decimal => {
            if nullable {
                GoType::NullFloat
            } else if dual {
                GoType::Decimal
            } else {
                GoType::Float64
            }
        }
        NativeFamily::Double => {
            if nullable {
                GoType::NullFloat
            } else {
                GoType::Float64
            }
        }
        NativeFamily::Float => {
            if nullable {
                GoType::NullFloat
            } else {
                GoType::Float32
            }
        }
        // Nullability is not represented for binary columns.
        NativeFamily::Binary => GoType::Bytes,
    }
}

/// Resolve a column to its display type under the given style.
///
/// Pure: identical inputs always give the identical result. Unsupported native
/// types give [`ResolvedType::UNSUPPORTED`] rather than an error.
pub fn resolve(
    native_type: &str,
    modifier: &str,
    nullable: bool,
    flags: &StyleFlags,
) -> ResolvedType {
    let Some(family) = NativeFamily::classify(native_type) else {
        return ResolvedType::UNSUPPORTED;
    };
    let style = if flags.rich_nullable {
        NullStyle::Rich
    } else {
        NullStyle::Sql
    };
    let go_type = select(family, display_width(modifier), nullable, style, flags.dual);
    ResolvedType::new(go_type, style)
}

/// Resolve the canonical storage type, ignoring every presentation flag.
pub fn resolve_real(native_type: &str, modifier: &str, nullable: bool) -> ResolvedType {
    resolve(native_type, modifier, nullable, &StyleFlags::plain())
}

/// Resolve the plain-value type used on the logic side of dual mode.
pub fn resolve_plain(native_type: &str, modifier: &str) -> ResolvedType {
    resolve(native_type, modifier, false, &StyleFlags::plain())
}

/// The three resolutions of one column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnTypes {
    /// What the storage declaration shows.
    pub display: ResolvedType,
    /// Canonical storage type driving the conversion shape.
    pub real: ResolvedType,
    /// Plain value type for the logic record.
    pub plain: ResolvedType,
}

/// Type resolver bound to one set of style flags.
#[derive(Debug, Clone, Default)]
pub struct TypeResolver {
    flags: StyleFlags,
}

impl TypeResolver {
    pub fn new(flags: StyleFlags) -> Self {
        Self { flags }
    }

    pub fn flags(&self) -> &StyleFlags {
        &self.flags
    }

    /// Resolve all three types for a column.
    pub fn resolve_column(&self, col: &ColumnDescriptor) -> ColumnTypes {
        let display = resolve(&col.native_type, &col.modifier, col.nullable, &self.flags);
        if !display.is_supported() {
            warn!(
                "Column '{}' has unsupported type '{}'; emitting an empty type",
                col.name, col.native_type
            );
        }

        ColumnTypes {
            display,
            real: resolve_real(&col.native_type, &col.modifier, col.nullable),
            plain: resolve_plain(&col.native_type, &col.modifier),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn flags(rich: bool, dual: bool) -> StyleFlags {
        StyleFlags {
            rich_nullable: rich,
            dual,
            ..StyleFlags::default()
        }
    }

    fn ident(native: &str, modifier: &str, nullable: bool, rich: bool) -> &'static str {
        resolve(native, modifier, nullable, &flags(rich, false)).ident()
    }

    #[test]
    fn test_display_width() {
        assert_eq!(display_width("int(11)"), Some(11));
        assert_eq!(display_width("(1)"), Some(1));
        assert_eq!(display_width("int(11) unsigned"), Some(11));
        assert_eq!(display_width("decimal(10,2)"), None);
        assert_eq!(display_width("int"), None);
        assert_eq!(display_width("int()"), None);
        assert_eq!(display_width(""), None);
    }

    #[test]
    fn test_integer_types() {
        assert_eq!(ident("int", "int(11)", false, false), "int");
        assert_eq!(ident("int", "int(11)", true, false), "sql.NullInt32");
        assert_eq!(ident("int", "int(11)", true, true), "null.Int");
        assert_eq!(ident("smallint", "smallint(6)", false, false), "int");
        assert_eq!(ident("mediumint", "mediumint(9)", true, false), "sql.NullInt32");
    }

    #[test]
    fn test_width_one_is_boolean() {
        assert_eq!(ident("tinyint", "(1)", false, false), "bool");
        assert_eq!(ident("tinyint", "tinyint(1)", true, false), "sql.NullBool");
        assert_eq!(ident("tinyint", "tinyint(1)", true, true), "null.Bool");
        assert_eq!(ident("tinyint", "tinyint(4)", false, false), "int");
    }

    #[test]
    fn test_bigint_threshold() {
        assert_eq!(ident("bigint", "bigint(20)", false, false), "int64");
        assert_eq!(ident("bigint", "bigint(20)", true, false), "sql.NullInt64");
        assert_eq!(ident("bigint", "bigint(18)", true, false), "sql.NullInt64");
        assert_eq!(ident("bigint", "bigint(17)", true, false), "sql.NullInt32");
        assert_eq!(ident("bigint", "bigint", true, false), "sql.NullInt32");
        assert_eq!(ident("bigint", "bigint(10)", true, true), "null.Int");
    }

    #[test]
    fn test_text_types() {
        for native in ["char", "enum", "varchar", "longtext", "mediumtext", "text", "tinytext"] {
            assert_eq!(ident(native, "", false, false), "string");
            assert_eq!(ident(native, "", true, false), "sql.NullString");
            assert_eq!(ident(native, "", true, true), "null.String");
        }
    }

    #[test]
    fn test_temporal_types() {
        for native in ["date", "datetime", "time", "timestamp"] {
            assert_eq!(ident(native, "", false, false), "time.Time");
            assert_eq!(ident(native, "", true, false), "time.Time");
            assert_eq!(ident(native, "", false, true), "time.Time");
            assert_eq!(ident(native, "", true, true), "null.Time");
        }
    }

    #[test]
    fn test_float_types() {
        assert_eq!(ident("decimal", "decimal(10,2)", false, false), "float64");
        assert_eq!(ident("double", "", false, false), "float64");
        assert_eq!(ident("float", "", false, false), "float32");
        assert_eq!(ident("decimal", "", true, false), "sql.NullFloat64");
        assert_eq!(ident("float", "", true, false), "sql.NullFloat64");
        assert_eq!(ident("double", "", true, true), "null.Float");
    }

    #[test]
    fn test_binary_ignores_nullability() {
        for native in ["binary", "blob", "longblob", "mediumblob", "varbinary"] {
            for (nullable, rich) in [(false, false), (true, false), (true, true)] {
                assert_eq!(ident(native, "", nullable, rich), "[]byte");
            }
        }
    }

    #[test]
    fn test_unsupported_type_is_empty() {
        let resolved = resolve("geometry", "", false, &StyleFlags::default());
        assert_eq!(resolved, ResolvedType::UNSUPPORTED);
        assert_eq!(resolved.ident(), "");
    }

    #[test]
    fn test_native_type_is_case_insensitive() {
        assert_eq!(ident("INT", "INT(11)", false, false), "int");
        assert_eq!(ident("VarChar", "", true, false), "sql.NullString");
    }

    #[test]
    fn test_dual_mode_display() {
        let dual = flags(false, true);
        assert_eq!(resolve("varchar", "", true, &dual).ident(), "*string");
        assert_eq!(resolve("decimal", "", false, &dual).ident(), "decimal.Decimal");
        assert_eq!(resolve("double", "", false, &dual).ident(), "float64");
        assert_eq!(resolve("decimal", "", true, &dual).ident(), "sql.NullFloat64");

        let dual_rich = flags(true, true);
        assert_eq!(resolve("varchar", "", true, &dual_rich).ident(), "null.String");
    }

    #[test]
    fn test_real_type_ignores_style() {
        assert_eq!(resolve_real("int", "int(11)", true).ident(), "sql.NullInt32");
        assert_eq!(resolve_real("varchar", "", true).ident(), "sql.NullString");
        assert_eq!(resolve_real("decimal", "", false).ident(), "float64");
        assert_eq!(resolve_real("datetime", "", true).ident(), "time.Time");
    }

    #[test]
    fn test_resolution_is_pure() {
        let natives = [
            "tinyint", "smallint", "mediumint", "int", "bigint", "char", "enum", "varchar",
            "longtext", "mediumtext", "text", "tinytext", "date", "datetime", "time",
            "timestamp", "decimal", "double", "float", "binary", "blob", "longblob",
            "mediumblob", "varbinary",
        ];
        let modifiers = ["", "(1)", "(11)", "(20)"];

        for native in natives {
            assert!(NativeFamily::classify(native).is_some(), "{}", native);
            for modifier in modifiers {
                for nullable in [false, true] {
                    for rich in [false, true] {
                        for dual in [false, true] {
                            let f = flags(rich, dual);
                            let first = resolve(native, modifier, nullable, &f);
                            let second = resolve(native, modifier, nullable, &f);
                            assert_eq!(first, second);
                            assert!(first.is_supported());
                            assert!(!first.ident().is_empty());
                        }
                    }
                }
            }
        }
    }

    #[test]
    fn test_resolver_resolve_column() {
        let resolver = TypeResolver::new(flags(false, true));
        let col = ColumnDescriptor::new("amount", "decimal", "decimal(10,2)", true);
        let types = resolver.resolve_column(&col);

        assert_eq!(types.display.ident(), "sql.NullFloat64");
        assert_eq!(types.real.ident(), "sql.NullFloat64");
        assert_eq!(types.plain.ident(), "float64");
    }
}
