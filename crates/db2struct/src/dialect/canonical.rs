//! Canonical Go types and the static lookup table that names them.
//!
//! The resolver never builds type names itself. It picks a [`GoType`] and a
//! [`NullStyle`], and the pair is looked up in [`TYPE_TABLE`]:
//!
//! ```text
//! MySQL column  →  (NullStyle, GoType)  →  TypeSpec
//!   int NULL    →  (Sql, NullInt)       →  sql.NullInt32
//!   int NULL    →  (Rich, NullInt)      →  null.Int
//! ```
//!
//! Rich rows only exist for the nullable wrappers; every other lookup falls
//! back to the `Sql` row, so the table has one `Sql` row per [`GoType`].

use std::fmt;

/// Go package providing the generic nullable wrappers.
pub const IMPORT_SQL: &str = "database/sql";
/// Go package providing the rich nullable wrappers.
pub const IMPORT_NULL: &str = "gopkg.in/guregu/null.v4";
/// Go package providing the arbitrary-precision decimal.
pub const IMPORT_DECIMAL: &str = "github.com/shopspring/decimal";
/// Go package providing `time.Time`.
pub const IMPORT_TIME: &str = "time";

/// Canonical Go type chosen for a column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GoType {
    // ===== Plain scalars =====
    Bool,
    /// Native `int`.
    Int,
    Int64,
    Float32,
    Float64,
    String,
    /// `time.Time`.
    Time,
    /// `[]byte`. Also used for nullable binary columns.
    Bytes,

    // ===== Dual-mode storage types =====
    /// Arbitrary-precision decimal.
    Decimal,
    /// `*string`.
    OptionalString,

    // ===== Nullable wrappers =====
    NullBool,
    /// Generic nullable integer sized to a 32-bit column.
    NullInt,
    /// 64-bit nullable integer.
    NullInt64,
    NullFloat,
    NullString,
    NullTime,
}

impl GoType {
    /// All canonical types, in declaration order.
    pub const ALL: [GoType; 16] = [
        GoType::Bool,
        GoType::Int,
        GoType::Int64,
        GoType::Float32,
        GoType::Float64,
        GoType::String,
        GoType::Time,
        GoType::Bytes,
        GoType::Decimal,
        GoType::OptionalString,
        GoType::NullBool,
        GoType::NullInt,
        GoType::NullInt64,
        GoType::NullFloat,
        GoType::NullString,
        GoType::NullTime,
    ];

    /// Whether this is one of the nullable wrapper types.
    pub fn is_nullable_wrapper(self) -> bool {
        matches!(
            self,
            GoType::NullBool
                | GoType::NullInt
                | GoType::NullInt64
                | GoType::NullFloat
                | GoType::NullString
                | GoType::NullTime
        )
    }
}

/// Which family of nullable wrappers to use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum NullStyle {
    /// `database/sql` wrappers (`sql.NullInt64`, ...).
    #[default]
    Sql,
    /// `guregu/null` wrappers (`null.Int`, ...).
    Rich,
}

/// A Go scalar, either a plain field type or the value inside a wrapper.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Scalar {
    Bool,
    /// Native `int`. Treated as 64 bits wide.
    Int,
    Int32,
    Int64,
    Float32,
    Float64,
    String,
    Time,
}

impl Scalar {
    /// Go spelling of the scalar.
    pub fn go_name(self) -> &'static str {
        match self {
            Scalar::Bool => "bool",
            Scalar::Int => "int",
            Scalar::Int32 => "int32",
            Scalar::Int64 => "int64",
            Scalar::Float32 => "float32",
            Scalar::Float64 => "float64",
            Scalar::String => "string",
            Scalar::Time => "time.Time",
        }
    }

    pub fn is_integer(self) -> bool {
        matches!(self, Scalar::Int | Scalar::Int32 | Scalar::Int64)
    }

    pub fn is_float(self) -> bool {
        matches!(self, Scalar::Float32 | Scalar::Float64)
    }

    pub fn is_numeric(self) -> bool {
        self.is_integer() || self.is_float()
    }

    /// Width in bits for numeric scalars.
    pub fn bits(self) -> Option<u8> {
        match self {
            Scalar::Int32 | Scalar::Float32 => Some(32),
            Scalar::Int | Scalar::Int64 | Scalar::Float64 => Some(64),
            _ => None,
        }
    }

    /// Literal used to compare against or reset to the zero value.
    pub fn zero_literal(self) -> &'static str {
        match self {
            Scalar::Bool => "false",
            Scalar::Int | Scalar::Int32 | Scalar::Int64 => "0",
            Scalar::Float32 | Scalar::Float64 => "0.0",
            Scalar::String => "\"\"",
            Scalar::Time => "time.Time{}",
        }
    }
}

/// Value carried inside a nullable wrapper next to its `Valid` flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Wrapped {
    /// Field holding the value (e.g., `Int64` in `sql.NullInt64`).
    pub field: &'static str,
    /// Type of that field.
    pub scalar: Scalar,
}

/// Everything the generator needs to know about one Go type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TypeSpec {
    /// Go spelling (e.g., `sql.NullInt64`).
    pub ident: &'static str,
    /// Package that must be imported to use it.
    pub import: Option<&'static str>,
    /// Scalar for plain types.
    pub scalar: Option<Scalar>,
    /// Value field for nullable wrappers.
    pub wrapped: Option<Wrapped>,
}

/// One row of the lookup table.
#[derive(Debug, Clone, Copy)]
pub struct TypeEntry {
    pub style: NullStyle,
    pub go_type: GoType,
    pub spec: TypeSpec,
}

const fn plain(go_type: GoType, ident: &'static str, scalar: Option<Scalar>) -> TypeEntry {
    TypeEntry {
        style: NullStyle::Sql,
        go_type,
        spec: TypeSpec {
            ident,
            import: None,
            scalar,
            wrapped: None,
        },
    }
}

const fn wrapper(
    style: NullStyle,
    go_type: GoType,
    ident: &'static str,
    field: &'static str,
    scalar: Scalar,
) -> TypeEntry {
    TypeEntry {
        style,
        go_type,
        spec: TypeSpec {
            ident,
            import: Some(match style {
                NullStyle::Sql => IMPORT_SQL,
                NullStyle::Rich => IMPORT_NULL,
            }),
            scalar: None,
            wrapped: Some(Wrapped { field, scalar }),
        },
    }
}

/// Static (style, canonical type) → Go type table.
pub static TYPE_TABLE: &[TypeEntry] = &[
    plain(GoType::Bool, "bool", Some(Scalar::Bool)),
    plain(GoType::Int, "int", Some(Scalar::Int)),
    plain(GoType::Int64, "int64", Some(Scalar::Int64)),
    plain(GoType::Float32, "float32", Some(Scalar::Float32)),
    plain(GoType::Float64, "float64", Some(Scalar::Float64)),
    plain(GoType::String, "string", Some(Scalar::String)),
    TypeEntry {
        style: NullStyle::Sql,
        go_type: GoType::Time,
        spec: TypeSpec {
            ident: "time.Time",
            import: Some(IMPORT_TIME),
            scalar: Some(Scalar::Time),
            wrapped: None,
        },
    },
    plain(GoType::Bytes, "[]byte", None),
    TypeEntry {
        style: NullStyle::Sql,
        go_type: GoType::Decimal,
        spec: TypeSpec {
            ident: "decimal.Decimal",
            import: Some(IMPORT_DECIMAL),
            scalar: None,
            wrapped: None,
        },
    },
    plain(GoType::OptionalString, "*string", None),
    wrapper(NullStyle::Sql, GoType::NullBool, "sql.NullBool", "Bool", Scalar::Bool),
    wrapper(NullStyle::Sql, GoType::NullInt, "sql.NullInt32", "Int32", Scalar::Int32),
    wrapper(NullStyle::Sql, GoType::NullInt64, "sql.NullInt64", "Int64", Scalar::Int64),
    wrapper(NullStyle::Sql, GoType::NullFloat, "sql.NullFloat64", "Float64", Scalar::Float64),
    wrapper(NullStyle::Sql, GoType::NullString, "sql.NullString", "String", Scalar::String),
    wrapper(NullStyle::Sql, GoType::NullTime, "sql.NullTime", "Time", Scalar::Time),
    // guregu/null types embed the database/sql wrappers, so the value fields match those.
    wrapper(NullStyle::Rich, GoType::NullBool, "null.Bool", "Bool", Scalar::Bool),
    wrapper(NullStyle::Rich, GoType::NullInt, "null.Int", "Int64", Scalar::Int64),
    wrapper(NullStyle::Rich, GoType::NullInt64, "null.Int", "Int64", Scalar::Int64),
    wrapper(NullStyle::Rich, GoType::NullFloat, "null.Float", "Float64", Scalar::Float64),
    wrapper(NullStyle::Rich, GoType::NullString, "null.String", "String", Scalar::String),
    wrapper(NullStyle::Rich, GoType::NullTime, "null.Time", "Time", Scalar::Time),
];

/// Look up the Go type for a (style, canonical type) pair.
pub fn lookup(style: NullStyle, go_type: GoType) -> Option<&'static TypeSpec> {
    let find = |style: NullStyle| {
        TYPE_TABLE
            .iter()
            .find(|entry| entry.style == style && entry.go_type == go_type)
            .map(|entry| &entry.spec)
    };
    find(style).or_else(|| find(NullStyle::Sql))
}

/// Result of resolving one column.
///
/// Unsupported native types resolve to [`ResolvedType::UNSUPPORTED`], whose
/// identifier is the empty string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ResolvedType {
    go_type: Option<GoType>,
    style: NullStyle,
}

impl ResolvedType {
    /// The resolution of an unsupported native type.
    pub const UNSUPPORTED: ResolvedType = ResolvedType {
        go_type: None,
        style: NullStyle::Sql,
    };

    pub fn new(go_type: GoType, style: NullStyle) -> Self {
        Self {
            go_type: Some(go_type),
            style,
        }
    }

    pub fn go_type(&self) -> Option<GoType> {
        self.go_type
    }

    pub fn style(&self) -> NullStyle {
        self.style
    }

    pub fn is_supported(&self) -> bool {
        self.go_type.is_some()
    }

    pub fn spec(&self) -> Option<&'static TypeSpec> {
        self.go_type.and_then(|ty| lookup(self.style, ty))
    }

    /// Go spelling, empty for unsupported types.
    pub fn ident(&self) -> &'static str {
        self.spec().map(|spec| spec.ident).unwrap_or("")
    }

    pub fn import(&self) -> Option<&'static str> {
        self.spec().and_then(|spec| spec.import)
    }

    pub fn scalar(&self) -> Option<Scalar> {
        self.spec().and_then(|spec| spec.scalar)
    }

    pub fn wrapped(&self) -> Option<Wrapped> {
        self.spec().and_then(|spec| spec.wrapped)
    }
}

impl fmt::Display for ResolvedType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.ident())
    }
}
