//! Conversion statements between the storage record and the plain record.
//!
//! In dual mode every column gets a [`ConversionPair`]: statements copying the
//! logic (plain) value into the storage record, and statements copying it
//! back. The shape is picked from the column's real type:
//!
//! | real type | display type | conversion |
//! |---|---|---|
//! | `sql.NullInt32`, `sql.NullInt64`, `sql.NullFloat64` | any wrapper | value + `Valid` flag |
//! | plain numeric | `decimal.Decimal` | format / parse |
//! | `sql.NullString` | `*string` | allocate / dereference |
//! | anything else | same as logic | direct assignment |
//!
//! A zero-valued logic record survives `to_storage` then `from_storage`: the
//! first three shapes never write storage for a zero value, and reading an
//! untouched storage value gives the zero value back.
//!
//! Generated statements assume they run inside a function returning `error`
//! with the records bound to [`STORAGE_VAR`] and [`LOGIC_VAR`].

use std::collections::BTreeSet;

use crate::dialect::canonical::IMPORT_DECIMAL;
use crate::dialect::{ColumnTypes, GoType, ResolvedType, Scalar, Wrapped};

use super::stmt::{go_string_literal, Stmt};

/// Variable bound to the storage (model) record.
pub const STORAGE_VAR: &str = "model";
/// Variable bound to the plain (logic) record.
pub const LOGIC_VAR: &str = "logic";

/// Conversion shape for one field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConversionKind {
    /// Value plus validity flag in a nullable wrapper.
    NullableWrapper,
    /// Plain number stored as an arbitrary-precision decimal.
    ArbitraryPrecision,
    /// Plain string stored as `*string`.
    OptionalString,
    /// Same type on both sides.
    Direct,
}

impl ConversionKind {
    /// Pick the shape for a column's resolved types.
    pub fn classify(types: &ColumnTypes) -> Self {
        let display = types.display.go_type();
        let plain_numeric = types.plain.scalar().is_some_and(Scalar::is_numeric);

        match types.real.go_type() {
            Some(GoType::NullInt | GoType::NullInt64 | GoType::NullFloat)
                if types.display.wrapped().is_some() && plain_numeric =>
            {
                ConversionKind::NullableWrapper
            }
            Some(GoType::Int | GoType::Int64 | GoType::Float32 | GoType::Float64)
                if display == Some(GoType::Decimal) && plain_numeric =>
            {
                ConversionKind::ArbitraryPrecision
            }
            Some(GoType::NullString) if display == Some(GoType::OptionalString) => {
                ConversionKind::OptionalString
            }
            _ => ConversionKind::Direct,
        }
    }
}

/// Both directions of the conversion for one field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConversionPair {
    /// Go field name, shared by both records.
    pub field: String,
    pub kind: ConversionKind,
    /// Field type on the logic record.
    pub logic_type: ResolvedType,
    /// Statements filling the storage record from the logic record.
    pub to_storage: Vec<Stmt>,
    /// Statements filling the logic record from the storage record.
    pub from_storage: Vec<Stmt>,
    /// Go packages the statements use.
    pub imports: BTreeSet<&'static str>,
}

/// Build the conversion pair for one column.
///
/// `column` is only used in generated error messages.
pub fn synthesize(column: &str, field: &str, types: &ColumnTypes) -> ConversionPair {
    let kind = ConversionKind::classify(types);
    let mut builder = Builder {
        column,
        storage: format!("{}.{}", STORAGE_VAR, field),
        logic: format!("{}.{}", LOGIC_VAR, field),
        imports: BTreeSet::new(),
    };

    // `classify` guarantees the scalar and wrapper exist for the first two shapes.
    let (kind, logic_type, to_storage, from_storage) = match (
        kind,
        types.plain.scalar(),
        types.display.wrapped(),
    ) {
        (ConversionKind::NullableWrapper, Some(plain), Some(wrapped)) => (
            kind,
            types.plain,
            builder.wrapper_to_storage(plain, wrapped),
            builder.wrapper_from_storage(plain, wrapped),
        ),
        (ConversionKind::ArbitraryPrecision, Some(plain), _) => (
            kind,
            types.plain,
            builder.decimal_to_storage(plain),
            builder.decimal_from_storage(plain),
        ),
        (ConversionKind::OptionalString, _, _) => (
            kind,
            types.plain,
            builder.optional_to_storage(),
            builder.optional_from_storage(),
        ),
        _ => (
            ConversionKind::Direct,
            types.display,
            vec![Stmt::assign(&builder.storage, &builder.logic)],
            vec![Stmt::assign(&builder.logic, &builder.storage)],
        ),
    };

    ConversionPair {
        field: field.to_string(),
        kind,
        logic_type,
        to_storage,
        from_storage,
        imports: builder.imports,
    }
}

struct Builder<'a> {
    column: &'a str,
    storage: String,
    logic: String,
    imports: BTreeSet<&'static str>,
}

impl Builder<'_> {
    /// `if <value> is out of range for <target> { return error }`, when
    /// converting `from` to `to` can lose range.
    fn range_check(&mut self, value: &str, from: Scalar, to: Scalar) -> Option<Stmt> {
        let narrowing = match (from.bits(), to.bits()) {
            (Some(from_bits), Some(to_bits)) => from_bits > to_bits,
            _ => false,
        };
        if !narrowing {
            return None;
        }

        let (cond, verb) = match to {
            Scalar::Int32 => (
                format!("{v} < math.MinInt32 || {v} > math.MaxInt32", v = value),
                "%d",
            ),
            Scalar::Float32 => (format!("math.Abs({}) > math.MaxFloat32", value), "%g"),
            _ => return None,
        };

        self.imports.insert("fmt");
        self.imports.insert("math");
        Some(Stmt::if_then(
            cond,
            vec![Stmt::ret(format!(
                "fmt.Errorf(\"%s: value {} overflows {}\", {}, {})",
                verb,
                to.go_name(),
                go_string_literal(self.column),
                value
            ))],
        ))
    }

    fn wrapper_to_storage(&mut self, plain: Scalar, wrapped: Wrapped) -> Vec<Stmt> {
        let logic = self.logic.clone();
        let mut then = Vec::new();
        if let Some(check) = self.range_check(&logic, plain, wrapped.scalar) {
            then.push(check);
        }
        then.push(Stmt::assign(
            format!("{}.{}", self.storage, wrapped.field),
            cast(wrapped.scalar, plain, &self.logic),
        ));
        then.push(Stmt::assign(format!("{}.Valid", self.storage), "true"));

        vec![Stmt::if_then(
            format!("{} != {}", self.logic, plain.zero_literal()),
            then,
        )]
    }

    fn wrapper_from_storage(&mut self, plain: Scalar, wrapped: Wrapped) -> Vec<Stmt> {
        let value = format!("{}.{}", self.storage, wrapped.field);
        let mut then = Vec::new();
        if let Some(check) = self.range_check(&value, wrapped.scalar, plain) {
            then.push(check);
        }
        then.push(Stmt::assign(&self.logic, cast(plain, wrapped.scalar, &value)));

        vec![Stmt::if_then(format!("{}.Valid", self.storage), then).with_else(vec![
            Stmt::assign(&self.logic, plain.zero_literal()),
            Stmt::assign(format!("{}.Valid", self.storage), "false"),
        ])]
    }

    fn decimal_to_storage(&mut self, plain: Scalar) -> Vec<Stmt> {
        self.imports.insert("strconv");
        self.imports.insert(IMPORT_DECIMAL);

        let formatted = match plain {
            Scalar::Int64 => format!("strconv.FormatInt({}, 10)", self.logic),
            Scalar::Float64 => format!("strconv.FormatFloat({}, 'f', -1, 64)", self.logic),
            Scalar::Float32 => format!("strconv.FormatFloat(float64({}), 'f', -1, 32)", self.logic),
            _ => format!("strconv.FormatInt(int64({}), 10)", self.logic),
        };

        vec![Stmt::if_then(
            format!("{} != {}", self.logic, plain.zero_literal()),
            vec![
                Stmt::define("d, err", format!("decimal.NewFromString({})", formatted)),
                Stmt::return_if_err(),
                Stmt::assign(&self.storage, "d"),
            ],
        )]
    }

    fn decimal_from_storage(&mut self, plain: Scalar) -> Vec<Stmt> {
        self.imports.insert("strconv");

        let text = format!("{}.String()", self.storage);
        let (parse, value) = match plain {
            Scalar::Float64 => (format!("strconv.ParseFloat({}, 64)", text), "v".to_string()),
            Scalar::Float32 => (
                format!("strconv.ParseFloat({}, 32)", text),
                "float32(v)".to_string(),
            ),
            Scalar::Int64 => (format!("strconv.ParseInt({}, 10, 64)", text), "v".to_string()),
            Scalar::Int32 => (
                format!("strconv.ParseInt({}, 10, 32)", text),
                "int32(v)".to_string(),
            ),
            _ => (format!("strconv.ParseInt({}, 10, 0)", text), "int(v)".to_string()),
        };

        vec![Stmt::if_then("err != nil", vec![Stmt::ret("err")])
            .with_init(Stmt::define("v, err", parse))
            .with_else(vec![Stmt::assign(&self.logic, value)])]
    }

    fn optional_to_storage(&mut self) -> Vec<Stmt> {
        vec![Stmt::if_then(
            format!("{} != \"\"", self.logic),
            vec![
                Stmt::define("s", &self.logic),
                Stmt::assign(&self.storage, "&s"),
            ],
        )]
    }

    fn optional_from_storage(&mut self) -> Vec<Stmt> {
        vec![Stmt::if_then(
            format!("{} != nil", self.storage),
            vec![Stmt::assign(&self.logic, format!("*{}", self.storage))],
        )]
    }
}

/// `to(value)`, or just `value` when the types already match.
fn cast(to: Scalar, from: Scalar, value: &str) -> String {
    if to == from {
        value.to_string()
    } else {
        format!("{}({})", to.go_name(), value)
    }
}
