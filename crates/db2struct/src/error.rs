//! Error types for the generator library.

use thiserror::Error;

/// Exit code for configuration problems (bad YAML, missing fields).
pub const EXIT_CONFIG_ERROR: u8 = 1;
/// Exit code for source database connectivity or query failures.
pub const EXIT_SOURCE_ERROR: u8 = 2;
/// Exit code when the requested table has no columns in the catalog.
pub const EXIT_TABLE_NOT_FOUND: u8 = 3;
/// Exit code when two columns derive the same Go field name.
pub const EXIT_FIELD_COLLISION: u8 = 4;
/// Exit code for file system errors.
pub const EXIT_IO_ERROR: u8 = 7;

/// Main error type for generator operations.
#[derive(Error, Debug)]
pub enum GenError {
    /// Configuration error (invalid YAML, missing fields, etc.)
    #[error("Configuration error: {0}")]
    Config(String),

    /// Source database connection or query error with context
    #[error("Source database error: {message}\n  Context: {context}")]
    Source { message: String, context: String },

    /// The catalog returned no columns for the requested table
    #[error("Table {schema}.{table} not found (no columns returned)")]
    TableNotFound { schema: String, table: String },

    /// Two columns map to the same Go field name
    #[error("Columns '{first}' and '{second}' both map to field name '{field}'")]
    FieldCollision {
        field: String,
        first: String,
        second: String,
    },

    /// IO error (file operations)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// YAML serialization/deserialization error
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// JSON serialization/deserialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl GenError {
    /// Create a Source error with context about where it occurred
    pub fn source(message: impl ToString, context: impl Into<String>) -> Self {
        GenError::Source {
            message: message.to_string(),
            context: context.into(),
        }
    }

    /// Create a TableNotFound error
    pub fn table_not_found(schema: impl Into<String>, table: impl Into<String>) -> Self {
        GenError::TableNotFound {
            schema: schema.into(),
            table: table.into(),
        }
    }

    /// Process exit code for this error.
    pub fn exit_code(&self) -> u8 {
        match self {
            GenError::Config(_) | GenError::Yaml(_) | GenError::Json(_) => EXIT_CONFIG_ERROR,
            GenError::Source { .. } => EXIT_SOURCE_ERROR,
            GenError::TableNotFound { .. } => EXIT_TABLE_NOT_FOUND,
            GenError::FieldCollision { .. } => EXIT_FIELD_COLLISION,
            GenError::Io(_) => EXIT_IO_ERROR,
        }
    }

    /// Format error with full details including error chain
    pub fn format_detailed(&self) -> String {
        let mut output = format!("Error: {}\n", self);

        let mut source = std::error::Error::source(self);
        let mut depth = 1;
        while let Some(err) = source {
            output.push_str(&format!("\nCaused by:\n  {}: {}", depth, err));
            source = err.source();
            depth += 1;
        }

        output
    }
}

/// Result type alias for generator operations.
pub type Result<T> = std::result::Result<T, GenError>;
