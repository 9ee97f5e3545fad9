//! Identifier handling for both sides of the generator.
//!
//! Schema and table names are validated before they reach the catalog query.
//! Column names are turned into exported Go field names by upper-casing the
//! first character only; nothing else is transliterated, so `user_id` becomes
//! `User_id` and two columns can derive the same field name (the assembler
//! reports that as an error).

use crate::error::{GenError, Result};

/// MySQL limits schema, table and column names to 64 characters.
const MAX_IDENTIFIER_LENGTH: usize = 64;

/// Validate a schema or table name.
///
/// Rejects:
/// - Empty identifiers
/// - Identifiers containing null bytes
/// - Identifiers longer than MySQL allows
///
/// # Errors
///
/// Returns `GenError::Config` for invalid identifiers with a descriptive message.
pub fn validate_identifier(name: &str) -> Result<()> {
    if name.is_empty() {
        return Err(GenError::Config("Identifier cannot be empty".to_string()));
    }

    if name.contains('\0') {
        return Err(GenError::Config(format!(
            "Identifier contains null byte: {:?}",
            name
        )));
    }

    if name.chars().count() > MAX_IDENTIFIER_LENGTH {
        return Err(GenError::Config(format!(
            "Identifier exceeds maximum length of {} characters: {:?}",
            MAX_IDENTIFIER_LENGTH, name
        )));
    }

    Ok(())
}

/// Derive a Go field (or type) name from a column (or table) name.
///
/// Only the first character is upper-cased.
///
/// # Examples
///
/// ```
/// use db2struct::core::identifier::field_name;
///
/// assert_eq!(field_name("id"), "Id");
/// assert_eq!(field_name("created_at"), "Created_at");
/// ```
pub fn field_name(column: &str) -> String {
    let mut chars = column.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
