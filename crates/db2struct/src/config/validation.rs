//! Configuration validation.

use super::{Config, GenerateConfig, SourceConfig};
use crate::core::identifier::validate_identifier;
use crate::error::{GenError, Result};

/// Accepted `source.ssl_mode` values.
pub const SSL_MODES: &[&str] = &["disabled", "preferred", "required"];

/// Validate the configuration.
pub fn validate(config: &Config) -> Result<()> {
    if let Some(source) = &config.source {
        validate_source(source)?;
    }
    validate_generate(&config.generate)
}

fn validate_source(source: &SourceConfig) -> Result<()> {
    if source.r#type != "mysql" {
        return Err(GenError::Config(format!(
            "source.type must be 'mysql', got '{}'",
            source.r#type
        )));
    }
    if source.host.is_empty() {
        return Err(GenError::Config("source.host is required".into()));
    }
    if source.port == 0 {
        return Err(GenError::Config("source.port must be non-zero".into()));
    }
    if source.database.is_empty() {
        return Err(GenError::Config("source.database is required".into()));
    }
    if source.user.is_empty() {
        return Err(GenError::Config("source.user is required".into()));
    }
    if !SSL_MODES.contains(&source.ssl_mode.to_lowercase().as_str()) {
        return Err(GenError::Config(format!(
            "source.ssl_mode must be one of {}, got '{}'",
            SSL_MODES.join(", "),
            source.ssl_mode
        )));
    }
    Ok(())
}

fn validate_generate(generate: &GenerateConfig) -> Result<()> {
    if let Some(table) = &generate.table {
        validate_identifier(table)?;
    }
    if let Some(schema) = &generate.schema {
        validate_identifier(schema)?;
    }
    if !is_go_identifier(&generate.package) {
        return Err(GenError::Config(format!(
            "generate.package '{}' is not a valid Go package name",
            generate.package
        )));
    }
    if let Some(name) = &generate.struct_name {
        if !is_go_identifier(name) {
            return Err(GenError::Config(format!(
                "generate.struct_name '{}' is not a valid Go identifier",
                name
            )));
        }
    }
    Ok(())
}

/// Letters, digits and underscores, not starting with a digit.
fn is_go_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(c) if c == '_' || c.is_alphabetic() => {}
        _ => return false,
    }
    chars.all(|c| c == '_' || c.is_alphanumeric())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_config() -> Config {
        Config {
            source: Some(SourceConfig {
                r#type: "mysql".to_string(),
                host: "localhost".to_string(),
                port: 3306,
                database: "shop".to_string(),
                user: "root".to_string(),
                password: "password".to_string(),
                ssl_mode: "preferred".to_string(),
            }),
            generate: GenerateConfig {
                table: Some("users".to_string()),
                ..GenerateConfig::default()
            },
        }
    }

    #[test]
    fn test_valid_config() {
        assert!(validate(&valid_config()).is_ok());
    }

    #[test]
    fn test_source_is_optional() {
        let mut config = valid_config();
        config.source = None;
        assert!(validate(&config).is_ok());
    }

    #[test]
    fn test_missing_source_host() {
        let mut config = valid_config();
        config.source.as_mut().unwrap().host = "".to_string();
        assert!(validate(&config).is_err());
    }

    #[test]
    fn test_wrong_source_type() {
        let mut config = valid_config();
        config.source.as_mut().unwrap().r#type = "postgres".to_string();
        let err = validate(&config).unwrap_err();
        assert!(err.to_string().contains("source.type must be 'mysql'"));
    }

    #[test]
    fn test_unknown_ssl_mode() {
        let mut config = valid_config();
        config.source.as_mut().unwrap().ssl_mode = "verify_ca".to_string();
        assert!(validate(&config).is_err());

        config.source.as_mut().unwrap().ssl_mode = "REQUIRED".to_string();
        assert!(validate(&config).is_ok());
    }

    #[test]
    fn test_bad_table_name() {
        let mut config = valid_config();
        config.generate.table = Some("a".repeat(65));
        assert!(validate(&config).is_err());
    }

    #[test]
    fn test_bad_package_name() {
        let mut config = valid_config();
        config.generate.package = "my-models".to_string();
        assert!(validate(&config).is_err());

        config.generate.package = "9model".to_string();
        assert!(validate(&config).is_err());
    }

    #[test]
    fn test_bad_struct_name() {
        let mut config = valid_config();
        config.generate.struct_name = Some("User Row".to_string());
        assert!(validate(&config).is_err());
    }

    #[test]
    fn test_source_config_debug_redacts_password() {
        let mut config = valid_config();
        config.source.as_mut().unwrap().password = "super_secret_password_123".to_string();
        let debug_output = format!("{:?}", config.source);
        assert!(
            debug_output.contains("[REDACTED]"),
            "Debug output should contain [REDACTED]"
        );
        assert!(
            !debug_output.contains("super_secret_password_123"),
            "Debug output should not contain actual password value"
        );
    }
}
