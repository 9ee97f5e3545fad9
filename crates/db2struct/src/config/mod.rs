//! Configuration loading and validation.

mod types;
mod validation;

pub use types::*;
pub use validation::SSL_MODES;

use crate::error::Result;
use std::path::Path;
use tracing::debug;

/// Config file picked up from the working directory when none is given.
pub const DEFAULT_CONFIG_FILE: &str = "db2struct.yaml";

impl Config {
    /// Load configuration from a YAML file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml(&content)
    }

    /// Parse configuration from a YAML string.
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        let config: Config = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    /// Load `path` if given, else [`DEFAULT_CONFIG_FILE`] if it exists, else
    /// the defaults. An explicit path that does not exist is an error.
    pub fn discover(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::load(path),
            None if Path::new(DEFAULT_CONFIG_FILE).is_file() => {
                debug!("Using {}", DEFAULT_CONFIG_FILE);
                Self::load(DEFAULT_CONFIG_FILE)
            }
            None => Ok(Self::default()),
        }
    }

    /// Validate the configuration.
    pub fn validate(&self) -> Result<()> {
        validation::validate(self)
    }

    /// Schema to read from: `generate.schema`, falling back to the source
    /// database name.
    pub fn effective_schema(&self) -> Option<&str> {
        self.generate
            .schema
            .as_deref()
            .or_else(|| self.source.as_ref().map(|s| s.database.as_str()))
    }
}

impl SourceConfig {
    /// Connection URL with the password masked, for log messages.
    pub fn display_url(&self) -> String {
        format!(
            "mysql://{}:***@{}:{}/{}",
            self.user, self.host, self.port, self.database
        )
    }
}

impl GenerateConfig {
    /// Struct name to emit for `table`.
    pub fn struct_name_for(&self, table: &str) -> String {
        self.struct_name
            .clone()
            .unwrap_or_else(|| crate::codegen::GoFile::default_struct_name(table))
    }
}
