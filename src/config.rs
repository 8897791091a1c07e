//! Validator Configuration
//!
//! Entry-point names and probe stand-ins. Defaults match the names exported by
//! the `sqlite-validator-macros` crate.

use crate::error::{Result, ValidatorError};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::debug;

pub const CHECKED_NAME_VAR: &str = "SQLITE_VALIDATOR_CHECKED_NAME";
pub const UNSAFE_NAME_VAR: &str = "SQLITE_VALIDATOR_UNSAFE_NAME";
pub const STAND_IN_VAR: &str = "SQLITE_VALIDATOR_STAND_IN";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ValidatorConfig {
    /// Name of the entry point that runs the safety check.
    pub checked_name: String,

    /// Name of the entry point with the safety check muted. Used as the
    /// replacement text of the "mark it unsafe" fix-it.
    pub unsafe_name: String,

    /// Token substituted for `table`/`column` holes whose expression is not a
    /// bare identifier.
    pub identifier_stand_in: String,
}

impl Default for ValidatorConfig {
    fn default() -> Self {
        Self {
            checked_name: "sql_query".to_string(),
            unsafe_name: "sql_query_unsafe".to_string(),
            identifier_stand_in: "some_name".to_string(),
        }
    }
}

impl ValidatorConfig {
    /// Defaults overridden by `SQLITE_VALIDATOR_*` environment variables.
    /// A `.env` file in the working directory is honoured.
    pub fn from_env() -> Result<Self> {
        dotenv::dotenv().ok();

        let mut config = Self::default();
        if let Ok(name) = std::env::var(CHECKED_NAME_VAR) {
            config.checked_name = name;
        }
        if let Ok(name) = std::env::var(UNSAFE_NAME_VAR) {
            config.unsafe_name = name;
        }
        if let Ok(stand_in) = std::env::var(STAND_IN_VAR) {
            config.identifier_stand_in = stand_in;
        }

        config.check()?;
        debug!(?config, "Loaded validator configuration from environment");
        Ok(config)
    }

    /// Load a JSON configuration file. Missing keys keep their defaults.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())?;
        let config: Self = serde_json::from_str(&content)?;
        config.check()?;
        Ok(config)
    }

    fn check(&self) -> Result<()> {
        if self.checked_name.trim().is_empty() || self.unsafe_name.trim().is_empty() {
            return Err(ValidatorError::Config(
                "entry point names must not be empty".to_string(),
            ));
        }
        if self.checked_name == self.unsafe_name {
            return Err(ValidatorError::Config(format!(
                "checked and unsafe entry points share the name '{}'",
                self.checked_name
            )));
        }
        if self.identifier_stand_in.trim().is_empty() {
            return Err(ValidatorError::Config(
                "identifier stand-in must not be empty".to_string(),
            ));
        }
        Ok(())
    }
}
