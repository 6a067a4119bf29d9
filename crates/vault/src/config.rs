//! Configuration loading and validation for the field-encryption core.
//!
//! All values are read from environment variables at startup. Loading fails
//! with a clear error message if the encryption secret is missing or blank —
//! a blank secret is a deployment error, never silently defaulted.

use anyhow::{Context, Result};
use serde::Deserialize;

/// Validated core configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    /// Operator-supplied secret from which the field key is derived.
    /// **Required.** Lives only in process memory; never persisted.
    pub encryption_secret: String,

    /// Tracing log level (e.g. `"info"`, `"debug"`).
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

fn default_log_level() -> String {
    "info".into()
}

impl Config {
    /// Load and validate configuration from environment variables
    /// (`ENCRYPTION_SECRET`, `LOG_LEVEL`).
    ///
    /// # Errors
    ///
    /// Returns an error if `ENCRYPTION_SECRET` is absent or blank.
    pub fn from_env() -> Result<Self> {
        let cfg = config::Config::builder()
            .add_source(config::Environment::default())
            .build()
            .context("failed to build configuration from environment")?;

        let c: Config = cfg
            .try_deserialize()
            .context("failed to deserialise configuration")?;

        c.validate()?;
        Ok(c)
    }

    /// Validate all fields, returning a descriptive error on the first failure.
    fn validate(&self) -> Result<()> {
        ensure_non_empty(&self.encryption_secret, "ENCRYPTION_SECRET")?;
        Ok(())
    }
}

fn ensure_non_empty(value: &str, name: &str) -> Result<()> {
    if value.trim().is_empty() {
        anyhow::bail!("{name} is required and must not be empty");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_correct() {
        assert_eq!(default_log_level(), "info");
    }

    #[test]
    fn validate_rejects_blank_secret() {
        let cfg = Config {
            encryption_secret: "   ".into(),
            log_level: default_log_level(),
        };
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn validate_accepts_real_secret() {
        let cfg = Config {
            encryption_secret: "s3cr3t".into(),
            log_level: default_log_level(),
        };
        assert!(cfg.validate().is_ok());
    }
}
