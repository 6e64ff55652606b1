//! Station credentials and device selection.
//!
//! Values come from the environment (optionally a `.env` file) and can be
//! overridden field-by-field on the command line.

use thiserror::Error;

pub const ENV_MAC_ADDRESS: &str = "AMBIENT_MAC_ADDRESS";
pub const ENV_API_KEY: &str = "AMBIENT_API_KEY";
pub const ENV_APPLICATION_KEY: &str = "AMBIENT_APPLICATION_KEY";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("Missing {0} (set it in the environment, .env, or on the command line).")]
    Missing(&'static str),
}

/// Read-only input to one fetch cycle.
#[derive(Clone, PartialEq, Eq)]
pub struct Configuration {
    device_id: String,
    api_key: String,
    application_key: String,
}

impl Configuration {
    pub fn new(
        device_id: impl Into<String>,
        api_key: impl Into<String>,
        application_key: impl Into<String>,
    ) -> Result<Self, ConfigError> {
        let device_id = non_blank(device_id.into(), ENV_MAC_ADDRESS)?;
        let api_key = non_blank(api_key.into(), ENV_API_KEY)?;
        let application_key = non_blank(application_key.into(), ENV_APPLICATION_KEY)?;
        Ok(Self {
            device_id,
            api_key,
            application_key,
        })
    }

    /// Load from the process environment, reading `.env` first if present.
    /// Any `Some` override wins over the environment value.
    pub fn from_env(overrides: &Overrides) -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::resolve(overrides, |key| std::env::var(key).ok())
    }

    fn resolve(
        overrides: &Overrides,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<Self, ConfigError> {
        let pick = |value: &Option<String>, key: &'static str| {
            value
                .clone()
                .or_else(|| lookup(key))
                .ok_or(ConfigError::Missing(key))
        };
        Self::new(
            pick(&overrides.mac_address, ENV_MAC_ADDRESS)?,
            pick(&overrides.api_key, ENV_API_KEY)?,
            pick(&overrides.application_key, ENV_APPLICATION_KEY)?,
        )
    }

    pub fn device_id(&self) -> &str {
        &self.device_id
    }

    pub fn api_key(&self) -> &str {
        &self.api_key
    }

    pub fn application_key(&self) -> &str {
        &self.application_key
    }
}

impl std::fmt::Debug for Configuration {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Configuration")
            .field("device_id", &self.device_id)
            .field("api_key", &"<redacted>")
            .field("application_key", &"<redacted>")
            .finish()
    }
}

/// Per-field values supplied on the command line.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub mac_address: Option<String>,
    pub api_key: Option<String>,
    pub application_key: Option<String>,
}

fn non_blank(value: String, name: &'static str) -> Result<String, ConfigError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(ConfigError::Missing(name));
    }
    Ok(trimmed.to_string())
}
