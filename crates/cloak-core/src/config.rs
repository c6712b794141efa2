use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::debug;

use crate::error::{CloakError, CloakResult};

/// Top-level client configuration (loaded from cloak.toml)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CloakConfig {
    pub logging: LoggingConfig,
    pub crypto: CryptoConfig,
}

impl CloakConfig {
    /// Read and parse a TOML config file.
    pub fn load(path: &Path) -> CloakResult<Self> {
        let text = std::fs::read_to_string(path)?;
        let config = Self::from_toml_str(&text)?;
        debug!(path = %path.display(), "loaded config");
        Ok(config)
    }

    pub fn from_toml_str(text: &str) -> CloakResult<Self> {
        toml::from_str(text).map_err(|e| CloakError::Config(e.to_string()))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    Text,
    Json,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// EnvFilter directive used when RUST_LOG is unset (default: info)
    pub level: String,
    /// Output format (default: text)
    pub format: LogFormat,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".into(),
            format: LogFormat::Text,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CryptoConfig {
    /// Account authentication version: 1 = legacy SHA-512, 2 = PBKDF2 (default: 2).
    ///
    /// Kept as the raw number the service reports; convert it with
    /// `cloak_crypto::AuthVersion::try_from` before deriving credentials.
    pub auth_version: u32,
}

impl Default for CryptoConfig {
    fn default() -> Self {
        Self { auth_version: 2 }
    }
}
