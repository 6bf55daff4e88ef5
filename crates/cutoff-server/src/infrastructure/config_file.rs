//! TOML configuration file.
//!
//! The file is optional and every key in it is optional:
//!
//! ```toml
//! [server]
//! bind_address = "0.0.0.0"
//! port = 12345
//! session_timeout_secs = 30
//! max_applicants = 100000
//! ```
//!
//! Keys present in the file override the built-in defaults; command-line
//! flags override the file.

use std::net::IpAddr;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Deserialize;
use thiserror::Error;

use crate::domain::ServerConfig;

/// Error type for configuration file operations.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The file could not be read.
    #[error("I/O error reading config at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The TOML content could not be parsed.
    #[error("failed to parse config TOML: {0}")]
    Parse(#[from] toml::de::Error),

    /// `bind_address` is not an IP address.
    #[error("invalid bind address '{0}'")]
    InvalidBindAddress(String),

    /// A value is outside its allowed range.
    #[error("invalid value for {key}: {reason}")]
    InvalidValue { key: &'static str, reason: String },
}

/// Top-level layout of the configuration file.
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct ConfigFile {
    #[serde(default)]
    pub server: ServerSection,
}

/// The `[server]` table.
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct ServerSection {
    pub bind_address: Option<String>,
    pub port: Option<u16>,
    pub session_timeout_secs: Option<u64>,
    pub max_applicants: Option<usize>,
}

impl ConfigFile {
    /// Parses configuration from TOML text.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] on malformed TOML or unknown keys.
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(text)?)
    }

    /// Reads and parses the file at `path`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Io`] if the file cannot be read, or
    /// [`ConfigError::Parse`] if it is not valid.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&text)
    }

    /// Overlays the keys present in the file onto `base`.
    ///
    /// # Errors
    ///
    /// Returns an error if `bind_address` is not an IP address, or if
    /// `session_timeout_secs` or `max_applicants` is zero.
    pub fn apply_to(&self, mut base: ServerConfig) -> Result<ServerConfig, ConfigError> {
        let section = &self.server;

        if let Some(address) = &section.bind_address {
            let ip: IpAddr = address
                .parse()
                .map_err(|_| ConfigError::InvalidBindAddress(address.clone()))?;
            base.bind_addr.set_ip(ip);
        }
        if let Some(port) = section.port {
            base.bind_addr.set_port(port);
        }
        if let Some(secs) = section.session_timeout_secs {
            if secs == 0 {
                return Err(ConfigError::InvalidValue {
                    key: "session_timeout_secs",
                    reason: "must be at least 1".to_string(),
                });
            }
            base.session_timeout = Some(Duration::from_secs(secs));
        }
        if let Some(max) = section.max_applicants {
            if max == 0 {
                return Err(ConfigError::InvalidValue {
                    key: "max_applicants",
                    reason: "must be at least 1".to_string(),
                });
            }
            base.max_applicants = max;
        }

        Ok(base)
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
