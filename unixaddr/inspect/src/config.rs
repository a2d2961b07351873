//! Endpoint Group Configuration
//!
//! Loads a named group of endpoints from TOML. Domain socket and IP
//! endpoints can be mixed freely; both end up as [`Endpoint`] values.
//!
//! # Example Configuration
//!
//! ```toml
//! [group]
//! name = "backends"
//! default_weight = 500
//! endpoints = [
//!     "unix:/run/backend-a.sock",
//!     "10.0.0.1:8080",
//!     "[2001:db8::1]:8443",
//! ]
//! ```

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use unixaddr_core::{DomainSocketAddress, Endpoint, DEFAULT_WEIGHT};

// =============================================================================
// Error Types
// =============================================================================

/// Errors that can occur when loading configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to read config file
    #[error("Failed to read config file at {path}: {source}")]
    ReadError {
        /// The path that was attempted
        path: PathBuf,
        /// The underlying IO error
        source: std::io::Error,
    },

    /// Failed to parse TOML
    #[error("Failed to parse TOML config: {0}")]
    ParseError(#[from] toml::de::Error),

    /// Invalid configuration value
    #[error("Invalid configuration: {0}")]
    ValidationError(String),
}

// =============================================================================
// TOML Structures
// =============================================================================

/// Top level of the TOML document
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct EndpointGroupToml {
    /// The `[group]` section
    pub group: GroupToml,
}

/// The `[group]` section
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct GroupToml {
    /// Group name used in logs
    pub name: Option<String>,

    /// Weight applied to every endpoint
    pub default_weight: Option<u32>,

    /// Endpoint authorities
    pub endpoints: Vec<String>,
}

// =============================================================================
// Resolved Configuration
// =============================================================================

/// A validated group of endpoints
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EndpointGroup {
    /// Group name (`"default"` when unset)
    pub name: String,
    /// Endpoints in file order
    pub endpoints: Vec<Endpoint>,
}

impl EndpointGroup {
    /// Domain socket addresses of every `unix:` endpoint, in file order
    pub fn domain_socket_addresses(&self) -> Vec<DomainSocketAddress> {
        self.endpoints
            .iter()
            .filter_map(|e| e.to_domain_socket_address().ok())
            .collect()
    }
}

/// Parse and validate an endpoint group from TOML text
///
/// # Errors
///
/// Returns [`ConfigError::ParseError`] for malformed TOML and
/// [`ConfigError::ValidationError`] for an empty group, a zero weight, an
/// unparseable endpoint, or a duplicate endpoint.
pub fn load_config_from_str(content: &str) -> Result<EndpointGroup, ConfigError> {
    let toml_config: EndpointGroupToml = toml::from_str(content)?;
    resolve(toml_config.group)
}

/// Load and validate an endpoint group from a file
///
/// # Errors
///
/// Returns [`ConfigError::ReadError`] if the file cannot be read, plus the
/// errors of [`load_config_from_str`].
pub fn load_config_from_path(path: impl AsRef<Path>) -> Result<EndpointGroup, ConfigError> {
    let path = path.as_ref();
    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
        path: path.to_path_buf(),
        source: e,
    })?;

    let group = load_config_from_str(&content)?;
    tracing::info!(
        path = %path.display(),
        group = %group.name,
        endpoints = group.endpoints.len(),
        "Loaded endpoint group"
    );
    Ok(group)
}

fn resolve(group: GroupToml) -> Result<EndpointGroup, ConfigError> {
    let name = group.name.unwrap_or_else(|| "default".to_string());
    let weight = group.default_weight.unwrap_or(DEFAULT_WEIGHT);
    if weight == 0 {
        return Err(ConfigError::ValidationError(format!(
            "group {:?}: default_weight must be positive",
            name
        )));
    }

    if group.endpoints.is_empty() {
        return Err(ConfigError::ValidationError(format!(
            "group {:?} has no endpoints",
            name
        )));
    }

    let mut seen = HashSet::new();
    let mut endpoints = Vec::with_capacity(group.endpoints.len());
    for (index, text) in group.endpoints.iter().enumerate() {
        let endpoint = Endpoint::parse(text).map_err(|e| {
            ConfigError::ValidationError(format!(
                "group {:?}, endpoint #{} ({:?}): {}",
                name, index, text, e
            ))
        })?;

        if !seen.insert(endpoint.authority()) {
            return Err(ConfigError::ValidationError(format!(
                "group {:?}: duplicate endpoint {:?}",
                name, text
            )));
        }
        endpoints.push(endpoint.with_weight(weight));
    }

    Ok(EndpointGroup { name, endpoints })
}
