// crates/example-deed-config/src/config.rs
// ============================================================================
// Module: Example Deed Configuration
// Description: Configuration loading and validation for Example Deed.
// Purpose: Provide strict, fail-closed config parsing with hard limits.
// Dependencies: alloy-primitives, serde, toml
// ============================================================================

//! ## Overview
//! Configuration is loaded from a TOML file with strict size and path limits.
//! An empty file yields the built-in `development` network profile
//! (`localhost:8545`, network id `4447`). Invalid configuration fails closed.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeMap;
use std::env;
use std::fs;
use std::path::Path;
use std::path::PathBuf;

use alloy_primitives::Address;
use serde::Deserialize;
use serde::Serialize;
use thiserror::Error;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Default configuration filename when no path is specified.
const DEFAULT_CONFIG_NAME: &str = "example-deed.toml";
/// Environment variable used to override the config path.
pub const CONFIG_ENV_VAR: &str = "EXAMPLE_DEED_CONFIG";
/// Name of the built-in development network profile.
pub const DEFAULT_NETWORK: &str = "development";
/// Host of the built-in development network profile.
pub const DEFAULT_DEV_HOST: &str = "localhost";
/// Port of the built-in development network profile.
pub const DEFAULT_DEV_PORT: u16 = 8545;
/// Network identifier of the built-in development network profile.
pub const DEFAULT_DEV_NETWORK_ID: &str = "4447";
/// Network identifier that matches any node.
pub const ANY_NETWORK_ID: &str = "*";
/// Maximum configuration file size in bytes.
pub(crate) const MAX_CONFIG_FILE_SIZE: usize = 1024 * 1024;
/// Maximum length of a single path component.
pub(crate) const MAX_PATH_COMPONENT_LENGTH: usize = 255;
/// Maximum total path length.
pub(crate) const MAX_TOTAL_PATH_LENGTH: usize = 4096;
/// Maximum number of network profiles.
pub(crate) const MAX_NETWORKS: usize = 64;
/// Maximum length of a network profile name.
pub(crate) const MAX_NETWORK_NAME_LENGTH: usize = 64;
/// Maximum length of a host name.
pub(crate) const MAX_HOST_LENGTH: usize = 253;
/// Maximum length of a network identifier.
pub(crate) const MAX_NETWORK_ID_LENGTH: usize = 20;
/// Default request timeout in milliseconds.
pub(crate) const DEFAULT_TIMEOUT_MS: u64 = 5_000;
/// Minimum request timeout in milliseconds.
pub(crate) const MIN_TIMEOUT_MS: u64 = 100;
/// Maximum request timeout in milliseconds.
pub(crate) const MAX_TIMEOUT_MS: u64 = 120_000;
/// Default maximum JSON-RPC response size in bytes.
pub(crate) const DEFAULT_MAX_RESPONSE_BYTES: usize = 1024 * 1024;
/// Maximum allowed JSON-RPC response size in bytes.
pub(crate) const MAX_MAX_RESPONSE_BYTES: usize = 16 * 1024 * 1024;
/// Default receipt poll interval in milliseconds.
pub(crate) const DEFAULT_RECEIPT_POLL_INTERVAL_MS: u64 = 100;
/// Minimum receipt poll interval in milliseconds.
pub(crate) const MIN_RECEIPT_POLL_INTERVAL_MS: u64 = 10;
/// Default receipt wait timeout in milliseconds.
pub(crate) const DEFAULT_RECEIPT_TIMEOUT_MS: u64 = 30_000;
/// Maximum receipt wait timeout in milliseconds.
pub(crate) const MAX_RECEIPT_TIMEOUT_MS: u64 = 600_000;

// ============================================================================
// SECTION: Configuration Types
// ============================================================================

/// Example Deed configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DeedConfig {
    /// Named network profiles.
    #[serde(default = "default_networks")]
    pub networks: BTreeMap<String, NetworkProfile>,
    /// Deployed contract configuration.
    #[serde(default)]
    pub contract: ContractConfig,
    /// JSON-RPC client limits.
    #[serde(default)]
    pub client: ClientConfig,
    /// Audit log routing.
    #[serde(default)]
    pub audit: AuditConfig,
}

impl Default for DeedConfig {
    fn default() -> Self {
        Self {
            networks: default_networks(),
            contract: ContractConfig::default(),
            client: ClientConfig::default(),
            audit: AuditConfig::default(),
        }
    }
}

impl DeedConfig {
    /// Loads configuration from disk using the default resolution rules.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when loading or validation fails.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let resolved = resolve_path(path)?;
        validate_path(&resolved)?;
        let bytes = fs::read(&resolved).map_err(|err| ConfigError::Io(err.to_string()))?;
        if bytes.len() > MAX_CONFIG_FILE_SIZE {
            return Err(ConfigError::Invalid("config file exceeds size limit".to_string()));
        }
        let content = std::str::from_utf8(&bytes)
            .map_err(|_| ConfigError::Invalid("config file must be utf-8".to_string()))?;
        Self::from_toml_str(content)
    }

    /// Parses and validates configuration from TOML text.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when parsing or validation fails.
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let config: Self =
            toml::from_str(content).map_err(|err| ConfigError::Parse(err.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Validates the configuration for internal consistency.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when configuration is invalid.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.networks.is_empty() {
            return Err(ConfigError::Invalid("at least one network must be configured".to_string()));
        }
        if self.networks.len() > MAX_NETWORKS {
            return Err(ConfigError::Invalid("too many networks configured".to_string()));
        }
        for (name, profile) in &self.networks {
            validate_network_name(name)?;
            profile.validate(name)?;
        }
        self.client.validate()?;
        self.audit.validate()?;
        Ok(())
    }

    /// Returns the network profile named `name`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] when no profile has that name.
    pub fn network(&self, name: &str) -> Result<&NetworkProfile, ConfigError> {
        self.networks
            .get(name)
            .ok_or_else(|| ConfigError::Invalid(format!("unknown network: {name}")))
    }
}

/// Connection parameters for one blockchain node.
///
/// # Invariants
/// - `host` is a bare host name or IP literal (no scheme, no path).
/// - `port` is non-zero.
/// - `network_id` is a decimal identifier or `*` (matches any node).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct NetworkProfile {
    /// Node host name or IP literal.
    pub host: String,
    /// Node JSON-RPC port.
    pub port: u16,
    /// Expected network identifier reported by the node.
    pub network_id: String,
    /// Gas limit attached to transactions, when set.
    #[serde(default)]
    pub gas: Option<u64>,
    /// Default sending account, when set.
    #[serde(default)]
    pub from: Option<Address>,
}

impl NetworkProfile {
    /// Returns the built-in development profile.
    #[must_use]
    pub fn development() -> Self {
        Self {
            host: DEFAULT_DEV_HOST.to_string(),
            port: DEFAULT_DEV_PORT,
            network_id: DEFAULT_DEV_NETWORK_ID.to_string(),
            gas: None,
            from: None,
        }
    }

    /// Returns the HTTP JSON-RPC endpoint for this profile.
    #[must_use]
    pub fn endpoint_url(&self) -> String {
        if self.host.contains(':') {
            format!("http://[{}]:{}", self.host, self.port)
        } else {
            format!("http://{}:{}", self.host, self.port)
        }
    }

    /// Returns true when a node reporting `reported` satisfies this profile.
    #[must_use]
    pub fn accepts_network_id(&self, reported: &str) -> bool {
        self.network_id == ANY_NETWORK_ID || self.network_id == reported.trim()
    }

    /// Validates the profile named `name`.
    fn validate(&self, name: &str) -> Result<(), ConfigError> {
        let host = self.host.as_str();
        if host.trim().is_empty() {
            return Err(ConfigError::Invalid(format!("networks.{name}.host must be non-empty")));
        }
        if host.len() > MAX_HOST_LENGTH {
            return Err(ConfigError::Invalid(format!("networks.{name}.host exceeds max length")));
        }
        if host.contains("://") || host.contains('/') || host.chars().any(char::is_whitespace) {
            return Err(ConfigError::Invalid(format!(
                "networks.{name}.host must be a bare host name"
            )));
        }
        if self.port == 0 {
            return Err(ConfigError::Invalid(format!(
                "networks.{name}.port must be greater than zero"
            )));
        }
        validate_network_id(name, &self.network_id)?;
        if self.gas == Some(0) {
            return Err(ConfigError::Invalid(format!(
                "networks.{name}.gas must be greater than zero"
            )));
        }
        Ok(())
    }
}

/// Deployed contract configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ContractConfig {
    /// Address of the deployed `ExampleDeed` contract.
    #[serde(default)]
    pub address: Option<Address>,
}

/// JSON-RPC client limits.
///
/// # Invariants
/// - `timeout_ms` applies to each HTTP request.
/// - `max_response_bytes` is a hard upper bound on response bodies.
/// - `receipt_timeout_ms >= receipt_poll_interval_ms`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ClientConfig {
    /// Request timeout in milliseconds.
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,
    /// Maximum response size allowed, in bytes.
    #[serde(default = "default_max_response_bytes")]
    pub max_response_bytes: usize,
    /// Interval between receipt polls, in milliseconds.
    #[serde(default = "default_receipt_poll_interval_ms")]
    pub receipt_poll_interval_ms: u64,
    /// Maximum time to wait for a receipt, in milliseconds.
    #[serde(default = "default_receipt_timeout_ms")]
    pub receipt_timeout_ms: u64,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            timeout_ms: DEFAULT_TIMEOUT_MS,
            max_response_bytes: DEFAULT_MAX_RESPONSE_BYTES,
            receipt_poll_interval_ms: DEFAULT_RECEIPT_POLL_INTERVAL_MS,
            receipt_timeout_ms: DEFAULT_RECEIPT_TIMEOUT_MS,
        }
    }
}

impl ClientConfig {
    /// Validates client limits.
    fn validate(&self) -> Result<(), ConfigError> {
        if !(MIN_TIMEOUT_MS ..= MAX_TIMEOUT_MS).contains(&self.timeout_ms) {
            return Err(ConfigError::Invalid(format!(
                "client.timeout_ms must be between {MIN_TIMEOUT_MS} and {MAX_TIMEOUT_MS}"
            )));
        }
        if self.max_response_bytes == 0 || self.max_response_bytes > MAX_MAX_RESPONSE_BYTES {
            return Err(ConfigError::Invalid(format!(
                "client.max_response_bytes must be between 1 and {MAX_MAX_RESPONSE_BYTES}"
            )));
        }
        if self.receipt_poll_interval_ms < MIN_RECEIPT_POLL_INTERVAL_MS {
            return Err(ConfigError::Invalid(format!(
                "client.receipt_poll_interval_ms must be at least {MIN_RECEIPT_POLL_INTERVAL_MS}"
            )));
        }
        if self.receipt_timeout_ms < self.receipt_poll_interval_ms
            || self.receipt_timeout_ms > MAX_RECEIPT_TIMEOUT_MS
        {
            return Err(ConfigError::Invalid(format!(
                "client.receipt_timeout_ms must be between receipt_poll_interval_ms and \
                 {MAX_RECEIPT_TIMEOUT_MS}"
            )));
        }
        Ok(())
    }
}

/// Audit sink selection.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AuditSinkKind {
    /// Audit events are discarded.
    #[default]
    None,
    /// Audit events are written to stderr as JSON lines.
    Stderr,
    /// Audit events are appended to a file as JSON lines.
    File,
}

/// Audit log routing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AuditConfig {
    /// Selected sink.
    #[serde(default)]
    pub sink: AuditSinkKind,
    /// Log file path for the file sink.
    #[serde(default)]
    pub path: Option<String>,
}

impl AuditConfig {
    /// Validates audit routing.
    fn validate(&self) -> Result<(), ConfigError> {
        match (self.sink, &self.path) {
            (AuditSinkKind::File, None) => Err(ConfigError::Invalid(
                "audit.path is required when audit.sink = \"file\"".to_string(),
            )),
            (AuditSinkKind::File, Some(path)) => validate_path_string("audit.path", path),
            (_, Some(_)) => Err(ConfigError::Invalid(
                "audit.path is only valid when audit.sink = \"file\"".to_string(),
            )),
            (_, None) => Ok(()),
        }
    }
}

// ============================================================================
// SECTION: Defaults
// ============================================================================

/// Returns the built-in network profiles.
fn default_networks() -> BTreeMap<String, NetworkProfile> {
    BTreeMap::from([(DEFAULT_NETWORK.to_string(), NetworkProfile::development())])
}

/// Default request timeout.
const fn default_timeout_ms() -> u64 {
    DEFAULT_TIMEOUT_MS
}

/// Default response size limit.
const fn default_max_response_bytes() -> usize {
    DEFAULT_MAX_RESPONSE_BYTES
}

/// Default receipt poll interval.
const fn default_receipt_poll_interval_ms() -> u64 {
    DEFAULT_RECEIPT_POLL_INTERVAL_MS
}

/// Default receipt wait timeout.
const fn default_receipt_timeout_ms() -> u64 {
    DEFAULT_RECEIPT_TIMEOUT_MS
}

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Configuration loading or validation errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// I/O failure while reading configuration.
    #[error("config io error: {0}")]
    Io(String),
    /// TOML parsing error.
    #[error("config parse error: {0}")]
    Parse(String),
    /// Invalid configuration data.
    #[error("invalid config: {0}")]
    Invalid(String),
}

// ============================================================================
// SECTION: Helpers
// ============================================================================

/// Resolves the config path from CLI or environment defaults.
fn resolve_path(path: Option<&Path>) -> Result<PathBuf, ConfigError> {
    if let Some(path) = path {
        return Ok(path.to_path_buf());
    }
    if let Ok(env_path) = env::var(CONFIG_ENV_VAR) {
        if env_path.len() > MAX_TOTAL_PATH_LENGTH {
            return Err(ConfigError::Invalid("config path exceeds max length".to_string()));
        }
        return Ok(PathBuf::from(env_path));
    }
    Ok(PathBuf::from(DEFAULT_CONFIG_NAME))
}

/// Validates the resolved path against security limits.
fn validate_path(path: &Path) -> Result<(), ConfigError> {
    let text = path.to_string_lossy();
    if text.len() > MAX_TOTAL_PATH_LENGTH {
        return Err(ConfigError::Invalid("config path exceeds max length".to_string()));
    }
    for component in path.components() {
        let value = component.as_os_str().to_string_lossy();
        if value.len() > MAX_PATH_COMPONENT_LENGTH {
            return Err(ConfigError::Invalid("config path component too long".to_string()));
        }
    }
    Ok(())
}

/// Validates a path string against length constraints.
fn validate_path_string(field: &str, value: &str) -> Result<(), ConfigError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(ConfigError::Invalid(format!("{field} must be non-empty")));
    }
    if trimmed.len() > MAX_TOTAL_PATH_LENGTH {
        return Err(ConfigError::Invalid(format!("{field} exceeds max length")));
    }
    let path = Path::new(trimmed);
    for component in path.components() {
        let component_value = component.as_os_str().to_string_lossy();
        if component_value.len() > MAX_PATH_COMPONENT_LENGTH {
            return Err(ConfigError::Invalid(format!("{field} path component too long")));
        }
    }
    Ok(())
}

/// Validates a network profile name.
fn validate_network_name(name: &str) -> Result<(), ConfigError> {
    if name.is_empty() || name.len() > MAX_NETWORK_NAME_LENGTH {
        return Err(ConfigError::Invalid(format!(
            "network name must be 1 to {MAX_NETWORK_NAME_LENGTH} characters"
        )));
    }
    if !name.chars().all(|ch| ch.is_ascii_alphanumeric() || ch == '-' || ch == '_') {
        return Err(ConfigError::Invalid(format!(
            "network name {name} must contain only ascii letters, digits, '-' or '_'"
        )));
    }
    Ok(())
}

/// Validates a network identifier.
fn validate_network_id(name: &str, network_id: &str) -> Result<(), ConfigError> {
    if network_id == ANY_NETWORK_ID {
        return Ok(());
    }
    if network_id.is_empty()
        || network_id.len() > MAX_NETWORK_ID_LENGTH
        || !network_id.chars().all(|ch| ch.is_ascii_digit())
    {
        return Err(ConfigError::Invalid(format!(
            "networks.{name}.network_id must be a decimal identifier or \"*\""
        )));
    }
    Ok(())
}
