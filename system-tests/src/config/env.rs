// system-tests/src/config/env.rs
// ============================================================================
// Module: System Test Environment
// Description: Environment-backed configuration for system tests.
// Purpose: Centralize env parsing with strict UTF-8 validation.
// Dependencies: std
// ============================================================================

//! ## Overview
//! Environment values are parsed with strict UTF-8 enforcement to avoid silent
//! misconfiguration. Invalid UTF-8 fails closed.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::path::PathBuf;

use example_deed_config::DEFAULT_NETWORK;

// ============================================================================
// SECTION: Environment Constants
// ============================================================================

/// Environment keys for system test configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SystemTestEnv {
    /// Path to the contract creation bytecode (hex text or a JSON artifact).
    Bytecode,
    /// Optional network config path override.
    ConfigPath,
    /// Optional network profile name.
    Network,
}

impl SystemTestEnv {
    /// Returns the canonical environment variable name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Bytecode => "EXAMPLE_DEED_SYSTEM_TEST_BYTECODE",
            Self::ConfigPath => "EXAMPLE_DEED_SYSTEM_TEST_CONFIG",
            Self::Network => "EXAMPLE_DEED_SYSTEM_TEST_NETWORK",
        }
    }
}

// ============================================================================
// SECTION: Config Types
// ============================================================================

/// Typed system test configuration derived from environment variables.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SystemTestConfig {
    /// Creation bytecode path, required by the live-node deployer.
    pub bytecode: Option<PathBuf>,
    /// Optional network config path override.
    pub config_path: Option<PathBuf>,
    /// Network profile name.
    pub network: String,
}

impl Default for SystemTestConfig {
    fn default() -> Self {
        Self {
            bytecode: None,
            config_path: None,
            network: DEFAULT_NETWORK.to_string(),
        }
    }
}

impl SystemTestConfig {
    /// Loads configuration from environment variables.
    ///
    /// # Errors
    ///
    /// Returns an error when an environment value is not valid UTF-8 or is
    /// empty.
    pub fn load() -> Result<Self, String> {
        let bytecode = read_env_nonempty(SystemTestEnv::Bytecode.as_str())?.map(PathBuf::from);
        let config_path =
            read_env_nonempty(SystemTestEnv::ConfigPath.as_str())?.map(PathBuf::from);
        let network = read_env_nonempty(SystemTestEnv::Network.as_str())?
            .map_or_else(|| DEFAULT_NETWORK.to_string(), |value| value.trim().to_string());
        Ok(Self {
            bytecode,
            config_path,
            network,
        })
    }
}

// ============================================================================
// SECTION: Helpers
// ============================================================================

/// Reads an environment variable and enforces UTF-8 validity.
///
/// # Errors
///
/// Returns an error when the environment variable contains invalid UTF-8.
pub fn read_env_strict(name: &str) -> Result<Option<String>, String> {
    std::env::var_os(name).map_or(Ok(None), |raw| {
        raw.into_string().map(Some).map_err(|_| format!("{name} must be valid UTF-8"))
    })
}

/// Reads an environment variable and rejects empty values.
///
/// # Errors
///
/// Returns an error when the variable is set but empty or whitespace.
fn read_env_nonempty(name: &str) -> Result<Option<String>, String> {
    match read_env_strict(name)? {
        Some(value) if value.trim().is_empty() => Err(format!("{name} must not be empty")),
        Some(value) => Ok(Some(value)),
        None => Ok(None),
    }
}
