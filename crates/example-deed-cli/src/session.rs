// crates/example-deed-cli/src/session.rs
// ============================================================================
// Module: CLI Session Wiring
// Description: Turns loaded configuration into an audited contract client.
// Purpose: Keep network selection, sender resolution, and audit routing testable.
// Dependencies: example-deed-config, example-deed-core, example-deed-rpc
// ============================================================================

//! ## Overview
//! A [`Session`] pins one network profile from a validated [`DeedConfig`].
//! Contract clients opened through it are wrapped in
//! [`AuditedDeedContract`] with the sink selected by the `[audit]` table.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::path::Path;
use std::sync::Arc;

use alloy_primitives::Address;
use example_deed_config::AuditSinkKind;
use example_deed_config::ConfigError;
use example_deed_config::DeedConfig;
use example_deed_config::NetworkProfile;
use example_deed_core::AuditedDeedContract;
use example_deed_core::ContractError;
use example_deed_core::DeedAuditSink;
use example_deed_core::FileAuditSink;
use example_deed_core::NoopAuditSink;
use example_deed_core::StderrAuditSink;
use example_deed_rpc::RpcDeedContract;
use example_deed_rpc::RpcDeployer;
use thiserror::Error;

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Session setup failures.
#[derive(Debug, Error)]
pub enum SessionError {
    /// Configuration could not be loaded or names an unknown network.
    #[error(transparent)]
    Config(#[from] ConfigError),
    /// No contract address was supplied.
    #[error("no contract address; pass --contract or set contract.address")]
    MissingContract,
    /// No sending account could be resolved.
    #[error("no sending account; pass --from or set networks.{network}.from")]
    MissingSender {
        /// Network profile name.
        network: String,
    },
    /// Audit log could not be opened.
    #[error("failed to open audit log {path}: {error}")]
    Audit {
        /// Audit log path.
        path: String,
        /// I/O error text.
        error: String,
    },
    /// The node rejected the connection.
    #[error(transparent)]
    Contract(#[from] ContractError),
}

// ============================================================================
// SECTION: Session
// ============================================================================

/// Validated configuration bound to one network profile.
#[derive(Debug, Clone)]
pub struct Session {
    /// Loaded configuration.
    config: DeedConfig,
    /// Selected network name.
    network: String,
    /// Selected network profile.
    profile: NetworkProfile,
}

impl Session {
    /// Loads configuration from `path` and selects `network`.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::Config`] when loading fails or the network is
    /// unknown.
    pub fn load(path: Option<&Path>, network: &str) -> Result<Self, SessionError> {
        Self::from_config(DeedConfig::load(path)?, network)
    }

    /// Selects `network` from an already loaded configuration.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::Config`] when the network is unknown.
    pub fn from_config(config: DeedConfig, network: &str) -> Result<Self, SessionError> {
        let profile = config.network(network)?.clone();
        Ok(Self {
            config,
            network: network.to_string(),
            profile,
        })
    }

    /// Returns the selected network name.
    #[must_use]
    pub fn network(&self) -> &str {
        &self.network
    }

    /// Returns the selected network profile.
    #[must_use]
    pub const fn profile(&self) -> &NetworkProfile {
        &self.profile
    }

    /// Returns the loaded configuration.
    #[must_use]
    pub const fn config(&self) -> &DeedConfig {
        &self.config
    }

    /// Resolves the contract address, preferring `explicit` over config.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::MissingContract`] when neither is set.
    pub fn contract_address(&self, explicit: Option<Address>) -> Result<Address, SessionError> {
        explicit.or(self.config.contract.address).ok_or(SessionError::MissingContract)
    }

    /// Builds the audit sink selected by configuration.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::Audit`] when the log file cannot be opened.
    pub fn audit_sink(&self) -> Result<Arc<dyn DeedAuditSink>, SessionError> {
        let audit = &self.config.audit;
        match (audit.sink, audit.path.as_deref()) {
            (AuditSinkKind::None, _) => Ok(Arc::new(NoopAuditSink)),
            (AuditSinkKind::Stderr, _) => Ok(Arc::new(StderrAuditSink)),
            (AuditSinkKind::File, Some(path)) => {
                let sink = FileAuditSink::new(Path::new(path)).map_err(|err| {
                    SessionError::Audit {
                        path: path.to_string(),
                        error: err.to_string(),
                    }
                })?;
                Ok(Arc::new(sink))
            }
            (AuditSinkKind::File, None) => Err(SessionError::Audit {
                path: String::new(),
                error: "audit.path is not set".to_string(),
            }),
        }
    }

    /// Connects to the deployed contract and wraps it with the audit sink.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError`] when the address, audit sink, or node
    /// connection cannot be resolved.
    pub fn open_contract(
        &self,
        explicit: Option<Address>,
    ) -> Result<AuditedDeedContract<RpcDeedContract>, SessionError> {
        let address = self.contract_address(explicit)?;
        let sink = self.audit_sink()?;
        let contract = RpcDeedContract::connect(&self.profile, address, &self.config.client)?;
        Ok(AuditedDeedContract::new(contract, sink))
    }

    /// Resolves the sending account.
    ///
    /// Order: `explicit`, then the profile's `from`, then the node's first
    /// managed account.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::MissingSender`] when the node has no accounts.
    pub fn resolve_sender(&self, explicit: Option<Address>) -> Result<Address, SessionError> {
        if let Some(sender) = explicit.or(self.profile.from) {
            return Ok(sender);
        }
        let deployer = RpcDeployer::connect(&self.profile, &self.config.client)?;
        deployer.accounts()?.into_iter().next().ok_or_else(|| SessionError::MissingSender {
            network: self.network.clone(),
        })
    }
}
