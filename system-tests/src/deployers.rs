// system-tests/src/deployers.rs
// ============================================================================
// Module: Contract Deployers
// Description: In-memory and live-node implementations of the deployment seam.
// Purpose: Run the conformance suite against the reference model or a real node.
// Dependencies: example-deed-core, example-deed-rpc, example-deed-config, serde_json
// ============================================================================

//! ## Overview
//! [`InMemoryDeployer`] is always available and needs no node.
//! `LiveNodeDeployer` is compiled with the `system-tests` feature and deploys
//! creation bytecode to the node selected by [`SystemTestConfig`].
//!
//! [`SystemTestConfig`]: crate::config::SystemTestConfig

// ============================================================================
// SECTION: Imports
// ============================================================================

use alloy_primitives::Address;
use alloy_primitives::hex;
use example_deed_core::AppropriationPolicy;
use example_deed_core::ContractError;
use example_deed_core::InMemoryDeedContract;
use serde_json::Value;

use crate::harness::Deployer;

// ============================================================================
// SECTION: In-Memory
// ============================================================================

/// Deploys fresh [`InMemoryDeedContract`] instances.
#[derive(Debug, Clone)]
pub struct InMemoryDeployer {
    /// Policy given to every deployed contract.
    policy: AppropriationPolicy,
    /// Accounts reported to the fixture.
    accounts: Vec<Address>,
}

impl Default for InMemoryDeployer {
    fn default() -> Self {
        Self::with_policy(AppropriationPolicy::Disabled)
    }
}

impl InMemoryDeployer {
    /// Creates a deployer whose contracts use `policy`.
    #[must_use]
    pub fn with_policy(policy: AppropriationPolicy) -> Self {
        Self {
            policy,
            accounts: (1_u8 ..= 3).map(Address::repeat_byte).collect(),
        }
    }
}

impl Deployer for InMemoryDeployer {
    type Contract = InMemoryDeedContract;

    fn deploy(&self) -> Result<Self::Contract, ContractError> {
        Ok(InMemoryDeedContract::with_policy(self.policy))
    }

    fn accounts(&self) -> Result<Vec<Address>, ContractError> {
        Ok(self.accounts.clone())
    }
}

// ============================================================================
// SECTION: Bytecode
// ============================================================================

/// Parses creation bytecode from hex text or a compiled JSON artifact.
///
/// Artifacts are JSON objects carrying the hex string under `bytecode`.
///
/// # Errors
///
/// Returns an error when the input is not valid hex, the artifact has no
/// `bytecode` string, or the bytecode is empty.
pub fn parse_bytecode(raw: &str) -> Result<Vec<u8>, String> {
    let trimmed = raw.trim();
    let text = if trimmed.starts_with('{') {
        let artifact: Value =
            serde_json::from_str(trimmed).map_err(|err| format!("invalid artifact: {err}"))?;
        match artifact.get("bytecode") {
            Some(Value::String(code)) => code.trim().to_string(),
            _ => return Err("artifact has no bytecode string".to_string()),
        }
    } else {
        trimmed.to_string()
    };
    let bytes = hex::decode(&text).map_err(|err| format!("invalid bytecode hex: {err}"))?;
    if bytes.is_empty() {
        return Err("bytecode is empty".to_string());
    }
    Ok(bytes)
}

// ============================================================================
// SECTION: Live Node
// ============================================================================

#[cfg(feature = "system-tests")]
pub use live::LiveNodeDeployer;

/// Live-node deployment through the JSON-RPC client.
#[cfg(feature = "system-tests")]
mod live {
    use alloy_primitives::Address;
    use example_deed_config::DeedConfig;
    use example_deed_config::NetworkProfile;
    use example_deed_core::ContractError;
    use example_deed_rpc::RpcDeedContract;
    use example_deed_rpc::RpcDeployer;

    use super::parse_bytecode;
    use crate::config::SystemTestConfig;
    use crate::harness::Deployer;

    /// Deploys fresh contracts to a development node.
    pub struct LiveNodeDeployer {
        /// Node deployer bound to the selected profile.
        deployer: RpcDeployer,
        /// Selected network profile.
        profile: NetworkProfile,
        /// Creation bytecode.
        bytecode: Vec<u8>,
    }

    impl LiveNodeDeployer {
        /// Builds a deployer from environment-backed configuration.
        ///
        /// # Errors
        ///
        /// Returns an error when the bytecode path is unset or unreadable,
        /// the config fails to load, or the node is unreachable.
        pub fn from_config(config: &SystemTestConfig) -> Result<Self, String> {
            let path = config
                .bytecode
                .as_deref()
                .ok_or_else(|| "bytecode path is not set".to_string())?;
            let raw = std::fs::read_to_string(path)
                .map_err(|err| format!("failed to read {}: {err}", path.display()))?;
            let bytecode = parse_bytecode(&raw)?;
            let deed_config =
                DeedConfig::load(config.config_path.as_deref()).map_err(|err| err.to_string())?;
            let profile = deed_config.network(&config.network).map_err(|err| err.to_string())?;
            let deployer = RpcDeployer::connect(profile, &deed_config.client)
                .map_err(|err| format!("connect {}: {err}", config.network))?;
            Ok(Self {
                deployer,
                profile: profile.clone(),
                bytecode,
            })
        }

        /// Account used to send deployments.
        fn sender(&self) -> Result<Address, ContractError> {
            if let Some(from) = self.profile.from {
                return Ok(from);
            }
            self.deployer.accounts()?.into_iter().next().ok_or_else(|| {
                ContractError::InvalidInput("node reports no accounts".to_string())
            })
        }
    }

    impl Deployer for LiveNodeDeployer {
        type Contract = RpcDeedContract;

        fn deploy(&self) -> Result<Self::Contract, ContractError> {
            self.deployer.deploy_contract(self.sender()?, &self.bytecode)
        }

        fn accounts(&self) -> Result<Vec<Address>, ContractError> {
            self.deployer.accounts()
        }
    }
}

// ============================================================================
// SECTION: Tests
// ============================================================================
