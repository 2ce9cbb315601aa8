// crates/example-deed-rpc/src/deploy.rs
// ============================================================================
// Module: RPC Deployer
// Description: Contract deployment and account listing over JSON-RPC.
// Purpose: Provide fresh contract instances for live-node tests.
// Dependencies: crate::{contract, transport}, example-deed-config
// ============================================================================

//! ## Overview
//! [`RpcDeployer`] submits creation bytecode from a node-managed account and
//! returns the deployed address from the receipt.

use alloy_primitives::Address;
use alloy_primitives::Bytes;
use example_deed_config::ClientConfig;
use example_deed_config::NetworkProfile;
use example_deed_core::ContractError;
use serde_json::Map;
use serde_json::Value;
use serde_json::json;

use crate::contract::RpcDeedContract;
use crate::contract::connect_transport;
use crate::contract::into_tx_receipt;
use crate::contract::map_rpc_error;
use crate::transport::JsonRpcTransport;

/// Deploys `ExampleDeed` instances to one node.
#[derive(Debug)]
pub struct RpcDeployer {
    /// Node transport.
    transport: JsonRpcTransport,
    /// Network profile used for new client connections.
    profile: NetworkProfile,
    /// Client limits used for new client connections.
    config: ClientConfig,
}

impl RpcDeployer {
    /// Connects to the node named by `profile`.
    ///
    /// # Errors
    ///
    /// Returns [`ContractError`] when the node is unreachable or reports a
    /// different network id.
    pub fn connect(profile: &NetworkProfile, config: &ClientConfig) -> Result<Self, ContractError> {
        let transport = connect_transport(profile, config)?;
        Ok(Self {
            transport,
            profile: profile.clone(),
            config: config.clone(),
        })
    }

    /// Lists the accounts managed by the node.
    ///
    /// # Errors
    ///
    /// Returns [`ContractError`] when the request fails.
    pub fn accounts(&self) -> Result<Vec<Address>, ContractError> {
        self.transport.request_typed("eth_accounts", json!([])).map_err(map_rpc_error)
    }

    /// Deploys `bytecode` from `from` and returns the new contract address.
    ///
    /// # Errors
    ///
    /// Returns [`ContractError::Reverted`] when the constructor fails and
    /// [`ContractError::InvalidResponse`] when the receipt has no address.
    pub fn deploy(&self, from: Address, bytecode: &[u8]) -> Result<Address, ContractError> {
        if bytecode.is_empty() {
            return Err(ContractError::InvalidInput("bytecode must be non-empty".to_string()));
        }
        let mut request = Map::new();
        request.insert("from".to_string(), json!(from));
        request.insert("data".to_string(), json!(Bytes::copy_from_slice(bytecode)));
        if let Some(gas) = self.profile.gas {
            request.insert("gas".to_string(), json!(format!("{gas:#x}")));
        }
        let receipt =
            self.transport.send_transaction(Value::Object(request)).map_err(map_rpc_error)?;
        into_tx_receipt(&receipt)?;
        receipt.contract_address.ok_or_else(|| {
            ContractError::InvalidResponse("deployment receipt has no contractAddress".to_string())
        })
    }

    /// Deploys `bytecode` and connects a contract client to the result.
    ///
    /// # Errors
    ///
    /// Returns [`ContractError`] when deployment or connection fails.
    pub fn deploy_contract(
        &self,
        from: Address,
        bytecode: &[u8],
    ) -> Result<RpcDeedContract, ContractError> {
        let address = self.deploy(from, bytecode)?;
        RpcDeedContract::connect(&self.profile, address, &self.config)
    }
}
