// crates/example-deed-rpc/src/contract.rs
// ============================================================================
// Module: RPC Deed Contract
// Description: DeedContract implementation backed by a JSON-RPC node.
// Purpose: Run contract operations against a deployed ExampleDeed instance.
// Dependencies: crate::{abi, transport}, example-deed-core, alloy-sol-types
// ============================================================================

//! ## Overview
//! [`RpcDeedContract`] encodes calls with the static [`IExampleDeed`]
//! interface. Views go through `eth_call` and writes through
//! `eth_sendTransaction` followed by receipt polling. Node failures are
//! classified into [`ContractError`] so reverts stay distinguishable from
//! transport problems.

// ============================================================================
// SECTION: Imports
// ============================================================================

use alloy_primitives::Address;
use alloy_primitives::Bytes;
use alloy_primitives::U256;
use alloy_primitives::hex;
use alloy_sol_types::SolCall;
use example_deed_config::ClientConfig;
use example_deed_config::NetworkProfile;
use example_deed_core::ContractError;
use example_deed_core::DeedContract;
use example_deed_core::DeedId;
use example_deed_core::TxReceipt;
use example_deed_core::TxRequest;
use serde_json::Map;
use serde_json::Value;
use serde_json::json;

use crate::abi::IExampleDeed;
use crate::abi::decode_revert_reason;
use crate::transport::JsonRpcTransport;
use crate::transport::RpcError;
use crate::transport::RpcReceipt;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// JSON-RPC error code used by nodes for execution reverts.
const REVERT_ERROR_CODE: i64 = 3;

// ============================================================================
// SECTION: Types
// ============================================================================

/// Deed contract client bound to one deployed address.
///
/// # Invariants
/// - The node's network id matched the profile when the client was built.
/// - `address` held contract code when the client was built.
#[derive(Debug)]
pub struct RpcDeedContract {
    /// Node transport.
    transport: JsonRpcTransport,
    /// Deployed contract address.
    address: Address,
    /// Gas limit attached to transactions, when configured.
    gas: Option<u64>,
}

impl RpcDeedContract {
    /// Connects to the node named by `profile` and binds to `address`.
    ///
    /// # Errors
    ///
    /// Returns [`ContractError::Transport`] when the node is unreachable and
    /// [`ContractError::InvalidInput`] when the node reports a different
    /// network id or `address` holds no contract code.
    pub fn connect(
        profile: &NetworkProfile,
        address: Address,
        config: &ClientConfig,
    ) -> Result<Self, ContractError> {
        let transport = connect_transport(profile, config)?;
        let code: Bytes = transport
            .request_typed("eth_getCode", json!([address, "latest"]))
            .map_err(map_rpc_error)?;
        if code.is_empty() {
            return Err(ContractError::InvalidInput(format!("no contract code at {address}")));
        }
        Ok(Self {
            transport,
            address,
            gas: profile.gas,
        })
    }

    /// Returns the bound contract address.
    #[must_use]
    pub const fn address(&self) -> Address {
        self.address
    }

    /// Executes a view call and decodes its return data.
    fn view<C: SolCall>(&self, call: &C) -> Result<C::Return, ContractError> {
        let request = json!({
            "to": self.address,
            "data": Bytes::from(call.abi_encode()),
        });
        let output: Bytes = self
            .transport
            .request_typed("eth_call", json!([request, "latest"]))
            .map_err(map_rpc_error)?;
        if output.is_empty() {
            return Err(ContractError::Reverted {
                reason: None,
            });
        }
        C::abi_decode_returns(&output).map_err(|err| {
            ContractError::InvalidResponse(format!("{} returned bad data: {err}", C::SIGNATURE))
        })
    }

    /// Submits a state-changing call and waits for its receipt.
    fn send<C: SolCall>(&self, tx: &TxRequest, call: &C) -> Result<TxReceipt, ContractError> {
        let mut request = Map::new();
        request.insert("from".to_string(), json!(tx.from));
        request.insert("to".to_string(), json!(self.address));
        request.insert("data".to_string(), json!(Bytes::from(call.abi_encode())));
        if !tx.value.is_zero() {
            request.insert("value".to_string(), json!(tx.value.get()));
        }
        if let Some(gas) = self.gas {
            request.insert("gas".to_string(), json!(format!("{gas:#x}")));
        }
        let receipt =
            self.transport.send_transaction(Value::Object(request)).map_err(map_rpc_error)?;
        into_tx_receipt(&receipt)
    }
}

impl DeedContract for RpcDeedContract {
    fn create(
        &self,
        tx: &TxRequest,
        name: &str,
        beneficiary: Address,
    ) -> Result<TxReceipt, ContractError> {
        self.send(tx, &IExampleDeed::createCall {
            name: name.to_string(),
            beneficiary,
        })
    }

    fn count_of_deeds(&self) -> Result<u64, ContractError> {
        let count = self.view(&IExampleDeed::countOfDeedsCall {})?;
        to_u64(count)
    }

    fn count_of_deeds_by_owner(&self, owner: Address) -> Result<u64, ContractError> {
        let count = self.view(&IExampleDeed::countOfDeedsByOwnerCall {
            owner,
        })?;
        to_u64(count)
    }

    fn deed_of_owner_by_index(&self, owner: Address, index: u64) -> Result<DeedId, ContractError> {
        let id = self.view(&IExampleDeed::deedOfOwnerByIndexCall {
            owner,
            index: U256::from(index),
        })?;
        Ok(DeedId::new(id))
    }

    fn destroy(&self, tx: &TxRequest, id: DeedId) -> Result<TxReceipt, ContractError> {
        self.send(tx, &IExampleDeed::destroyCall {
            id: id.get(),
        })
    }

    fn appropriate(&self, tx: &TxRequest, id: DeedId) -> Result<TxReceipt, ContractError> {
        self.send(tx, &IExampleDeed::appropriateCall {
            id: id.get(),
        })
    }
}

// ============================================================================
// SECTION: Helpers
// ============================================================================

/// Builds a transport for `profile` and checks the node's network id.
pub(crate) fn connect_transport(
    profile: &NetworkProfile,
    config: &ClientConfig,
) -> Result<JsonRpcTransport, ContractError> {
    let transport =
        JsonRpcTransport::new(&profile.endpoint_url(), config).map_err(map_rpc_error)?;
    let reported: String =
        transport.request_typed("net_version", json!([])).map_err(map_rpc_error)?;
    if !profile.accepts_network_id(&reported) {
        return Err(ContractError::InvalidInput(format!(
            "node reports network id {reported}, profile expects {}",
            profile.network_id
        )));
    }
    Ok(transport)
}

/// Converts a node receipt into a contract receipt, failing on reverts.
pub(crate) fn into_tx_receipt(receipt: &RpcReceipt) -> Result<TxReceipt, ContractError> {
    if receipt.is_reverted() {
        return Err(ContractError::Reverted {
            reason: None,
        });
    }
    Ok(TxReceipt {
        tx_hash: receipt.transaction_hash,
        block_number: receipt.block_number.map(|number| number.to::<u64>()),
        gas_used: receipt.gas_used.map(|gas| gas.to::<u64>()),
    })
}

/// Classifies transport failures into contract errors.
pub(crate) fn map_rpc_error(err: RpcError) -> ContractError {
    match err {
        RpcError::Node {
            code,
            message,
            data,
        } => {
            if code == REVERT_ERROR_CODE || message.to_ascii_lowercase().contains("revert") {
                let reason = data
                    .as_deref()
                    .and_then(|hex_data| hex::decode(hex_data).ok())
                    .and_then(|bytes| decode_revert_reason(&bytes))
                    .or_else(|| reason_from_message(&message));
                ContractError::Reverted {
                    reason,
                }
            } else {
                ContractError::Backend(format!("node error {code}: {message}"))
            }
        }
        RpcError::Http(_) | RpcError::Status(_) | RpcError::ReceiptTimeout(_) => {
            ContractError::Transport(err.to_string())
        }
        RpcError::ResponseTooLarge | RpcError::InvalidResponse(_) => {
            ContractError::InvalidResponse(err.to_string())
        }
        RpcError::Setup(_) => ContractError::InvalidInput(err.to_string()),
    }
}

/// Extracts a reason from node messages like `... revert unknown deed`.
fn reason_from_message(message: &str) -> Option<String> {
    let lower = message.to_ascii_lowercase();
    let start = ["reverted: ", "revert "]
        .iter()
        .find_map(|marker| lower.find(marker).map(|index| index + marker.len()))?;
    let reason = message.get(start ..)?.trim();
    (!reason.is_empty()).then(|| reason.to_string())
}

/// Narrows a uint256 count to `u64`.
fn to_u64(value: U256) -> Result<u64, ContractError> {
    u64::try_from(value)
        .map_err(|_| ContractError::InvalidResponse(format!("count {value} exceeds u64")))
}

// ============================================================================
// SECTION: Tests
// ============================================================================
