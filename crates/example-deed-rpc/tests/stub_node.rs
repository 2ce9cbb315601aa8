// crates/example-deed-rpc/tests/stub_node.rs
// ============================================================================
// Module: RPC Client Stub Node Tests
// Description: Drive the RPC contract client against a scripted JSON-RPC node.
// Purpose: Validate call encoding, receipt polling, and error classification.
// Dependencies: example-deed-rpc, tiny_http, serde_json
// ============================================================================

//! ## Overview
//! Each test starts a `tiny_http` server that answers JSON-RPC methods from a
//! scripted handler. The node is adversarial where it matters: it lies about
//! network ids, omits contract code, reverts, and sends oversized bodies.

#![allow(
    clippy::panic,
    clippy::print_stdout,
    clippy::print_stderr,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::use_debug,
    clippy::dbg_macro,
    clippy::panic_in_result_fn,
    clippy::unwrap_in_result,
    reason = "Test-only output and panic-based assertions are permitted."
)]

use std::io::Read;
use std::sync::Arc;
use std::sync::Mutex;
use std::thread;

use alloy_primitives::Address;
use alloy_primitives::B256;
use alloy_primitives::U256;
use alloy_primitives::hex;
use alloy_sol_types::SolCall;
use alloy_sol_types::SolError;
use example_deed_config::ClientConfig;
use example_deed_config::NetworkProfile;
use example_deed_core::ContractError;
use example_deed_core::DeedContract;
use example_deed_core::DeedId;
use example_deed_core::TxRequest;
use example_deed_rpc::RpcDeedContract;
use example_deed_rpc::JsonRpcTransport;
use example_deed_rpc::RpcDeployer;
use example_deed_rpc::RpcError;
use example_deed_rpc::abi::IExampleDeed;
use serde_json::Value;
use serde_json::json;
use tiny_http::Response;
use tiny_http::Server;

// ============================================================================
// SECTION: Test Helpers
// ============================================================================

/// Scripted JSON-RPC handler: returns `Ok(result)` or `Err(error object)`.
type Handler = dyn Fn(&str, &Value) -> Result<Value, Value> + Send + Sync;

/// Requests observed by the stub node.
#[derive(Default)]
struct Journal {
    calls: Mutex<Vec<Value>>,
}

impl Journal {
    fn methods(&self) -> Vec<String> {
        self.calls
            .lock()
            .unwrap()
            .iter()
            .map(|call| call["method"].as_str().unwrap().to_string())
            .collect()
    }

    fn first(&self, method: &str) -> Value {
        self.calls
            .lock()
            .unwrap()
            .iter()
            .find(|call| call["method"] == method)
            .cloned()
            .unwrap()
    }
}

/// Starts a stub node and returns a profile pointing at it.
fn stub_node(handler: Arc<Handler>) -> (NetworkProfile, Arc<Journal>) {
    let server = Server::http("127.0.0.1:0").unwrap();
    let addr = server.server_addr().to_ip().unwrap();
    let journal = Arc::new(Journal::default());
    let recorded = Arc::clone(&journal);
    thread::spawn(move || {
        for mut request in server.incoming_requests() {
            let mut body = String::new();
            request.as_reader().read_to_string(&mut body).unwrap();
            let call: Value = serde_json::from_str(&body).unwrap();
            recorded.calls.lock().unwrap().push(call.clone());
            let method = call["method"].as_str().unwrap_or_default();
            let reply = match handler(method, &call["params"]) {
                Ok(result) => json!({"jsonrpc": "2.0", "id": call["id"], "result": result}),
                Err(error) => json!({"jsonrpc": "2.0", "id": call["id"], "error": error}),
            };
            let _ = request.respond(Response::from_string(reply.to_string()));
        }
    });
    let profile = NetworkProfile {
        host: addr.ip().to_string(),
        port: addr.port(),
        network_id: "4447".to_string(),
        gas: None,
        from: None,
    };
    (profile, journal)
}

fn client_config() -> ClientConfig {
    ClientConfig {
        receipt_poll_interval_ms: 10,
        receipt_timeout_ms: 2_000,
        ..ClientConfig::default()
    }
}

fn contract_address() -> Address {
    Address::repeat_byte(0xaa)
}

fn tx_hash() -> B256 {
    B256::repeat_byte(0x42)
}

fn word(value: u64) -> Value {
    json!(hex::encode_prefixed(U256::from(value).to_be_bytes::<32>()))
}

fn revert_error(reason: &str) -> Value {
    let data = alloy_sol_types::Revert {
        reason: reason.to_string(),
    }
    .abi_encode();
    json!({"code": 3, "message": "execution reverted", "data": hex::encode_prefixed(data)})
}

/// Boxes a scripted handler.
fn handler<F>(script: F) -> Arc<Handler>
where
    F: Fn(&str, &Value) -> Result<Value, Value> + Send + Sync + 'static,
{
    Arc::new(script)
}

/// Answers connection checks; defers everything else to `rest`.
fn node<F>(rest: F) -> Arc<Handler>
where
    F: Fn(&str, &Value) -> Result<Value, Value> + Send + Sync + 'static,
{
    handler(move |method, params| match method {
        "net_version" => Ok(json!("4447")),
        "eth_getCode" => Ok(json!("0x6080")),
        _ => rest(method, params),
    })
}

fn selector_of(call: &Value) -> String {
    let data = call["params"][0]["data"].as_str().unwrap();
    data[.. 10].to_string()
}

// ============================================================================
// SECTION: Connection
// ============================================================================

#[test]
fn connect_rejects_network_id_mismatch() {
    let (profile, _) = stub_node(handler(|method, _| match method {
        "net_version" => Ok(json!("1")),
        _ => Ok(Value::Null),
    }));

    let err = RpcDeedContract::connect(&profile, contract_address(), &client_config()).unwrap_err();

    assert!(matches!(err, ContractError::InvalidInput(ref message) if message.contains("4447")));
}

#[test]
fn connect_accepts_any_network_with_wildcard() {
    let (mut profile, _) = stub_node(handler(|method, _| match method {
        "net_version" => Ok(json!("1337")),
        "eth_getCode" => Ok(json!("0x6080")),
        _ => Ok(Value::Null),
    }));
    profile.network_id = "*".to_string();

    let contract = RpcDeedContract::connect(&profile, contract_address(), &client_config());

    assert_eq!(contract.unwrap().address(), contract_address());
}

#[test]
fn connect_rejects_address_without_code() {
    let (profile, _) = stub_node(handler(|method, _| match method {
        "net_version" => Ok(json!("4447")),
        "eth_getCode" => Ok(json!("0x")),
        _ => Ok(Value::Null),
    }));

    let err = RpcDeedContract::connect(&profile, contract_address(), &client_config()).unwrap_err();

    assert!(matches!(err, ContractError::InvalidInput(ref message) if message.contains("no contract code")));
}

#[test]
fn unreachable_node_is_transport_error() {
    let mut profile = NetworkProfile::development();
    profile.host = "127.0.0.1".to_string();
    profile.port = 1;

    let err = RpcDeedContract::connect(&profile, contract_address(), &client_config()).unwrap_err();

    assert!(matches!(err, ContractError::Transport(_)));
}

#[test]
fn transport_targets_profile_endpoint() {
    let mut profile = NetworkProfile::development();
    profile.host = "::1".to_string();
    profile.port = 7545;

    let transport = JsonRpcTransport::new(&profile.endpoint_url(), &client_config()).unwrap();

    assert_eq!(transport.endpoint().as_str(), "http://[::1]:7545/");
}

#[test]
fn transport_rejects_non_http_scheme() {
    let err = JsonRpcTransport::new("ftp://localhost:8545", &client_config()).unwrap_err();
    assert!(matches!(err, RpcError::Setup(_)));
}

// ============================================================================
// SECTION: Views
// ============================================================================

#[test]
fn count_of_deeds_decodes_eth_call_result() {
    let (profile, journal) = stub_node(node(|method, _| match method {
        "eth_call" => Ok(word(3)),
        _ => Ok(Value::Null),
    }));
    let contract = RpcDeedContract::connect(&profile, contract_address(), &client_config()).unwrap();

    assert_eq!(contract.count_of_deeds().unwrap(), 3);

    let call = journal.first("eth_call");
    assert_eq!(selector_of(&call), hex::encode_prefixed(IExampleDeed::countOfDeedsCall::SELECTOR));
    assert_eq!(call["params"][1], "latest");
}

#[test]
fn owner_index_revert_carries_reason() {
    let (profile, _) = stub_node(node(|method, _| match method {
        "eth_call" => Err(revert_error("owner index out of bounds")),
        _ => Ok(Value::Null),
    }));
    let contract = RpcDeedContract::connect(&profile, contract_address(), &client_config()).unwrap();

    let err = contract.deed_of_owner_by_index(Address::repeat_byte(0x01), 9).unwrap_err();

    assert_eq!(err, ContractError::reverted("owner index out of bounds"));
}

#[test]
fn malformed_return_data_is_invalid_response() {
    let (profile, _) = stub_node(node(|method, _| match method {
        "eth_call" => Ok(json!("0x01")),
        _ => Ok(Value::Null),
    }));
    let contract = RpcDeedContract::connect(&profile, contract_address(), &client_config()).unwrap();

    let err = contract.count_of_deeds_by_owner(Address::repeat_byte(0x01)).unwrap_err();

    assert!(matches!(err, ContractError::InvalidResponse(_)));
}

#[test]
fn oversized_response_is_rejected() {
    let (profile, _) = stub_node(node(|method, _| match method {
        "eth_call" => Ok(json!(format!("0x{}", "00".repeat(4_096)))),
        _ => Ok(Value::Null),
    }));
    let config = ClientConfig {
        max_response_bytes: 1_024,
        ..client_config()
    };
    let contract = RpcDeedContract::connect(&profile, contract_address(), &config).unwrap();

    let err = contract.count_of_deeds().unwrap_err();

    assert!(matches!(err, ContractError::InvalidResponse(ref message) if message.contains("size limit")));
}

// ============================================================================
// SECTION: Transactions
// ============================================================================

#[test]
fn destroy_submits_transaction_and_polls_receipt() {
    let polls = Arc::new(Mutex::new(0_u32));
    let counter = Arc::clone(&polls);
    let (profile, journal) = stub_node(node(move |method, _| match method {
        "eth_sendTransaction" => Ok(json!(tx_hash())),
        "eth_getTransactionReceipt" => {
            let mut polls = counter.lock().unwrap();
            *polls += 1;
            if *polls < 3 {
                Ok(Value::Null)
            } else {
                Ok(json!({
                    "transactionHash": tx_hash(),
                    "blockNumber": "0x7",
                    "gasUsed": "0x5208",
                    "status": "0x1",
                }))
            }
        }
        _ => Ok(Value::Null),
    }));
    let contract = RpcDeedContract::connect(&profile, contract_address(), &client_config()).unwrap();
    let sender = Address::repeat_byte(0x01);

    let receipt = contract.destroy(&TxRequest::sender(sender), DeedId::from(1)).unwrap();

    assert_eq!(receipt.tx_hash, tx_hash());
    assert_eq!(receipt.block_number, Some(7));
    assert_eq!(receipt.gas_used, Some(21_000));
    assert_eq!(*polls.lock().unwrap(), 3);
    let sent = journal.first("eth_sendTransaction");
    assert_eq!(selector_of(&sent), hex::encode_prefixed(IExampleDeed::destroyCall::SELECTOR));
    assert_eq!(sent["params"][0]["from"].as_str().unwrap().to_lowercase(), sender.to_string().to_lowercase());
    assert!(sent["params"][0].get("value").is_none());
}

#[test]
fn failed_receipt_status_is_revert() {
    let (profile, _) = stub_node(node(|method, _| match method {
        "eth_sendTransaction" => Ok(json!(tx_hash())),
        "eth_getTransactionReceipt" => Ok(json!({
            "transactionHash": tx_hash(),
            "blockNumber": "0x2",
            "status": "0x0",
        })),
        _ => Ok(Value::Null),
    }));
    let contract = RpcDeedContract::connect(&profile, contract_address(), &client_config()).unwrap();

    let err = contract.destroy(&TxRequest::sender(Address::repeat_byte(0x01)), DeedId::from(999));

    assert!(err.unwrap_err().is_revert());
}

#[test]
fn ganache_style_revert_message_is_revert() {
    let (profile, _) = stub_node(node(|method, _| match method {
        "eth_sendTransaction" => Err(json!({
            "code": -32000,
            "message": "VM Exception while processing transaction: revert",
        })),
        _ => Ok(Value::Null),
    }));
    let contract = RpcDeedContract::connect(&profile, contract_address(), &client_config()).unwrap();

    let err = contract
        .appropriate(&TxRequest::sender(Address::repeat_byte(0x05)), DeedId::from(999))
        .unwrap_err();

    assert!(err.is_revert());
}

#[test]
fn missing_receipt_times_out_as_transport_error() {
    let (profile, _) = stub_node(node(|method, _| match method {
        "eth_sendTransaction" => Ok(json!(tx_hash())),
        _ => Ok(Value::Null),
    }));
    let config = ClientConfig {
        receipt_poll_interval_ms: 10,
        receipt_timeout_ms: 50,
        ..ClientConfig::default()
    };
    let contract = RpcDeedContract::connect(&profile, contract_address(), &config).unwrap();

    let err = contract
        .create(&TxRequest::sender(Address::repeat_byte(0x01)), "one", Address::ZERO)
        .unwrap_err();

    assert!(matches!(err, ContractError::Transport(ref message) if message.contains("timed out")));
}

#[test]
fn request_ids_are_unique() {
    let (profile, journal) = stub_node(node(|method, _| match method {
        "eth_call" => Ok(word(0)),
        _ => Ok(Value::Null),
    }));
    let contract = RpcDeedContract::connect(&profile, contract_address(), &client_config()).unwrap();
    contract.count_of_deeds().unwrap();
    contract.count_of_deeds().unwrap();

    let ids: Vec<u64> =
        journal.calls.lock().unwrap().iter().map(|call| call["id"].as_u64().unwrap()).collect();
    assert_eq!(ids.len(), 4);
    assert!(ids.windows(2).all(|pair| pair[0] < pair[1]));
    assert_eq!(journal.methods(), vec!["net_version", "eth_getCode", "eth_call", "eth_call"]);
}

// ============================================================================
// SECTION: Deployment
// ============================================================================

#[test]
fn deployer_returns_contract_address_and_accounts() {
    let deployed = Address::repeat_byte(0xcc);
    let (profile, journal) = stub_node(node(move |method, _| match method {
        "eth_accounts" => Ok(json!([Address::repeat_byte(0x01), Address::repeat_byte(0x02)])),
        "eth_sendTransaction" => Ok(json!(tx_hash())),
        "eth_getTransactionReceipt" => Ok(json!({
            "transactionHash": tx_hash(),
            "status": "0x1",
            "contractAddress": deployed,
        })),
        _ => Ok(Value::Null),
    }));
    let deployer = RpcDeployer::connect(&profile, &client_config()).unwrap();

    let accounts = deployer.accounts().unwrap();
    let address = deployer.deploy(accounts[0], &[0x60, 0x80]).unwrap();

    assert_eq!(accounts.len(), 2);
    assert_eq!(address, deployed);
    let sent = journal.first("eth_sendTransaction");
    assert!(sent["params"][0].get("to").is_none());
    assert_eq!(sent["params"][0]["data"], "0x6080");
}

#[test]
fn deployer_rejects_receipt_without_address() {
    let (profile, _) = stub_node(node(|method, _| match method {
        "eth_sendTransaction" => Ok(json!(tx_hash())),
        "eth_getTransactionReceipt" => Ok(json!({"transactionHash": tx_hash(), "status": "0x1"})),
        _ => Ok(Value::Null),
    }));
    let deployer = RpcDeployer::connect(&profile, &client_config()).unwrap();

    let err = deployer.deploy(Address::repeat_byte(0x01), &[0x60]).unwrap_err();

    assert!(matches!(err, ContractError::InvalidResponse(_)));
}

/// Verifies encoded create calls round-trip through the static interface.
#[test]
fn create_call_data_decodes_to_arguments() {
    let (profile, journal) = stub_node(node(|method, _| match method {
        "eth_sendTransaction" => Ok(json!(tx_hash())),
        "eth_getTransactionReceipt" => Ok(json!({"transactionHash": tx_hash(), "status": "0x1"})),
        _ => Ok(Value::Null),
    }));
    let contract = RpcDeedContract::connect(&profile, contract_address(), &client_config()).unwrap();
    let beneficiary = Address::repeat_byte(0x02);

    contract.create(&TxRequest::sender(Address::repeat_byte(0x01)), "one", beneficiary).unwrap();

    let sent = journal.first("eth_sendTransaction");
    let data = hex::decode(sent["params"][0]["data"].as_str().unwrap()).unwrap();
    let decoded = IExampleDeed::createCall::abi_decode(&data).unwrap();
    assert_eq!(decoded.name, "one");
    assert_eq!(decoded.beneficiary, beneficiary);
}
