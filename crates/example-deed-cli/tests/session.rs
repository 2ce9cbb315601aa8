// crates/example-deed-cli/tests/session.rs
// ============================================================================
// Module: CLI Session Tests
// Description: Tests for network selection, sender resolution, and audit sinks.
// Purpose: Ensure config-to-client wiring fails closed and prefers explicit input.
// Dependencies: example-deed-cli session module, tiny_http, tempfile
// ============================================================================

//! ## Overview
//! Builds sessions from temp configs and a stub node so contract address,
//! sender, and audit resolution run without a real chain.

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

mod common;

use alloy_primitives::Address;
use example_deed_cli::session::Session;
use example_deed_cli::session::SessionError;
use example_deed_config::DeedConfig;
use example_deed_core::DeedContract;

use crate::common::CONTRACT;
use crate::common::NODE_ACCOUNT;
use crate::common::config_for;
use crate::common::stub_node;
use crate::common::write_config;

#[test]
fn unknown_network_is_rejected() {
    let err = Session::from_config(DeedConfig::default(), "ropsten").unwrap_err();
    assert!(matches!(err, SessionError::Config(_)));
    assert!(err.to_string().contains("unknown network: ropsten"));
}

#[test]
fn explicit_contract_overrides_config() {
    let config =
        DeedConfig::from_toml_str(&format!("[contract]\naddress = \"{CONTRACT}\"\n")).unwrap();
    let session = Session::from_config(config, "development").unwrap();
    let explicit = Address::repeat_byte(0x22);

    assert_eq!(session.contract_address(Some(explicit)).unwrap(), explicit);
    assert_eq!(session.contract_address(None).unwrap(), CONTRACT.parse::<Address>().unwrap());
}

#[test]
fn missing_contract_address_is_rejected() {
    let session = Session::from_config(DeedConfig::default(), "development").unwrap();
    assert!(matches!(session.contract_address(None), Err(SessionError::MissingContract)));
}

#[test]
fn explicit_sender_skips_node_lookup() {
    let session = Session::from_config(DeedConfig::default(), "development").unwrap();
    let sender = Address::repeat_byte(0x33);
    assert_eq!(session.resolve_sender(Some(sender)).unwrap(), sender);
}

#[test]
fn profile_sender_is_used_before_node_accounts() {
    let toml = "[networks.development]\nhost = \"localhost\"\nport = 8545\nnetwork_id = \
                \"4447\"\nfrom = \"0x0000000000000000000000000000000000000044\"\n";
    let session =
        Session::from_config(DeedConfig::from_toml_str(toml).unwrap(), "development").unwrap();
    assert_eq!(session.resolve_sender(None).unwrap(), Address::with_last_byte(0x44));
}

#[test]
fn node_account_is_last_sender_fallback() {
    let addr = stub_node();
    let (_dir, path) = write_config(&config_for(addr, ""));
    let session = Session::load(Some(path.as_path()), "development").unwrap();
    assert_eq!(session.network(), "development");
    assert_eq!(session.profile().port, addr.port());
    assert_eq!(session.config().networks.len(), 1);

    let sender = session.resolve_sender(None).unwrap();

    assert_eq!(sender, NODE_ACCOUNT.parse::<Address>().unwrap());
}

#[test]
fn open_contract_reads_through_audited_client() {
    let addr = stub_node();
    let extra = format!("[contract]\naddress = \"{CONTRACT}\"\n");
    let (_dir, path) = write_config(&config_for(addr, &extra));
    let session = Session::load(Some(path.as_path()), "development").unwrap();

    let contract = session.open_contract(None).unwrap();

    assert_eq!(contract.count_of_deeds().unwrap(), 3);
    assert_eq!(contract.inner().address(), CONTRACT.parse::<Address>().unwrap());
}

#[test]
fn unwritable_audit_path_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("missing").join("audit.log");
    let toml = format!("[audit]\nsink = \"file\"\npath = \"{}\"\n", missing.display());
    let session =
        Session::from_config(DeedConfig::from_toml_str(&toml).unwrap(), "development").unwrap();

    assert!(matches!(session.audit_sink(), Err(SessionError::Audit { .. })));
}
