// crates/example-deed-rpc/src/lib.rs
// ============================================================================
// Module: Example Deed RPC Library
// Description: Typed JSON-RPC client for deployed ExampleDeed contracts.
// Purpose: Drive a real node through the same contract interface as the model.
// Dependencies: alloy-primitives, alloy-sol-types, reqwest, serde_json
// ============================================================================

//! ## Overview
//! `example-deed-rpc` binds the statically declared [`abi::IExampleDeed`]
//! interface to a JSON-RPC node. [`RpcDeedContract`] implements
//! [`example_deed_core::DeedContract`], so callers cannot tell it apart from
//! the in-memory model. [`RpcDeployer`] deploys fresh instances for tests.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod abi;
pub mod contract;
pub mod deploy;
pub mod transport;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use contract::RpcDeedContract;
pub use deploy::RpcDeployer;
pub use transport::JsonRpcTransport;
pub use transport::RpcError;
pub use transport::RpcReceipt;
