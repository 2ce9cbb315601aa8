// system-tests/src/lib.rs
// ============================================================================
// Module: Example Deed System Tests Library
// Description: Shared configuration, deployers, and the contract conformance suite.
// Purpose: Run the same behavioural checks against any deed contract deployment.
// Dependencies: example-deed-core, example-deed-rpc
// ============================================================================

//! ## Overview
//! This crate hosts the contract conformance harness used by the
//! system-tests binaries in `system-tests/tests`. A [`harness::Deployer`]
//! supplies a fresh contract per case; the cases in [`harness::conformance`]
//! never depend on which backend is behind it.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod config;
pub mod deployers;
pub mod harness;
