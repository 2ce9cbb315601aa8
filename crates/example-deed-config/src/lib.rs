// crates/example-deed-config/src/lib.rs
// ============================================================================
// Module: Example Deed Config Library
// Description: Canonical network configuration model and validation.
// Purpose: Single source of truth for example-deed.toml semantics.
// Dependencies: alloy-primitives, serde, toml
// ============================================================================

//! ## Overview
//! `example-deed-config` defines the named network profiles used to reach a
//! blockchain node, the deployed contract address, client limits, and audit
//! log routing. Loading is strict and fail-closed.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod config;
pub mod examples;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use config::*;
pub use examples::config_toml_example;
