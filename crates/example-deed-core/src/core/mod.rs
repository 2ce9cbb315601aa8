// crates/example-deed-core/src/core/mod.rs
// ============================================================================
// Module: Example Deed Core Types
// Description: Canonical deed records, identifiers, and call envelopes.
// Purpose: Provide stable, serializable types shared by every contract backend.
// Dependencies: alloy-primitives, serde
// ============================================================================

//! ## Overview
//! Core types describe deeds and the envelopes used to call the contract.
//! They carry no behavior of their own; backends decide how state changes.

// ============================================================================
// SECTION: Submodules
// ============================================================================

pub mod deed;
pub mod identifiers;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use deed::Deed;
pub use deed::TxReceipt;
pub use deed::TxRequest;
pub use identifiers::DeedId;
pub use identifiers::IdentifierParseError;
pub use identifiers::Wei;
