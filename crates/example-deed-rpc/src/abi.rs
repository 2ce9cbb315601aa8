// crates/example-deed-rpc/src/abi.rs
// ============================================================================
// Module: ExampleDeed ABI
// Description: Static Solidity interface for the ExampleDeed contract.
// Purpose: Compile-time call encoding and return decoding.
// Dependencies: alloy-sol-types
// ============================================================================

//! ## Overview
//! The contract surface is declared once with [`alloy_sol_types::sol!`].
//! Each function yields a `<name>Call` type implementing
//! [`alloy_sol_types::SolCall`]. Revert payloads use the standard
//! `Error(string)` encoding.

use alloy_sol_types::SolError;
use alloy_sol_types::sol;

sol! {
    /// ExampleDeed external interface.
    interface IExampleDeed {
        function create(string name, address beneficiary) external;
        function countOfDeeds() external view returns (uint256);
        function countOfDeedsByOwner(address owner) external view returns (uint256);
        function deedOfOwnerByIndex(address owner, uint256 index) external view returns (uint256);
        function destroy(uint256 id) external;
        function appropriate(uint256 id) external payable;
    }
}

/// Decodes an `Error(string)` revert payload into its reason.
///
/// Returns `None` for empty data, custom errors, and panics.
#[must_use]
pub fn decode_revert_reason(data: &[u8]) -> Option<String> {
    alloy_sol_types::Revert::abi_decode(data).ok().map(|revert| revert.reason)
}
