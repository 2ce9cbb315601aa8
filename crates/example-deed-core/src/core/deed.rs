// crates/example-deed-core/src/core/deed.rs
// ============================================================================
// Module: Example Deed Records
// Description: Deed records and transaction envelopes.
// Purpose: Describe deed state and the caller context of state-changing calls.
// Dependencies: alloy-primitives, serde
// ============================================================================

//! ## Overview
//! A deed is a named record owned by an account, with a beneficiary account
//! recorded at creation. State-changing calls carry a [`TxRequest`] naming
//! the caller and any attached payment; successful calls return a
//! [`TxReceipt`].

// ============================================================================
// SECTION: Imports
// ============================================================================

use alloy_primitives::Address;
use alloy_primitives::B256;
use serde::Deserialize;
use serde::Serialize;

use crate::core::identifiers::DeedId;
use crate::core::identifiers::Wei;

// ============================================================================
// SECTION: Deed
// ============================================================================

/// Live deed record.
///
/// # Invariants
/// - `id` is unique among all deeds ever created by the same contract.
/// - Destroyed deeds are never represented by this type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Deed {
    /// Contract-assigned identifier.
    pub id: DeedId,
    /// Name supplied at creation.
    pub name: String,
    /// Current owner.
    pub owner: Address,
    /// Beneficiary supplied at creation.
    pub beneficiary: Address,
}

// ============================================================================
// SECTION: Transactions
// ============================================================================

/// Caller context for a state-changing contract call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TxRequest {
    /// Sending account.
    pub from: Address,
    /// Payment attached to the call.
    pub value: Wei,
}

impl TxRequest {
    /// Creates a request from `from` with no payment attached.
    #[must_use]
    pub const fn sender(from: Address) -> Self {
        Self {
            from,
            value: Wei::ZERO,
        }
    }

    /// Returns the request with `value` attached.
    #[must_use]
    pub const fn with_value(mut self, value: Wei) -> Self {
        self.value = value;
        self
    }
}

/// Receipt returned by a successful state-changing call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TxReceipt {
    /// Transaction hash.
    pub tx_hash: B256,
    /// Block the transaction was included in, when reported.
    pub block_number: Option<u64>,
    /// Gas consumed, when reported.
    pub gas_used: Option<u64>,
}
