// crates/example-deed-core/src/interfaces/mod.rs
// ============================================================================
// Module: Example Deed Interfaces
// Description: Backend-agnostic interface to the ExampleDeed contract.
// Purpose: Define the contract surface used by the harness and the CLI.
// Dependencies: crate::core, alloy-primitives, thiserror
// ============================================================================

//! ## Overview
//! The [`DeedContract`] trait is the only way callers reach deed state. The
//! in-memory reference model and the JSON-RPC client both implement it, so
//! tests run unchanged against either.
//!
//! A reverted operation is atomic: contract state is unchanged and the
//! caller receives [`ContractError::Reverted`].

// ============================================================================
// SECTION: Imports
// ============================================================================

use alloy_primitives::Address;
use serde::Serialize;
use thiserror::Error;

use crate::core::DeedId;
use crate::core::TxReceipt;
use crate::core::TxRequest;

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Contract call errors.
///
/// # Invariants
/// - Variants are stable for programmatic handling.
/// - `Reverted` is the only variant that guarantees contract state is unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ContractError {
    /// The contract reverted the operation.
    #[error("operation reverted: {}", .reason.as_deref().unwrap_or("no reason given"))]
    Reverted {
        /// Decoded revert reason, when the backend reports one.
        reason: Option<String>,
    },
    /// The node or backend could not be reached.
    #[error("contract transport error: {0}")]
    Transport(String),
    /// The node returned a payload that could not be decoded.
    #[error("contract response invalid: {0}")]
    InvalidResponse(String),
    /// Caller input was rejected before reaching the contract.
    #[error("invalid contract input: {0}")]
    InvalidInput(String),
    /// Backend failure unrelated to contract semantics.
    #[error("contract backend error: {0}")]
    Backend(String),
}

impl ContractError {
    /// Creates a revert error with the given reason.
    #[must_use]
    pub fn reverted(reason: impl Into<String>) -> Self {
        Self::Reverted {
            reason: Some(reason.into()),
        }
    }

    /// Returns true when the operation reverted.
    #[must_use]
    pub const fn is_revert(&self) -> bool {
        matches!(self, Self::Reverted { .. })
    }
}

// ============================================================================
// SECTION: Operations
// ============================================================================

/// Contract operation labels.
///
/// # Invariants
/// - Labels match the ABI function names and are stable for audit output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(into = "&'static str")]
pub enum DeedOperation {
    /// `create(name, beneficiary)`.
    Create,
    /// `countOfDeeds()`.
    CountOfDeeds,
    /// `countOfDeedsByOwner(owner)`.
    CountOfDeedsByOwner,
    /// `deedOfOwnerByIndex(owner, index)`.
    DeedOfOwnerByIndex,
    /// `destroy(id)`.
    Destroy,
    /// `appropriate(id)`.
    Appropriate,
}

impl DeedOperation {
    /// Returns the ABI function name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Create => "create",
            Self::CountOfDeeds => "countOfDeeds",
            Self::CountOfDeedsByOwner => "countOfDeedsByOwner",
            Self::DeedOfOwnerByIndex => "deedOfOwnerByIndex",
            Self::Destroy => "destroy",
            Self::Appropriate => "appropriate",
        }
    }
}

impl From<DeedOperation> for &'static str {
    fn from(value: DeedOperation) -> Self {
        value.as_str()
    }
}

// ============================================================================
// SECTION: Contract
// ============================================================================

/// Backend-agnostic `ExampleDeed` contract.
pub trait DeedContract {
    /// Creates a deed owned by `tx.from` with the given beneficiary.
    ///
    /// # Errors
    ///
    /// Returns [`ContractError`] when the call fails or reverts.
    fn create(
        &self,
        tx: &TxRequest,
        name: &str,
        beneficiary: Address,
    ) -> Result<TxReceipt, ContractError>;

    /// Returns the number of live deeds.
    ///
    /// # Errors
    ///
    /// Returns [`ContractError`] when the call fails.
    fn count_of_deeds(&self) -> Result<u64, ContractError>;

    /// Returns the number of live deeds owned by `owner`.
    ///
    /// # Errors
    ///
    /// Returns [`ContractError`] when the call fails.
    fn count_of_deeds_by_owner(&self, owner: Address) -> Result<u64, ContractError>;

    /// Returns the identifier of the `index`-th live deed owned by `owner`.
    ///
    /// # Errors
    ///
    /// Returns [`ContractError`] when the call fails or `index` is out of range.
    fn deed_of_owner_by_index(&self, owner: Address, index: u64) -> Result<DeedId, ContractError>;

    /// Destroys the deed `id`.
    ///
    /// # Errors
    ///
    /// Returns [`ContractError::Reverted`] when `id` does not exist.
    fn destroy(&self, tx: &TxRequest, id: DeedId) -> Result<TxReceipt, ContractError>;

    /// Appropriates the deed `id`, attaching `tx.value` as payment.
    ///
    /// # Errors
    ///
    /// Returns [`ContractError::Reverted`] when `id` does not exist.
    fn appropriate(&self, tx: &TxRequest, id: DeedId) -> Result<TxReceipt, ContractError>;
}

impl<C: DeedContract + ?Sized> DeedContract for Box<C> {
    fn create(
        &self,
        tx: &TxRequest,
        name: &str,
        beneficiary: Address,
    ) -> Result<TxReceipt, ContractError> {
        (**self).create(tx, name, beneficiary)
    }

    fn count_of_deeds(&self) -> Result<u64, ContractError> {
        (**self).count_of_deeds()
    }

    fn count_of_deeds_by_owner(&self, owner: Address) -> Result<u64, ContractError> {
        (**self).count_of_deeds_by_owner(owner)
    }

    fn deed_of_owner_by_index(&self, owner: Address, index: u64) -> Result<DeedId, ContractError> {
        (**self).deed_of_owner_by_index(owner, index)
    }

    fn destroy(&self, tx: &TxRequest, id: DeedId) -> Result<TxReceipt, ContractError> {
        (**self).destroy(tx, id)
    }

    fn appropriate(&self, tx: &TxRequest, id: DeedId) -> Result<TxReceipt, ContractError> {
        (**self).appropriate(tx, id)
    }
}
