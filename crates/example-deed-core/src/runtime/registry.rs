// crates/example-deed-core/src/runtime/registry.rs
// ============================================================================
// Module: Example Deed In-Memory Contract
// Description: In-memory reference implementation of the deed contract.
// Purpose: Provide a deterministic contract backend for tests and demos.
// Dependencies: crate::core, crate::interfaces, alloy-primitives
// ============================================================================

//! ## Overview
//! [`InMemoryDeedContract`] keeps deed state behind a mutex and applies the
//! observable contract rules: sequential identifiers starting at zero,
//! per-owner enumeration in creation order, and atomic reverts for unknown
//! identifiers. Every check runs before any mutation.
//!
//! The success path of `appropriate` is not known for the deployed contract,
//! so it is governed by an explicit [`AppropriationPolicy`].

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeMap;
use std::sync::Arc;
use std::sync::Mutex;
use std::sync::MutexGuard;

use alloy_primitives::Address;
use alloy_primitives::U256;
use alloy_primitives::keccak256;
use serde::Deserialize;
use serde::Serialize;

use crate::core::Deed;
use crate::core::DeedId;
use crate::core::TxReceipt;
use crate::core::TxRequest;
use crate::core::Wei;
use crate::interfaces::ContractError;
use crate::interfaces::DeedContract;

// ============================================================================
// SECTION: Revert Reasons
// ============================================================================

/// Revert reason for identifiers that match no live deed.
pub const REVERT_UNKNOWN_DEED: &str = "unknown deed";
/// Revert reason for owner indexes past the end of the owner's deeds.
pub const REVERT_INDEX_OUT_OF_BOUNDS: &str = "owner index out of bounds";
/// Revert reason for value attached to a non-payable function.
pub const REVERT_NON_PAYABLE: &str = "function is not payable";
/// Revert reason when appropriation is disabled.
pub const REVERT_APPROPRIATION_DISABLED: &str = "appropriation disabled";
/// Revert reason when the attached payment is below the policy minimum.
pub const REVERT_INSUFFICIENT_PAYMENT: &str = "insufficient payment";

// ============================================================================
// SECTION: Appropriation Policy
// ============================================================================

/// Behavior of `appropriate` for an existing deed.
///
/// # Invariants
/// - Unknown identifiers revert regardless of policy.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum AppropriationPolicy {
    /// Every appropriation reverts.
    #[default]
    Disabled,
    /// Ownership moves to the caller when the attached payment reaches `minimum`.
    TransferOnPayment {
        /// Minimum payment accepted.
        minimum: Wei,
    },
}

// ============================================================================
// SECTION: In-Memory Contract
// ============================================================================

/// Mutable contract state.
#[derive(Debug, Default)]
struct RegistryState {
    /// Live deeds keyed by identifier.
    deeds: BTreeMap<DeedId, Deed>,
    /// Live deed identifiers per owner, in acquisition order.
    owned: BTreeMap<Address, Vec<DeedId>>,
    /// Identifier assigned to the next created deed.
    next_id: U256,
    /// Monotonic counter of successful state-changing calls.
    sequence: u64,
    /// Payments held in custody.
    balance: Wei,
}

impl RegistryState {
    /// Returns the next receipt for a successful state-changing call.
    fn next_receipt(&mut self) -> TxReceipt {
        self.sequence += 1;
        TxReceipt {
            tx_hash: keccak256(self.sequence.to_be_bytes()),
            block_number: Some(self.sequence),
            gas_used: None,
        }
    }

    /// Removes `id` from the enumeration of `owner`, preserving order.
    fn release(&mut self, owner: Address, id: DeedId) {
        if let Some(ids) = self.owned.get_mut(&owner) {
            ids.retain(|owned| *owned != id);
            if ids.is_empty() {
                self.owned.remove(&owner);
            }
        }
    }
}

/// In-memory `ExampleDeed` contract for tests and demos.
///
/// # Invariants
/// - Identifiers are assigned sequentially from zero and never reused.
/// - A reverted call leaves state unchanged.
/// - Clones share the same state.
#[derive(Debug, Clone, Default)]
pub struct InMemoryDeedContract {
    /// Contract state protected by a mutex.
    state: Arc<Mutex<RegistryState>>,
    /// Policy applied to `appropriate` on existing deeds.
    policy: AppropriationPolicy,
}

impl InMemoryDeedContract {
    /// Creates an empty contract with appropriation disabled.
    #[must_use]
    pub fn new() -> Self {
        Self::with_policy(AppropriationPolicy::Disabled)
    }

    /// Creates an empty contract with the given appropriation policy.
    #[must_use]
    pub fn with_policy(policy: AppropriationPolicy) -> Self {
        Self {
            state: Arc::new(Mutex::new(RegistryState::default())),
            policy,
        }
    }

    /// Returns the configured appropriation policy.
    #[must_use]
    pub const fn policy(&self) -> AppropriationPolicy {
        self.policy
    }

    /// Returns the live deed `id`, if any.
    ///
    /// # Errors
    ///
    /// Returns [`ContractError::Backend`] when the state lock is poisoned.
    pub fn deed(&self, id: DeedId) -> Result<Option<Deed>, ContractError> {
        Ok(self.lock()?.deeds.get(&id).cloned())
    }

    /// Returns the payments held in custody.
    ///
    /// # Errors
    ///
    /// Returns [`ContractError::Backend`] when the state lock is poisoned.
    pub fn balance(&self) -> Result<Wei, ContractError> {
        Ok(self.lock()?.balance)
    }

    /// Locks contract state.
    fn lock(&self) -> Result<MutexGuard<'_, RegistryState>, ContractError> {
        self.state
            .lock()
            .map_err(|_| ContractError::Backend("deed registry mutex poisoned".to_string()))
    }
}

impl DeedContract for InMemoryDeedContract {
    fn create(
        &self,
        tx: &TxRequest,
        name: &str,
        beneficiary: Address,
    ) -> Result<TxReceipt, ContractError> {
        require_no_value(tx)?;
        let mut state = self.lock()?;
        let id = DeedId::new(state.next_id);
        state.next_id = state
            .next_id
            .checked_add(U256::from(1_u8))
            .ok_or_else(|| ContractError::Backend("deed identifier space exhausted".to_string()))?;
        state.deeds.insert(
            id,
            Deed {
                id,
                name: name.to_string(),
                owner: tx.from,
                beneficiary,
            },
        );
        state.owned.entry(tx.from).or_default().push(id);
        Ok(state.next_receipt())
    }

    fn count_of_deeds(&self) -> Result<u64, ContractError> {
        let count = self.lock()?.deeds.len();
        to_count(count)
    }

    fn count_of_deeds_by_owner(&self, owner: Address) -> Result<u64, ContractError> {
        let count = self.lock()?.owned.get(&owner).map_or(0, Vec::len);
        to_count(count)
    }

    fn deed_of_owner_by_index(&self, owner: Address, index: u64) -> Result<DeedId, ContractError> {
        let state = self.lock()?;
        let slot = usize::try_from(index)
            .map_err(|_| ContractError::reverted(REVERT_INDEX_OUT_OF_BOUNDS))?;
        state
            .owned
            .get(&owner)
            .and_then(|ids| ids.get(slot))
            .copied()
            .ok_or_else(|| ContractError::reverted(REVERT_INDEX_OUT_OF_BOUNDS))
    }

    fn destroy(&self, tx: &TxRequest, id: DeedId) -> Result<TxReceipt, ContractError> {
        require_no_value(tx)?;
        let mut state = self.lock()?;
        let deed =
            state.deeds.remove(&id).ok_or_else(|| ContractError::reverted(REVERT_UNKNOWN_DEED))?;
        state.release(deed.owner, id);
        Ok(state.next_receipt())
    }

    fn appropriate(&self, tx: &TxRequest, id: DeedId) -> Result<TxReceipt, ContractError> {
        let mut state = self.lock()?;
        let owner = state
            .deeds
            .get(&id)
            .map(|deed| deed.owner)
            .ok_or_else(|| ContractError::reverted(REVERT_UNKNOWN_DEED))?;
        match self.policy {
            AppropriationPolicy::Disabled => {
                return Err(ContractError::reverted(REVERT_APPROPRIATION_DISABLED));
            }
            AppropriationPolicy::TransferOnPayment {
                minimum,
            } => {
                if tx.value < minimum {
                    return Err(ContractError::reverted(REVERT_INSUFFICIENT_PAYMENT));
                }
            }
        }
        if owner != tx.from {
            state.release(owner, id);
            state.owned.entry(tx.from).or_default().push(id);
            if let Some(deed) = state.deeds.get_mut(&id) {
                deed.owner = tx.from;
            }
        }
        state.balance = state.balance.saturating_add(tx.value);
        Ok(state.next_receipt())
    }
}

// ============================================================================
// SECTION: Helpers
// ============================================================================

/// Reverts when value is attached to a non-payable function.
fn require_no_value(tx: &TxRequest) -> Result<(), ContractError> {
    if tx.value.is_zero() {
        Ok(())
    } else {
        Err(ContractError::reverted(REVERT_NON_PAYABLE))
    }
}

/// Converts a collection length into a contract count.
fn to_count(len: usize) -> Result<u64, ContractError> {
    u64::try_from(len).map_err(|_| ContractError::Backend("deed count exceeds u64".to_string()))
}
