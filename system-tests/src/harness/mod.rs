// system-tests/src/harness/mod.rs
// ============================================================================
// Module: Contract Harness
// Description: Deployment seam, shared fixture, and revert assertions.
// Purpose: Give every conformance case a fresh contract with known deeds.
// Dependencies: example-deed-core
// ============================================================================

//! ## Overview
//! A [`Deployer`] hands out a fresh contract for each case. [`Fixture::setup`]
//! then creates three deeds from the creator account: `one` for the first
//! beneficiary, `two` and `del` for the second.
//!
//! Harness helpers report failures as `String` so cases read as plain
//! `Result<(), String>` functions.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod conformance;

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fmt::Debug;

use alloy_primitives::Address;
use example_deed_core::ContractError;
use example_deed_core::DeedContract;
use example_deed_core::TxRequest;

// ============================================================================
// SECTION: Deployer
// ============================================================================

/// Source of fresh contract deployments.
pub trait Deployer {
    /// Contract client produced by a deployment.
    type Contract: DeedContract;

    /// Deploys a new, empty contract.
    ///
    /// # Errors
    ///
    /// Returns [`ContractError`] when deployment fails.
    fn deploy(&self) -> Result<Self::Contract, ContractError>;

    /// Lists the accounts available to act as creator and beneficiaries.
    ///
    /// # Errors
    ///
    /// Returns [`ContractError`] when the accounts cannot be listed.
    fn accounts(&self) -> Result<Vec<Address>, ContractError>;
}

// ============================================================================
// SECTION: Fixture
// ============================================================================

/// Accounts used by the shared fixture.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Roles {
    /// Account that creates every fixture deed.
    pub creator: Address,
    /// Beneficiary of `one`.
    pub first_beneficiary: Address,
    /// Beneficiary of `two` and `del`.
    pub second_beneficiary: Address,
}

impl Roles {
    /// Takes the first three accounts as creator and beneficiaries.
    ///
    /// # Errors
    ///
    /// Returns an error when fewer than three accounts are available.
    pub fn from_accounts(accounts: &[Address]) -> Result<Self, String> {
        match accounts {
            [creator, first_beneficiary, second_beneficiary, ..] => Ok(Self {
                creator: *creator,
                first_beneficiary: *first_beneficiary,
                second_beneficiary: *second_beneficiary,
            }),
            _ => Err(format!("fixture needs three accounts, found {}", accounts.len())),
        }
    }
}

/// Deed names created by [`Fixture::setup`], in creation order.
pub const FIXTURE_DEEDS: [&str; 3] = ["one", "two", "del"];

/// Fresh contract with the shared fixture deeds in place.
pub struct Fixture<C> {
    /// Contract under test.
    pub contract: C,
    /// Accounts used by the fixture.
    pub roles: Roles,
}

impl<C: DeedContract> Fixture<C> {
    /// Deploys a fresh contract and creates the fixture deeds.
    ///
    /// # Errors
    ///
    /// Returns an error when deployment or any fixture call fails.
    pub fn setup<D>(deployer: &D) -> Result<Self, String>
    where
        D: Deployer<Contract = C>,
    {
        let accounts = deployer.accounts().map_err(|err| format!("accounts: {err}"))?;
        let roles = Roles::from_accounts(&accounts)?;
        let contract = deployer.deploy().map_err(|err| format!("deploy: {err}"))?;
        let fixture = Self {
            contract,
            roles,
        };
        let [one, two, del] = FIXTURE_DEEDS;
        fixture.create(one, roles.first_beneficiary)?;
        fixture.create(two, roles.second_beneficiary)?;
        fixture.create(del, roles.second_beneficiary)?;
        Ok(fixture)
    }

    /// Caller context for the creator account.
    #[must_use]
    pub const fn creator_tx(&self) -> TxRequest {
        TxRequest::sender(self.roles.creator)
    }

    /// Creates a deed from the creator account.
    fn create(&self, name: &str, beneficiary: Address) -> Result<(), String> {
        self.contract
            .create(&self.creator_tx(), name, beneficiary)
            .map(|_| ())
            .map_err(|err| format!("create {name}: {err}"))
    }
}

// ============================================================================
// SECTION: Assertions
// ============================================================================

/// Succeeds only when `result` is a contract revert.
///
/// # Errors
///
/// Returns an error describing the unexpected success or non-revert failure.
#[allow(clippy::use_debug, reason = "Failures render the unexpected value for diagnosis.")]
pub fn assert_reverts<T: Debug>(result: Result<T, ContractError>) -> Result<(), String> {
    match result {
        Err(err) if err.is_revert() => Ok(()),
        Err(err) => Err(format!("expected revert, got error: {err}")),
        Ok(value) => Err(format!("expected revert, got success: {value:?}")),
    }
}

/// Compares an observed value with the expected one.
///
/// # Errors
///
/// Returns an error naming `label` when the values differ.
#[allow(clippy::use_debug, reason = "Failures render both values for diagnosis.")]
pub fn assert_equal<T: PartialEq + Debug>(
    label: &str,
    actual: T,
    expected: T,
) -> Result<(), String> {
    if actual == expected {
        Ok(())
    } else {
        Err(format!("{label}: expected {expected:?}, got {actual:?}"))
    }
}

/// Unwraps a contract call, naming `label` on failure.
///
/// # Errors
///
/// Returns an error naming `label` when the call failed.
pub fn call<T>(label: &str, result: Result<T, ContractError>) -> Result<T, String> {
    result.map_err(|err| format!("{label}: {err}"))
}
