// system-tests/tests/contract.rs
// ============================================================================
// Module: Contract Conformance Suite
// Description: Runs the conformance cases against the in-memory deployer.
// Purpose: Keep the reference model and the harness honest without a node.
// Dependencies: system-tests harness and deployers, example-deed-core
// ============================================================================

//! ## Overview
//! Each property runs against a fresh [`InMemoryDeployer`] deployment. A
//! deliberately faulty contract confirms the harness reports failures rather
//! than passing vacuously.

#![allow(
    clippy::panic,
    clippy::unwrap_used,
    clippy::expect_used,
    reason = "Test-only output and panic-based assertions are permitted."
)]

use alloy_primitives::Address;
use alloy_primitives::B256;
use example_deed_core::AppropriationPolicy;
use example_deed_core::ContractError;
use example_deed_core::DeedContract;
use example_deed_core::DeedId;
use example_deed_core::InMemoryDeedContract;
use example_deed_core::TxReceipt;
use example_deed_core::TxRequest;
use example_deed_core::Wei;
use system_tests::deployers::InMemoryDeployer;
use system_tests::harness::Deployer;
use system_tests::harness::Fixture;
use system_tests::harness::Roles;
use system_tests::harness::assert_reverts;
use system_tests::harness::conformance;

// ============================================================================
// SECTION: Properties
// ============================================================================

#[test]
fn counts_created_deeds() -> Result<(), String> {
    conformance::counts_created_deeds(&InMemoryDeployer::default())
}

#[test]
fn destroy_reduces_counts() -> Result<(), String> {
    conformance::destroy_reduces_counts(&InMemoryDeployer::default())
}

#[test]
fn destroy_unknown_id_reverts() -> Result<(), String> {
    conformance::destroy_unknown_id_reverts(&InMemoryDeployer::default())
}

#[test]
fn appropriate_unknown_id_reverts() -> Result<(), String> {
    conformance::appropriate_unknown_id_reverts(&InMemoryDeployer::default())
}

#[test]
fn owner_enumeration_is_stable() -> Result<(), String> {
    conformance::owner_enumeration_is_stable(&InMemoryDeployer::default())
}

/// The suite does not depend on how `appropriate` behaves for live deeds.
#[test]
fn suite_passes_under_every_appropriation_policy() {
    for policy in [
        AppropriationPolicy::Disabled,
        AppropriationPolicy::TransferOnPayment {
            minimum: Wei::ZERO,
        },
    ] {
        let failures = conformance::run_all(&InMemoryDeployer::with_policy(policy));
        assert!(failures.is_empty(), "{policy:?}: {failures:?}");
    }
}

// ============================================================================
// SECTION: Fixture
// ============================================================================

#[test]
fn fixture_creates_three_deeds_owned_by_creator() {
    let fixture = Fixture::setup(&InMemoryDeployer::default()).unwrap();
    let contract = &fixture.contract;

    assert_eq!(contract.count_of_deeds_by_owner(fixture.roles.creator).unwrap(), 3);
    let names: Vec<String> = (0..3)
        .map(|id| contract.deed(DeedId::from(id)).unwrap().expect("fixture deed").name)
        .collect();
    assert_eq!(names, ["one", "two", "del"]);
    let del = contract.deed(DeedId::from(2)).unwrap().expect("del deed");
    assert_eq!(del.beneficiary, fixture.roles.second_beneficiary);
}

#[test]
fn fixture_requires_three_accounts() {
    let err = Roles::from_accounts(&[Address::repeat_byte(1)]).unwrap_err();
    assert_eq!(err, "fixture needs three accounts, found 1");
}

#[test]
fn assert_reverts_rejects_success_and_other_errors() {
    assert!(assert_reverts(Ok::<u64, ContractError>(1)).is_err());
    assert!(assert_reverts::<u64>(Err(ContractError::Transport("down".to_string()))).is_err());
    assert!(assert_reverts::<u64>(Err(ContractError::reverted("nope"))).is_ok());
}

// ============================================================================
// SECTION: Faulty Contract
// ============================================================================

/// Contract that accepts `destroy` for unknown ids without reverting.
struct SilentDestroy(InMemoryDeedContract);

impl DeedContract for SilentDestroy {
    fn create(
        &self,
        tx: &TxRequest,
        name: &str,
        beneficiary: Address,
    ) -> Result<TxReceipt, ContractError> {
        self.0.create(tx, name, beneficiary)
    }

    fn count_of_deeds(&self) -> Result<u64, ContractError> {
        self.0.count_of_deeds()
    }

    fn count_of_deeds_by_owner(&self, owner: Address) -> Result<u64, ContractError> {
        self.0.count_of_deeds_by_owner(owner)
    }

    fn deed_of_owner_by_index(&self, owner: Address, index: u64) -> Result<DeedId, ContractError> {
        self.0.deed_of_owner_by_index(owner, index)
    }

    fn destroy(&self, tx: &TxRequest, id: DeedId) -> Result<TxReceipt, ContractError> {
        match self.0.destroy(tx, id) {
            Err(err) if err.is_revert() => Ok(TxReceipt {
                tx_hash: B256::ZERO,
                block_number: None,
                gas_used: None,
            }),
            other => other,
        }
    }

    fn appropriate(&self, tx: &TxRequest, id: DeedId) -> Result<TxReceipt, ContractError> {
        self.0.appropriate(tx, id)
    }
}

struct SilentDestroyDeployer(InMemoryDeployer);

impl Deployer for SilentDestroyDeployer {
    type Contract = SilentDestroy;

    fn deploy(&self) -> Result<Self::Contract, ContractError> {
        self.0.deploy().map(SilentDestroy)
    }

    fn accounts(&self) -> Result<Vec<Address>, ContractError> {
        self.0.accounts()
    }
}

#[test]
fn suite_reports_faulty_contract() {
    let failures = conformance::run_all(&SilentDestroyDeployer(InMemoryDeployer::default()));

    assert_eq!(failures.len(), 1, "{failures:?}");
    assert!(failures[0].starts_with("destroy_unknown_id_reverts: expected revert"));
}

/// Contract that reports the list position as the deed id.
struct IndexAsId(InMemoryDeedContract);

impl DeedContract for IndexAsId {
    fn create(
        &self,
        tx: &TxRequest,
        name: &str,
        beneficiary: Address,
    ) -> Result<TxReceipt, ContractError> {
        self.0.create(tx, name, beneficiary)
    }

    fn count_of_deeds(&self) -> Result<u64, ContractError> {
        self.0.count_of_deeds()
    }

    fn count_of_deeds_by_owner(&self, owner: Address) -> Result<u64, ContractError> {
        self.0.count_of_deeds_by_owner(owner)
    }

    fn deed_of_owner_by_index(&self, owner: Address, index: u64) -> Result<DeedId, ContractError> {
        self.0.deed_of_owner_by_index(owner, index).map(|_| DeedId::from(index))
    }

    fn destroy(&self, tx: &TxRequest, id: DeedId) -> Result<TxReceipt, ContractError> {
        self.0.destroy(tx, id)
    }

    fn appropriate(&self, tx: &TxRequest, id: DeedId) -> Result<TxReceipt, ContractError> {
        self.0.appropriate(tx, id)
    }
}

struct IndexAsIdDeployer(InMemoryDeployer);

impl Deployer for IndexAsIdDeployer {
    type Contract = IndexAsId;

    fn deploy(&self) -> Result<Self::Contract, ContractError> {
        self.0.deploy().map(IndexAsId)
    }

    fn accounts(&self) -> Result<Vec<Address>, ContractError> {
        self.0.accounts()
    }
}

#[test]
fn suite_reports_enumeration_of_destroyed_ids() {
    let deployer = IndexAsIdDeployer(InMemoryDeployer::default());

    let failures = conformance::run_all(&deployer);

    assert_eq!(failures.len(), 1, "{failures:?}");
    assert!(
        failures[0].starts_with("owner_enumeration_is_stable: creator deeds after destroy"),
        "{failures:?}"
    );
}
