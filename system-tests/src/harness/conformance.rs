// system-tests/src/harness/conformance.rs
// ============================================================================
// Module: Contract Conformance Cases
// Description: Behavioural checks every ExampleDeed deployment must satisfy.
// Purpose: Keep one definition of the contract's observable behaviour.
// Dependencies: example-deed-core, crate::harness
// ============================================================================

//! ## Overview
//! Each case deploys through the supplied [`Deployer`], runs the shared
//! fixture, and checks one property. Cases only rely on behaviour the
//! contract surface guarantees; `appropriate` on a live deed is never
//! asserted either way.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeSet;

use alloy_primitives::Address;
use example_deed_core::DeedContract;
use example_deed_core::DeedId;

use super::Deployer;
use super::Fixture;
use super::assert_equal;
use super::assert_reverts;
use super::call;

// ============================================================================
// SECTION: Cases
// ============================================================================

/// Identifier no fixture deed ever receives.
pub const UNKNOWN_DEED_ID: u64 = 999;

/// Signature shared by all conformance cases.
pub type Case<D> = fn(&D) -> Result<(), String>;

/// Returns every case with its name, in a stable order.
#[must_use]
pub fn cases<D: Deployer>() -> Vec<(&'static str, Case<D>)> {
    let cases: [(&'static str, Case<D>); 5] = [
        ("counts_created_deeds", counts_created_deeds::<D>),
        ("destroy_reduces_counts", destroy_reduces_counts::<D>),
        ("destroy_unknown_id_reverts", destroy_unknown_id_reverts::<D>),
        ("appropriate_unknown_id_reverts", appropriate_unknown_id_reverts::<D>),
        ("owner_enumeration_is_stable", owner_enumeration_is_stable::<D>),
    ];
    Vec::from(cases)
}

/// Runs every case and collects the failures as `name: message` lines.
#[must_use]
pub fn run_all<D: Deployer>(deployer: &D) -> Vec<String> {
    cases::<D>()
        .into_iter()
        .filter_map(|(name, case)| case(deployer).err().map(|err| format!("{name}: {err}")))
        .collect()
}

/// Three fixture deeds give a total count of three.
///
/// # Errors
///
/// Returns an error describing the first failed check.
pub fn counts_created_deeds<D: Deployer>(deployer: &D) -> Result<(), String> {
    let fixture = Fixture::setup(deployer)?;
    assert_equal("countOfDeeds", call("countOfDeeds", fixture.contract.count_of_deeds())?, 3)
}

/// Destroying one of the creator's deeds lowers both counts by one.
///
/// # Errors
///
/// Returns an error describing the first failed check.
pub fn destroy_reduces_counts<D: Deployer>(deployer: &D) -> Result<(), String> {
    let fixture = Fixture::setup(deployer)?;
    let contract = &fixture.contract;
    let creator = fixture.roles.creator;
    let owned = call("countOfDeedsByOwner", contract.count_of_deeds_by_owner(creator))?;
    if owned == 0 {
        return Err("creator owns no deeds after setup".to_string());
    }
    let last = call("deedOfOwnerByIndex", contract.deed_of_owner_by_index(creator, owned - 1))?;

    call("destroy", contract.destroy(&fixture.creator_tx(), last))?;

    assert_equal("countOfDeeds", call("countOfDeeds", contract.count_of_deeds())?, 2)?;
    assert_equal(
        "countOfDeedsByOwner",
        call("countOfDeedsByOwner", contract.count_of_deeds_by_owner(creator))?,
        owned - 1,
    )
}

/// Destroying an unknown id reverts and leaves the count unchanged.
///
/// # Errors
///
/// Returns an error describing the first failed check.
pub fn destroy_unknown_id_reverts<D: Deployer>(deployer: &D) -> Result<(), String> {
    let fixture = Fixture::setup(deployer)?;
    let contract = &fixture.contract;

    assert_reverts(contract.destroy(&fixture.creator_tx(), DeedId::from(UNKNOWN_DEED_ID)))?;

    assert_equal("countOfDeeds", call("countOfDeeds", contract.count_of_deeds())?, 3)
}

/// Appropriating an unknown id reverts.
///
/// # Errors
///
/// Returns an error describing the first failed check.
pub fn appropriate_unknown_id_reverts<D: Deployer>(deployer: &D) -> Result<(), String> {
    let fixture = Fixture::setup(deployer)?;
    assert_reverts(
        fixture.contract.appropriate(&fixture.creator_tx(), DeedId::from(UNKNOWN_DEED_ID)),
    )
}

/// Every in-range owner index yields a distinct, live id that does not
/// change between reads, and enumeration follows destroys.
///
/// Survivors are compared as a set since contracts may reorder an owner's
/// list on removal.
///
/// # Errors
///
/// Returns an error describing the first failed check.
pub fn owner_enumeration_is_stable<D: Deployer>(deployer: &D) -> Result<(), String> {
    let fixture = Fixture::setup(deployer)?;
    let contract = &fixture.contract;
    let roles = fixture.roles;
    let mut seen = BTreeSet::new();
    let mut total = 0;
    for owner in [roles.creator, roles.first_beneficiary, roles.second_beneficiary] {
        let ids = enumerate(contract, owner)?;
        total += ids.len();
        for (index, id) in (0_u64 ..).zip(&ids) {
            let again = call("deedOfOwnerByIndex", contract.deed_of_owner_by_index(owner, index))?;
            assert_equal("deedOfOwnerByIndex repeat", again, *id)?;
            if !seen.insert(*id) {
                return Err(format!("deed id {id} enumerated twice"));
            }
        }
    }
    let live = call("countOfDeeds", contract.count_of_deeds())?;
    assert_equal("enumerated deeds", u64::try_from(total).unwrap_or(u64::MAX), live)?;

    let tx = fixture.creator_tx();
    let before = enumerate(contract, roles.creator)?;
    let Some(&removed) = before.get(1) else {
        return Err(format!("creator owns {} deed(s), expected at least 2", before.len()));
    };
    call("destroy", contract.destroy(&tx, removed))?;
    let expected: BTreeSet<DeedId> = before.iter().copied().filter(|id| *id != removed).collect();
    let after: BTreeSet<DeedId> = enumerate(contract, roles.creator)?.into_iter().collect();
    assert_equal("creator deeds after destroy", after.clone(), expected)?;

    let survivors = u64::try_from(after.len()).unwrap_or(u64::MAX);
    for id in after {
        call("destroy enumerated id", contract.destroy(&tx, id))?;
    }
    let remaining = live.saturating_sub(1).saturating_sub(survivors);
    assert_equal("countOfDeeds", call("countOfDeeds", contract.count_of_deeds())?, remaining)
}

/// Reads every id in `owner`'s list, in index order.
fn enumerate<C: DeedContract>(contract: &C, owner: Address) -> Result<Vec<DeedId>, String> {
    let owned = call("countOfDeedsByOwner", contract.count_of_deeds_by_owner(owner))?;
    (0..owned)
        .map(|index| call("deedOfOwnerByIndex", contract.deed_of_owner_by_index(owner, index)))
        .collect()
}
