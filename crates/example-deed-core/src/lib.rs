// crates/example-deed-core/src/lib.rs
// ============================================================================
// Module: Example Deed Core Library
// Description: Public API surface for the Example Deed core.
// Purpose: Expose deed types, the contract interface, and runtime helpers.
// Dependencies: crate::{core, interfaces, runtime}
// ============================================================================

//! ## Overview
//! Example Deed core describes the observable surface of the `ExampleDeed`
//! contract: named deeds owned by accounts, enumerable per owner, destroyed
//! irreversibly. The contract is reached only through the [`DeedContract`]
//! interface so the same callers run against the in-memory reference model
//! or a deployed instance.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod core;
pub mod interfaces;
pub mod runtime;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use core::*;

pub use alloy_primitives::Address;
pub use alloy_primitives::B256;
pub use alloy_primitives::U256;
pub use interfaces::ContractError;
pub use interfaces::DeedContract;
pub use interfaces::DeedOperation;
pub use runtime::AppropriationPolicy;
pub use runtime::AuditedDeedContract;
pub use runtime::DeedAuditEvent;
pub use runtime::DeedAuditSink;
pub use runtime::FileAuditSink;
pub use runtime::InMemoryDeedContract;
pub use runtime::NoopAuditSink;
pub use runtime::StderrAuditSink;
