// crates/example-deed-core/src/runtime/mod.rs
// ============================================================================
// Module: Example Deed Runtime
// Description: Reference contract backend and call auditing.
// Purpose: Run deed operations in-process and record every call.
// Dependencies: crate::{core, interfaces}
// ============================================================================

//! ## Overview
//! Runtime modules provide the in-memory reference contract and the audit
//! decorator that wraps any [`crate::DeedContract`] backend.

// ============================================================================
// SECTION: Submodules
// ============================================================================

pub mod audit;
pub mod registry;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use audit::AuditedDeedContract;
pub use audit::CallOutcome;
pub use audit::DeedAuditEvent;
pub use audit::DeedAuditEventParams;
pub use audit::DeedAuditSink;
pub use audit::FileAuditSink;
pub use audit::NoopAuditSink;
pub use audit::StderrAuditSink;
pub use registry::AppropriationPolicy;
pub use registry::InMemoryDeedContract;
