// crates/example-deed-cli/src/lib.rs
// ============================================================================
// Module: Example Deed CLI Library
// Description: Shared helpers for the Example Deed command-line interface.
// Purpose: Provide reusable components for the CLI binary and tests.
// Dependencies: example-deed-config, example-deed-core, example-deed-rpc
// ============================================================================

//! ## Overview
//! This library houses the message catalog and the session wiring that turns
//! a loaded configuration into an audited contract client. The binary entry
//! point (`src/main.rs`) imports these helpers so all user-facing output stays
//! consistent.

// ============================================================================
// SECTION: Modules
// ============================================================================

/// Message catalog and formatting macro.
pub mod messages;
/// Configuration-to-client wiring.
pub mod session;
