// crates/example-deed-core/src/runtime/audit.rs
// ============================================================================
// Module: Example Deed Audit Logging
// Description: Structured audit events for contract calls.
// Purpose: Emit one JSON-line event per contract call without hard dependencies.
// Dependencies: crate::{core, interfaces}, serde, serde_json
// ============================================================================

//! ## Overview
//! [`AuditedDeedContract`] wraps any [`DeedContract`] and records each call
//! through a [`DeedAuditSink`]. Sinks are lightweight so deployments can
//! route events to their preferred logging pipeline. Audit failures never
//! change the result of the wrapped call.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fs::OpenOptions;
use std::io;
use std::io::Write;
use std::path::Path;
use std::sync::Arc;
use std::sync::Mutex;
use std::time::SystemTime;
use std::time::UNIX_EPOCH;

use alloy_primitives::Address;
use alloy_primitives::B256;
use serde::Serialize;

use crate::core::DeedId;
use crate::core::TxReceipt;
use crate::core::TxRequest;
use crate::core::Wei;
use crate::interfaces::ContractError;
use crate::interfaces::DeedContract;
use crate::interfaces::DeedOperation;

// ============================================================================
// SECTION: Types
// ============================================================================

/// Contract call outcome classification.
///
/// # Invariants
/// - Variants are stable for audit labeling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CallOutcome {
    /// Call succeeded.
    Ok,
    /// Contract reverted the call.
    Reverted,
    /// Call failed before the contract could decide.
    Error,
}

/// Contract call audit event payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DeedAuditEvent {
    /// Event identifier.
    pub event: &'static str,
    /// Event timestamp (milliseconds since epoch).
    pub timestamp_ms: u128,
    /// Contract operation.
    pub operation: DeedOperation,
    /// Sending account for state-changing calls.
    pub caller: Option<Address>,
    /// Payment attached to state-changing calls.
    pub value: Option<Wei>,
    /// Deed addressed by the call, when known.
    pub deed_id: Option<DeedId>,
    /// Call outcome.
    pub outcome: CallOutcome,
    /// Error text for failed calls.
    pub error: Option<String>,
    /// Transaction hash for successful state-changing calls.
    pub tx_hash: Option<B256>,
}

/// Inputs required to construct an audit event.
pub struct DeedAuditEventParams {
    /// Contract operation.
    pub operation: DeedOperation,
    /// Caller context for state-changing calls.
    pub tx: Option<TxRequest>,
    /// Deed addressed by the call, when known.
    pub deed_id: Option<DeedId>,
    /// Call outcome.
    pub outcome: CallOutcome,
    /// Error text for failed calls.
    pub error: Option<String>,
    /// Transaction hash for successful state-changing calls.
    pub tx_hash: Option<B256>,
}

impl DeedAuditEvent {
    /// Creates a new audit event with a consistent timestamp.
    #[must_use]
    pub fn new(params: DeedAuditEventParams) -> Self {
        let timestamp_ms =
            SystemTime::now().duration_since(UNIX_EPOCH).unwrap_or_default().as_millis();
        Self {
            event: "deed_call",
            timestamp_ms,
            operation: params.operation,
            caller: params.tx.map(|tx| tx.from),
            value: params.tx.map(|tx| tx.value),
            deed_id: params.deed_id,
            outcome: params.outcome,
            error: params.error,
            tx_hash: params.tx_hash,
        }
    }
}

// ============================================================================
// SECTION: Trait
// ============================================================================

/// Audit sink for contract call events.
pub trait DeedAuditSink: Send + Sync {
    /// Record an audit event.
    fn record(&self, event: &DeedAuditEvent);
}

/// Audit sink that logs JSON lines to stderr.
pub struct StderrAuditSink;

impl DeedAuditSink for StderrAuditSink {
    fn record(&self, event: &DeedAuditEvent) {
        if let Ok(payload) = serde_json::to_string(event) {
            let _ = writeln!(std::io::stderr(), "{payload}");
        }
    }
}

/// Audit sink that logs JSON lines to a file.
pub struct FileAuditSink {
    /// File handle used for append-only logging.
    file: Mutex<std::fs::File>,
}

impl FileAuditSink {
    /// Opens the audit log file in append mode.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be opened.
    pub fn new(path: &Path) -> io::Result<Self> {
        let file = OpenOptions::new().create(true).append(true).open(path)?;
        Ok(Self {
            file: Mutex::new(file),
        })
    }
}

impl DeedAuditSink for FileAuditSink {
    fn record(&self, event: &DeedAuditEvent) {
        if let Ok(payload) = serde_json::to_string(event)
            && let Ok(mut file) = self.file.lock()
        {
            let _ = writeln!(file, "{payload}");
            let _ = file.flush();
        }
    }
}

/// No-op audit sink.
pub struct NoopAuditSink;

impl DeedAuditSink for NoopAuditSink {
    fn record(&self, _event: &DeedAuditEvent) {}
}

// ============================================================================
// SECTION: Audited Contract
// ============================================================================

/// Contract decorator that records every call through an audit sink.
pub struct AuditedDeedContract<C> {
    /// Wrapped contract backend.
    inner: C,
    /// Destination for audit events.
    sink: Arc<dyn DeedAuditSink>,
}

impl<C: DeedContract> AuditedDeedContract<C> {
    /// Wraps `inner`, recording calls to `sink`.
    #[must_use]
    pub fn new(inner: C, sink: Arc<dyn DeedAuditSink>) -> Self {
        Self {
            inner,
            sink,
        }
    }

    /// Returns the wrapped backend.
    #[must_use]
    pub const fn inner(&self) -> &C {
        &self.inner
    }

    /// Records the outcome of a call and passes the result through.
    fn observe<T>(
        &self,
        operation: DeedOperation,
        tx: Option<&TxRequest>,
        deed_id: Option<DeedId>,
        result: Result<T, ContractError>,
        tx_hash: impl FnOnce(&T) -> Option<B256>,
    ) -> Result<T, ContractError> {
        let (outcome, error, hash) = match &result {
            Ok(value) => (CallOutcome::Ok, None, tx_hash(value)),
            Err(err) if err.is_revert() => (CallOutcome::Reverted, Some(err.to_string()), None),
            Err(err) => (CallOutcome::Error, Some(err.to_string()), None),
        };
        self.sink.record(&DeedAuditEvent::new(DeedAuditEventParams {
            operation,
            tx: tx.copied(),
            deed_id,
            outcome,
            error,
            tx_hash: hash,
        }));
        result
    }
}

impl<C: DeedContract> DeedContract for AuditedDeedContract<C> {
    fn create(
        &self,
        tx: &TxRequest,
        name: &str,
        beneficiary: Address,
    ) -> Result<TxReceipt, ContractError> {
        let result = self.inner.create(tx, name, beneficiary);
        self.observe(DeedOperation::Create, Some(tx), None, result, receipt_hash)
    }

    fn count_of_deeds(&self) -> Result<u64, ContractError> {
        let result = self.inner.count_of_deeds();
        self.observe(DeedOperation::CountOfDeeds, None, None, result, |_| None)
    }

    fn count_of_deeds_by_owner(&self, owner: Address) -> Result<u64, ContractError> {
        let result = self.inner.count_of_deeds_by_owner(owner);
        self.observe(DeedOperation::CountOfDeedsByOwner, None, None, result, |_| None)
    }

    fn deed_of_owner_by_index(&self, owner: Address, index: u64) -> Result<DeedId, ContractError> {
        let result = self.inner.deed_of_owner_by_index(owner, index);
        let deed_id = result.as_ref().ok().copied();
        self.observe(DeedOperation::DeedOfOwnerByIndex, None, deed_id, result, |_| None)
    }

    fn destroy(&self, tx: &TxRequest, id: DeedId) -> Result<TxReceipt, ContractError> {
        let result = self.inner.destroy(tx, id);
        self.observe(DeedOperation::Destroy, Some(tx), Some(id), result, receipt_hash)
    }

    fn appropriate(&self, tx: &TxRequest, id: DeedId) -> Result<TxReceipt, ContractError> {
        let result = self.inner.appropriate(tx, id);
        self.observe(DeedOperation::Appropriate, Some(tx), Some(id), result, receipt_hash)
    }
}

/// Extracts the transaction hash from a receipt.
#[allow(clippy::unnecessary_wraps, reason = "Signature matches the observe callback.")]
const fn receipt_hash(receipt: &TxReceipt) -> Option<B256> {
    Some(receipt.tx_hash)
}
