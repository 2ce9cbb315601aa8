// crates/example-deed-cli/src/messages.rs
// ============================================================================
// Module: CLI Message Catalog
// Description: Provides the message catalog and formatting helpers for the CLI.
// Purpose: Centralize user-facing strings for consistent output.
// Dependencies: Standard library collections and formatting utilities.
// ============================================================================

//! ## Overview
//! The Example Deed CLI stores user-facing strings in a small catalog so
//! output wording lives in one place. All runtime output should be routed
//! through the [`t!`](crate::t) macro.
//!
//! ## Invariants
//! - The catalog is initialized once and read-only thereafter.
//! - Missing keys fall back to the key itself.
//! - Placeholder substitutions preserve argument order.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::HashMap;
use std::sync::OnceLock;

// ============================================================================
// SECTION: Types
// ============================================================================

/// A formatted message argument captured by the [`macro@crate::t`] macro.
///
/// # Invariants
/// - `key` matches a placeholder name without braces (for example, `path`).
/// - `value` is preformatted and should be safe for display.
#[derive(Clone)]
pub struct MessageArg {
    /// The placeholder name used in message templates (e.g., `"path"`).
    pub key: &'static str,
    /// The formatted string value to substitute for this placeholder.
    pub value: String,
}

impl MessageArg {
    /// Constructs a new [`MessageArg`] from a key and displayable value.
    pub fn new(key: &'static str, value: impl Into<String>) -> Self {
        Self {
            key,
            value: value.into(),
        }
    }
}

// ============================================================================
// SECTION: Catalog
// ============================================================================

/// Static catalog entries.
const CATALOG: &[(&str, &str)] = &[
    ("main.version", "example-deed {version}"),
    ("output.stream.stdout", "stdout"),
    ("output.stream.stderr", "stderr"),
    ("output.stream.unknown", "output"),
    ("output.write_failed", "Failed to write to {stream}: {error}"),
    ("config.load_failed", "Failed to load config: {error}"),
    ("config.validate.ok", "Config valid ({count} network(s))."),
    ("networks.entry", "{name}\t{endpoint}\tnetwork_id={network_id}"),
    ("networks.entry.gas", "{name}\t{endpoint}\tnetwork_id={network_id}\tgas={gas}"),
    ("session.failed", "Failed to prepare {network}: {error}"),
    ("deed.call_failed", "{operation} failed: {error}"),
    ("deed.count", "{count}"),
    ("deed.owner_index", "{id}"),
    ("deed.tx", "tx {hash} block {block} gas {gas}"),
    ("deed.tx.pending", "pending"),
    ("deed.tx.unknown", "unknown"),
];

/// Returns the message catalog.
pub(crate) fn catalog() -> &'static HashMap<&'static str, &'static str> {
    static CATALOG_MAP: OnceLock<HashMap<&'static str, &'static str>> = OnceLock::new();
    CATALOG_MAP.get_or_init(|| CATALOG.iter().copied().collect())
}

// ============================================================================
// SECTION: Translation
// ============================================================================

/// Renders `key` from the catalog while substituting `args`.
///
/// Placeholders are resolved in one pass over the template, so braces inside
/// substituted values are emitted verbatim. Unknown placeholders are kept.
#[must_use]
pub fn translate(key: &str, args: Vec<MessageArg>) -> String {
    let template = catalog().get(key).copied().unwrap_or(key);
    if args.is_empty() {
        return template.to_string();
    }

    let mut result = String::with_capacity(template.len());
    let mut rest = template;
    while let Some(open) = rest.find('{') {
        result.push_str(&rest[.. open]);
        let after = &rest[open + 1 ..];
        let value = after.find('}').and_then(|close| {
            let name = &after[.. close];
            args.iter().find(|arg| arg.key == name).map(|arg| (arg.value.as_str(), close))
        });
        match value {
            Some((value, close)) => {
                result.push_str(value);
                rest = &after[close + 1 ..];
            }
            None => {
                result.push('{');
                rest = after;
            }
        }
    }
    result.push_str(rest);
    result
}

// ============================================================================
// SECTION: Macro
// ============================================================================

/// Formats a catalog message from a key and named arguments.
///
/// # Arguments
///
/// - `$key` must match a catalog entry.
/// - Named arguments are substituted into `{placeholder}` positions.
#[macro_export]
macro_rules! t {
    ($key:literal $(, $name:ident = $value:expr )* $(,)?) => {{
        let args = ::std::vec![
            $(
                $crate::messages::MessageArg::new(stringify!($name), $value.to_string()),
            )*
        ];
        $crate::messages::translate($key, args)
    }};
}
