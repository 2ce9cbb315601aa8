// crates/example-deed-config/src/examples.rs
// ============================================================================
// Module: Config Examples
// Description: Canonical example configuration payloads.
// Purpose: Deterministic examples for docs and tooling.
// Dependencies: std
// ============================================================================

//! ## Overview
//! Canonical example for Example Deed configuration. The output is
//! deterministic and must always parse and validate.

/// Returns a canonical example `example-deed.toml` configuration.
#[must_use]
pub fn config_toml_example() -> String {
    String::from(
        r#"[networks.development]
host = "localhost"
port = 8545
network_id = "4447"

[networks.staging]
host = "127.0.0.1"
port = 7545
network_id = "*"
gas = 6721975
# from = "0x0000000000000000000000000000000000000001"

[contract]
# address = "0x0000000000000000000000000000000000000000"

[client]
timeout_ms = 5000
max_response_bytes = 1048576
receipt_poll_interval_ms = 100
receipt_timeout_ms = 30000

[audit]
sink = "stderr"
# sink = "file"
# path = "example-deed-audit.log"
"#,
    )
}
