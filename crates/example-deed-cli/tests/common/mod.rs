// crates/example-deed-cli/tests/common/mod.rs
// ============================================================================
// Module: CLI Test Helpers
// Description: Shared stub node and config fixtures for CLI integration tests.
// Purpose: Run CLI flows end to end without a real blockchain node.
// Dependencies: tiny_http, tempfile, serde_json
// ============================================================================

#![allow(dead_code, reason = "Helpers are shared across test binaries.")]

use std::io::Read;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::thread;

use serde_json::Value;
use serde_json::json;
use tempfile::TempDir;
use tiny_http::Response;
use tiny_http::Server;

/// Contract address the stub node reports code for.
pub const CONTRACT: &str = "0x00000000000000000000000000000000000000aa";
/// First account managed by the stub node.
pub const NODE_ACCOUNT: &str = "0x0000000000000000000000000000000000000001";

/// Starts a stub node that answers `eth_call` with a count of three deeds.
pub fn stub_node() -> SocketAddr {
    let server = Server::http("127.0.0.1:0").expect("bind stub node");
    let addr = server.server_addr().to_ip().expect("stub node ip address");
    thread::spawn(move || {
        for mut request in server.incoming_requests() {
            let mut body = String::new();
            if request.as_reader().read_to_string(&mut body).is_err() {
                continue;
            }
            let call: Value = serde_json::from_str(&body).unwrap_or(Value::Null);
            let result = match call["method"].as_str().unwrap_or_default() {
                "net_version" => json!("4447"),
                "eth_getCode" => json!("0x6080"),
                "eth_accounts" => json!([NODE_ACCOUNT]),
                "eth_call" => json!(format!("0x{:064x}", 3)),
                _ => Value::Null,
            };
            let reply = json!({"jsonrpc": "2.0", "id": call["id"], "result": result});
            let _ = request.respond(Response::from_string(reply.to_string()));
        }
    });
    addr
}

/// Writes `content` to `example-deed.toml` in a fresh temp directory.
pub fn write_config(content: &str) -> (TempDir, PathBuf) {
    let dir = tempfile::tempdir().expect("create temp dir");
    let path = dir.path().join("example-deed.toml");
    std::fs::write(&path, content).expect("write config");
    (dir, path)
}

/// Renders a config pointing the development profile at `addr`.
pub fn config_for(addr: SocketAddr, extra: &str) -> String {
    format!(
        "[networks.development]\nhost = \"{}\"\nport = {}\nnetwork_id = \"4447\"\n\n{extra}",
        addr.ip(),
        addr.port()
    )
}
