use serial_test::serial;

use crate::harness::{combined, stdout, CliTestHarness};

#[test]
#[serial]
fn test_servers_lists_seeded_entries() {
    let h = CliTestHarness::new("servers");

    let output = h.run_cli(&["servers"]);
    assert!(
        output.status.success(),
        "sheihu servers failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    let out = stdout(&output);
    assert!(out.contains("Hypixel Network"));
    assert!(out.contains("play.wynncraft.com"));
}

#[test]
#[serial]
fn test_servers_add_then_lists_three() {
    let h = CliTestHarness::new("servers_add");

    let output = h.run_cli(&["servers", "add", "My Survival World", "play.server.com", "--json"]);
    assert!(output.status.success());

    let servers: Vec<serde_json::Value> =
        serde_json::from_str(&stdout(&output)).expect("json list");
    assert_eq!(servers.len(), 3);
    assert_eq!(servers[2]["name"], "My Survival World");
    assert_eq!(servers[2]["ip"], "play.server.com");
    assert_ne!(servers[2]["id"], "1");
}

#[test]
#[serial]
fn test_servers_remove_seeded() {
    let h = CliTestHarness::new("servers_remove");

    let output = h.run_cli(&["servers", "remove", "1"]);
    assert!(output.status.success());
    let out = stdout(&output);
    assert!(out.contains("✓ Removed Hypixel Network"));
    assert!(out.contains("Wynncraft"));
}

#[test]
#[serial]
fn test_servers_rejects_bad_input() {
    let h = CliTestHarness::new("servers_bad");

    let output = h.run_cli(&["servers", "add", "Lobby", "  "]);
    assert!(!output.status.success());
    assert!(combined(&output).contains("address must not be empty"));

    let output = h.run_cli(&["servers", "remove", "nope"]);
    assert!(!output.status.success());
    assert!(combined(&output).contains("Unknown server: nope"));
}
