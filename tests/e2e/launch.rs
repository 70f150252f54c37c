use serial_test::serial;

use crate::harness::{stdout, CliTestHarness};

#[test]
#[serial]
fn test_launch_streams_console_and_completes() {
    let h = CliTestHarness::new("launch");

    let output = h.run_cli(&["launch", "1.20.1", "--max-ram", "6G"]);
    assert!(
        output.status.success(),
        "sheihu launch failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );

    let out = stdout(&output);
    let lines: Vec<&str> = out.lines().filter(|l| l.starts_with('[')).collect();
    // 14 console lines plus the completion line.
    assert_eq!(lines.len(), 15, "unexpected output:\n{}", out);
    assert!(lines[0].ends_with("Initializing launch environment for Minecraft 1.20.1"));
    assert!(out.contains("[SHEIHU] Allocating JVM memory: -Xmx6G"));
    assert!(out.contains("User: Steve_Sheihu"));
    assert!(lines[14].ends_with("Operation complete"));
    assert!(out.contains("✓ Minecraft 1.20.1 is running"));
}

#[test]
#[serial]
fn test_launch_json_events_are_ordered() {
    let h = CliTestHarness::new("launch_json");

    let output = h.run_cli(&["launch", "--user", "Alex", "--json"]);
    assert!(output.status.success());

    let events: Vec<serde_json::Value> = stdout(&output)
        .lines()
        .map(|l| serde_json::from_str(l).expect("json line"))
        .collect();

    assert_eq!(events.len(), 15);
    for (i, event) in events.iter().enumerate() {
        assert_eq!(event["sequence"], i as u64);
    }
    assert_eq!(
        events[2]["payload"]["line"],
        "[AUTH] Access Token verified. User: Alex"
    );
    assert_eq!(events[14]["payload"]["type"], "finished");
    assert_eq!(events[14]["payload"]["state"], "complete");
}

#[test]
#[serial]
fn test_launch_uses_configured_lines_and_memory() {
    let h = CliTestHarness::new("launch_config");
    h.write_config(
        r#"
[java]
max_ram = "12G"

[schedule]
launch_period_ms = 1
launch_lines = ["[SHEIHU] Heap {maxRam} for {version}"]
"#,
    );

    let output = h.run_cli(&["launch", "1.8.9"]);
    assert!(output.status.success());
    assert!(stdout(&output).contains("[SHEIHU] Heap 12G for 1.8.9"));
}
