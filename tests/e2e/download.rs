use serial_test::serial;

use crate::harness::{stdout, CliTestHarness};

#[test]
#[serial]
fn test_download_counts_to_100() {
    let h = CliTestHarness::new("download");

    let output = h.run_cli(&["download", "1.20.4"]);
    assert!(
        output.status.success(),
        "sheihu download failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );

    let out = stdout(&output);
    let percents: Vec<&str> = out
        .lines()
        .filter_map(|l| l.split("Downloading Assets... ").nth(1))
        .collect();
    assert_eq!(percents.len(), 20, "unexpected output:\n{}", out);
    assert_eq!(percents[0], "5%");
    assert_eq!(percents[19], "100%");
    assert!(out.contains("✓ Installed 1.20.4"));
}

#[test]
#[serial]
fn test_download_unlisted_snapshot_is_fetched_first() {
    let h = CliTestHarness::new("download_snapshot");

    let output = h.run_cli(&["download", "23w45a"]);
    assert!(output.status.success());

    let out = stdout(&output);
    assert!(out.contains("Fetched 23w45a (snapshot)"), "{}", out);
    assert!(out.contains("✓ Installed 23w45a"));
}

#[test]
#[serial]
fn test_download_increment_from_config() {
    let h = CliTestHarness::new("download_increment");
    h.write_config("[schedule]\ndownload_period_ms = 1\ndownload_increment = 30\n");

    let output = h.run_cli(&["download", "1.19.4", "--json"]);
    assert!(output.status.success());

    let percents: Vec<u64> = stdout(&output)
        .lines()
        .map(|l| serde_json::from_str::<serde_json::Value>(l).expect("json line"))
        .filter_map(|e| e["payload"]["percent"].as_u64())
        .collect();
    assert_eq!(percents, vec![30, 60, 90, 100]);
}
