use serial_test::serial;

use crate::harness::{stdout, CliTestHarness};

#[test]
#[serial]
fn test_cli_versions_lists_catalog() {
    let h = CliTestHarness::new("versions");

    let output = h.run_cli(&["versions"]);
    assert!(
        output.status.success(),
        "sheihu versions failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );

    let out = stdout(&output);
    for id in ["1.20.4", "1.20.1", "1.19.4", "1.8.9"] {
        assert!(out.contains(id), "missing {} in:\n{}", id, out);
    }
    assert!(out.contains("installed"));
}

#[test]
#[serial]
fn test_cli_versions_snapshot_filter_is_empty() {
    let h = CliTestHarness::new("versions_filter");

    let output = h.run_cli(&["versions", "--filter", "snapshot"]);
    assert!(output.status.success());
    assert!(stdout(&output).contains("No versions match."));
}

#[test]
#[serial]
fn test_cli_completions() {
    let h = CliTestHarness::new("completions");

    let output = h.run_cli(&["completions", "bash"]);
    assert!(output.status.success());
    assert!(stdout(&output).contains("sheihu"));
}

#[test]
#[serial]
fn test_cli_export_bundle() {
    let h = CliTestHarness::new("export");

    let output = h.run_cli(&["export"]);
    assert!(
        output.status.success(),
        "sheihu export failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    let out = stdout(&output);
    assert!(out.contains("Packaging application bundle SheihuLauncher_Portable.zip"));
    assert!(out.contains("Operation complete"));
    assert!(out.contains("✓ Application bundle 'SheihuLauncher_Portable.zip' generated"));
}
