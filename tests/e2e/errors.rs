use serial_test::serial;

use crate::harness::{combined, CliTestHarness};

#[test]
#[serial]
fn test_download_installed_version_fails() {
    let h = CliTestHarness::new("dl_installed");

    let output = h.run_cli(&["download", "1.20.1"]);
    assert!(
        !output.status.success(),
        "download of an installed version should fail"
    );
    let text = combined(&output);
    assert!(text.contains("already installed"), "{}", text);
}

#[test]
#[serial]
fn test_download_invalid_id_fails() {
    let h = CliTestHarness::new("dl_invalid");

    let output = h.run_cli(&["download", "../../etc"]);
    assert!(!output.status.success());
    assert!(combined(&output).contains("Invalid version id"));
}

#[test]
#[serial]
fn test_guest_launch_fails() {
    let h = CliTestHarness::new("guest");

    let output = h.run_cli(&["launch", "--guest"]);
    assert!(!output.status.success());
    assert!(combined(&output).contains("Not signed in"));
}

#[test]
#[serial]
fn test_bad_schedule_config_fails() {
    let h = CliTestHarness::new("bad_config");
    h.write_config("[schedule]\ndownload_increment = 0\n");

    let output = h.run_cli(&["versions"]);
    assert!(!output.status.success());
    let text = combined(&output);
    assert!(text.contains("increment"), "{}", text);
    assert!(h.config_path().exists());
}

#[test]
#[serial]
fn test_mods_without_api_key_fails() {
    let h = CliTestHarness::new("no_key");

    let output = h.run_cli(&["mods", "performance"]);
    assert!(!output.status.success());
    assert!(combined(&output).contains("GEMINI_API_KEY"));
}
