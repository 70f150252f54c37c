use std::path::{Path, PathBuf};
use std::process::{Command, Output};

use tempfile::TempDir;

/// Runs the built `sheihu` binary in an isolated home directory with a
/// config whose schedules tick every millisecond.
pub struct CliTestHarness {
    _home: TempDir,
    home_path: PathBuf,
    config_path: PathBuf,
}

impl CliTestHarness {
    pub fn new(name: &str) -> Self {
        let home = tempfile::Builder::new()
            .prefix(&format!("sheihu-e2e-{}-", name))
            .tempdir()
            .expect("create temp home");
        let home_path = home.path().to_path_buf();
        let config_path = home_path.join("config.toml");

        std::fs::write(
            &config_path,
            "[schedule]\nlaunch_period_ms = 1\ndownload_period_ms = 1\nexport_period_ms = 1\n",
        )
        .expect("write config");

        Self {
            _home: home,
            home_path,
            config_path,
        }
    }

    pub fn config_path(&self) -> &Path {
        &self.config_path
    }

    pub fn write_config(&self, content: &str) {
        std::fs::write(&self.config_path, content).expect("write config");
    }

    pub fn run_cli(&self, args: &[&str]) -> Output {
        Command::new(env!("CARGO_BIN_EXE_sheihu"))
            .arg("--config")
            .arg(&self.config_path)
            .args(args)
            .env("HOME", &self.home_path)
            .env("XDG_CONFIG_HOME", self.home_path.join(".config"))
            .env_remove("GEMINI_API_KEY")
            .env_remove("API_KEY")
            .env_remove("SHEIHU_CONFIG")
            .env_remove("SHEIHU_LOG")
            .output()
            .expect("run sheihu")
    }
}

pub fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).to_string()
}

pub fn combined(output: &Output) -> String {
    format!(
        "{}{}",
        String::from_utf8_lossy(&output.stdout),
        String::from_utf8_lossy(&output.stderr)
    )
}
