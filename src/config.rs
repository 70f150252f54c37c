//! Launcher configuration (`config.toml`)

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::operation::schedule::{
    ScheduleError, DEFAULT_DOWNLOAD_INCREMENT, DEFAULT_DOWNLOAD_PERIOD_MS,
    DEFAULT_EXPORT_LINES, DEFAULT_EXPORT_PERIOD_MS, DEFAULT_LAUNCH_LINES,
    DEFAULT_LAUNCH_PERIOD_MS,
};
use crate::operation::{Schedule, ScheduleSet};

pub const DEFAULT_MODEL: &str = "gemini-3-flash-preview";
pub const DEFAULT_ENDPOINT: &str = "https://generativelanguage.googleapis.com/v1beta";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Invalid config {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },

    #[error("Invalid schedule: {0}")]
    Schedule(#[from] ScheduleError),
}

pub type Result<T> = std::result::Result<T, ConfigError>;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub java: JavaConfig,
    pub schedule: ScheduleConfig,
    pub assistant: AssistantConfig,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct JavaConfig {
    pub min_ram: String,
    pub max_ram: String,
    pub jvm_args: String,
    pub java_path: String,
}

impl Default for JavaConfig {
    fn default() -> Self {
        Self {
            min_ram: "2G".to_string(),
            max_ram: "4G".to_string(),
            jvm_args: "-XX:+UseG1GC -XX:+UnlockExperimentalVMOptions -XX:MaxGCPauseMillis=100"
                .to_string(),
            java_path: "Default / Internal".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScheduleConfig {
    pub launch_period_ms: u64,
    pub download_period_ms: u64,
    pub download_increment: u8,
    pub export_period_ms: u64,
    /// Replaces the built-in launch console lines when set.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub launch_lines: Option<Vec<String>>,
}

impl Default for ScheduleConfig {
    fn default() -> Self {
        Self {
            launch_period_ms: DEFAULT_LAUNCH_PERIOD_MS,
            download_period_ms: DEFAULT_DOWNLOAD_PERIOD_MS,
            download_increment: DEFAULT_DOWNLOAD_INCREMENT,
            export_period_ms: DEFAULT_EXPORT_PERIOD_MS,
            launch_lines: None,
        }
    }
}

impl ScheduleConfig {
    pub fn build(&self) -> Result<ScheduleSet> {
        let lines = match &self.launch_lines {
            Some(lines) => lines.clone(),
            None => DEFAULT_LAUNCH_LINES.iter().map(|s| s.to_string()).collect(),
        };
        let launch = Schedule::log(self.launch_period_ms, lines)?;
        let download = Schedule::percent(self.download_period_ms, self.download_increment)?;
        let export = Schedule::log(
            self.export_period_ms,
            DEFAULT_EXPORT_LINES.iter().map(|s| s.to_string()).collect(),
        )?;
        Ok(ScheduleSet::new(launch, download)?.with_export(export)?)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AssistantConfig {
    pub model: String,
    pub endpoint: String,
}

impl Default for AssistantConfig {
    fn default() -> Self {
        Self {
            model: DEFAULT_MODEL.to_string(),
            endpoint: DEFAULT_ENDPOINT.to_string(),
        }
    }
}

impl Config {
    /// `<config dir>/sheihu/config.toml`
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("sheihu").join("config.toml"))
    }

    /// Load from an explicit path, or from the default location.
    ///
    /// An explicit path must exist. A missing file at the default location
    /// means defaults.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let (path, required) = match path {
            Some(p) => (p.to_path_buf(), true),
            None => match Self::default_path() {
                Some(p) => (p, false),
                None => {
                    tracing::debug!("No config directory, using defaults");
                    return Ok(Self::default());
                }
            },
        };

        if !required && !path.exists() {
            tracing::debug!("No config at {}, using defaults", path.display());
            return Ok(Self::default());
        }

        let content = fs::read_to_string(&path).map_err(|source| ConfigError::Io {
            path: path.clone(),
            source,
        })?;
        let config: Config = toml::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.clone(),
            source,
        })?;

        // Reject bad schedules at load time rather than on first use.
        config.schedule.build()?;

        tracing::debug!("Loaded config from {}", path.display());
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_launcher() {
        let config = Config::default();
        assert_eq!(config.java.min_ram, "2G");
        assert_eq!(config.java.max_ram, "4G");
        assert_eq!(config.schedule.launch_period_ms, 400);
        assert_eq!(config.schedule.download_period_ms, 50);
        assert_eq!(config.schedule.download_increment, 5);
        assert_eq!(config.schedule.export_period_ms, 1000);
        assert_eq!(config.assistant.model, DEFAULT_MODEL);
        assert_eq!(config.schedule.build().unwrap(), ScheduleSet::default());
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let temp = tempfile::TempDir::new().unwrap();
        let path = temp.path().join("config.toml");
        fs::write(
            &path,
            r#"
[java]
max_ram = "8G"

[schedule]
download_increment = 10
launch_lines = ["[SHEIHU] Booting {version}"]
"#,
        )
        .unwrap();

        let config = Config::load(Some(path.as_path())).unwrap();
        assert_eq!(config.java.max_ram, "8G");
        assert_eq!(config.java.min_ram, "2G");
        assert_eq!(config.schedule.download_increment, 10);
        assert_eq!(config.schedule.download_period_ms, 50);

        let schedules = config.schedule.build().unwrap();
        let launch = schedules.for_kind(crate::operation::OperationKind::LaunchSequence);
        assert_eq!(launch.required_parameters(), vec!["version"]);
    }

    #[test]
    fn test_invalid_increment_rejected_at_load() {
        let temp = tempfile::TempDir::new().unwrap();
        let path = temp.path().join("config.toml");
        fs::write(&path, "[schedule]\ndownload_increment = 0\n").unwrap();

        let err = Config::load(Some(path.as_path())).unwrap_err();
        assert!(matches!(
            err,
            ConfigError::Schedule(ScheduleError::InvalidIncrement(0))
        ));
    }

    #[test]
    fn test_zero_period_rejected_at_load() {
        let temp = tempfile::TempDir::new().unwrap();
        let path = temp.path().join("config.toml");
        fs::write(&path, "[schedule]\nexport_period_ms = 0\n").unwrap();

        let err = Config::load(Some(path.as_path())).unwrap_err();
        assert!(matches!(
            err,
            ConfigError::Schedule(ScheduleError::InvalidPeriod(0))
        ));
    }

    #[test]
    fn test_explicit_missing_path_errors() {
        let temp = tempfile::TempDir::new().unwrap();
        let err = Config::load(Some(temp.path().join("nope.toml").as_path())).unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }

    #[test]
    fn test_malformed_toml() {
        let temp = tempfile::TempDir::new().unwrap();
        let path = temp.path().join("config.toml");
        fs::write(&path, "[java\nmax_ram = ").unwrap();

        let err = Config::load(Some(path.as_path())).unwrap_err();
        assert!(err.to_string().starts_with("Invalid config"));
    }

    #[test]
    fn test_roundtrip_through_toml() {
        let config = Config::default();
        let text = toml::to_string(&config).unwrap();
        let parsed: Config = toml::from_str(&text).unwrap();
        assert_eq!(parsed, config);
    }
}
