//! In-memory catalog of game versions

use std::fmt;
use std::sync::OnceLock;

use regex::Regex;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::operation::OperationState;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CatalogError {
    #[error("Version id must not be empty")]
    EmptyId,

    #[error("Invalid version id: {0}")]
    InvalidId(String),

    #[error("Version already listed: {0}")]
    Duplicate(String),

    #[error("Unknown version: {0}")]
    Unknown(String),

    #[error("Version {0} is already installed")]
    AlreadyInstalled(String),

    #[error("Version {0} is already downloading")]
    AlreadyDownloading(String),

    #[error("Version {0} is not downloading")]
    NotDownloading(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VersionType {
    Release,
    Snapshot,
    Beta,
}

impl fmt::Display for VersionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            VersionType::Release => "release",
            VersionType::Snapshot => "snapshot",
            VersionType::Beta => "beta",
        };
        f.write_str(s)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InstallStatus {
    Available,
    Downloading,
    Installed,
}

impl fmt::Display for InstallStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            InstallStatus::Available => "available",
            InstallStatus::Downloading => "downloading",
            InstallStatus::Installed => "installed",
        };
        f.write_str(s)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct McVersion {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: VersionType,
    pub release_time: String,
    pub status: InstallStatus,
}

impl McVersion {
    fn seeded(id: &str, release_time: &str, status: InstallStatus) -> Self {
        Self {
            id: id.to_string(),
            kind: VersionType::Release,
            release_time: release_time.to_string(),
            status,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum VersionFilter {
    #[default]
    All,
    Release,
    Snapshot,
}

impl VersionFilter {
    fn matches(&self, version: &McVersion) -> bool {
        match self {
            VersionFilter::All => true,
            VersionFilter::Release => version.kind == VersionType::Release,
            VersionFilter::Snapshot => version.kind == VersionType::Snapshot,
        }
    }
}

fn version_id_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"^[0-9A-Za-z][0-9A-Za-z._-]*$").expect("valid pattern"))
}

/// Versions known to this launcher session. Nothing is persisted.
#[derive(Debug, Clone)]
pub struct VersionCatalog {
    versions: Vec<McVersion>,
}

impl Default for VersionCatalog {
    fn default() -> Self {
        Self {
            versions: vec![
                McVersion::seeded("1.20.4", "2023-12-07", InstallStatus::Available),
                McVersion::seeded("1.20.1", "2023-06-12", InstallStatus::Installed),
                McVersion::seeded("1.19.4", "2023-03-14", InstallStatus::Available),
                McVersion::seeded("1.8.9", "2015-12-09", InstallStatus::Installed),
            ],
        }
    }
}

impl VersionCatalog {
    pub fn get(&self, id: &str) -> Option<&McVersion> {
        self.versions.iter().find(|v| v.id == id)
    }

    pub fn list(&self, filter: VersionFilter) -> impl Iterator<Item = &McVersion> {
        self.versions.iter().filter(move |v| filter.matches(v))
    }

    /// Add a version to the top of the list. Ids with a lowercase letter
    /// (`23w45a`) are snapshots.
    pub fn add(&mut self, id: &str) -> Result<&McVersion, CatalogError> {
        let id = id.trim();
        if id.is_empty() {
            return Err(CatalogError::EmptyId);
        }
        if !version_id_pattern().is_match(id) {
            return Err(CatalogError::InvalidId(id.to_string()));
        }
        if self.get(id).is_some() {
            return Err(CatalogError::Duplicate(id.to_string()));
        }

        let kind = if id.chars().any(|c| c.is_ascii_lowercase()) {
            VersionType::Snapshot
        } else {
            VersionType::Release
        };
        self.versions.insert(
            0,
            McVersion {
                id: id.to_string(),
                kind,
                release_time: "Recent".to_string(),
                status: InstallStatus::Available,
            },
        );
        Ok(&self.versions[0])
    }

    pub fn begin_download(&mut self, id: &str) -> Result<(), CatalogError> {
        let version = self.get_mut(id)?;
        match version.status {
            InstallStatus::Installed => Err(CatalogError::AlreadyInstalled(id.to_string())),
            InstallStatus::Downloading => Err(CatalogError::AlreadyDownloading(id.to_string())),
            InstallStatus::Available => {
                version.status = InstallStatus::Downloading;
                Ok(())
            }
        }
    }

    /// Record how a download ended: installed on `Complete`, available
    /// again otherwise.
    pub fn finish_download(
        &mut self,
        id: &str,
        outcome: OperationState,
    ) -> Result<InstallStatus, CatalogError> {
        let version = self.get_mut(id)?;
        if version.status != InstallStatus::Downloading {
            return Err(CatalogError::NotDownloading(id.to_string()));
        }
        version.status = if outcome == OperationState::Complete {
            InstallStatus::Installed
        } else {
            InstallStatus::Available
        };
        Ok(version.status)
    }

    fn get_mut(&mut self, id: &str) -> Result<&mut McVersion, CatalogError> {
        self.versions
            .iter_mut()
            .find(|v| v.id == id)
            .ok_or_else(|| CatalogError::Unknown(id.to_string()))
    }
}
