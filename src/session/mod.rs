//! Player session and the parameters a launch needs from it

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::config::JavaConfig;
use crate::operation::Parameters;

pub const OFFLINE_USERNAME: &str = "Steve_Sheihu";
pub const OFFLINE_UUID: &str = "069a79f4-44e9-4726-a5be-fca90e38aaf5";
pub const GUEST_USERNAME: &str = "Guest";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub username: String,
    pub uuid: String,
    pub logged_in: bool,
}

impl Session {
    /// The simulated signed-in profile. No account service is contacted.
    pub fn offline() -> Self {
        Self::offline_as(OFFLINE_USERNAME)
    }

    pub fn offline_as(username: &str) -> Self {
        Self {
            username: username.to_string(),
            uuid: OFFLINE_UUID.to_string(),
            logged_in: true,
        }
    }

    pub fn signed_out() -> Self {
        Self {
            username: GUEST_USERNAME.to_string(),
            uuid: String::new(),
            logged_in: false,
        }
    }

    pub fn skin_url(&self) -> String {
        format!("https://mc-heads.net/avatar/{}/64", self.username)
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LaunchError {
    #[error("Not signed in; sign in before launching")]
    SignedOut,

    #[error("No version selected")]
    NoVersion,
}

/// Everything a launch sequence interpolates into its console lines.
///
/// Values are passed through untouched; the tracker inserts them verbatim.
pub struct LaunchRequest<'a> {
    pub version: &'a str,
    pub java: &'a JavaConfig,
    pub session: &'a Session,
}

impl LaunchRequest<'_> {
    pub fn parameters(&self) -> Result<Parameters, LaunchError> {
        if !self.session.logged_in {
            return Err(LaunchError::SignedOut);
        }
        if self.version.trim().is_empty() {
            return Err(LaunchError::NoVersion);
        }

        let mut params = Parameters::new();
        params.insert("version".to_string(), self.version.to_string());
        params.insert("maxRam".to_string(), self.java.max_ram.clone());
        params.insert("minRam".to_string(), self.java.min_ram.clone());
        params.insert("jvmArgs".to_string(), self.java.jvm_args.clone());
        params.insert("javaPath".to_string(), self.java.java_path.clone());
        params.insert("username".to_string(), self.session.username.clone());
        params.insert("uuid".to_string(), self.session.uuid.clone());
        Ok(params)
    }
}

/// Parameters for downloading a version.
pub fn download_parameters(version_id: &str) -> Parameters {
    let mut params = Parameters::new();
    params.insert("id".to_string(), version_id.to_string());
    params
}
