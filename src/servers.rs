//! In-memory list of multiplayer servers

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ServerError {
    #[error("Server name must not be empty")]
    EmptyName,

    #[error("Server address must not be empty")]
    EmptyAddress,

    #[error("Unknown server: {0}")]
    Unknown(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Server {
    pub id: String,
    pub name: String,
    pub ip: String,
}

impl Server {
    fn seeded(id: &str, name: &str, ip: &str) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            ip: ip.to_string(),
        }
    }

    pub fn icon_url(&self) -> String {
        format!("https://api.mcsrvstat.us/icon/{}", self.ip)
    }
}

/// Servers known to this launcher session. Nothing is persisted.
#[derive(Debug, Clone)]
pub struct ServerList {
    servers: Vec<Server>,
}

impl Default for ServerList {
    fn default() -> Self {
        Self {
            servers: vec![
                Server::seeded("1", "Hypixel Network", "mc.hypixel.net"),
                Server::seeded("2", "Wynncraft", "play.wynncraft.com"),
            ],
        }
    }
}

impl ServerList {
    pub fn iter(&self) -> impl Iterator<Item = &Server> {
        self.servers.iter()
    }

    pub fn len(&self) -> usize {
        self.servers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.servers.is_empty()
    }

    pub fn get(&self, id: &str) -> Option<&Server> {
        self.servers.iter().find(|s| s.id == id)
    }

    /// Append a server under a fresh id. Name and address are trimmed.
    pub fn add(&mut self, name: &str, ip: &str) -> Result<&Server, ServerError> {
        let name = name.trim();
        let ip = ip.trim();
        if name.is_empty() {
            return Err(ServerError::EmptyName);
        }
        if ip.is_empty() {
            return Err(ServerError::EmptyAddress);
        }

        let server = Server {
            id: uuid::Uuid::new_v4().simple().to_string(),
            name: name.to_string(),
            ip: ip.to_string(),
        };
        tracing::debug!(id = %server.id, %ip, "Server added");
        self.servers.push(server);
        Ok(&self.servers[self.servers.len() - 1])
    }

    pub fn remove(&mut self, id: &str) -> Result<Server, ServerError> {
        let index = self
            .servers
            .iter()
            .position(|s| s.id == id)
            .ok_or_else(|| ServerError::Unknown(id.to_string()))?;
        Ok(self.servers.remove(index))
    }
}
