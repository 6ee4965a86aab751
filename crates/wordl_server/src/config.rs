//! Server configuration.

use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;
use wordl_core::SyncConfig;

/// Where the primary stores keep their records.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StorageMode {
    /// Records live in process memory and vanish on shutdown.
    Memory,
    /// Records live in a SQLite database file.
    Sqlite(PathBuf),
}

/// Configuration for the admin server.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Address to bind to.
    pub bind_addr: SocketAddr,
    /// Primary store backend.
    pub storage: StorageMode,
    /// Write-through settings shared by every record type.
    pub sync: SyncConfig,
    /// Prefix of the alert headers, e.g. `wordlApp` in `X-wordlApp-alert`.
    pub application_name: String,
}

impl ServerConfig {
    /// Creates a new server configuration.
    pub fn new(bind_addr: SocketAddr) -> Self {
        Self {
            bind_addr,
            storage: StorageMode::Memory,
            sync: SyncConfig::default(),
            application_name: "wordlApp".to_string(),
        }
    }

    /// Sets the storage backend.
    pub fn with_storage(mut self, storage: StorageMode) -> Self {
        self.storage = storage;
        self
    }

    /// Stores records in a SQLite file.
    pub fn with_sqlite(self, path: impl Into<PathBuf>) -> Self {
        self.with_storage(StorageMode::Sqlite(path.into()))
    }

    /// Sets the search index timeout.
    pub fn with_index_timeout(mut self, timeout: Duration) -> Self {
        self.sync = self.sync.index_timeout(timeout);
        self
    }

    /// Sets the alert header prefix.
    pub fn with_application_name(mut self, name: impl Into<String>) -> Self {
        self.application_name = name.into();
        self
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self::new(SocketAddr::from(([127, 0, 0, 1], 8080)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config() {
        let config = ServerConfig::default();
        assert_eq!(config.storage, StorageMode::Memory);
        assert_eq!(config.application_name, "wordlApp");
        assert_eq!(config.sync.index_timeout, Duration::from_secs(5));
    }

    #[test]
    fn config_builder() {
        let config = ServerConfig::new("0.0.0.0:9000".parse().unwrap())
            .with_sqlite("/tmp/wordl.db")
            .with_index_timeout(Duration::from_millis(300))
            .with_application_name("otherApp");

        assert_eq!(config.bind_addr.port(), 9000);
        assert_eq!(config.storage, StorageMode::Sqlite("/tmp/wordl.db".into()));
        assert_eq!(config.sync.index_timeout, Duration::from_millis(300));
        assert_eq!(config.application_name, "otherApp");
    }
}
