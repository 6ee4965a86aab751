//! Serve command implementation.

use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;
use tracing::info;
use wordl_server::{ServerConfig, StorageMode};

/// Builds the server configuration from command-line flags.
pub fn config(bind: SocketAddr, db: Option<PathBuf>, index_timeout_ms: u64) -> ServerConfig {
    let storage = match db {
        Some(path) => StorageMode::Sqlite(path),
        None => StorageMode::Memory,
    };
    ServerConfig::new(bind)
        .with_storage(storage)
        .with_index_timeout(Duration::from_millis(index_timeout_ms))
}

/// Runs the serve command.
pub async fn run(
    bind: SocketAddr,
    db: Option<PathBuf>,
    index_timeout_ms: u64,
) -> Result<(), Box<dyn std::error::Error>> {
    let config = config(bind, db, index_timeout_ms);
    info!(
        bind = %config.bind_addr,
        storage = ?config.storage,
        index_timeout = ?config.sync.index_timeout,
        "starting wordl admin API"
    );
    wordl_server::serve(config).await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flags_to_config() {
        let bind: SocketAddr = "0.0.0.0:9000".parse().unwrap();
        let config = config(bind, Some("wordl.db".into()), 250);
        assert_eq!(config.bind_addr, bind);
        assert_eq!(config.storage, StorageMode::Sqlite("wordl.db".into()));
        assert_eq!(config.sync.index_timeout, Duration::from_millis(250));

        let config = super::config(bind, None, 5000);
        assert_eq!(config.storage, StorageMode::Memory);
    }
}
