//! School-transport coordination server.
//!
//! Admins assign drivers to children, drivers report pickup and drop-off,
//! parents follow their children's rides.

pub mod backend;
pub mod config;
pub mod logging;

use std::sync::Arc;

use anyhow::{Context, Result};
use axum::serve;
use tokio::net::TcpListener;
use tracing::info;

use crate::backend::domain::LocalClock;
use crate::backend::storage::{Connection, CsvConnection, MemoryStore};
use crate::backend::{create_router, initialize_backend};
use crate::config::{Config, StorageBackend};

/// Open the configured store.
pub fn open_connection(config: &Config) -> Result<Arc<dyn Connection>> {
    match config.storage.backend {
        StorageBackend::Memory => {
            info!("Using in-memory storage; data is lost on restart");
            Ok(Arc::new(MemoryStore::new()))
        }
        StorageBackend::File => {
            let directory = config.data_directory();
            info!("Using file storage in {}", directory.display());
            let connection = CsvConnection::new(&directory)
                .with_context(|| format!("Failed to open data directory {}", directory.display()))?;
            Ok(Arc::new(connection))
        }
    }
}

/// Build the application and serve it until the listener fails.
pub async fn run(config: Config) -> Result<()> {
    let connection = open_connection(&config)?;
    let app_state = initialize_backend(connection.as_ref(), Arc::new(LocalClock), config.dashboard_limits());
    let router = create_router(app_state, &config.server.cors_origin)?;

    let addr = config.bind_address();
    let listener = TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;
    info!("Listening on {}", addr);

    serve(listener, router).await.context("Server error")?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::storage::{ProfileStorage, RideStorage};
    use crate::config::StorageConfig;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_open_file_connection_creates_directory() {
        let dir = TempDir::new().unwrap();
        let data = dir.path().join("rides-data");
        let config = Config {
            storage: StorageConfig {
                backend: StorageBackend::File,
                data_directory: Some(data.clone()),
            },
            ..Config::default()
        };

        let connection = open_connection(&config).unwrap();
        assert!(data.is_dir());
        assert!(connection.ride_repository().list_rides().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_open_memory_connection() {
        let config = Config {
            storage: StorageConfig {
                backend: StorageBackend::Memory,
                data_directory: None,
            },
            ..Config::default()
        };
        let connection = open_connection(&config).unwrap();
        assert!(connection.profile_repository().list_profiles().await.unwrap().is_empty());
    }
}
