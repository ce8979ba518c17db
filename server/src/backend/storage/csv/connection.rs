use anyhow::{Context, Result};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::sync::{Mutex, MutexGuard};
use tracing::{debug, info};

use super::{ChildRepository, ProfileRepository, RideRepository};
use crate::backend::storage::traits::{ChildStorage, Connection, ProfileStorage, RideStorage};

const PROFILES_FILE: &str = "profiles.yaml";
const CHILDREN_FILE: &str = "children.yaml";
const RIDES_FILE: &str = "rides.csv";

/// CsvConnection owns the data directory and serializes writers.
#[derive(Clone)]
pub struct CsvConnection {
    base_directory: PathBuf,
    write_lock: Arc<Mutex<()>>,
}

impl CsvConnection {
    /// Create a new connection rooted at `base_directory`, creating it if needed
    pub fn new<P: AsRef<Path>>(base_directory: P) -> Result<Self> {
        let base_path = base_directory.as_ref().to_path_buf();

        if !base_path.exists() {
            fs::create_dir_all(&base_path)
                .with_context(|| format!("Failed to create data directory {}", base_path.display()))?;
            info!("Created data directory: {}", base_path.display());
        }

        Ok(Self {
            base_directory: base_path,
            write_lock: Arc::new(Mutex::new(())),
        })
    }

    pub fn base_directory(&self) -> &Path {
        &self.base_directory
    }

    pub fn profiles_path(&self) -> PathBuf {
        self.base_directory.join(PROFILES_FILE)
    }

    pub fn children_path(&self) -> PathBuf {
        self.base_directory.join(CHILDREN_FILE)
    }

    pub fn rides_path(&self) -> PathBuf {
        self.base_directory.join(RIDES_FILE)
    }

    /// Held for the whole of a read-modify-write cycle.
    pub async fn lock_for_write(&self) -> MutexGuard<'_, ()> {
        self.write_lock.lock().await
    }

    /// Read a YAML sequence; a missing file is an empty sequence.
    pub fn read_yaml_list<T: DeserializeOwned>(&self, path: &Path) -> Result<Vec<T>> {
        if !path.exists() {
            debug!("{} does not exist yet, treating as empty", path.display());
            return Ok(Vec::new());
        }
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        if content.trim().is_empty() {
            return Ok(Vec::new());
        }
        serde_yaml::from_str(&content).with_context(|| format!("Failed to parse {}", path.display()))
    }

    /// Replace a YAML sequence atomically.
    pub fn write_yaml_list<T: Serialize>(&self, path: &Path, items: &[T]) -> Result<()> {
        let content = serde_yaml::to_string(items)?;
        write_atomically(path, content.as_bytes())
    }
}

/// Write through a temp file and rename it over the target.
pub(crate) fn write_atomically(path: &Path, bytes: &[u8]) -> Result<()> {
    let temp_path = path.with_extension("tmp");
    fs::write(&temp_path, bytes)
        .with_context(|| format!("Failed to write {}", temp_path.display()))?;
    fs::rename(&temp_path, path)
        .with_context(|| format!("Failed to move {} into place", temp_path.display()))?;
    Ok(())
}

impl Connection for CsvConnection {
    fn profile_repository(&self) -> Arc<dyn ProfileStorage> {
        Arc::new(ProfileRepository::new(self.clone()))
    }

    fn child_repository(&self) -> Arc<dyn ChildStorage> {
        Arc::new(ChildRepository::new(self.clone()))
    }

    fn ride_repository(&self) -> Arc<dyn RideStorage> {
        Arc::new(RideRepository::new(self.clone()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_new_creates_missing_directory() {
        let temp_dir = tempdir().unwrap();
        let nested = temp_dir.path().join("a").join("b");
        let connection = CsvConnection::new(&nested).unwrap();
        assert!(nested.is_dir());
        assert_eq!(connection.rides_path(), nested.join("rides.csv"));
    }

    #[test]
    fn test_yaml_list_round_trip_and_missing_file() {
        let temp_dir = tempdir().unwrap();
        let connection = CsvConnection::new(temp_dir.path()).unwrap();
        let path = connection.children_path();

        let empty: Vec<String> = connection.read_yaml_list(&path).unwrap();
        assert!(empty.is_empty());

        connection
            .write_yaml_list(&path, &["a".to_string(), "b".to_string()])
            .unwrap();
        let back: Vec<String> = connection.read_yaml_list(&path).unwrap();
        assert_eq!(back, vec!["a", "b"]);
        assert!(!path.with_extension("tmp").exists());
    }
}
