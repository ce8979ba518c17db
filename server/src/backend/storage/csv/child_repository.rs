use anyhow::{bail, Context, Result};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use super::connection::CsvConnection;
use crate::backend::domain::models::child::Child;
use crate::backend::storage::traits::ChildStorage;

/// Intermediate struct for YAML serialization with a string timestamp
#[derive(Debug, Clone, Serialize, Deserialize)]
struct YamlChild {
    id: String,
    name: String,
    age: u8,
    school_name: String,
    pickup_address: String,
    drop_address: String,
    parent_id: String,
    #[serde(default)]
    assigned_driver_id: Option<String>,
    created_at: String,
}

impl YamlChild {
    fn from_domain(child: &Child) -> Self {
        Self {
            id: child.id.clone(),
            name: child.name.clone(),
            age: child.age,
            school_name: child.school_name.clone(),
            pickup_address: child.pickup_address.clone(),
            drop_address: child.drop_address.clone(),
            parent_id: child.parent_id.clone(),
            assigned_driver_id: child.assigned_driver_id.clone(),
            created_at: child.created_at.to_rfc3339(),
        }
    }

    fn into_domain(self) -> Result<Child> {
        Ok(Child {
            created_at: DateTime::parse_from_rfc3339(&self.created_at)
                .with_context(|| format!("Failed to parse created_at for child {}", self.id))?
                .with_timezone(&Utc),
            id: self.id,
            name: self.name,
            age: self.age,
            school_name: self.school_name,
            pickup_address: self.pickup_address,
            drop_address: self.drop_address,
            parent_id: self.parent_id,
            assigned_driver_id: self.assigned_driver_id,
        })
    }
}

/// Child repository backed by `children.yaml`
#[derive(Clone)]
pub struct ChildRepository {
    connection: CsvConnection,
}

impl ChildRepository {
    pub fn new(connection: CsvConnection) -> Self {
        Self { connection }
    }

    fn load_children(&self) -> Result<Vec<Child>> {
        let records: Vec<YamlChild> = self.connection.read_yaml_list(&self.connection.children_path())?;
        let mut children = records
            .into_iter()
            .map(YamlChild::into_domain)
            .collect::<Result<Vec<_>>>()?;
        children.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(children)
    }
}

#[async_trait]
impl ChildStorage for ChildRepository {
    async fn store_child(&self, child: &Child) -> Result<()> {
        let _guard = self.connection.lock_for_write().await;
        let path = self.connection.children_path();
        let mut records: Vec<YamlChild> = self.connection.read_yaml_list(&path)?;
        if records.iter().any(|r| r.id == child.id) {
            bail!("Child already exists: {}", child.id);
        }
        records.push(YamlChild::from_domain(child));
        self.connection.write_yaml_list(&path, &records)?;
        info!("Stored child {} for parent {}", child.id, child.parent_id);
        Ok(())
    }

    async fn get_child(&self, child_id: &str) -> Result<Option<Child>> {
        Ok(self.load_children()?.into_iter().find(|c| c.id == child_id))
    }

    async fn list_children(&self) -> Result<Vec<Child>> {
        self.load_children()
    }

    async fn list_children_for_parent(&self, parent_id: &str) -> Result<Vec<Child>> {
        Ok(self
            .load_children()?
            .into_iter()
            .filter(|c| c.parent_id == parent_id)
            .collect())
    }

    async fn list_children_for_driver(&self, driver_id: &str) -> Result<Vec<Child>> {
        Ok(self
            .load_children()?
            .into_iter()
            .filter(|c| c.assigned_driver_id.as_deref() == Some(driver_id))
            .collect())
    }

    async fn update_assigned_driver(&self, child_id: &str, driver_id: Option<&str>) -> Result<bool> {
        let _guard = self.connection.lock_for_write().await;
        let path = self.connection.children_path();
        let mut records: Vec<YamlChild> = self.connection.read_yaml_list(&path)?;

        let Some(record) = records.iter_mut().find(|r| r.id == child_id) else {
            warn!("Cannot update driver of unknown child {}", child_id);
            return Ok(false);
        };
        record.assigned_driver_id = driver_id.map(str::to_string);

        self.connection.write_yaml_list(&path, &records)?;
        info!("Child {} assigned driver is now {:?}", child_id, driver_id);
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::storage::csv::test_utils::{sample_child, TestEnvironment};

    #[tokio::test]
    async fn test_store_and_list_children() {
        let env = TestEnvironment::new().unwrap();
        let repo = ChildRepository::new(env.connection.clone());

        repo.store_child(&sample_child("c1", "Zoe", "p1")).await.unwrap();
        repo.store_child(&sample_child("c2", "Adam", "p2")).await.unwrap();

        let children = repo.list_children().await.unwrap();
        assert_eq!(children.len(), 2);
        assert_eq!(children[0].name, "Adam");
        assert_eq!(children[1].name, "Zoe");

        let for_parent = repo.list_children_for_parent("p1").await.unwrap();
        assert_eq!(for_parent.len(), 1);
        assert_eq!(for_parent[0].id, "c1");
    }

    #[tokio::test]
    async fn test_assign_and_unassign_persist() {
        let env = TestEnvironment::new().unwrap();
        let repo = ChildRepository::new(env.connection.clone());
        repo.store_child(&sample_child("c1", "Zoe", "p1")).await.unwrap();

        assert!(repo.update_assigned_driver("c1", Some("d1")).await.unwrap());
        // a second repository on the same directory sees the write
        let other = ChildRepository::new(env.connection.clone());
        let child = other.get_child("c1").await.unwrap().unwrap();
        assert_eq!(child.assigned_driver_id.as_deref(), Some("d1"));
        assert_eq!(other.list_children_for_driver("d1").await.unwrap().len(), 1);

        assert!(repo.update_assigned_driver("c1", None).await.unwrap());
        let child = repo.get_child("c1").await.unwrap().unwrap();
        assert_eq!(child.assigned_driver_id, None);
    }

    #[tokio::test]
    async fn test_update_unknown_child() {
        let env = TestEnvironment::new().unwrap();
        let repo = ChildRepository::new(env.connection.clone());
        assert!(!repo.update_assigned_driver("missing", Some("d1")).await.unwrap());
    }

    #[tokio::test]
    async fn test_corrupt_file_is_an_error() {
        let env = TestEnvironment::new().unwrap();
        std::fs::write(env.connection.children_path(), "- id: [unterminated").unwrap();
        let repo = ChildRepository::new(env.connection.clone());
        assert!(repo.list_children().await.is_err());
    }
}
