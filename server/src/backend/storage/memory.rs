//! In-process storage backend.
//!
//! Holds every table behind a `tokio::sync::RwLock`. Nothing survives a
//! restart; used by tests and by `storage.backend = "memory"`.

use anyhow::{bail, Result};
use async_trait::async_trait;
use chrono::NaiveTime;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::debug;

use super::traits::{ChildStorage, Connection, ProfileStorage, RideStorage};
use crate::backend::domain::models::child::Child;
use crate::backend::domain::models::profile::{Profile, Role};
use crate::backend::domain::models::ride::{Ride, RideStatus};

#[derive(Default)]
struct Tables {
    profiles: HashMap<String, Profile>,
    children: HashMap<String, Child>,
    rides: HashMap<String, Ride>,
}

#[derive(Clone, Default)]
pub struct MemoryStore {
    tables: Arc<RwLock<Tables>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ProfileStorage for MemoryStore {
    async fn store_profile(&self, profile: &Profile) -> Result<()> {
        let mut tables = self.tables.write().await;
        if tables.profiles.contains_key(&profile.id) {
            bail!("Profile already exists: {}", profile.id);
        }
        tables.profiles.insert(profile.id.clone(), profile.clone());
        debug!("Stored profile {}", profile.id);
        Ok(())
    }

    async fn get_profile(&self, profile_id: &str) -> Result<Option<Profile>> {
        Ok(self.tables.read().await.profiles.get(profile_id).cloned())
    }

    async fn list_profiles(&self) -> Result<Vec<Profile>> {
        let mut profiles: Vec<Profile> = self.tables.read().await.profiles.values().cloned().collect();
        profiles.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(profiles)
    }

    async fn list_profiles_by_role(&self, role: Role) -> Result<Vec<Profile>> {
        let mut profiles: Vec<Profile> = self
            .tables
            .read()
            .await
            .profiles
            .values()
            .filter(|p| p.role == role)
            .cloned()
            .collect();
        profiles.sort_by(|a, b| a.full_name.cmp(&b.full_name));
        Ok(profiles)
    }
}

#[async_trait]
impl ChildStorage for MemoryStore {
    async fn store_child(&self, child: &Child) -> Result<()> {
        let mut tables = self.tables.write().await;
        if tables.children.contains_key(&child.id) {
            bail!("Child already exists: {}", child.id);
        }
        tables.children.insert(child.id.clone(), child.clone());
        debug!("Stored child {}", child.id);
        Ok(())
    }

    async fn get_child(&self, child_id: &str) -> Result<Option<Child>> {
        Ok(self.tables.read().await.children.get(child_id).cloned())
    }

    async fn list_children(&self) -> Result<Vec<Child>> {
        let mut children: Vec<Child> = self.tables.read().await.children.values().cloned().collect();
        children.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(children)
    }

    async fn list_children_for_parent(&self, parent_id: &str) -> Result<Vec<Child>> {
        let children = self.list_children().await?;
        Ok(children.into_iter().filter(|c| c.parent_id == parent_id).collect())
    }

    async fn list_children_for_driver(&self, driver_id: &str) -> Result<Vec<Child>> {
        let children = self.list_children().await?;
        Ok(children
            .into_iter()
            .filter(|c| c.assigned_driver_id.as_deref() == Some(driver_id))
            .collect())
    }

    async fn update_assigned_driver(&self, child_id: &str, driver_id: Option<&str>) -> Result<bool> {
        let mut tables = self.tables.write().await;
        match tables.children.get_mut(child_id) {
            Some(child) => {
                child.assigned_driver_id = driver_id.map(str::to_string);
                Ok(true)
            }
            None => Ok(false),
        }
    }
}

#[async_trait]
impl RideStorage for MemoryStore {
    async fn store_ride(&self, ride: &Ride) -> Result<()> {
        let mut tables = self.tables.write().await;
        if tables.rides.contains_key(&ride.id) {
            bail!("Ride already exists: {}", ride.id);
        }
        tables.rides.insert(ride.id.clone(), ride.clone());
        debug!("Stored ride {}", ride.id);
        Ok(())
    }

    async fn get_ride(&self, ride_id: &str) -> Result<Option<Ride>> {
        Ok(self.tables.read().await.rides.get(ride_id).cloned())
    }

    async fn list_rides(&self) -> Result<Vec<Ride>> {
        Ok(self.tables.read().await.rides.values().cloned().collect())
    }

    async fn list_rides_for_driver(&self, driver_id: &str) -> Result<Vec<Ride>> {
        Ok(self
            .tables
            .read()
            .await
            .rides
            .values()
            .filter(|r| r.driver_id == driver_id)
            .cloned()
            .collect())
    }

    async fn list_rides_for_children(&self, child_ids: &[String]) -> Result<Vec<Ride>> {
        Ok(self
            .tables
            .read()
            .await
            .rides
            .values()
            .filter(|r| child_ids.contains(&r.child_id))
            .cloned()
            .collect())
    }

    async fn update_ride_status(
        &self,
        ride_id: &str,
        status: RideStatus,
        drop_time: Option<NaiveTime>,
    ) -> Result<bool> {
        let mut tables = self.tables.write().await;
        match tables.rides.get_mut(ride_id) {
            Some(ride) => {
                ride.status = status;
                ride.drop_time = drop_time;
                Ok(true)
            }
            None => Ok(false),
        }
    }
}

impl Connection for MemoryStore {
    fn profile_repository(&self) -> Arc<dyn ProfileStorage> {
        Arc::new(self.clone())
    }

    fn child_repository(&self) -> Arc<dyn ChildStorage> {
        Arc::new(self.clone())
    }

    fn ride_repository(&self) -> Arc<dyn RideStorage> {
        Arc::new(self.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, Utc};

    fn child(id: &str, name: &str, parent: &str) -> Child {
        Child {
            id: id.to_string(),
            name: name.to_string(),
            age: 8,
            school_name: "Hill School".to_string(),
            pickup_address: "1 Oak St".to_string(),
            drop_address: "Hill School".to_string(),
            parent_id: parent.to_string(),
            assigned_driver_id: None,
            created_at: Utc::now(),
        }
    }

    #[tokio::test]
    async fn test_children_listed_by_name() {
        let store = MemoryStore::new();
        store.store_child(&child("c1", "Zoe", "p1")).await.unwrap();
        store.store_child(&child("c2", "Adam", "p2")).await.unwrap();

        let names: Vec<String> = store.list_children().await.unwrap().into_iter().map(|c| c.name).collect();
        assert_eq!(names, vec!["Adam", "Zoe"]);

        let mine = store.list_children_for_parent("p1").await.unwrap();
        assert_eq!(mine.len(), 1);
        assert_eq!(mine[0].id, "c1");
    }

    #[tokio::test]
    async fn test_duplicate_child_is_rejected() {
        let store = MemoryStore::new();
        store.store_child(&child("c1", "Zoe", "p1")).await.unwrap();
        assert!(store.store_child(&child("c1", "Zoe", "p1")).await.is_err());
    }

    #[tokio::test]
    async fn test_update_assigned_driver_reports_missing_child() {
        let store = MemoryStore::new();
        store.store_child(&child("c1", "Zoe", "p1")).await.unwrap();

        assert!(store.update_assigned_driver("c1", Some("d1")).await.unwrap());
        assert_eq!(store.list_children_for_driver("d1").await.unwrap().len(), 1);
        assert!(!store.update_assigned_driver("missing", Some("d1")).await.unwrap());
    }

    #[tokio::test]
    async fn test_update_ride_status() {
        let store = MemoryStore::new();
        let ride = Ride {
            id: "r1".to_string(),
            child_id: "c1".to_string(),
            driver_id: "d1".to_string(),
            ride_date: NaiveDate::from_ymd_opt(2024, 9, 2).unwrap(),
            pickup_time: NaiveTime::from_hms_opt(7, 30, 0).unwrap(),
            drop_time: None,
            pickup_address: "1 Oak St".to_string(),
            drop_address: "Hill School".to_string(),
            status: RideStatus::Scheduled,
        };
        store.store_ride(&ride).await.unwrap();

        let drop = NaiveTime::from_hms_opt(8, 5, 0);
        assert!(store.update_ride_status("r1", RideStatus::DroppedOff, drop).await.unwrap());
        let stored = store.get_ride("r1").await.unwrap().unwrap();
        assert_eq!(stored.status, RideStatus::DroppedOff);
        assert_eq!(stored.drop_time, drop);
        assert!(!store.update_ride_status("r2", RideStatus::PickedUp, None).await.unwrap());
    }
}
