//! Seeded in-memory world shared by the domain service tests.

use chrono::{Duration, NaiveDate, NaiveDateTime, NaiveTime, Utc};
use std::sync::Arc;

use super::actor::Actor;
use super::clock::FixedClock;
use super::models::child::Child;
use super::models::profile::{Profile, Role};
use super::models::ride::{Ride, RideStatus};
use crate::backend::storage::memory::MemoryStore;
use crate::backend::storage::traits::{ChildStorage, ProfileStorage, RideStorage};

pub const TODAY: (i32, u32, u32) = (2024, 9, 2);

pub fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(TODAY.0, TODAY.1, TODAY.2).unwrap()
}

pub fn at(hour: u32, minute: u32) -> NaiveTime {
    NaiveTime::from_hms_opt(hour, minute, 0).unwrap()
}

pub fn clock_at(hour: u32, minute: u32) -> Arc<FixedClock> {
    Arc::new(FixedClock(NaiveDateTime::new(today(), at(hour, minute))))
}

pub struct World {
    pub store: MemoryStore,
    pub admin: Actor,
    pub parent: Actor,
    pub other_parent: Actor,
    pub driver: Actor,
    pub other_driver: Actor,
}

impl World {
    /// Profiles a1 (admin), p1/p2 (parents), d1/d2 (drivers) and children
    /// c1 "Zoe" and c3 "Mia" of p1, c2 "Adam" of p2. Nobody is assigned.
    pub async fn seed() -> World {
        let store = MemoryStore::new();
        let profiles = [
            ("a1", "Ada Admin", Role::Admin, None, 5),
            ("p1", "Pat Parent", Role::Parent, Some("555-0101"), 4),
            ("p2", "Quinn Parent", Role::Parent, None, 3),
            ("d1", "Dana Driver", Role::Driver, Some("555-0199"), 2),
            ("d2", "Bo Driver", Role::Driver, None, 1),
        ];
        for (id, name, role, phone, age_days) in profiles {
            store
                .store_profile(&Profile {
                    id: id.to_string(),
                    full_name: name.to_string(),
                    email: format!("{}@example.com", id),
                    phone: phone.map(str::to_string),
                    role,
                    created_at: Utc::now() - Duration::days(age_days),
                })
                .await
                .unwrap();
        }
        for (id, name, parent, age_days) in [("c1", "Zoe", "p1", 3), ("c2", "Adam", "p2", 2), ("c3", "Mia", "p1", 1)] {
            store
                .store_child(&Child {
                    id: id.to_string(),
                    name: name.to_string(),
                    age: 8,
                    school_name: "Hill School".to_string(),
                    pickup_address: format!("{} Oak St", name),
                    drop_address: "Hill School".to_string(),
                    parent_id: parent.to_string(),
                    assigned_driver_id: None,
                    created_at: Utc::now() - Duration::days(age_days),
                })
                .await
                .unwrap();
        }

        World {
            store,
            admin: Actor::new("a1", Role::Admin),
            parent: Actor::new("p1", Role::Parent),
            other_parent: Actor::new("p2", Role::Parent),
            driver: Actor::new("d1", Role::Driver),
            other_driver: Actor::new("d2", Role::Driver),
        }
    }

    pub async fn add_ride(&self, id: &str, child_id: &str, driver_id: &str, date: NaiveDate, pickup: NaiveTime) -> Ride {
        self.add_ride_with_status(id, child_id, driver_id, date, pickup, RideStatus::Scheduled)
            .await
    }

    pub async fn add_ride_with_status(
        &self,
        id: &str,
        child_id: &str,
        driver_id: &str,
        date: NaiveDate,
        pickup: NaiveTime,
        status: RideStatus,
    ) -> Ride {
        let ride = Ride {
            id: id.to_string(),
            child_id: child_id.to_string(),
            driver_id: driver_id.to_string(),
            ride_date: date,
            pickup_time: pickup,
            drop_time: None,
            pickup_address: "1 Oak St".to_string(),
            drop_address: "Hill School".to_string(),
            status,
        };
        self.store.store_ride(&ride).await.unwrap();
        ride
    }

    pub fn profiles(&self) -> Arc<dyn ProfileStorage> {
        Arc::new(self.store.clone())
    }

    pub fn children(&self) -> Arc<dyn ChildStorage> {
        Arc::new(self.store.clone())
    }

    pub fn rides(&self) -> Arc<dyn RideStorage> {
        Arc::new(self.store.clone())
    }
}
