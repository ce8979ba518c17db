/// Test utilities module for automatic cleanup and consistent test infrastructure
///
/// This module provides RAII-based cleanup that guarantees test data is removed
/// even if tests panic or fail.
use anyhow::Result;
use chrono::{NaiveDate, NaiveTime, Utc};
use tempfile::TempDir;

use super::connection::CsvConnection;
use crate::backend::domain::models::child::Child;
use crate::backend::domain::models::ride::{Ride, RideStatus};

/// Test environment that provides a temporary directory and connection
/// that will be automatically cleaned up when the environment is dropped.
pub struct TestEnvironment {
    pub connection: CsvConnection,
    _temp_dir: TempDir, // Keep alive to prevent cleanup
}

impl TestEnvironment {
    pub fn new() -> Result<Self> {
        let temp_dir = TempDir::new()?;
        let connection = CsvConnection::new(temp_dir.path())?;
        Ok(Self {
            connection,
            _temp_dir: temp_dir,
        })
    }
}

pub fn sample_child(id: &str, name: &str, parent_id: &str) -> Child {
    Child {
        id: id.to_string(),
        name: name.to_string(),
        age: 9,
        school_name: "Hill School".to_string(),
        pickup_address: "1 Oak St".to_string(),
        drop_address: "Hill School".to_string(),
        parent_id: parent_id.to_string(),
        assigned_driver_id: None,
        created_at: Utc::now(),
    }
}

pub fn sample_ride(id: &str, child_id: &str, driver_id: &str, date: &str, pickup: &str) -> Ride {
    Ride {
        id: id.to_string(),
        child_id: child_id.to_string(),
        driver_id: driver_id.to_string(),
        ride_date: NaiveDate::parse_from_str(date, "%Y-%m-%d").expect("valid test date"),
        pickup_time: NaiveTime::parse_from_str(pickup, "%H:%M:%S").expect("valid test time"),
        drop_time: None,
        pickup_address: "1 Oak St".to_string(),
        drop_address: "Hill School".to_string(),
        status: RideStatus::Scheduled,
    }
}
