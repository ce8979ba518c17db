use anyhow::{bail, Context, Result};
use async_trait::async_trait;
use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::BufReader;
use tracing::{info, warn};

use super::connection::{write_atomically, CsvConnection};
use crate::backend::domain::models::ride::{Ride, RideStatus};
use crate::backend::storage::traits::RideStorage;

const DATE_FORMAT: &str = "%Y-%m-%d";
const TIME_FORMAT: &str = "%H:%M:%S";

/// One line of `rides.csv`
#[derive(Debug, Clone, Serialize, Deserialize)]
struct RideRecord {
    id: String,
    child_id: String,
    driver_id: String,
    ride_date: String,
    pickup_time: String,
    drop_time: Option<String>,
    pickup_address: String,
    drop_address: String,
    status: String,
}

impl RideRecord {
    fn from_domain(ride: &Ride) -> Self {
        Self {
            id: ride.id.clone(),
            child_id: ride.child_id.clone(),
            driver_id: ride.driver_id.clone(),
            ride_date: ride.ride_date.format(DATE_FORMAT).to_string(),
            pickup_time: ride.pickup_time.format(TIME_FORMAT).to_string(),
            drop_time: ride.drop_time.map(|t| t.format(TIME_FORMAT).to_string()),
            pickup_address: ride.pickup_address.clone(),
            drop_address: ride.drop_address.clone(),
            status: ride.status.as_str().to_string(),
        }
    }

    fn into_domain(self) -> Result<Ride> {
        let drop_time = match self.drop_time.as_deref().map(str::trim) {
            None | Some("") => None,
            Some(raw) => Some(
                NaiveTime::parse_from_str(raw, TIME_FORMAT)
                    .with_context(|| format!("Invalid drop_time for ride {}", self.id))?,
            ),
        };
        Ok(Ride {
            ride_date: NaiveDate::parse_from_str(&self.ride_date, DATE_FORMAT)
                .with_context(|| format!("Invalid ride_date for ride {}", self.id))?,
            pickup_time: NaiveTime::parse_from_str(&self.pickup_time, TIME_FORMAT)
                .with_context(|| format!("Invalid pickup_time for ride {}", self.id))?,
            status: self
                .status
                .parse::<RideStatus>()
                .with_context(|| format!("Invalid status for ride {}", self.id))?,
            drop_time,
            id: self.id,
            child_id: self.child_id,
            driver_id: self.driver_id,
            pickup_address: self.pickup_address,
            drop_address: self.drop_address,
        })
    }
}

/// Ride repository backed by `rides.csv`
#[derive(Clone)]
pub struct RideRepository {
    connection: CsvConnection,
}

impl RideRepository {
    pub fn new(connection: CsvConnection) -> Self {
        Self { connection }
    }

    fn read_records(&self) -> Result<Vec<RideRecord>> {
        let path = self.connection.rides_path();
        if !path.exists() {
            return Ok(Vec::new());
        }
        let file = File::open(&path).with_context(|| format!("Failed to open {}", path.display()))?;
        let mut reader = ::csv::Reader::from_reader(BufReader::new(file));

        let mut records = Vec::new();
        for result in reader.deserialize() {
            let record: RideRecord = result.with_context(|| format!("Malformed row in {}", path.display()))?;
            records.push(record);
        }
        Ok(records)
    }

    fn write_records(&self, records: &[RideRecord]) -> Result<()> {
        let mut writer = ::csv::Writer::from_writer(Vec::new());
        for record in records {
            writer.serialize(record)?;
        }
        let bytes = writer.into_inner().context("Failed to flush ride rows")?;
        write_atomically(&self.connection.rides_path(), &bytes)
    }

    fn load_rides(&self) -> Result<Vec<Ride>> {
        self.read_records()?
            .into_iter()
            .map(RideRecord::into_domain)
            .collect()
    }
}

#[async_trait]
impl RideStorage for RideRepository {
    async fn store_ride(&self, ride: &Ride) -> Result<()> {
        let _guard = self.connection.lock_for_write().await;
        let mut records = self.read_records()?;
        if records.iter().any(|r| r.id == ride.id) {
            bail!("Ride already exists: {}", ride.id);
        }
        records.push(RideRecord::from_domain(ride));
        self.write_records(&records)?;
        info!("Stored ride {} for child {}", ride.id, ride.child_id);
        Ok(())
    }

    async fn get_ride(&self, ride_id: &str) -> Result<Option<Ride>> {
        Ok(self.load_rides()?.into_iter().find(|r| r.id == ride_id))
    }

    async fn list_rides(&self) -> Result<Vec<Ride>> {
        self.load_rides()
    }

    async fn list_rides_for_driver(&self, driver_id: &str) -> Result<Vec<Ride>> {
        Ok(self
            .load_rides()?
            .into_iter()
            .filter(|r| r.driver_id == driver_id)
            .collect())
    }

    async fn list_rides_for_children(&self, child_ids: &[String]) -> Result<Vec<Ride>> {
        Ok(self
            .load_rides()?
            .into_iter()
            .filter(|r| child_ids.contains(&r.child_id))
            .collect())
    }

    async fn update_ride_status(
        &self,
        ride_id: &str,
        status: RideStatus,
        drop_time: Option<NaiveTime>,
    ) -> Result<bool> {
        let _guard = self.connection.lock_for_write().await;
        let mut records = self.read_records()?;

        let Some(record) = records.iter_mut().find(|r| r.id == ride_id) else {
            warn!("Cannot update status of unknown ride {}", ride_id);
            return Ok(false);
        };
        record.status = status.as_str().to_string();
        record.drop_time = drop_time.map(|t| t.format(TIME_FORMAT).to_string());

        self.write_records(&records)?;
        info!("Ride {} is now {}", ride_id, status);
        Ok(true)
    }
}
