//! Domain model for a ride and its status lifecycle.
//!
//! A ride moves along a single forward path:
//!
//! ```text
//! scheduled --pick_up--> picked_up --drop_off--> dropped_off
//! ```
//!
//! `cancelled` is a terminal value set outside this workflow; no event leads
//! into or out of it.

use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RideStatus {
    Scheduled,
    PickedUp,
    DroppedOff,
    Cancelled,
}

impl RideStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            RideStatus::Scheduled => "scheduled",
            RideStatus::PickedUp => "picked_up",
            RideStatus::DroppedOff => "dropped_off",
            RideStatus::Cancelled => "cancelled",
        }
    }

    /// Human-readable label, e.g. "picked up"
    pub fn label(&self) -> String {
        self.as_str().replace('_', " ")
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, RideStatus::DroppedOff | RideStatus::Cancelled)
    }

    /// Apply a driver event, returning the next status.
    ///
    /// Fails when the transition table has no row for `(self, event)`.
    pub fn apply(self, event: RideEvent) -> Result<RideStatus, IllegalTransition> {
        TRANSITIONS
            .iter()
            .find(|(from, on, _)| *from == self && *on == event)
            .map(|(_, _, to)| *to)
            .ok_or(IllegalTransition { from: self, event })
    }
}

impl fmt::Display for RideStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RideStatus {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "scheduled" => Ok(RideStatus::Scheduled),
            "picked_up" => Ok(RideStatus::PickedUp),
            "dropped_off" => Ok(RideStatus::DroppedOff),
            "cancelled" => Ok(RideStatus::Cancelled),
            other => Err(anyhow::anyhow!("Unknown ride status: {}", other)),
        }
    }
}

/// Events a driver reports during a ride.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RideEvent {
    PickUp,
    DropOff,
}

impl RideEvent {
    /// Status a ride must be in for this event to apply.
    pub fn expected_source(&self) -> RideStatus {
        match self {
            RideEvent::PickUp => RideStatus::Scheduled,
            RideEvent::DropOff => RideStatus::PickedUp,
        }
    }
}

impl fmt::Display for RideEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RideEvent::PickUp => f.write_str("pick_up"),
            RideEvent::DropOff => f.write_str("drop_off"),
        }
    }
}

/// `(from, event, to)` rows; anything not listed is rejected.
pub const TRANSITIONS: &[(RideStatus, RideEvent, RideStatus)] = &[
    (RideStatus::Scheduled, RideEvent::PickUp, RideStatus::PickedUp),
    (RideStatus::PickedUp, RideEvent::DropOff, RideStatus::DroppedOff),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("cannot apply {event} to a ride that is {from}")]
pub struct IllegalTransition {
    pub from: RideStatus,
    pub event: RideEvent,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ride {
    pub id: String,
    pub child_id: String,
    pub driver_id: String,
    pub ride_date: NaiveDate,
    pub pickup_time: NaiveTime,
    pub drop_time: Option<NaiveTime>,
    pub pickup_address: String,
    pub drop_address: String,
    pub status: RideStatus,
}

impl Ride {
    pub fn generate_id() -> String {
        format!("ride::{}", Uuid::new_v4().simple())
    }
}

/// A ride with the child, school and driver names resolved.
#[derive(Debug, Clone, PartialEq)]
pub struct RideDetails {
    pub ride: Ride,
    pub child_name: Option<String>,
    pub school_name: Option<String>,
    pub driver_name: Option<String>,
}
