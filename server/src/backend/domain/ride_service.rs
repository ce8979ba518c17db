//! Ride lifecycle controller.
//!
//! Drives a ride's status through the transition table in
//! [`models::ride`](super::models::ride) as its driver reports pickup and
//! drop-off, and derives the read-only ride views the dashboards show.
//!
//! ## Rules
//!
//! - Only the ride's assigned driver may report events for it
//! - An event whose source status does not match fails with
//!   `DomainError::InvalidTransition` and leaves the ride unchanged
//! - Drop-off records the local wall-clock time; on the ride's own date it
//!   is never earlier than the scheduled pickup time
//! - "Today" is the local calendar date of the injected [`Clock`]

use chrono::NaiveTime;
use std::cmp::Reverse;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{info, warn};

use super::actor::Actor;
use super::clock::Clock;
use super::commands::rides::RideTransitionResult;
use super::error::{DomainError, DomainResult};
use super::models::child::Child;
use super::models::profile::Role;
use super::models::ride::{Ride, RideDetails, RideEvent};
use crate::backend::storage::traits::{ChildStorage, ProfileStorage, RideStorage};

#[derive(Clone)]
pub struct RideService {
    profiles: Arc<dyn ProfileStorage>,
    children: Arc<dyn ChildStorage>,
    rides: Arc<dyn RideStorage>,
    clock: Arc<dyn Clock>,
}

impl RideService {
    pub fn new(
        profiles: Arc<dyn ProfileStorage>,
        children: Arc<dyn ChildStorage>,
        rides: Arc<dyn RideStorage>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            profiles,
            children,
            rides,
            clock,
        }
    }

    /// scheduled -> picked_up
    pub async fn mark_picked_up(&self, actor: &Actor, ride_id: &str) -> DomainResult<RideTransitionResult> {
        self.advance(actor, ride_id, RideEvent::PickUp).await
    }

    /// picked_up -> dropped_off, stamping the drop time
    pub async fn mark_dropped_off(&self, actor: &Actor, ride_id: &str) -> DomainResult<RideTransitionResult> {
        self.advance(actor, ride_id, RideEvent::DropOff).await
    }

    async fn advance(&self, actor: &Actor, ride_id: &str, event: RideEvent) -> DomainResult<RideTransitionResult> {
        info!("Driver {} reports {} for ride {}", actor.id, event, ride_id);
        actor.require_role(Role::Driver)?;

        let mut ride = self
            .rides
            .get_ride(ride_id)
            .await?
            .ok_or_else(|| DomainError::not_found(format!("Ride not found: {}", ride_id)))?;

        if ride.driver_id != actor.id {
            warn!("Driver {} tried to update ride {} of driver {}", actor.id, ride_id, ride.driver_id);
            return Err(DomainError::forbidden(format!(
                "Ride {} is not assigned to you",
                ride_id
            )));
        }

        let next = ride
            .status
            .apply(event)
            .map_err(|illegal| DomainError::invalid_transition(ride_id, illegal))?;

        let drop_time = match event {
            RideEvent::DropOff => Some(self.drop_time_for(&ride)),
            RideEvent::PickUp => ride.drop_time,
        };

        if !self.rides.update_ride_status(ride_id, next, drop_time).await? {
            return Err(DomainError::not_found(format!("Ride not found: {}", ride_id)));
        }

        ride.status = next;
        ride.drop_time = drop_time;
        info!("Ride {} is now {}", ride_id, next);

        Ok(RideTransitionResult {
            success_message: format!("Ride status updated to {}", next.label()),
            ride,
        })
    }

    fn drop_time_for(&self, ride: &Ride) -> NaiveTime {
        let now = self.clock.now();
        // the clamp only applies to rides finished on their own date
        if now.date() == ride.ride_date && now.time() < ride.pickup_time {
            warn!(
                "Clock reads {} before pickup time {} of ride {}, recording pickup time",
                now.time(),
                ride.pickup_time,
                ride.id
            );
            ride.pickup_time
        } else {
            now.time()
        }
    }

    /// Rides of `driver_id` dated today, earliest pickup first.
    pub async fn todays_rides(&self, actor: &Actor, driver_id: &str) -> DomainResult<Vec<RideDetails>> {
        actor.require_self_or_admin(Role::Driver, driver_id)?;
        let today = self.clock.today();

        let mut rides: Vec<Ride> = self
            .rides
            .list_rides_for_driver(driver_id)
            .await?
            .into_iter()
            .filter(|r| r.ride_date == today)
            .collect();
        rides.sort_by_key(|r| r.pickup_time);

        self.with_details(rides).await
    }

    /// Every ride of `driver_id`, most recent date first.
    pub async fn ride_history(&self, actor: &Actor, driver_id: &str) -> DomainResult<Vec<RideDetails>> {
        actor.require_self_or_admin(Role::Driver, driver_id)?;
        let mut rides = self.rides.list_rides_for_driver(driver_id).await?;
        sort_most_recent_first(&mut rides);
        self.with_details(rides).await
    }

    /// Number of rides of the parent's children dated today or later.
    pub async fn upcoming_count(&self, actor: &Actor, parent_id: &str) -> DomainResult<usize> {
        actor.require_self_or_admin(Role::Parent, parent_id)?;
        let today = self.clock.today();
        let rides = self.rides_for_parent(parent_id).await?;
        Ok(rides.iter().filter(|r| r.ride_date >= today).count())
    }

    /// Every ride of the parent's children, most recent date first.
    pub async fn parent_rides(&self, actor: &Actor, parent_id: &str) -> DomainResult<Vec<RideDetails>> {
        actor.require_self_or_admin(Role::Parent, parent_id)?;
        let mut rides = self.rides_for_parent(parent_id).await?;
        sort_most_recent_first(&mut rides);
        self.with_details(rides).await
    }

    /// Every ride in the system, most recent date first. Admin only.
    pub async fn recent_rides(&self, actor: &Actor) -> DomainResult<Vec<RideDetails>> {
        actor.require_role(Role::Admin)?;
        let mut rides = self.rides.list_rides().await?;
        sort_most_recent_first(&mut rides);
        self.with_details(rides).await
    }

    async fn rides_for_parent(&self, parent_id: &str) -> DomainResult<Vec<Ride>> {
        let child_ids: Vec<String> = self
            .children
            .list_children_for_parent(parent_id)
            .await?
            .into_iter()
            .map(|c| c.id)
            .collect();
        if child_ids.is_empty() {
            return Ok(Vec::new());
        }
        Ok(self.rides.list_rides_for_children(&child_ids).await?)
    }

    async fn with_details(&self, rides: Vec<Ride>) -> DomainResult<Vec<RideDetails>> {
        if rides.is_empty() {
            return Ok(Vec::new());
        }
        let children: HashMap<String, Child> = self
            .children
            .list_children()
            .await?
            .into_iter()
            .map(|c| (c.id.clone(), c))
            .collect();
        let drivers: HashMap<String, String> = self
            .profiles
            .list_profiles_by_role(Role::Driver)
            .await?
            .into_iter()
            .map(|p| (p.id, p.full_name))
            .collect();

        Ok(rides
            .into_iter()
            .map(|ride| {
                let child = children.get(&ride.child_id);
                RideDetails {
                    child_name: child.map(|c| c.name.clone()),
                    school_name: child.map(|c| c.school_name.clone()),
                    driver_name: drivers.get(&ride.driver_id).cloned(),
                    ride,
                }
            })
            .collect())
    }
}

fn sort_most_recent_first(rides: &mut [Ride]) {
    rides.sort_by_key(|r| Reverse((r.ride_date, r.pickup_time)));
}
