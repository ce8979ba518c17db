//! Role-specific landing views.
//!
//! Each dashboard is assembled from the other services, so the same guards
//! and orderings apply. "Recent" lists are prefixes of the full ordered
//! views, sized by [`DashboardLimits`].

use tracing::info;

use super::actor::Actor;
use super::assignment_service::AssignmentService;
use super::child_service::ChildService;
use super::error::DomainResult;
use super::models::child::{AssignedChildView, Child, ChildAssignmentView};
use super::models::profile::{Profile, Role};
use super::models::ride::RideDetails;
use super::profile_service::ProfileService;
use super::ride_service::RideService;

/// Prefix sizes of the "recent" lists.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DashboardLimits {
    pub parent_recent_rides: usize,
    pub driver_recent_rides: usize,
    pub admin_recent: usize,
}

impl Default for DashboardLimits {
    fn default() -> Self {
        Self {
            parent_recent_rides: 5,
            driver_recent_rides: 5,
            admin_recent: 10,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ParentDashboardView {
    pub total_children: usize,
    pub total_rides: usize,
    pub upcoming_rides: usize,
    pub children: Vec<Child>,
    pub recent_rides: Vec<RideDetails>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DriverDashboardView {
    pub assigned_children: Vec<AssignedChildView>,
    pub total_rides: usize,
    pub todays_rides: Vec<RideDetails>,
    pub recent_rides: Vec<RideDetails>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AdminStatsView {
    pub total_users: usize,
    pub total_children: usize,
    pub total_rides: usize,
    /// Every driver-role profile.
    pub active_drivers: usize,
}

#[derive(Debug, Clone, PartialEq)]
pub struct AdminDashboardView {
    pub stats: AdminStatsView,
    pub recent_users: Vec<Profile>,
    pub recent_children: Vec<ChildAssignmentView>,
    pub recent_rides: Vec<RideDetails>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum DashboardView {
    Parent(ParentDashboardView),
    Driver(DriverDashboardView),
    Admin(AdminDashboardView),
}

#[derive(Clone)]
pub struct DashboardService {
    profile_service: ProfileService,
    child_service: ChildService,
    assignment_service: AssignmentService,
    ride_service: RideService,
    limits: DashboardLimits,
}

impl DashboardService {
    pub fn new(
        profile_service: ProfileService,
        child_service: ChildService,
        assignment_service: AssignmentService,
        ride_service: RideService,
        limits: DashboardLimits,
    ) -> Self {
        Self {
            profile_service,
            child_service,
            assignment_service,
            ride_service,
            limits,
        }
    }

    /// The dashboard matching the actor's role.
    pub async fn dashboard(&self, actor: &Actor) -> DomainResult<DashboardView> {
        info!("Building {} dashboard for {}", actor.role, actor.id);
        match actor.role {
            Role::Parent => self.parent_dashboard(actor).await.map(DashboardView::Parent),
            Role::Driver => self.driver_dashboard(actor).await.map(DashboardView::Driver),
            Role::Admin => self.admin_dashboard(actor).await.map(DashboardView::Admin),
        }
    }

    async fn parent_dashboard(&self, actor: &Actor) -> DomainResult<ParentDashboardView> {
        let children = self.child_service.children_for_parent(actor, &actor.id).await?;
        let mut rides = self.ride_service.parent_rides(actor, &actor.id).await?;
        let upcoming_rides = self.ride_service.upcoming_count(actor, &actor.id).await?;

        let total_rides = rides.len();
        rides.truncate(self.limits.parent_recent_rides);

        Ok(ParentDashboardView {
            total_children: children.len(),
            total_rides,
            upcoming_rides,
            children,
            recent_rides: rides,
        })
    }

    async fn driver_dashboard(&self, actor: &Actor) -> DomainResult<DriverDashboardView> {
        let assigned_children = self.child_service.assigned_children(actor, &actor.id).await?;
        let mut rides = self.ride_service.ride_history(actor, &actor.id).await?;
        let todays_rides = self.ride_service.todays_rides(actor, &actor.id).await?;

        let total_rides = rides.len();
        rides.truncate(self.limits.driver_recent_rides);

        Ok(DriverDashboardView {
            assigned_children,
            total_rides,
            todays_rides,
            recent_rides: rides,
        })
    }

    async fn admin_dashboard(&self, actor: &Actor) -> DomainResult<AdminDashboardView> {
        let limit = self.limits.admin_recent;

        let mut users = self.profile_service.list_profiles(actor).await?;
        let mut children = self.assignment_service.list_children(actor).await?;
        let mut rides = self.ride_service.recent_rides(actor).await?;
        let total_rides = rides.len();

        let active_drivers = self.assignment_service.list_eligible_drivers(actor).await?.len();

        let stats = AdminStatsView {
            total_users: users.len(),
            total_children: children.len(),
            total_rides,
            active_drivers,
        };

        children.sort_by(|a, b| b.child.created_at.cmp(&a.child.created_at));
        users.truncate(limit);
        children.truncate(limit);
        rides.truncate(limit);

        Ok(AdminDashboardView {
            stats,
            recent_users: users,
            recent_children: children,
            recent_rides: rides,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::domain::test_support::{at, clock_at, today, World};
    use crate::backend::storage::traits::ChildStorage;
    use chrono::Duration;

    fn service(world: &World, limits: DashboardLimits) -> DashboardService {
        let rides = RideService::new(world.profiles(), world.children(), world.rides(), clock_at(9, 0));
        DashboardService::new(
            ProfileService::new(world.profiles()),
            ChildService::new(world.profiles(), world.children()),
            AssignmentService::new(world.profiles(), world.children()),
            rides,
            limits,
        )
    }

    async fn seed_rides(world: &World) {
        world.add_ride("r1", "c1", "d1", today() - Duration::days(2), at(7, 30)).await;
        world.add_ride("r2", "c1", "d1", today(), at(7, 30)).await;
        world.add_ride("r3", "c3", "d1", today() + Duration::days(1), at(7, 30)).await;
        world.add_ride("r4", "c2", "d2", today(), at(8, 0)).await;
    }

    #[tokio::test]
    async fn test_parent_dashboard() {
        let world = World::seed().await;
        seed_rides(&world).await;
        let limits = DashboardLimits {
            parent_recent_rides: 2,
            ..DashboardLimits::default()
        };

        let view = service(&world, limits).dashboard(&world.parent).await.unwrap();
        let DashboardView::Parent(view) = view else {
            panic!("expected parent dashboard");
        };
        assert_eq!(view.total_children, 2);
        assert_eq!(view.total_rides, 3);
        assert_eq!(view.upcoming_rides, 2);
        let ids: Vec<&str> = view.recent_rides.iter().map(|r| r.ride.id.as_str()).collect();
        assert_eq!(ids, vec!["r3", "r2"]);
    }

    #[tokio::test]
    async fn test_driver_dashboard() {
        let world = World::seed().await;
        seed_rides(&world).await;
        world.store.update_assigned_driver("c1", Some("d1")).await.unwrap();

        let view = service(&world, DashboardLimits::default())
            .dashboard(&world.driver)
            .await
            .unwrap();
        let DashboardView::Driver(view) = view else {
            panic!("expected driver dashboard");
        };
        assert_eq!(view.assigned_children.len(), 1);
        assert_eq!(view.total_rides, 3);
        assert_eq!(view.todays_rides.len(), 1);
        assert_eq!(view.todays_rides[0].ride.id, "r2");
        assert_eq!(view.recent_rides.len(), 3);
    }

    #[tokio::test]
    async fn test_admin_dashboard() {
        let world = World::seed().await;
        seed_rides(&world).await;
        world.store.update_assigned_driver("c1", Some("d1")).await.unwrap();
        world.store.update_assigned_driver("c3", Some("d1")).await.unwrap();
        let limits = DashboardLimits {
            admin_recent: 2,
            ..DashboardLimits::default()
        };

        let view = service(&world, limits).dashboard(&world.admin).await.unwrap();
        let DashboardView::Admin(view) = view else {
            panic!("expected admin dashboard");
        };
        assert_eq!(
            view.stats,
            AdminStatsView {
                total_users: 5,
                total_children: 3,
                total_rides: 4,
                active_drivers: 2,
            }
        );

        let users: Vec<&str> = view.recent_users.iter().map(|p| p.id.as_str()).collect();
        assert_eq!(users, vec!["d2", "d1"]);
        let children: Vec<&str> = view.recent_children.iter().map(|v| v.child.id.as_str()).collect();
        assert_eq!(children, vec!["c3", "c2"]);
        assert_eq!(view.recent_children[0].driver_name.as_deref(), Some("Dana Driver"));
        assert_eq!(view.recent_rides.len(), 2);
    }
}
