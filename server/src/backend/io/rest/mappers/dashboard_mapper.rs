use super::{ChildMapper, ProfileMapper, RideMapper};
use crate::backend::domain::dashboard_service::{
    AdminDashboardView, AdminStatsView, DashboardView, DriverDashboardView, ParentDashboardView,
};
use shared::{AdminDashboard, AdminStats, DashboardResponse, DriverDashboard, ParentDashboard};

pub struct DashboardMapper;

impl DashboardMapper {
    pub fn to_dto(view: DashboardView) -> DashboardResponse {
        match view {
            DashboardView::Parent(view) => DashboardResponse::Parent(Self::parent_to_dto(view)),
            DashboardView::Driver(view) => DashboardResponse::Driver(Self::driver_to_dto(view)),
            DashboardView::Admin(view) => DashboardResponse::Admin(Self::admin_to_dto(view)),
        }
    }

    fn parent_to_dto(view: ParentDashboardView) -> ParentDashboard {
        ParentDashboard {
            total_children: view.total_children,
            total_rides: view.total_rides,
            upcoming_rides: view.upcoming_rides,
            children: view.children.into_iter().map(ChildMapper::to_dto).collect(),
            recent_rides: RideMapper::to_details_list(view.recent_rides),
        }
    }

    fn driver_to_dto(view: DriverDashboardView) -> DriverDashboard {
        DriverDashboard {
            assigned_children: ChildMapper::to_assigned_children(view.assigned_children),
            total_rides: view.total_rides,
            todays_rides: RideMapper::to_details_list(view.todays_rides),
            recent_rides: RideMapper::to_details_list(view.recent_rides),
        }
    }

    fn admin_to_dto(view: AdminDashboardView) -> AdminDashboard {
        let AdminStatsView {
            total_users,
            total_children,
            total_rides,
            active_drivers,
        } = view.stats;
        AdminDashboard {
            stats: AdminStats {
                total_users,
                total_children,
                total_rides,
                active_drivers,
            },
            recent_users: view.recent_users.into_iter().map(ProfileMapper::to_dto).collect(),
            recent_children: ChildMapper::to_assignment_list(view.recent_children),
            recent_rides: RideMapper::to_details_list(view.recent_rides),
        }
    }
}
