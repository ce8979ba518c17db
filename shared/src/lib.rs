use serde::{Deserialize, Serialize};

/// Role a profile holds for its whole lifetime
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Parent,
    Driver,
    Admin,
}

/// A registered user of the system
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Profile {
    pub id: String,
    pub full_name: String,
    pub email: String,
    pub phone: Option<String>,
    pub role: Role,
    /// RFC 3339 timestamp of signup
    pub created_at: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateProfileRequest {
    pub full_name: String,
    pub email: String,
    pub phone: Option<String>,
    pub role: Role,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProfileResponse {
    pub profile: Profile,
    pub success_message: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProfileListResponse {
    pub profiles: Vec<Profile>,
}

/// A child as registered by its parent
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Child {
    pub id: String,
    pub name: String,
    pub age: u8,
    pub school_name: String,
    pub pickup_address: String,
    pub drop_address: String,
    pub parent_id: String,
    pub assigned_driver_id: Option<String>,
    /// RFC 3339 timestamp of registration
    pub created_at: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateChildRequest {
    pub name: String,
    pub age: u8,
    pub school_name: String,
    pub pickup_address: String,
    pub drop_address: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChildResponse {
    pub child: Child,
    pub success_message: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChildListResponse {
    pub children: Vec<Child>,
}

/// Row of the admin assignment table: a child with parent and driver names resolved
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChildAssignment {
    pub child: Child,
    pub parent_name: Option<String>,
    /// `None` when the child is unassigned
    pub driver_name: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChildAssignmentListResponse {
    pub children: Vec<ChildAssignment>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DriverListResponse {
    pub drivers: Vec<Profile>,
}

/// Body of the assignment endpoint; a `null` driver unassigns the child
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssignDriverRequest {
    #[serde(default)]
    pub driver_id: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssignDriverResponse {
    pub child_id: String,
    pub driver_id: Option<String>,
    pub success_message: String,
}

/// A child from a driver's point of view, with the parent's contact details
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssignedChild {
    pub child: Child,
    pub parent_name: Option<String>,
    pub parent_phone: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssignedChildrenResponse {
    pub children: Vec<AssignedChild>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RideStatus {
    Scheduled,
    PickedUp,
    DroppedOff,
    Cancelled,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ride {
    pub id: String,
    pub child_id: String,
    pub driver_id: String,
    /// Calendar date of the ride (YYYY-MM-DD)
    pub ride_date: String,
    /// Local pickup time (HH:MM:SS)
    pub pickup_time: String,
    /// Local drop-off time (HH:MM:SS), set when the ride is dropped off
    pub drop_time: Option<String>,
    pub pickup_address: String,
    pub drop_address: String,
    pub status: RideStatus,
}

/// A ride joined with the names a dashboard displays next to it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RideDetails {
    pub ride: Ride,
    pub child_name: Option<String>,
    pub school_name: Option<String>,
    pub driver_name: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RideListResponse {
    pub rides: Vec<RideDetails>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RideStatusResponse {
    pub ride: Ride,
    pub success_message: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UpcomingRidesResponse {
    pub parent_id: String,
    pub upcoming_rides: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParentDashboard {
    pub total_children: usize,
    pub total_rides: usize,
    pub upcoming_rides: usize,
    pub children: Vec<Child>,
    pub recent_rides: Vec<RideDetails>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DriverDashboard {
    pub assigned_children: Vec<AssignedChild>,
    pub total_rides: usize,
    pub todays_rides: Vec<RideDetails>,
    pub recent_rides: Vec<RideDetails>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AdminStats {
    pub total_users: usize,
    pub total_children: usize,
    pub total_rides: usize,
    pub active_drivers: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AdminDashboard {
    pub stats: AdminStats,
    pub recent_users: Vec<Profile>,
    pub recent_children: Vec<ChildAssignment>,
    pub recent_rides: Vec<RideDetails>,
}

/// Dashboard payload, tagged with the role it was rendered for
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "role", rename_all = "snake_case")]
pub enum DashboardResponse {
    Parent(ParentDashboard),
    Driver(DriverDashboard),
    Admin(AdminDashboard),
}
