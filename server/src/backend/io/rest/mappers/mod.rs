//! Conversions between domain models and the `shared` DTOs.

pub mod child_mapper;
pub mod dashboard_mapper;
pub mod profile_mapper;
pub mod ride_mapper;

pub use child_mapper::ChildMapper;
pub use dashboard_mapper::DashboardMapper;
pub use profile_mapper::ProfileMapper;
pub use ride_mapper::RideMapper;
