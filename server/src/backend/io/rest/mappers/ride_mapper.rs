use crate::backend::domain::commands::rides::RideTransitionResult;
use crate::backend::domain::models::ride::{
    Ride as DomainRide, RideDetails as DomainRideDetails, RideStatus as DomainRideStatus,
};
use shared::{
    Ride as SharedRide, RideDetails as SharedRideDetails, RideListResponse, RideStatus as SharedRideStatus,
    RideStatusResponse,
};

const DATE_FORMAT: &str = "%Y-%m-%d";
const TIME_FORMAT: &str = "%H:%M:%S";

/// Mapper from domain rides to the shared ride DTOs.
pub struct RideMapper;

impl RideMapper {
    pub fn status_to_dto(status: DomainRideStatus) -> SharedRideStatus {
        match status {
            DomainRideStatus::Scheduled => SharedRideStatus::Scheduled,
            DomainRideStatus::PickedUp => SharedRideStatus::PickedUp,
            DomainRideStatus::DroppedOff => SharedRideStatus::DroppedOff,
            DomainRideStatus::Cancelled => SharedRideStatus::Cancelled,
        }
    }

    pub fn to_dto(domain: DomainRide) -> SharedRide {
        SharedRide {
            id: domain.id,
            child_id: domain.child_id,
            driver_id: domain.driver_id,
            ride_date: domain.ride_date.format(DATE_FORMAT).to_string(),
            pickup_time: domain.pickup_time.format(TIME_FORMAT).to_string(),
            drop_time: domain.drop_time.map(|t| t.format(TIME_FORMAT).to_string()),
            pickup_address: domain.pickup_address,
            drop_address: domain.drop_address,
            status: Self::status_to_dto(domain.status),
        }
    }

    pub fn to_details_dto(domain: DomainRideDetails) -> SharedRideDetails {
        SharedRideDetails {
            ride: Self::to_dto(domain.ride),
            child_name: domain.child_name,
            school_name: domain.school_name,
            driver_name: domain.driver_name,
        }
    }

    pub fn to_details_list(rides: Vec<DomainRideDetails>) -> Vec<SharedRideDetails> {
        rides.into_iter().map(Self::to_details_dto).collect()
    }

    pub fn to_ride_list_dto(rides: Vec<DomainRideDetails>) -> RideListResponse {
        RideListResponse {
            rides: Self::to_details_list(rides),
        }
    }

    pub fn to_ride_status_response(result: RideTransitionResult) -> RideStatusResponse {
        RideStatusResponse {
            ride: Self::to_dto(result.ride),
            success_message: result.success_message,
        }
    }
}
