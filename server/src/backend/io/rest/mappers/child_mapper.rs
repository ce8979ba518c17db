//! server/src/backend/io/rest/mappers/child_mapper.rs

use crate::backend::domain::commands::assignment::AssignDriverResult;
use crate::backend::domain::commands::children::RegisterChildCommand;
use crate::backend::domain::models::child::{AssignedChildView, Child as DomainChild, ChildAssignmentView};
use shared::{
    AssignDriverResponse, AssignedChild, AssignedChildrenResponse, Child as SharedChild,
    ChildAssignment, ChildAssignmentListResponse, ChildListResponse, ChildResponse, CreateChildRequest,
};

/// Mapper to convert between shared Child DTOs and domain Child models.
pub struct ChildMapper;

impl ChildMapper {
    /// Converts a domain Child model to a shared Child DTO.
    pub fn to_dto(domain: DomainChild) -> SharedChild {
        SharedChild {
            id: domain.id,
            name: domain.name,
            age: domain.age,
            school_name: domain.school_name,
            pickup_address: domain.pickup_address,
            drop_address: domain.drop_address,
            parent_id: domain.parent_id,
            assigned_driver_id: domain.assigned_driver_id,
            created_at: domain.created_at.to_rfc3339(),
        }
    }

    pub fn to_register_command(request: CreateChildRequest) -> RegisterChildCommand {
        RegisterChildCommand {
            name: request.name,
            age: request.age,
            school_name: request.school_name,
            pickup_address: request.pickup_address,
            drop_address: request.drop_address,
        }
    }

    pub fn to_child_list_dto(domain_children: Vec<DomainChild>) -> ChildListResponse {
        ChildListResponse {
            children: domain_children.into_iter().map(Self::to_dto).collect(),
        }
    }

    pub fn to_child_response_dto(domain: DomainChild, message: &str) -> ChildResponse {
        ChildResponse {
            child: Self::to_dto(domain),
            success_message: message.to_string(),
        }
    }

    pub fn to_assignment_dto(view: ChildAssignmentView) -> ChildAssignment {
        ChildAssignment {
            child: Self::to_dto(view.child),
            parent_name: view.parent_name,
            driver_name: view.driver_name,
        }
    }

    pub fn to_assignment_list(views: Vec<ChildAssignmentView>) -> Vec<ChildAssignment> {
        views.into_iter().map(Self::to_assignment_dto).collect()
    }

    pub fn to_assignment_list_dto(views: Vec<ChildAssignmentView>) -> ChildAssignmentListResponse {
        ChildAssignmentListResponse {
            children: Self::to_assignment_list(views),
        }
    }

    pub fn to_assign_driver_response(result: AssignDriverResult) -> AssignDriverResponse {
        AssignDriverResponse {
            child_id: result.child_id,
            driver_id: result.driver_id,
            success_message: result.success_message,
        }
    }

    pub fn to_assigned_child_dto(view: AssignedChildView) -> AssignedChild {
        let (parent_name, parent_phone) = match view.parent {
            Some(parent) => (Some(parent.full_name), parent.phone),
            None => (None, None),
        };
        AssignedChild {
            child: Self::to_dto(view.child),
            parent_name,
            parent_phone,
        }
    }

    pub fn to_assigned_children(views: Vec<AssignedChildView>) -> Vec<AssignedChild> {
        views.into_iter().map(Self::to_assigned_child_dto).collect()
    }

    pub fn to_assigned_children_dto(views: Vec<AssignedChildView>) -> AssignedChildrenResponse {
        AssignedChildrenResponse {
            children: Self::to_assigned_children(views),
        }
    }
}
