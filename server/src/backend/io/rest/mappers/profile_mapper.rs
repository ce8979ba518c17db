use crate::backend::domain::commands::profiles::RegisterProfileCommand;
use crate::backend::domain::models::profile::{Profile as DomainProfile, Role as DomainRole};
use shared::{
    CreateProfileRequest, Profile as SharedProfile, ProfileListResponse, ProfileResponse,
    Role as SharedRole,
};

/// Mapper to convert between shared Profile DTOs and domain Profile models.
pub struct ProfileMapper;

impl ProfileMapper {
    pub fn role_to_dto(role: DomainRole) -> SharedRole {
        match role {
            DomainRole::Parent => SharedRole::Parent,
            DomainRole::Driver => SharedRole::Driver,
            DomainRole::Admin => SharedRole::Admin,
        }
    }

    pub fn role_to_domain(role: SharedRole) -> DomainRole {
        match role {
            SharedRole::Parent => DomainRole::Parent,
            SharedRole::Driver => DomainRole::Driver,
            SharedRole::Admin => DomainRole::Admin,
        }
    }

    pub fn to_dto(domain: DomainProfile) -> SharedProfile {
        SharedProfile {
            id: domain.id,
            full_name: domain.full_name,
            email: domain.email,
            phone: domain.phone,
            role: Self::role_to_dto(domain.role),
            created_at: domain.created_at.to_rfc3339(),
        }
    }

    pub fn to_register_command(request: CreateProfileRequest) -> RegisterProfileCommand {
        RegisterProfileCommand {
            full_name: request.full_name,
            email: request.email,
            phone: request.phone,
            role: Self::role_to_domain(request.role),
        }
    }

    pub fn to_profile_response_dto(domain: DomainProfile, message: &str) -> ProfileResponse {
        ProfileResponse {
            profile: Self::to_dto(domain),
            success_message: message.to_string(),
        }
    }

    pub fn to_profile_list_dto(profiles: Vec<DomainProfile>) -> ProfileListResponse {
        ProfileListResponse {
            profiles: profiles.into_iter().map(Self::to_dto).collect(),
        }
    }
}
