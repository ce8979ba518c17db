use chrono::Utc;
use std::sync::Arc;
use tracing::{info, warn};

use super::actor::Actor;
use super::commands::profiles::RegisterProfileCommand;
use super::error::{DomainError, DomainResult};
use super::models::profile::{Profile, Role};
use crate::backend::storage::traits::ProfileStorage;

const MAX_NAME_LEN: usize = 100;

/// Signup and profile lookup
#[derive(Clone)]
pub struct ProfileService {
    profiles: Arc<dyn ProfileStorage>,
}

impl ProfileService {
    pub fn new(profiles: Arc<dyn ProfileStorage>) -> Self {
        Self { profiles }
    }

    /// Create a parent or driver profile. The role chosen here never changes.
    pub async fn register_profile(&self, command: RegisterProfileCommand) -> DomainResult<Profile> {
        info!("Registering {} profile for {}", command.role, command.email);
        if command.role == Role::Admin {
            warn!("Refusing admin signup for {}", command.email);
            return Err(DomainError::forbidden("Admin profiles cannot be created through signup"));
        }
        Self::validate(&command)?;

        let profile = Profile {
            id: Profile::generate_id(),
            full_name: command.full_name.trim().to_string(),
            email: command.email.trim().to_string(),
            phone: command
                .phone
                .map(|p| p.trim().to_string())
                .filter(|p| !p.is_empty()),
            role: command.role,
            created_at: Utc::now(),
        };
        self.profiles.store_profile(&profile).await?;

        info!("Registered profile {} ({})", profile.id, profile.role);
        Ok(profile)
    }

    pub async fn get_profile(&self, profile_id: &str) -> DomainResult<Profile> {
        match self.profiles.get_profile(profile_id).await? {
            Some(profile) => Ok(profile),
            None => {
                warn!("Profile not found: {}", profile_id);
                Err(DomainError::not_found(format!("Profile not found: {}", profile_id)))
            }
        }
    }

    /// All profiles, newest first. Admin only.
    pub async fn list_profiles(&self, actor: &Actor) -> DomainResult<Vec<Profile>> {
        actor.require_role(Role::Admin)?;
        let mut profiles = self.profiles.list_profiles().await?;
        profiles.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(profiles)
    }

    fn validate(command: &RegisterProfileCommand) -> DomainResult<()> {
        let name = command.full_name.trim();
        if name.is_empty() {
            return Err(DomainError::validation("Full name cannot be empty"));
        }
        if name.chars().count() > MAX_NAME_LEN {
            return Err(DomainError::validation(format!(
                "Full name cannot exceed {} characters",
                MAX_NAME_LEN
            )));
        }

        let email = command.email.trim();
        match email.split_once('@') {
            Some((local, domain)) if !local.is_empty() && !domain.is_empty() => Ok(()),
            _ => Err(DomainError::validation(format!("Invalid email address: {}", email))),
        }
    }
}
