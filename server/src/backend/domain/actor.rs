//! The acting user and the identity seam that produces it.
//!
//! Every service operation takes an [`Actor`] explicitly; nothing reads a
//! "current user" from ambient state.

use anyhow::Result;
use async_trait::async_trait;
use std::sync::Arc;

use super::error::{DomainError, DomainResult};
use super::models::profile::Role;
use crate::backend::storage::traits::ProfileStorage;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Actor {
    pub id: String,
    pub role: Role,
}

impl Actor {
    pub fn new(id: impl Into<String>, role: Role) -> Self {
        Self { id: id.into(), role }
    }

    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }

    /// Fails unless the actor holds `role`.
    pub fn require_role(&self, role: Role) -> DomainResult<()> {
        if self.role == role {
            Ok(())
        } else {
            Err(DomainError::forbidden(format!(
                "Only a {} may perform this action",
                role
            )))
        }
    }

    /// Fails unless the actor is the `role` profile `subject_id`, or an admin.
    pub fn require_self_or_admin(&self, role: Role, subject_id: &str) -> DomainResult<()> {
        if self.is_admin() || (self.role == role && self.id == subject_id) {
            Ok(())
        } else {
            Err(DomainError::forbidden(format!(
                "Not permitted to view data of {} {}",
                role, subject_id
            )))
        }
    }
}

/// Resolves a caller credential to the acting user.
#[async_trait]
pub trait IdentityService: Send + Sync {
    /// `Ok(None)` when the credential is unknown.
    async fn current_user(&self, credential: &str) -> Result<Option<Actor>>;
}

/// Identity backed by the profile store: the credential is the profile id.
#[derive(Clone)]
pub struct ProfileIdentity {
    profiles: Arc<dyn ProfileStorage>,
}

impl ProfileIdentity {
    pub fn new(profiles: Arc<dyn ProfileStorage>) -> Self {
        Self { profiles }
    }
}

#[async_trait]
impl IdentityService for ProfileIdentity {
    async fn current_user(&self, credential: &str) -> Result<Option<Actor>> {
        let profile = self.profiles.get_profile(credential.trim()).await?;
        Ok(profile.map(|p| Actor::new(p.id, p.role)))
    }
}
