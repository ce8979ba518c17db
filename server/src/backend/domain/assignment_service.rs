//! Child/driver assignment.
//!
//! An administrator lists every child with its parent and current driver,
//! picks a driver (or none) and saves. No cache is held: after an assignment
//! callers re-list to observe it. Two admins writing the same child resolve
//! last-write-wins.

use std::collections::HashMap;
use std::sync::Arc;
use tracing::{info, warn};

use super::actor::Actor;
use super::commands::assignment::{AssignDriverCommand, AssignDriverResult};
use super::error::{DomainError, DomainResult};
use super::models::child::ChildAssignmentView;
use super::models::profile::{Profile, Role};
use crate::backend::storage::traits::{ChildStorage, ProfileStorage};

#[derive(Clone)]
pub struct AssignmentService {
    profiles: Arc<dyn ProfileStorage>,
    children: Arc<dyn ChildStorage>,
}

impl AssignmentService {
    pub fn new(profiles: Arc<dyn ProfileStorage>, children: Arc<dyn ChildStorage>) -> Self {
        Self { profiles, children }
    }

    /// Every child with parent and driver names, ordered by child name.
    pub async fn list_children(&self, actor: &Actor) -> DomainResult<Vec<ChildAssignmentView>> {
        actor.require_role(Role::Admin)?;

        let mut children = self.children.list_children().await?;
        children.sort_by(|a, b| a.name.cmp(&b.name));

        let names = self.profile_names().await?;
        let views = children
            .into_iter()
            .map(|child| ChildAssignmentView {
                parent_name: names.get(&child.parent_id).cloned(),
                driver_name: child
                    .assigned_driver_id
                    .as_ref()
                    .and_then(|id| names.get(id).cloned()),
                child,
            })
            .collect::<Vec<_>>();

        info!("Listed {} children for assignment", views.len());
        Ok(views)
    }

    /// Profiles that may be assigned, ordered by name.
    pub async fn list_eligible_drivers(&self, actor: &Actor) -> DomainResult<Vec<Profile>> {
        actor.require_role(Role::Admin)?;
        let mut drivers = self.profiles.list_profiles_by_role(Role::Driver).await?;
        drivers.sort_by(|a, b| a.full_name.cmp(&b.full_name));
        Ok(drivers)
    }

    /// Set or clear the driver of a child. Idempotent.
    pub async fn assign(&self, actor: &Actor, command: AssignDriverCommand) -> DomainResult<AssignDriverResult> {
        actor.require_role(Role::Admin)?;
        info!(
            "Admin {} assigning driver {:?} to child {}",
            actor.id, command.driver_id, command.child_id
        );

        if self.children.get_child(&command.child_id).await?.is_none() {
            return Err(DomainError::not_found(format!("Child not found: {}", command.child_id)));
        }

        if let Some(driver_id) = command.driver_id.as_deref() {
            self.require_driver(driver_id).await?;
        }

        let updated = self
            .children
            .update_assigned_driver(&command.child_id, command.driver_id.as_deref())
            .await?;
        if !updated {
            // removed between the lookup and the write
            return Err(DomainError::not_found(format!("Child not found: {}", command.child_id)));
        }

        let success_message = if command.driver_id.is_some() {
            "Driver assigned successfully"
        } else {
            "Driver unassigned successfully"
        };
        info!("{} for child {}", success_message, command.child_id);

        Ok(AssignDriverResult {
            child_id: command.child_id,
            driver_id: command.driver_id,
            success_message: success_message.to_string(),
        })
    }

    async fn require_driver(&self, driver_id: &str) -> DomainResult<()> {
        match self.profiles.get_profile(driver_id).await? {
            Some(profile) if profile.is_driver() => Ok(()),
            Some(profile) => {
                warn!("Refusing to assign {} profile {} as driver", profile.role, driver_id);
                Err(DomainError::validation(format!(
                    "Profile {} is a {}, not a driver",
                    driver_id, profile.role
                )))
            }
            None => Err(DomainError::validation(format!("No driver with id {}", driver_id))),
        }
    }

    async fn profile_names(&self) -> DomainResult<HashMap<String, String>> {
        Ok(self
            .profiles
            .list_profiles()
            .await?
            .into_iter()
            .map(|p| (p.id, p.full_name))
            .collect())
    }
}
