use chrono::Utc;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{info, warn};

use super::actor::Actor;
use super::commands::children::RegisterChildCommand;
use super::error::{DomainError, DomainResult};
use super::models::child::{AssignedChildView, Child};
use super::models::profile::{Profile, Role};
use crate::backend::storage::traits::{ChildStorage, ProfileStorage};

const MAX_NAME_LEN: usize = 100;
const MIN_AGE: u8 = 1;
const MAX_AGE: u8 = 18;

/// Service for registering children and listing them per parent or driver
#[derive(Clone)]
pub struct ChildService {
    profiles: Arc<dyn ProfileStorage>,
    children: Arc<dyn ChildStorage>,
}

impl ChildService {
    pub fn new(profiles: Arc<dyn ProfileStorage>, children: Arc<dyn ChildStorage>) -> Self {
        Self { profiles, children }
    }

    /// Register a child owned by the acting parent. New children are unassigned.
    pub async fn register_child(&self, actor: &Actor, command: RegisterChildCommand) -> DomainResult<Child> {
        actor.require_role(Role::Parent)?;
        info!("Parent {} registering child {}", actor.id, command.name.trim());

        Self::validate(&command)?;

        let child = Child {
            id: Child::generate_id(),
            name: command.name.trim().to_string(),
            age: command.age,
            school_name: command.school_name.trim().to_string(),
            pickup_address: command.pickup_address.trim().to_string(),
            drop_address: command.drop_address.trim().to_string(),
            parent_id: actor.id.clone(),
            assigned_driver_id: None,
            created_at: Utc::now(),
        };
        self.children.store_child(&child).await?;

        info!("Created child: {} with ID: {}", child.name, child.id);
        Ok(child)
    }

    /// Children of `parent_id`, ordered by name.
    pub async fn children_for_parent(&self, actor: &Actor, parent_id: &str) -> DomainResult<Vec<Child>> {
        actor.require_self_or_admin(Role::Parent, parent_id)?;
        let mut children = self.children.list_children_for_parent(parent_id).await?;
        children.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(children)
    }

    /// Children assigned to `driver_id` with their parent's contact details.
    pub async fn assigned_children(&self, actor: &Actor, driver_id: &str) -> DomainResult<Vec<AssignedChildView>> {
        actor.require_self_or_admin(Role::Driver, driver_id)?;

        let mut children = self.children.list_children_for_driver(driver_id).await?;
        children.sort_by(|a, b| a.name.cmp(&b.name));

        let parents: HashMap<String, Profile> = self
            .profiles
            .list_profiles_by_role(Role::Parent)
            .await?
            .into_iter()
            .map(|p| (p.id.clone(), p))
            .collect();

        Ok(children
            .into_iter()
            .map(|child| {
                let parent = parents.get(&child.parent_id).cloned();
                if parent.is_none() {
                    warn!("Child {} references missing parent {}", child.id, child.parent_id);
                }
                AssignedChildView { child, parent }
            })
            .collect())
    }

    fn validate(command: &RegisterChildCommand) -> DomainResult<()> {
        let fields = [
            ("Name", &command.name),
            ("School name", &command.school_name),
            ("Pickup address", &command.pickup_address),
            ("Drop address", &command.drop_address),
        ];
        for (label, value) in fields {
            if value.trim().is_empty() {
                return Err(DomainError::validation(format!("{} cannot be empty", label)));
            }
        }

        if command.name.trim().chars().count() > MAX_NAME_LEN {
            return Err(DomainError::validation(format!(
                "Child name cannot exceed {} characters",
                MAX_NAME_LEN
            )));
        }

        if !(MIN_AGE..=MAX_AGE).contains(&command.age) {
            return Err(DomainError::validation(format!(
                "Age must be between {} and {}",
                MIN_AGE, MAX_AGE
            )));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::domain::test_support::World;

    fn service(world: &World) -> ChildService {
        ChildService::new(world.profiles(), world.children())
    }

    fn command(name: &str, age: u8) -> RegisterChildCommand {
        RegisterChildCommand {
            name: name.to_string(),
            age,
            school_name: "Hill School".to_string(),
            pickup_address: " 9 Elm St ".to_string(),
            drop_address: "Hill School".to_string(),
        }
    }

    #[tokio::test]
    async fn test_register_child_belongs_to_actor() {
        let world = World::seed().await;
        let service = service(&world);

        let child = service.register_child(&world.parent, command(" Ben ", 7)).await.unwrap();
        assert_eq!(child.name, "Ben");
        assert_eq!(child.pickup_address, "9 Elm St");
        assert_eq!(child.parent_id, "p1");
        assert!(!child.is_assigned());

        let mine = service.children_for_parent(&world.parent, "p1").await.unwrap();
        let names: Vec<&str> = mine.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["Ben", "Mia", "Zoe"]);
    }

    #[tokio::test]
    async fn test_register_child_validation() {
        let world = World::seed().await;
        let service = service(&world);

        for bad in [command("  ", 7), command("Ben", 0), command("Ben", 19), command(&"x".repeat(101), 7)] {
            assert!(matches!(
                service.register_child(&world.parent, bad).await,
                Err(DomainError::Validation(_))
            ));
        }

        let mut no_school = command("Ben", 7);
        no_school.school_name = String::new();
        assert!(matches!(
            service.register_child(&world.parent, no_school).await,
            Err(DomainError::Validation(_))
        ));
    }

    #[tokio::test]
    async fn test_only_parents_register_children() {
        let world = World::seed().await;
        let service = service(&world);
        for actor in [&world.driver, &world.admin] {
            assert!(matches!(
                service.register_child(actor, command("Ben", 7)).await,
                Err(DomainError::Forbidden(_))
            ));
        }
    }

    #[tokio::test]
    async fn test_parents_only_see_their_own_children() {
        let world = World::seed().await;
        let service = service(&world);

        assert!(matches!(
            service.children_for_parent(&world.other_parent, "p1").await,
            Err(DomainError::Forbidden(_))
        ));
        assert_eq!(service.children_for_parent(&world.admin, "p1").await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_assigned_children_with_parent_contact() {
        let world = World::seed().await;
        world.store.update_assigned_driver("c1", Some("d1")).await.unwrap();
        world.store.update_assigned_driver("c2", Some("d1")).await.unwrap();
        world.store.update_assigned_driver("c3", Some("d2")).await.unwrap();

        let views = service(&world).assigned_children(&world.driver, "d1").await.unwrap();
        let names: Vec<&str> = views.iter().map(|v| v.child.name.as_str()).collect();
        assert_eq!(names, vec!["Adam", "Zoe"]);

        let zoe = &views[1];
        let parent = zoe.parent.as_ref().expect("parent resolved");
        assert_eq!(parent.full_name, "Pat Parent");
        assert_eq!(parent.phone.as_deref(), Some("555-0101"));
    }

    #[tokio::test]
    async fn test_drivers_only_see_their_own_assignments() {
        let world = World::seed().await;
        let result = service(&world).assigned_children(&world.other_driver, "d1").await;
        assert!(matches!(result, Err(DomainError::Forbidden(_))));
    }
}
