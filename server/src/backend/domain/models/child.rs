//! server/src/backend/domain/models/child.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::profile::Profile;

/// Domain model representing a child registered by a parent.
///
/// `parent_id` never changes after registration. `assigned_driver_id` is only
/// written through the assignment service.
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
    pub created_at: DateTime<Utc>,
}

impl Child {
    pub fn generate_id() -> String {
        format!("child::{}", Uuid::new_v4().simple())
    }

    pub fn is_assigned(&self) -> bool {
        self.assigned_driver_id.is_some()
    }
}

/// A child with the parent and driver names resolved for the admin table.
#[derive(Debug, Clone, PartialEq)]
pub struct ChildAssignmentView {
    pub child: Child,
    pub parent_name: Option<String>,
    pub driver_name: Option<String>,
}

/// A child as seen by its assigned driver.
#[derive(Debug, Clone, PartialEq)]
pub struct AssignedChildView {
    pub child: Child,
    pub parent: Option<Profile>,
}
