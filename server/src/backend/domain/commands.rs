// server/src/backend/domain/commands.rs

//! Domain-level command and result types.
//! These structs are used by services inside the domain layer and are **not**
//! exposed over the public API. The REST layer maps the DTOs defined in the
//! `shared` crate to these internal types.

pub mod profiles {
    use crate::backend::domain::models::profile::Role;

    /// Input for signing up a new profile.
    #[derive(Debug, Clone)]
    pub struct RegisterProfileCommand {
        pub full_name: String,
        pub email: String,
        pub phone: Option<String>,
        pub role: Role,
    }
}

pub mod children {
    /// Input for a parent registering a child.
    #[derive(Debug, Clone)]
    pub struct RegisterChildCommand {
        pub name: String,
        pub age: u8,
        pub school_name: String,
        pub pickup_address: String,
        pub drop_address: String,
    }
}

pub mod assignment {
    /// Set or clear the driver of a child. `driver_id: None` unassigns.
    #[derive(Debug, Clone)]
    pub struct AssignDriverCommand {
        pub child_id: String,
        pub driver_id: Option<String>,
    }

    /// Result of an assignment. Callers re-list children to observe it.
    #[derive(Debug, Clone, PartialEq)]
    pub struct AssignDriverResult {
        pub child_id: String,
        pub driver_id: Option<String>,
        pub success_message: String,
    }
}

pub mod rides {
    use crate::backend::domain::models::ride::Ride;

    /// Result of a status transition.
    #[derive(Debug, Clone, PartialEq)]
    pub struct RideTransitionResult {
        pub ride: Ride,
        pub success_message: String,
    }
}
