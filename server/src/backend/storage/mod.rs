//! # Storage Module
//!
//! Handles all data persistence for the ride coordination backend.
//!
//! The domain layer only sees the traits in [`traits`]; two backends
//! implement them:
//!
//! - **memory**: tables held in process, lost on restart
//! - **csv**: YAML and CSV files in a data directory
//!
//! Neither backend performs version checks. Concurrent writers to the same
//! field resolve last-write-wins.

pub mod csv;
pub mod memory;
pub mod traits;

pub use self::csv::CsvConnection;
pub use memory::MemoryStore;
pub use traits::{ChildStorage, Connection, ProfileStorage, RideStorage};
