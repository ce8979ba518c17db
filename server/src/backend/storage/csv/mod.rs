//! # File Storage Module
//!
//! Stores profiles and children as YAML documents and rides as a CSV ledger,
//! all under one data directory:
//!
//! ```text
//! <data_directory>/
//!   profiles.yaml
//!   children.yaml
//!   rides.csv
//! ```
//!
//! `rides.csv` has the header
//! `id,child_id,driver_id,ride_date,pickup_time,drop_time,pickup_address,drop_address,status`.
//! Every write rewrites the whole file through a temp file and a rename.

pub mod child_repository;
pub mod connection;
pub mod profile_repository;
pub mod ride_repository;

#[cfg(test)]
pub mod test_utils;

pub use child_repository::ChildRepository;
pub use connection::CsvConnection;
pub use profile_repository::ProfileRepository;
pub use ride_repository::RideRepository;
