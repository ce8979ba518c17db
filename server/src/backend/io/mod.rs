//! # IO Module
//!
//! Adapter layer between HTTP clients and the domain services. Translates
//! requests into domain commands and domain results into JSON responses.

pub mod rest;

pub use rest::*;
