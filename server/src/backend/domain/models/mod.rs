pub mod child;
pub mod profile;
pub mod ride;
