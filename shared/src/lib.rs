//! Shared types and models for the Warehouse Management backend
//!
//! This crate contains the domain records, enums, and validation helpers
//! used by the server and its tests.

pub mod models;
pub mod validation;

pub use models::*;
pub use validation::*;
