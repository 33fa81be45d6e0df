//! Application layer: services and use cases
//!
//! This layer orchestrates domain logic and owns the store I/O boundary.

pub mod error;
pub mod services;

pub use error::{ApplicationError, ApplicationResult};
pub use services::{FamilyService, FamilyStore, NewMember};
