//! Application services
//!
//! Concrete service implementations that orchestrate domain logic and the
//! file-backed store.

mod family;
mod store;

pub use family::{FamilyService, NewMember};
pub use store::FamilyStore;
