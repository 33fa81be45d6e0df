//! Domain layer: entities and business logic
//!
//! This layer is independent of external concerns (no I/O, no CLI, no config
//! loading). All computations are pure and operate on in-memory snapshots.

pub mod alerts;
pub mod builder;
pub mod entities;
pub mod error;
pub mod events;
pub mod forest;
pub mod navigator;

pub use alerts::{bucket, AlertBuckets, DEFAULT_WINDOW_DAYS};
pub use builder::ForestBuilder;
pub use entities::{CustomEvent, FamilySnapshot, Member};
pub use error::{DomainError, DomainResult};
pub use events::{calendar_events, derive_events, next_occurrence, AlertEntry, AlertKind, CalendarEntry};
pub use forest::{Forest, TreeNode};
pub use navigator::TreeNavigator;
