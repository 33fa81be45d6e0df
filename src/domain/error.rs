//! Domain-level errors (no external dependencies)

use thiserror::Error;

/// Domain errors represent business logic violations.
/// These are independent of infrastructure concerns.
///
/// Note that referential inconsistencies in member data (dangling or
/// self-referential parent ids) are NOT errors: the forest builder recovers
/// from them locally by promoting the affected member to a root.
#[derive(Error, Debug)]
pub enum DomainError {
    #[error("unknown member: {0}")]
    UnknownMember(String),

    #[error("unknown event: {0}")]
    UnknownEvent(String),

    #[error("invalid family name: {0}")]
    InvalidFamilyName(String),
}

pub type DomainResult<T> = Result<T, DomainError>;
