//! Domain entities: core data structures

use chrono::NaiveDate;

/// A single family member record.
///
/// Parent links (`father_id`, `mother_id`) reference other members by id
/// within the same family. Dangling references are tolerated and treated as
/// "no parent" by the forest builder. Absent optional data is `None`, never
/// an empty-string sentinel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Member {
    /// Unique identifier within the family
    pub id: String,
    pub first_name: String,
    pub last_name: String,
    pub email: Option<String>,
    pub address: Option<String>,
    /// Calendar date, no time component
    pub birthday: Option<NaiveDate>,
    pub anniversary: Option<NaiveDate>,
    pub comments: Option<String>,
    /// Reference to another member's id, or None
    pub father_id: Option<String>,
    pub mother_id: Option<String>,
    /// Opaque reference to a stored photo (path or URL), not interpreted here
    pub photo: Option<String>,
}

impl Member {
    /// Minimal member with only the required fields set.
    pub fn new(
        id: impl Into<String>,
        first_name: impl Into<String>,
        last_name: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            first_name: first_name.into(),
            last_name: last_name.into(),
            email: None,
            address: None,
            birthday: None,
            anniversary: None,
            comments: None,
            father_id: None,
            mother_id: None,
            photo: None,
        }
    }

    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

/// A user-defined recurring event (e.g. a graduation or memorial date).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CustomEvent {
    pub id: String,
    /// Family this event belongs to
    pub family_id: String,
    pub event_name: String,
    /// The original calendar date; recurrence projects its (month, day) forward
    pub event_date: NaiveDate,
    /// Optionally ties the event to a member
    pub member_id: Option<String>,
}

/// Immutable per-family snapshot consumed by the domain computations.
///
/// The store produces one of these per load; tree and alert derivations
/// never mutate it.
#[derive(Debug, Clone, Default)]
pub struct FamilySnapshot {
    pub name: String,
    pub members: Vec<Member>,
    pub events: Vec<CustomEvent>,
}

impl FamilySnapshot {
    pub fn member_by_id(&self, id: &str) -> Option<&Member> {
        self.members.iter().find(|m| m.id == id)
    }
}
