//! Family service
//!
//! Orchestrates the store and the domain computations: forests, alerts,
//! calendars, and member/event bookkeeping.

use chrono::NaiveDate;
use tracing::{debug, warn};
use uuid::Uuid;

use crate::application::services::store::FamilyStore;
use crate::application::{ApplicationError, ApplicationResult};
use crate::domain::{
    bucket, calendar_events, derive_events, AlertBuckets, CalendarEntry, CustomEvent, DomainError,
    FamilySnapshot, Forest, ForestBuilder, Member,
};

/// Concrete service over one family store.
pub struct FamilyService {
    store: FamilyStore,
}

impl FamilyService {
    pub fn new(store: FamilyStore) -> Self {
        Self { store }
    }

    pub fn list_families(&self) -> ApplicationResult<Vec<String>> {
        self.store.list_families()
    }

    pub fn create_family(&self, name: &str) -> ApplicationResult<()> {
        self.store.create(name)
    }

    pub fn remove_family(&self, name: &str) -> ApplicationResult<()> {
        self.store.remove(name)
    }

    pub fn snapshot(&self, family: &str) -> ApplicationResult<FamilySnapshot> {
        self.store.load(family)
    }

    /// Load the family and build its forest.
    pub fn forest(&self, family: &str) -> ApplicationResult<(FamilySnapshot, Forest)> {
        let snapshot = self.store.load(family)?;
        let forest = ForestBuilder::new().build(&snapshot.members);
        debug!(
            family,
            members = snapshot.members.len(),
            roots = forest.roots().len(),
            "built family forest"
        );
        Ok((snapshot, forest))
    }

    /// Derive and bucket alerts relative to `reference`.
    pub fn alerts(
        &self,
        family: &str,
        reference: NaiveDate,
        window_days: i64,
    ) -> ApplicationResult<AlertBuckets> {
        let snapshot = self.store.load(family)?;
        let alerts = derive_events(&snapshot.members, &snapshot.events, reference);
        Ok(bucket(alerts, window_days))
    }

    /// Calendar view, optionally filtered by month and year.
    pub fn calendar(
        &self,
        family: &str,
        month: Option<u32>,
        year: Option<i32>,
    ) -> ApplicationResult<Vec<CalendarEntry>> {
        let snapshot = self.store.load(family)?;
        Ok(calendar_events(
            &snapshot.members,
            &snapshot.events,
            month,
            year,
        ))
    }

    /// Add a member with a generated id and persist the family.
    ///
    /// Dangling parent ids are tolerated (the builder treats them as "no
    /// parent") but flagged, since they are usually typos.
    pub fn add_member(&self, family: &str, new_member: NewMember) -> ApplicationResult<Member> {
        let mut snapshot = self.store.load(family)?;

        for parent_id in [&new_member.father_id, &new_member.mother_id]
            .into_iter()
            .flatten()
        {
            if snapshot.member_by_id(parent_id).is_none() {
                warn!(family, parent = %parent_id, "parent id does not match any member");
            }
        }

        let member = Member {
            id: Uuid::new_v4().to_string(),
            first_name: new_member.first_name,
            last_name: new_member.last_name,
            email: new_member.email,
            address: new_member.address,
            birthday: new_member.birthday,
            anniversary: new_member.anniversary,
            comments: new_member.comments,
            father_id: new_member.father_id,
            mother_id: new_member.mother_id,
            photo: new_member.photo,
        };
        snapshot.members.push(member.clone());
        self.store.save(family, &snapshot)?;
        Ok(member)
    }

    /// Remove a member. Children keep their now-dangling parent reference
    /// and surface as roots on the next forest build.
    pub fn remove_member(&self, family: &str, member_id: &str) -> ApplicationResult<()> {
        let mut snapshot = self.store.load(family)?;
        let before = snapshot.members.len();
        snapshot.members.retain(|m| m.id != member_id);
        if snapshot.members.len() == before {
            return Err(ApplicationError::Domain(DomainError::UnknownMember(
                member_id.to_string(),
            )));
        }
        self.store.save(family, &snapshot)
    }

    pub fn add_event(
        &self,
        family: &str,
        event_name: String,
        event_date: NaiveDate,
        member_id: Option<String>,
    ) -> ApplicationResult<CustomEvent> {
        let mut snapshot = self.store.load(family)?;
        if let Some(id) = &member_id {
            if snapshot.member_by_id(id).is_none() {
                warn!(family, member = %id, "event references unknown member");
            }
        }
        let event = CustomEvent {
            id: Uuid::new_v4().to_string(),
            family_id: family.to_string(),
            event_name,
            event_date,
            member_id,
        };
        snapshot.events.push(event.clone());
        self.store.save(family, &snapshot)?;
        Ok(event)
    }

    pub fn remove_event(&self, family: &str, event_id: &str) -> ApplicationResult<()> {
        let mut snapshot = self.store.load(family)?;
        let before = snapshot.events.len();
        snapshot.events.retain(|e| e.id != event_id);
        if snapshot.events.len() == before {
            return Err(ApplicationError::Domain(DomainError::UnknownEvent(
                event_id.to_string(),
            )));
        }
        self.store.save(family, &snapshot)
    }
}

/// Input for creating a member; the service assigns the id.
#[derive(Debug, Clone, Default)]
pub struct NewMember {
    pub first_name: String,
    pub last_name: String,
    pub email: Option<String>,
    pub address: Option<String>,
    pub birthday: Option<NaiveDate>,
    pub anniversary: Option<NaiveDate>,
    pub comments: Option<String>,
    pub father_id: Option<String>,
    pub mother_id: Option<String>,
    pub photo: Option<String>,
}
