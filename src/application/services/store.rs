//! File-backed family store
//!
//! One TOML file per family under the data directory. Dates are stored as
//! `YYYY-MM-DD` strings and parsed leniently on load: a member field with an
//! unparseable date is dropped to None, a custom event with an unparseable
//! date is skipped entirely. Partial corruption degrades per-record, it
//! never fails the whole load.

use std::fs;
use std::path::PathBuf;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::application::{ApplicationError, ApplicationResult};
use crate::domain::{CustomEvent, DomainError, FamilySnapshot, Member};

const DATE_FORMAT: &str = "%Y-%m-%d";
const FAMILY_EXT: &str = "toml";

/// Serialized form of a member record.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct RawMember {
    id: String,
    first_name: String,
    last_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    address: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    birthday: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    anniversary: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    comments: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    father_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    mother_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    photo: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct RawEvent {
    id: String,
    event_name: String,
    event_date: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    member_id: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct FamilyFile {
    name: String,
    #[serde(default)]
    members: Vec<RawMember>,
    #[serde(default)]
    events: Vec<RawEvent>,
}

/// Store for family files under a data directory.
#[derive(Debug, Clone)]
pub struct FamilyStore {
    data_dir: PathBuf,
}

impl FamilyStore {
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    /// List family names, sorted. A missing data directory is an empty
    /// store, not an error.
    pub fn list_families(&self) -> ApplicationResult<Vec<String>> {
        if !self.data_dir.exists() {
            return Ok(Vec::new());
        }
        let entries = fs::read_dir(&self.data_dir).map_err(|e| io_err("read data directory", e))?;

        let mut names = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|e| io_err("read data directory entry", e))?;
            let path = entry.path();
            let is_family_file = path.is_file()
                && path.extension().map(|ext| ext == FAMILY_EXT).unwrap_or(false);
            if is_family_file {
                if let Some(stem) = path.file_stem().and_then(|s| s.to_str()) {
                    names.push(stem.to_string());
                }
            }
        }
        names.sort();
        Ok(names)
    }

    pub fn exists(&self, family: &str) -> ApplicationResult<bool> {
        Ok(self.family_path(family)?.exists())
    }

    /// Load a family snapshot, parsing stored dates leniently.
    pub fn load(&self, family: &str) -> ApplicationResult<FamilySnapshot> {
        let path = self.family_path(family)?;
        if !path.exists() {
            return Err(ApplicationError::FamilyNotFound(family.to_string()));
        }
        let content =
            fs::read_to_string(&path).map_err(|e| io_err(&format!("read {}", path.display()), e))?;
        let file: FamilyFile =
            toml::from_str(&content).map_err(|e| ApplicationError::InvalidFamilyFile {
                path: path.clone(),
                message: e.to_string(),
            })?;
        debug!(
            family,
            members = file.members.len(),
            events = file.events.len(),
            "loaded family file"
        );
        Ok(snapshot_from_file(family, file))
    }

    /// Write a family snapshot back to its file.
    pub fn save(&self, family: &str, snapshot: &FamilySnapshot) -> ApplicationResult<()> {
        let path = self.family_path(family)?;
        fs::create_dir_all(&self.data_dir)
            .map_err(|e| io_err("create data directory", e))?;

        let file = file_from_snapshot(snapshot);
        let content = toml::to_string_pretty(&file).map_err(|e| ApplicationError::OperationFailed {
            context: format!("serialize family {family}"),
            source: Box::new(e),
        })?;
        fs::write(&path, content).map_err(|e| io_err(&format!("write {}", path.display()), e))?;
        debug!(family, path = %path.display(), "saved family file");
        Ok(())
    }

    /// Create an empty family file. Errors if it already exists.
    pub fn create(&self, family: &str) -> ApplicationResult<()> {
        if self.exists(family)? {
            return Err(ApplicationError::FamilyExists(family.to_string()));
        }
        let snapshot = FamilySnapshot {
            name: family.to_string(),
            ..Default::default()
        };
        self.save(family, &snapshot)
    }

    /// Delete a family file with all its members and events.
    pub fn remove(&self, family: &str) -> ApplicationResult<()> {
        let path = self.family_path(family)?;
        if !path.exists() {
            return Err(ApplicationError::FamilyNotFound(family.to_string()));
        }
        fs::remove_file(&path).map_err(|e| io_err(&format!("remove {}", path.display()), e))
    }

    fn family_path(&self, family: &str) -> ApplicationResult<PathBuf> {
        validate_family_name(family)?;
        Ok(self.data_dir.join(format!("{family}.{FAMILY_EXT}")))
    }
}

/// Family names become file names, so they must be non-empty and free of
/// path separators.
fn validate_family_name(name: &str) -> Result<(), DomainError> {
    if name.is_empty()
        || name.contains(['/', '\\'])
        || name == "."
        || name == ".."
    {
        return Err(DomainError::InvalidFamilyName(name.to_string()));
    }
    Ok(())
}

fn snapshot_from_file(family: &str, file: FamilyFile) -> FamilySnapshot {
    let members = file
        .members
        .into_iter()
        .map(|raw| Member {
            birthday: parse_date_lenient(&raw.id, "birthday", raw.birthday.as_deref()),
            anniversary: parse_date_lenient(&raw.id, "anniversary", raw.anniversary.as_deref()),
            id: raw.id,
            first_name: raw.first_name,
            last_name: raw.last_name,
            email: raw.email,
            address: raw.address,
            comments: raw.comments,
            father_id: raw.father_id,
            mother_id: raw.mother_id,
            photo: raw.photo,
        })
        .collect();

    let events = file
        .events
        .into_iter()
        .filter_map(|raw| {
            let Ok(event_date) = NaiveDate::parse_from_str(&raw.event_date, DATE_FORMAT) else {
                warn!(event = %raw.id, date = %raw.event_date, "skipping event with invalid date");
                return None;
            };
            Some(CustomEvent {
                id: raw.id,
                family_id: family.to_string(),
                event_name: raw.event_name,
                event_date,
                member_id: raw.member_id,
            })
        })
        .collect();

    FamilySnapshot {
        name: file.name,
        members,
        events,
    }
}

fn file_from_snapshot(snapshot: &FamilySnapshot) -> FamilyFile {
    FamilyFile {
        name: snapshot.name.clone(),
        members: snapshot
            .members
            .iter()
            .map(|m| RawMember {
                id: m.id.clone(),
                first_name: m.first_name.clone(),
                last_name: m.last_name.clone(),
                email: m.email.clone(),
                address: m.address.clone(),
                birthday: m.birthday.map(|d| d.format(DATE_FORMAT).to_string()),
                anniversary: m.anniversary.map(|d| d.format(DATE_FORMAT).to_string()),
                comments: m.comments.clone(),
                father_id: m.father_id.clone(),
                mother_id: m.mother_id.clone(),
                photo: m.photo.clone(),
            })
            .collect(),
        events: snapshot
            .events
            .iter()
            .map(|e| RawEvent {
                id: e.id.clone(),
                event_name: e.event_name.clone(),
                event_date: e.event_date.format(DATE_FORMAT).to_string(),
                member_id: e.member_id.clone(),
            })
            .collect(),
    }
}

/// Invalid stored dates degrade to None so one corrupt field never blocks
/// the rest of the family.
fn parse_date_lenient(member_id: &str, field: &str, value: Option<&str>) -> Option<NaiveDate> {
    let raw = value?;
    match NaiveDate::parse_from_str(raw, DATE_FORMAT) {
        Ok(date) => Some(date),
        Err(_) => {
            warn!(member = %member_id, field, date = %raw, "ignoring invalid stored date");
            None
        }
    }
}

fn io_err(context: &str, source: std::io::Error) -> ApplicationError {
    ApplicationError::OperationFailed {
        context: context.to_string(),
        source: Box::new(source),
    }
}
