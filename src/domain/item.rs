use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::{convert::Infallible, fmt, str::FromStr};
use uuid::Uuid;

/// Opaque identifier of a work item.
///
/// Generated identities are random v4 UUIDs, so uniqueness is probabilistic
/// rather than guaranteed.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ItemId(String);

impl ItemId {
    /// Draws a fresh random identity
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    /// Returns the string representation
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<String> for ItemId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl From<&str> for ItemId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl FromStr for ItemId {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::from(s))
    }
}

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Which of the two board lists an item belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ItemStatus {
    Active,
    Finished,
}

impl ItemStatus {
    /// Lowercase category name, used to derive element identifiers
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Finished => "finished",
        }
    }
}

impl fmt::Display for ItemStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ItemStatus {
    type Err = crate::error::BoardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "active" => Ok(Self::Active),
            "finished" => Ok(Self::Finished),
            _ => Err(crate::error::BoardError::ConfigError(format!(
                "Invalid item status '{}'. Valid statuses: active, finished",
                s
            ))),
        }
    }
}

/// A work item tracked by the board.
///
/// Items are only created by [`ProjectStore::add`](crate::store::ProjectStore::add)
/// and only their status ever changes afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WorkItem {
    id: ItemId,
    title: String,
    description: String,
    people: u32,
    status: ItemStatus,
    created_at: DateTime<Utc>,
}

impl WorkItem {
    pub(crate) fn new(title: String, description: String, people: u32) -> Self {
        Self {
            id: ItemId::generate(),
            title,
            description,
            people,
            status: ItemStatus::Active,
            created_at: Utc::now(),
        }
    }

    pub fn id(&self) -> &ItemId {
        &self.id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    /// Number of people assigned
    pub fn people(&self) -> u32 {
        self.people
    }

    pub fn status(&self) -> ItemStatus {
        self.status
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Human readable head count, e.g. "1 person" or "3 persons"
    pub fn people_label(&self) -> String {
        if self.people == 1 {
            "1 person".to_string()
        } else {
            format!("{} persons", self.people)
        }
    }

    pub(crate) fn set_status(&mut self, status: ItemStatus) {
        self.status = status;
    }
}
