//! Profile entity: the marketplace-facing view of a user account.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

pub type ProfileId = Uuid;

/// Marketplace role. Fixed when the profile is created.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Charity,
    Student,
    Professor,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Charity => "charity",
            Role::Student => "student",
            Role::Professor => "professor",
        }
    }

    /// Students and professors are the roles that may declare interest in a project.
    pub fn is_academic(&self) -> bool {
        matches!(self, Role::Student | Role::Professor)
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, thiserror::Error)]
#[error("unknown role '{0}'")]
pub struct UnknownRole(pub String);

impl FromStr for Role {
    type Err = UnknownRole;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "charity" => Ok(Role::Charity),
            "student" => Ok(Role::Student),
            "professor" => Ok(Role::Professor),
            other => Err(UnknownRole(other.to_string())),
        }
    }
}

/// A user profile as stored by the data store.
///
/// `organization` is free text with no referential integrity: a university for
/// students and professors, the charity's own name for charities.
#[derive(Debug, Clone, Serialize)]
pub struct Profile {
    pub id: ProfileId,
    pub role: Role,
    pub full_name: Option<String>,
    pub organization: Option<String>,
    pub subject: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl Profile {
    /// Returns the organization if it is set and non-empty.
    pub fn affiliation(&self) -> Option<&str> {
        self.organization.as_deref().filter(|org| !org.is_empty())
    }
}

/// Input data for creating a profile.
#[derive(Debug, Clone)]
pub struct NewProfile {
    pub role: Role,
    pub full_name: Option<String>,
    pub organization: Option<String>,
    pub subject: Option<String>,
}
