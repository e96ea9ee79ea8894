//! Project entity posted by charities.

use chrono::{DateTime, Utc};
use serde::{Serialize, Serializer};
use uuid::Uuid;

use super::ProfileId;

pub type ProjectId = Uuid;

/// Lifecycle status of a project.
///
/// Only `open` projects are listed. Unknown values written by other tools are
/// kept verbatim.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProjectStatus {
    Open,
    Closed,
    Other(String),
}

impl ProjectStatus {
    pub fn as_str(&self) -> &str {
        match self {
            ProjectStatus::Open => "open",
            ProjectStatus::Closed => "closed",
            ProjectStatus::Other(s) => s,
        }
    }

    pub fn is_open(&self) -> bool {
        matches!(self, ProjectStatus::Open)
    }
}

impl From<String> for ProjectStatus {
    fn from(s: String) -> Self {
        match s.as_str() {
            "open" => ProjectStatus::Open,
            "closed" => ProjectStatus::Closed,
            _ => ProjectStatus::Other(s),
        }
    }
}

impl Serialize for ProjectStatus {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

/// A project with the owning charity's organization joined in for display.
#[derive(Debug, Clone, Serialize)]
pub struct Project {
    pub id: ProjectId,
    pub charity_id: ProfileId,
    pub title: String,
    pub description: String,
    pub requirements: String,
    pub subject: String,
    pub status: ProjectStatus,
    pub charity_organization: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Input data for creating a project. New projects always start open.
#[derive(Debug, Clone)]
pub struct NewProject {
    pub charity_id: ProfileId,
    pub title: String,
    pub description: String,
    pub requirements: String,
    pub subject: String,
}
