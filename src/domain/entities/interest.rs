//! Interest entity: a student's or professor's declared interest in a project.

use chrono::{DateTime, Utc};
use serde::Serialize;

use super::{ProfileId, Project, ProjectId, Role};
use crate::error::AppError;

/// A stored interest record. Unique per `(project_id, user_id)`.
#[derive(Debug, Clone, Serialize)]
pub struct Interest {
    pub id: i64,
    pub project_id: ProjectId,
    pub user_id: ProfileId,
    pub message: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct NewInterest {
    pub project_id: ProjectId,
    pub user_id: ProfileId,
    pub message: String,
}

/// Role and organization of the user behind an interest record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InterestedUser {
    pub role: Role,
    pub organization: Option<String>,
}

/// An interest on a project joined with the interested user's profile.
///
/// `profile` is `None` when the profile row is missing.
#[derive(Debug, Clone)]
pub struct InterestWithProfile {
    pub user_id: ProfileId,
    pub message: String,
    pub profile: Option<InterestedUser>,
}

/// An interest joined with the project it refers to, for dashboards.
#[derive(Debug, Clone)]
pub struct InterestWithProject {
    pub interest: Interest,
    pub project: Project,
}

/// Result of recording an interest.
///
/// A repeated declaration for the same project and user is an expected outcome,
/// not an error.
#[derive(Debug)]
pub enum InterestOutcome {
    Inserted(Interest),
    AlreadyExists,
    Failed(AppError),
}

impl InterestOutcome {
    pub fn is_inserted(&self) -> bool {
        matches!(self, InterestOutcome::Inserted(_))
    }
}
