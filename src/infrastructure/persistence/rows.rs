//! Row types shared by the PostgreSQL repositories.

use chrono::{DateTime, Utc};
use serde_json::json;
use uuid::Uuid;

use crate::domain::entities::{Profile, Project, Role};
use crate::error::AppError;

/// Columns selected for every project listing, with the owning charity's
/// organization joined in.
pub(crate) const PROJECT_COLUMNS: &str = r#"
    p.id, p.charity_id, p.title, p.description, p.requirements, p.subject,
    p.status, c.organization AS charity_organization, p.created_at
"#;

pub(crate) fn parse_role(raw: &str) -> Result<Role, AppError> {
    raw.parse().map_err(|e: crate::domain::entities::UnknownRole| {
        AppError::retrieval("Malformed profile row", json!({ "reason": e.to_string() }))
    })
}

#[derive(Debug, sqlx::FromRow)]
pub(crate) struct ProfileRow {
    pub id: Uuid,
    pub role: String,
    pub full_name: Option<String>,
    pub organization: Option<String>,
    pub subject: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl TryFrom<ProfileRow> for Profile {
    type Error = AppError;

    fn try_from(row: ProfileRow) -> Result<Self, Self::Error> {
        Ok(Profile {
            id: row.id,
            role: parse_role(&row.role)?,
            full_name: row.full_name,
            organization: row.organization,
            subject: row.subject,
            created_at: row.created_at,
        })
    }
}

#[derive(Debug, sqlx::FromRow)]
pub(crate) struct ProjectRow {
    pub id: Uuid,
    pub charity_id: Uuid,
    pub title: String,
    pub description: String,
    pub requirements: String,
    pub subject: String,
    pub status: String,
    pub charity_organization: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl From<ProjectRow> for Project {
    fn from(row: ProjectRow) -> Self {
        Project {
            id: row.id,
            charity_id: row.charity_id,
            title: row.title,
            description: row.description,
            requirements: row.requirements,
            subject: row.subject,
            status: row.status.into(),
            charity_organization: row.charity_organization,
            created_at: row.created_at,
        }
    }
}
