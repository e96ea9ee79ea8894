//! Flat view models for templates.

use crate::domain::entities::{InterestWithProject, Project, Role};
use crate::domain::identity::Identity;

/// Navigation state shared by every page.
#[derive(Debug, Clone, Default)]
pub struct Nav {
    pub signed_in: bool,
    pub role: String,
    /// Organization shown next to the role; empty when unaffiliated.
    pub organization: String,
    pub is_charity: bool,
    pub is_academic: bool,
    pub is_student: bool,
}

impl Nav {
    pub fn anonymous() -> Self {
        Self::default()
    }

    pub fn for_identity(identity: &Identity) -> Self {
        Self {
            signed_in: true,
            role: identity.role.to_string(),
            organization: identity.organization.clone().unwrap_or_default(),
            is_charity: identity.is(Role::Charity),
            is_academic: identity.role.is_academic(),
            is_student: identity.is(Role::Student),
        }
    }
}

#[derive(Debug, Clone)]
pub struct ProjectCard {
    pub id: String,
    pub title: String,
    pub description: String,
    pub requirements: String,
    pub subject: String,
    pub status: String,
    pub organization: String,
    pub posted_on: String,
}

impl From<&Project> for ProjectCard {
    fn from(project: &Project) -> Self {
        Self {
            id: project.id.to_string(),
            title: project.title.clone(),
            description: project.description.clone(),
            requirements: project.requirements.clone(),
            subject: project.subject.clone(),
            status: project.status.as_str().to_string(),
            organization: project
                .charity_organization
                .clone()
                .filter(|o| !o.is_empty())
                .unwrap_or_else(|| "Unknown organization".to_string()),
            posted_on: project.created_at.format("%Y-%m-%d").to_string(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct InterestCard {
    pub project: ProjectCard,
    pub message: String,
    pub sent_on: String,
}

impl From<&InterestWithProject> for InterestCard {
    fn from(item: &InterestWithProject) -> Self {
        Self {
            project: ProjectCard::from(&item.project),
            message: item.interest.message.clone(),
            sent_on: item.interest.created_at.format("%Y-%m-%d").to_string(),
        }
    }
}
