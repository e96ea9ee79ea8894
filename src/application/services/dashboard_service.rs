//! Role-dependent dashboard data.

use std::sync::Arc;
use std::time::Duration;

use crate::domain::entities::{InterestWithProject, Project, Role};
use crate::domain::identity::Identity;
use crate::domain::repositories::{InterestRepository, ProjectRepository};
use crate::error::AppError;
use crate::utils::deadline::within;

/// What the dashboard shows for a given role.
#[derive(Debug, Clone)]
pub enum Dashboard {
    /// A charity's own projects, any status.
    Charity { projects: Vec<Project> },
    /// A student's or professor's declared interests.
    Academic { interests: Vec<InterestWithProject> },
}

pub struct DashboardService<P, I>
where
    P: ProjectRepository + ?Sized,
    I: InterestRepository + ?Sized,
{
    projects: Arc<P>,
    interests: Arc<I>,
    store_timeout: Duration,
}

impl<P, I> DashboardService<P, I>
where
    P: ProjectRepository + ?Sized,
    I: InterestRepository + ?Sized,
{
    pub fn new(projects: Arc<P>, interests: Arc<I>, store_timeout: Duration) -> Self {
        Self {
            projects,
            interests,
            store_timeout,
        }
    }

    /// Loads the dashboard for the caller's role.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Retrieval`] if the store is unreachable or too slow.
    pub async fn dashboard(&self, identity: &Identity) -> Result<Dashboard, AppError> {
        match identity.role {
            Role::Charity => {
                let projects = within(
                    self.store_timeout,
                    "dashboard_projects",
                    self.projects.list_by_charity(identity.profile_id),
                )
                .await?;
                Ok(Dashboard::Charity { projects })
            }
            Role::Student | Role::Professor => {
                let interests = within(
                    self.store_timeout,
                    "dashboard_interests",
                    self.interests.list_for_user(identity.profile_id),
                )
                .await?;
                Ok(Dashboard::Academic { interests })
            }
        }
    }
}
