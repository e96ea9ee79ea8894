//! Repository trait for project data access.

use crate::domain::entities::{NewProject, ProfileId, Project};
use crate::error::AppError;
use async_trait::async_trait;

/// Repository interface for charity projects.
///
/// Listed projects carry the owning charity's organization.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::PgProjectRepository`] - PostgreSQL implementation
/// - Test mocks available with `cfg(test)`
///
/// # Examples
///
/// See integration tests: `tests/repository_project.rs`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ProjectRepository: Send + Sync {
    /// Lists open projects, newest first.
    ///
    /// When `subject_filter` is given, only projects whose subject contains it
    /// (case-insensitive) are returned. The filter is matched literally.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Retrieval`] if the store is unreachable or the rows
    /// cannot be decoded.
    async fn list_open(&self, subject_filter: Option<String>) -> Result<Vec<Project>, AppError>;

    /// Lists all projects owned by a charity, regardless of status.
    async fn list_by_charity(&self, charity_id: ProfileId) -> Result<Vec<Project>, AppError>;

    /// Creates a new open project.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the charity profile does not exist.
    async fn create(&self, new_project: NewProject) -> Result<Project, AppError>;

    /// Counts open projects. Doubles as a connectivity probe.
    async fn count_open(&self) -> Result<i64, AppError>;
}
