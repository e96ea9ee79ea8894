//! Repository trait for interest data access.

use crate::domain::entities::{
    InterestOutcome, InterestWithProfile, InterestWithProject, NewInterest, ProfileId, ProjectId,
};
use crate::error::AppError;
use async_trait::async_trait;

/// Repository interface for declared interests.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::PgInterestRepository`] - PostgreSQL implementation
/// - Test mocks available with `cfg(test)`
///
/// # Examples
///
/// See integration tests: `tests/repository_interest.rs`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait InterestRepository: Send + Sync {
    /// Lists the interests on one project, each joined with the interested
    /// user's role and organization.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Retrieval`] if the store is unreachable.
    async fn list_for_project(
        &self,
        project_id: ProjectId,
    ) -> Result<Vec<InterestWithProfile>, AppError>;

    /// Returns the subset of `project_ids` that have at least one interest from
    /// a professor whose organization equals `organization` exactly.
    ///
    /// Computed in a single join; order of the result is unspecified.
    async fn sponsored_project_ids(
        &self,
        organization: &str,
        project_ids: &[ProjectId],
    ) -> Result<Vec<ProjectId>, AppError>;

    /// Records an interest.
    ///
    /// A second insert for the same project and user yields
    /// [`InterestOutcome::AlreadyExists`] and leaves the first record intact.
    async fn insert(&self, new_interest: NewInterest) -> InterestOutcome;

    /// Lists a user's interests with their projects, newest first.
    async fn list_for_user(&self, user_id: ProfileId)
    -> Result<Vec<InterestWithProject>, AppError>;
}
