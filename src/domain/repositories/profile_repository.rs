//! Repository trait for profile data access.

use crate::domain::entities::{NewProfile, Profile, ProfileId};
use crate::error::AppError;
use async_trait::async_trait;

/// Repository interface for user profiles.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::PgProfileRepository`] - PostgreSQL implementation
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ProfileRepository: Send + Sync {
    /// Finds a profile by id.
    ///
    /// # Returns
    ///
    /// - `Ok(Some(Profile))` if found
    /// - `Ok(None)` if not found
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Retrieval`] if the store is unreachable.
    async fn find_by_id(&self, id: ProfileId) -> Result<Option<Profile>, AppError>;

    /// Creates a profile. Used by the admin CLI in place of the identity
    /// provider's sign-up hook.
    async fn create(&self, new_profile: NewProfile) -> Result<Profile, AppError>;

    /// Lists all profiles, newest first.
    async fn list(&self) -> Result<Vec<Profile>, AppError>;
}
