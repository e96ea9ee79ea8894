//! Repository trait for session tokens.

use crate::domain::entities::ProfileId;
use crate::domain::identity::Identity;
use crate::error::AppError;
use async_trait::async_trait;
use chrono::{DateTime, Utc};

/// A stored session. Only the token hash is persisted.
#[derive(Debug, Clone)]
pub struct Session {
    pub id: i64,
    pub profile_id: ProfileId,
    pub label: String,
    pub created_at: DateTime<Utc>,
    pub last_used_at: Option<DateTime<Utc>>,
    pub revoked_at: Option<DateTime<Utc>>,
}

/// Repository interface for session management.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::PgSessionRepository`] - PostgreSQL implementation
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SessionRepository: Send + Sync {
    /// Resolves an active session to the identity of its profile.
    ///
    /// # Returns
    ///
    /// - `Ok(Some(Identity))` if the hash belongs to a non-revoked session
    /// - `Ok(None)` otherwise
    async fn find_identity(&self, token_hash: &str) -> Result<Option<Identity>, AppError>;

    /// Updates the `last_used_at` timestamp for a session.
    async fn touch(&self, token_hash: &str) -> Result<(), AppError>;

    /// Stores a new session for a profile.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the profile does not exist.
    /// Returns [`AppError::Conflict`] if the hash already exists.
    async fn create(
        &self,
        profile_id: ProfileId,
        token_hash: &str,
        label: &str,
    ) -> Result<Session, AppError>;

    /// Lists all sessions of a profile.
    async fn list_for_profile(&self, profile_id: ProfileId) -> Result<Vec<Session>, AppError>;

    /// Revokes a session by id. Returns `false` if it was missing or already revoked.
    async fn revoke(&self, id: i64) -> Result<bool, AppError>;

    /// Revokes the session behind a token hash. Returns `false` if none was active.
    async fn revoke_by_hash(&self, token_hash: &str) -> Result<bool, AppError>;
}
