//! Requester organization lookup.

use std::sync::Arc;
use std::time::Duration;

use crate::domain::entities::ProfileId;
use crate::domain::repositories::ProfileRepository;
use crate::error::AppError;
use crate::utils::deadline::within;

/// Resolves the organization a user is affiliated with.
pub struct AffiliationService<R: ProfileRepository + ?Sized> {
    repository: Arc<R>,
    store_timeout: Duration,
}

impl<R: ProfileRepository + ?Sized> AffiliationService<R> {
    pub fn new(repository: Arc<R>, store_timeout: Duration) -> Self {
        Self {
            repository,
            store_timeout,
        }
    }

    /// Returns the user's organization as stored, or `None` if the profile is
    /// missing or has no organization.
    ///
    /// The value is not trimmed or normalized.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Retrieval`] if the store is unreachable or too slow.
    pub async fn resolve_organization(
        &self,
        user_id: ProfileId,
    ) -> Result<Option<String>, AppError> {
        let profile = within(
            self.store_timeout,
            "resolve_organization",
            self.repository.find_by_id(user_id),
        )
        .await?;

        match profile {
            Some(profile) => Ok(profile.affiliation().map(str::to_string)),
            None => {
                tracing::debug!(%user_id, "No profile for user, treating as unaffiliated");
                Ok(None)
            }
        }
    }
}
