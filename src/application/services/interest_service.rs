//! Recording interests in projects.

use serde_json::json;
use std::sync::Arc;
use std::time::Duration;

use crate::domain::entities::{InterestOutcome, NewInterest, ProjectId};
use crate::domain::identity::Identity;
use crate::domain::repositories::InterestRepository;
use crate::error::AppError;
use crate::utils::deadline::within;

pub const MAX_MESSAGE_LEN: usize = 2000;

/// Service for students and professors declaring interest in a project.
pub struct InterestService<R: InterestRepository + ?Sized> {
    repository: Arc<R>,
    store_timeout: Duration,
}

impl<R: InterestRepository + ?Sized> InterestService<R> {
    pub fn new(repository: Arc<R>, store_timeout: Duration) -> Self {
        Self {
            repository,
            store_timeout,
        }
    }

    /// Records the caller's interest in a project.
    ///
    /// Store results come back as an [`InterestOutcome`]; a repeated
    /// declaration is [`InterestOutcome::AlreadyExists`], not an error.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Forbidden`] if the caller is a charity.
    /// Returns [`AppError::Validation`] if the message is too long.
    pub async fn express_interest(
        &self,
        identity: &Identity,
        project_id: ProjectId,
        message: Option<String>,
    ) -> Result<InterestOutcome, AppError> {
        if !identity.role.is_academic() {
            return Err(AppError::forbidden(
                "Only students and professors can express interest.",
                json!({ "role": identity.role }),
            ));
        }

        let message = message.unwrap_or_default();
        if message.chars().count() > MAX_MESSAGE_LEN {
            return Err(AppError::bad_request(
                "message is too long",
                json!({ "field": "message", "max_length": MAX_MESSAGE_LEN }),
            ));
        }

        let new_interest = NewInterest {
            project_id,
            user_id: identity.profile_id,
            message,
        };

        let outcome = match within(self.store_timeout, "insert_interest", async {
            Ok(self.repository.insert(new_interest).await)
        })
        .await
        {
            Ok(outcome) => outcome,
            Err(e) => InterestOutcome::Failed(e),
        };

        match &outcome {
            InterestOutcome::Inserted(interest) => {
                tracing::info!(%project_id, user_id = %interest.user_id, "Interest recorded")
            }
            InterestOutcome::AlreadyExists => {
                tracing::info!(%project_id, user_id = %identity.profile_id, "Interest already recorded")
            }
            InterestOutcome::Failed(e) => {
                tracing::warn!(%project_id, user_id = %identity.profile_id, error = %e, "Failed to record interest")
            }
        }

        Ok(outcome)
    }
}
