//! Session token authentication.

use hmac::{Hmac, Mac};
use rand::{Rng, distr::Alphanumeric};
use sha2::Sha256;
use std::sync::Arc;

use crate::domain::entities::ProfileId;
use crate::domain::identity::Identity;
use crate::domain::repositories::{Session, SessionRepository};
use crate::error::AppError;
use serde_json::json;

type HmacSha256 = Hmac<Sha256>;

/// Length of freshly issued session tokens.
pub const TOKEN_LEN: usize = 48;

/// Resolves session tokens to identities.
///
/// Tokens are hashed with HMAC-SHA256 keyed by `signing_secret` before
/// storage and lookup; the raw token exists only on the client.
pub struct AuthService<R: SessionRepository + ?Sized> {
    repository: Arc<R>,
    signing_secret: String,
}

impl<R: SessionRepository + ?Sized> AuthService<R> {
    pub fn new(repository: Arc<R>, signing_secret: String) -> Self {
        Self {
            repository,
            signing_secret,
        }
    }

    /// Returns the 64-character hex MAC of a raw token.
    pub fn hash_token(&self, token: &str) -> Result<String, AppError> {
        let mut mac = HmacSha256::new_from_slice(self.signing_secret.as_bytes()).map_err(|e| {
            AppError::internal("Invalid signing secret", json!({ "reason": e.to_string() }))
        })?;
        mac.update(token.as_bytes());
        Ok(hex::encode(mac.finalize().into_bytes()))
    }

    /// Resolves a raw token to the caller's identity.
    ///
    /// A successful lookup refreshes `last_used_at`; failure to do so is
    /// logged and otherwise ignored.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Unauthorized`] if the token is empty, unknown or
    /// revoked.
    pub async fn authenticate(&self, token: &str) -> Result<Identity, AppError> {
        if token.trim().is_empty() {
            return Err(AppError::unauthorized(
                "Unauthorized",
                json!({ "reason": "Missing session token" }),
            ));
        }

        let token_hash = self.hash_token(token)?;

        let identity = self
            .repository
            .find_identity(&token_hash)
            .await?
            .ok_or_else(|| {
                AppError::unauthorized(
                    "Unauthorized",
                    json!({ "reason": "Invalid or revoked session" }),
                )
            })?;

        if let Err(e) = self.repository.touch(&token_hash).await {
            tracing::debug!(error = %e, "Failed to update session last_used_at");
        }

        Ok(identity)
    }

    /// Creates a session for a profile and returns the raw token.
    ///
    /// The token is shown once; only its hash is kept.
    pub async fn issue_session(
        &self,
        profile_id: ProfileId,
        label: &str,
    ) -> Result<(String, Session), AppError> {
        let token = generate_token();
        let token_hash = self.hash_token(&token)?;
        let session = self.repository.create(profile_id, &token_hash, label).await?;

        tracing::info!(%profile_id, session_id = session.id, "Session issued");
        Ok((token, session))
    }

    /// Revokes the session behind a raw token. Unknown tokens are not an error.
    pub async fn sign_out(&self, token: &str) -> Result<bool, AppError> {
        let token_hash = self.hash_token(token)?;
        self.repository.revoke_by_hash(&token_hash).await
    }
}

fn generate_token() -> String {
    rand::rng()
        .sample_iter(&Alphanumeric)
        .take(TOKEN_LEN)
        .map(char::from)
        .collect()
}
