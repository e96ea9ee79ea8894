//! DTOs for expressing interest in a project.

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::domain::entities::Interest;

#[derive(Debug, Default, Deserialize, Validate)]
pub struct ExpressInterestRequest {
    #[validate(length(max = 2000))]
    #[serde(default)]
    pub message: Option<String>,
}

/// Outcome of an interest request.
///
/// `status` is `"created"` with the stored record, or `"already_exists"`.
#[derive(Debug, Serialize)]
pub struct InterestResponse {
    pub status: &'static str,
    pub message: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub interest: Option<Interest>,
}

impl InterestResponse {
    pub fn created(interest: Interest) -> Self {
        Self {
            status: "created",
            message: "Interest recorded.".to_string(),
            interest: Some(interest),
        }
    }

    pub fn already_exists() -> Self {
        Self {
            status: "already_exists",
            message: "You have already expressed interest in this project.".to_string(),
            interest: None,
        }
    }
}
