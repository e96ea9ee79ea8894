//! Handler for expressing interest in a project.

use axum::{
    Extension, Json,
    extract::{Path, State},
    http::StatusCode,
};
use validator::Validate;

use crate::api::dto::interests::{ExpressInterestRequest, InterestResponse};
use crate::domain::entities::{InterestOutcome, ProjectId};
use crate::domain::identity::Identity;
use crate::error::AppError;
use crate::state::AppState;

/// Records the caller's interest in a project.
///
/// # Endpoint
///
/// `POST /api/projects/{id}/interests`
///
/// # Response Codes
///
/// - **201 Created**: interest recorded
/// - **200 OK**: `"status": "already_exists"`, the earlier record is kept
/// - **403 Forbidden**: caller is a charity
/// - **404 Not Found**: no such project
pub async fn express_interest_handler(
    State(state): State<AppState>,
    Extension(identity): Extension<Identity>,
    Path(project_id): Path<ProjectId>,
    Json(payload): Json<ExpressInterestRequest>,
) -> Result<(StatusCode, Json<InterestResponse>), AppError> {
    payload.validate()?;

    let outcome = state
        .interest_service
        .express_interest(&identity, project_id, payload.message)
        .await?;

    match outcome {
        InterestOutcome::Inserted(interest) => {
            Ok((StatusCode::CREATED, Json(InterestResponse::created(interest))))
        }
        InterestOutcome::AlreadyExists => {
            Ok((StatusCode::OK, Json(InterestResponse::already_exists())))
        }
        InterestOutcome::Failed(e) => Err(e),
    }
}
