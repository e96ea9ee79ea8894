//! Handlers for project listing and creation.

use axum::{
    Extension, Json,
    extract::{Query, State},
    http::StatusCode,
};
use validator::Validate;

use crate::api::dto::projects::{CreateProjectRequest, ProjectListResponse, ProjectsQuery};
use crate::domain::entities::Project;
use crate::domain::identity::Identity;
use crate::error::AppError;
use crate::state::AppState;

/// Lists open projects, optionally narrowed by subject and sponsorship.
///
/// # Endpoint
///
/// `GET /api/projects?subject=<text>&sponsored=<bool>`
///
/// Always answers 200. Store trouble shows up as an empty or unfiltered
/// list with entries in `notices`.
///
/// # Response
///
/// ```json
/// {
///   "count": 1,
///   "sponsored_applied": true,
///   "projects": [{ "id": "…", "title": "River survey", "subject": "biology", "status": "open", … }],
///   "notices": []
/// }
/// ```
pub async fn list_projects_handler(
    State(state): State<AppState>,
    Extension(identity): Extension<Identity>,
    Query(query): Query<ProjectsQuery>,
) -> Json<ProjectListResponse> {
    let listing = state
        .listing_service
        .list_projects(&identity, query.to_listing_request())
        .await;

    Json(listing.into())
}

/// Publishes a new project for the calling charity.
///
/// # Endpoint
///
/// `POST /api/projects`
///
/// # Errors
///
/// - **400** if title or subject is blank or a field is too long
/// - **403** if the caller is not a charity
pub async fn create_project_handler(
    State(state): State<AppState>,
    Extension(identity): Extension<Identity>,
    Json(payload): Json<CreateProjectRequest>,
) -> Result<(StatusCode, Json<Project>), AppError> {
    payload.validate()?;

    let project = state
        .project_service
        .create_project(&identity, payload.into())
        .await?;

    Ok((StatusCode::CREATED, Json(project)))
}
