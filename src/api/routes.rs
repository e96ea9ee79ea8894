//! API route configuration.
//!
//! All API endpoints require Bearer session authentication via
//! [`crate::api::middleware::auth`].

use crate::api::handlers::{
    create_project_handler, express_interest_handler, list_projects_handler,
};
use crate::state::AppState;
use axum::{
    Router,
    routing::{get, post},
};

/// All API routes, protected by Bearer authentication.
///
/// # Endpoints
///
/// - `GET  /projects`                - Listing with subject and sponsorship filters
/// - `POST /projects`                - Publish a project (charities)
/// - `POST /projects/{id}/interests` - Express interest (students, professors)
pub fn protected_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/projects",
            get(list_projects_handler).post(create_project_handler),
        )
        .route("/projects/{id}/interests", post(express_interest_handler))
}
