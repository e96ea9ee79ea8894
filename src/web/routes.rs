//! Web page route configuration.

use crate::state::AppState;
use crate::web::handlers::{
    create_project_handler, create_project_submit_handler, dashboard_handler,
    express_interest_handler, index_handler, login_handler, login_submit_handler,
    logout_handler, projects_handler,
};
use axum::{
    Router,
    routing::{get, post},
};

/// Pages requiring a session.
///
/// Protected via [`crate::web::middleware::web_auth`].
///
/// # Endpoints
///
/// - `GET  /dashboard` - Role-dependent overview
/// - `GET  /projects` - Open projects with subject and sponsorship filters
/// - `GET  /create_project`, `POST /create_project` - Project form (charities)
/// - `POST /project/{project_id}/sponser` - Express interest
pub fn protected_routes() -> Router<AppState> {
    Router::new()
        .route("/dashboard", get(dashboard_handler))
        .route("/projects", get(projects_handler))
        .route(
            "/create_project",
            get(create_project_handler).post(create_project_submit_handler),
        )
        .route(
            "/project/{project_id}/sponser",
            post(express_interest_handler),
        )
}

/// Pages without authentication.
///
/// # Endpoints
///
/// - `GET  /` - Landing page
/// - `GET  /login`, `POST /login` - Session token sign-in
/// - `GET  /logout` - Sign out
pub fn public_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(index_handler))
        .route("/login", get(login_handler).post(login_submit_handler))
        .route("/logout", get(logout_handler))
}
