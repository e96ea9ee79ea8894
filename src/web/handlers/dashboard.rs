//! Dashboard page handler.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Extension,
    extract::State,
    http::HeaderMap,
    response::Response,
};

use crate::application::Notice;
use crate::application::services::Dashboard;
use crate::domain::identity::Identity;
use crate::state::AppState;
use crate::web::flash;
use crate::web::views::{InterestCard, Nav, ProjectCard};

#[derive(Template, WebTemplate)]
#[template(path = "dashboard.html")]
pub struct DashboardTemplate {
    pub nav: Nav,
    pub notices: Vec<Notice>,
    pub projects: Vec<ProjectCard>,
    pub interests: Vec<InterestCard>,
}

/// Renders the role-dependent dashboard.
///
/// # Endpoint
///
/// `GET /dashboard`
///
/// Charities see their own projects; students and professors see the
/// projects they expressed interest in.
pub async fn dashboard_handler(
    State(state): State<AppState>,
    Extension(identity): Extension<Identity>,
    headers: HeaderMap,
) -> Response {
    let pending = flash::take(&headers);
    let consumed = pending.is_some();
    let mut notices: Vec<Notice> = pending.into_iter().collect();

    let (projects, interests) = match state.dashboard_service.dashboard(&identity).await {
        Ok(Dashboard::Charity { projects }) => {
            (projects.iter().map(ProjectCard::from).collect(), Vec::new())
        }
        Ok(Dashboard::Academic { interests }) => {
            (Vec::new(), interests.iter().map(InterestCard::from).collect())
        }
        Err(e) => {
            tracing::warn!(error = %e, profile_id = %identity.profile_id, "Dashboard degraded");
            notices.push(Notice::error(format!("Error loading dashboard: {e}")));
            (Vec::new(), Vec::new())
        }
    };

    flash::render(
        DashboardTemplate {
            nav: Nav::for_identity(&identity),
            notices,
            projects,
            interests,
        },
        consumed,
    )
}
