//! Project listing page and the interest form behind it.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Extension, Form,
    extract::{Path, Query, State},
    http::HeaderMap,
    response::Response,
};
use serde::Deserialize;

use crate::api::dto::projects::ProjectsQuery;
use crate::application::Notice;
use crate::domain::entities::{InterestOutcome, ProjectId};
use crate::domain::identity::Identity;
use crate::state::AppState;
use crate::web::flash;
use crate::web::views::{Nav, ProjectCard};

#[derive(Template, WebTemplate)]
#[template(path = "projects.html")]
pub struct ProjectsTemplate {
    pub nav: Nav,
    pub notices: Vec<Notice>,
    pub projects: Vec<ProjectCard>,
    pub subject: String,
    pub sponsored: bool,
    pub sponsored_applied: bool,
}

/// Renders open projects.
///
/// # Endpoint
///
/// `GET /projects?subject=<text>&sponsored=<bool>`
///
/// The sponsored filter only applies to students. Store failures leave the
/// page usable with a notice explaining what was skipped.
pub async fn projects_handler(
    State(state): State<AppState>,
    Extension(identity): Extension<Identity>,
    Query(query): Query<ProjectsQuery>,
    headers: HeaderMap,
) -> Response {
    let pending = flash::take(&headers);
    let consumed = pending.is_some();

    let listing = state
        .listing_service
        .list_projects(&identity, query.to_listing_request())
        .await;

    let mut notices: Vec<Notice> = pending.into_iter().collect();
    notices.extend(listing.notices);

    flash::render(
        ProjectsTemplate {
            nav: Nav::for_identity(&identity),
            notices,
            projects: listing.projects.iter().map(ProjectCard::from).collect(),
            subject: query.subject.clone().unwrap_or_default(),
            sponsored: query.sponsored_requested(),
            sponsored_applied: listing.sponsored_applied,
        },
        consumed,
    )
}

#[derive(Debug, Default, Deserialize)]
pub struct InterestForm {
    #[serde(default)]
    pub message: String,
}

/// Records interest in a project and returns to the listing.
///
/// # Endpoint
///
/// `POST /project/{project_id}/sponser`
pub async fn express_interest_handler(
    State(state): State<AppState>,
    Extension(identity): Extension<Identity>,
    Path(project_id): Path<String>,
    Form(form): Form<InterestForm>,
) -> Response {
    let secure = state.cookie_secure;

    let Ok(project_id) = project_id.parse::<ProjectId>() else {
        return flash::redirect("/projects", Notice::error("Project not found."), secure);
    };

    let notice = match state
        .interest_service
        .express_interest(&identity, project_id, Some(form.message))
        .await
    {
        Ok(InterestOutcome::Inserted(_)) => Notice::success("Interest expressed successfully!"),
        Ok(InterestOutcome::AlreadyExists) => {
            Notice::warning("You have already expressed interest in this project.")
        }
        Ok(InterestOutcome::Failed(e)) => Notice::error(format!("Error: {e}")),
        Err(e) => Notice::error(e.to_string()),
    };

    flash::redirect("/projects", notice, secure)
}
