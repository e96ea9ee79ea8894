//! Project creation form for charities.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Extension, Form,
    extract::State,
    http::HeaderMap,
    response::Response,
};
use serde::Deserialize;

use crate::application::Notice;
use crate::application::services::ProjectDraft;
use crate::domain::entities::Role;
use crate::domain::identity::Identity;
use crate::error::AppError;
use crate::state::AppState;
use crate::web::flash;
use crate::web::views::Nav;

const CHARITIES_ONLY: &str = "Only charities can create projects.";

#[derive(Template, WebTemplate)]
#[template(path = "create_project.html")]
pub struct CreateProjectTemplate {
    pub nav: Nav,
    pub notices: Vec<Notice>,
    pub form: ProjectForm,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProjectForm {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub requirements: String,
    #[serde(default)]
    pub subject: String,
}

impl ProjectForm {
    fn to_draft(&self) -> ProjectDraft {
        let optional = |s: &str| Some(s.to_string()).filter(|s| !s.trim().is_empty());
        ProjectDraft {
            title: self.title.clone(),
            description: optional(&self.description),
            requirements: optional(&self.requirements),
            subject: self.subject.clone(),
        }
    }
}

/// Renders the empty creation form.
///
/// # Endpoint
///
/// `GET /create_project`
pub async fn create_project_handler(
    State(state): State<AppState>,
    Extension(identity): Extension<Identity>,
    headers: HeaderMap,
) -> Response {
    if !identity.is(Role::Charity) {
        return flash::redirect(
            "/dashboard",
            Notice::error(CHARITIES_ONLY),
            state.cookie_secure,
        );
    }

    let pending = flash::take(&headers);
    let consumed = pending.is_some();

    flash::render(
        CreateProjectTemplate {
            nav: Nav::for_identity(&identity),
            notices: pending.into_iter().collect(),
            form: ProjectForm::default(),
        },
        consumed,
    )
}

/// Publishes the submitted project.
///
/// # Endpoint
///
/// `POST /create_project`
///
/// On success redirects to the dashboard; on failure the form is shown
/// again with the entered values and an error notice.
pub async fn create_project_submit_handler(
    State(state): State<AppState>,
    Extension(identity): Extension<Identity>,
    Form(form): Form<ProjectForm>,
) -> Response {
    let secure = state.cookie_secure;

    match state
        .project_service
        .create_project(&identity, form.to_draft())
        .await
    {
        Ok(_) => flash::redirect(
            "/dashboard",
            Notice::success("Project created successfully!"),
            secure,
        ),
        Err(AppError::Forbidden { .. }) => {
            flash::redirect("/dashboard", Notice::error(CHARITIES_ONLY), secure)
        }
        Err(e) => flash::render(
            CreateProjectTemplate {
                nav: Nav::for_identity(&identity),
                notices: vec![Notice::error(format!("Error creating project: {e}"))],
                form,
            },
            false,
        ),
    }
}
