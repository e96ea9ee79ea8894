//! DTOs for project listing and creation.

use serde::{Deserialize, Serialize};
use serde_with::{NoneAsEmptyString, serde_as};
use validator::Validate;

use crate::application::Notice;
use crate::application::services::{ListingRequest, ProjectDraft, ProjectListing};
use crate::domain::entities::Project;

/// Query string of a listing request, shared by the JSON API and the web page.
///
/// `?subject=` with an empty value means no subject filter.
#[serde_as]
#[derive(Debug, Default, Deserialize)]
pub struct ProjectsQuery {
    #[serde_as(as = "NoneAsEmptyString")]
    #[serde(default)]
    pub subject: Option<String>,

    #[serde(default)]
    pub sponsored: Option<String>,
}

impl ProjectsQuery {
    pub fn sponsored_requested(&self) -> bool {
        parse_flag(self.sponsored.as_deref())
    }

    pub fn to_listing_request(&self) -> ListingRequest {
        ListingRequest {
            subject: self.subject.clone(),
            sponsored: self.sponsored_requested(),
        }
    }
}

/// Interprets a query flag.
///
/// Absent or empty is false, as are `false`, `0`, `off` and `no` in any case.
/// Any other value, `?sponsored=true` included, is true.
pub fn parse_flag(raw: Option<&str>) -> bool {
    match raw.map(str::trim) {
        None | Some("") => false,
        Some(v) => !["false", "0", "off", "no"]
            .iter()
            .any(|f| v.eq_ignore_ascii_case(f)),
    }
}

#[derive(Debug, Serialize)]
pub struct ProjectListResponse {
    pub count: usize,
    pub sponsored_applied: bool,
    pub projects: Vec<Project>,
    pub notices: Vec<Notice>,
}

impl From<ProjectListing> for ProjectListResponse {
    fn from(listing: ProjectListing) -> Self {
        Self {
            count: listing.projects.len(),
            sponsored_applied: listing.sponsored_applied,
            projects: listing.projects,
            notices: listing.notices,
        }
    }
}

/// Body of `POST /api/projects`.
#[derive(Debug, Deserialize, Validate)]
pub struct CreateProjectRequest {
    #[validate(length(min = 1, max = 200))]
    pub title: String,

    #[validate(length(max = 5000))]
    pub description: Option<String>,

    #[validate(length(max = 5000))]
    pub requirements: Option<String>,

    #[validate(length(min = 1, max = 200))]
    pub subject: String,
}

impl From<CreateProjectRequest> for ProjectDraft {
    fn from(req: CreateProjectRequest) -> Self {
        ProjectDraft {
            title: req.title,
            description: req.description,
            requirements: req.requirements,
            subject: req.subject,
        }
    }
}
