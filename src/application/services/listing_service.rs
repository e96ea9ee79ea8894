//! The project listing pipeline: lister, affiliation resolver, sponsorship matcher.

use serde::Serialize;
use std::sync::Arc;

use super::{AffiliationService, ProjectService, SponsorshipService};
use crate::application::notice::Notice;
use crate::domain::entities::{Project, Role};
use crate::domain::identity::Identity;
use crate::domain::repositories::{InterestRepository, ProfileRepository, ProjectRepository};

/// What the caller asked to see.
#[derive(Debug, Clone, Default)]
pub struct ListingRequest {
    pub subject: Option<String>,
    pub sponsored: bool,
}

/// A listing ready for presentation.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ProjectListing {
    pub projects: Vec<Project>,
    /// True when the result was narrowed to projects sponsored by the
    /// requester's organization.
    pub sponsored_applied: bool,
    pub notices: Vec<Notice>,
}

impl ProjectListing {
    fn unfiltered(projects: Vec<Project>) -> Self {
        Self {
            projects,
            ..Self::default()
        }
    }
}

/// Runs one listing request end to end.
///
/// Never fails: store problems degrade the listing and add a notice.
///
/// | Failure                   | Result                                  |
/// |---------------------------|-----------------------------------------|
/// | project lister            | empty list + error notice               |
/// | affiliation resolver      | unfiltered list + warning notice        |
/// | batched sponsorship query | unfiltered list + warning notice        |
/// | single interest lookup    | that project excluded + warning notice  |
pub struct ListingService<P, F, I>
where
    P: ProjectRepository + ?Sized,
    F: ProfileRepository + ?Sized,
    I: InterestRepository + ?Sized,
{
    projects: Arc<ProjectService<P>>,
    affiliation: Arc<AffiliationService<F>>,
    sponsorship: Arc<SponsorshipService<I>>,
}

impl<P, F, I> ListingService<P, F, I>
where
    P: ProjectRepository + ?Sized,
    F: ProfileRepository + ?Sized,
    I: InterestRepository + ?Sized,
{
    pub fn new(
        projects: Arc<ProjectService<P>>,
        affiliation: Arc<AffiliationService<F>>,
        sponsorship: Arc<SponsorshipService<I>>,
    ) -> Self {
        Self {
            projects,
            affiliation,
            sponsorship,
        }
    }

    /// Lists open projects for `identity`.
    ///
    /// The sponsored flag only takes effect for students; other roles get the
    /// plain listing.
    pub async fn list_projects(&self, identity: &Identity, request: ListingRequest) -> ProjectListing {
        let candidates = match self
            .projects
            .list_open_projects(request.subject.as_deref())
            .await
        {
            Ok(projects) => projects,
            Err(e) => {
                tracing::warn!(error = %e, "Project lister failed, rendering empty listing");
                return ProjectListing {
                    notices: vec![Notice::error(format!("Error fetching projects: {e}"))],
                    ..ProjectListing::default()
                };
            }
        };

        if !request.sponsored || !identity.is(Role::Student) {
            return ProjectListing::unfiltered(candidates);
        }

        let organization = match self
            .affiliation
            .resolve_organization(identity.profile_id)
            .await
        {
            Ok(org) => org,
            Err(e) => {
                tracing::warn!(user_id = %identity.profile_id, error = %e, "Affiliation lookup failed, skipping sponsorship filter");
                let mut listing = ProjectListing::unfiltered(candidates);
                listing.notices.push(Notice::warning(
                    "Could not check your university right now, showing all open projects.",
                ));
                return listing;
            }
        };

        let total = candidates.len();
        match self
            .sponsorship
            .filter(&candidates, organization.as_deref())
            .await
        {
            Ok(result) => {
                tracing::debug!(
                    total,
                    sponsored = result.projects.len(),
                    unchecked = result.unchecked,
                    strategy = %self.sponsorship.strategy(),
                    "Sponsorship filter applied"
                );

                let mut notices = Vec::new();
                if result.unchecked > 0 {
                    notices.push(Notice::warning(format!(
                        "{} project(s) could not be checked for sponsorship and are not shown.",
                        result.unchecked
                    )));
                }

                ProjectListing {
                    projects: result.projects,
                    sponsored_applied: true,
                    notices,
                }
            }
            Err(e) => {
                tracing::warn!(error = %e, "Sponsorship filter failed, showing unfiltered listing");
                let mut listing = ProjectListing::unfiltered(candidates);
                listing.notices.push(Notice::warning(
                    "Could not check sponsorships right now, showing all open projects.",
                ));
                listing
            }
        }
    }
}
