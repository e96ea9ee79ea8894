//! Shared application state injected into every handler.

use std::sync::Arc;
use std::time::Duration;

use crate::application::services::{
    AffiliationService, AuthService, DashboardService, InterestService, ListingService,
    ProjectService, SponsorshipService, SponsorshipStrategy,
};
use crate::domain::repositories::{
    InterestRepository, ProfileRepository, ProjectRepository, SessionRepository,
};

pub type Projects = ProjectService<dyn ProjectRepository>;
pub type Listing = ListingService<dyn ProjectRepository, dyn ProfileRepository, dyn InterestRepository>;
pub type Interests = InterestService<dyn InterestRepository>;
pub type Dashboards = DashboardService<dyn ProjectRepository, dyn InterestRepository>;
pub type Auth = AuthService<dyn SessionRepository>;

/// The four store handles the services are built from.
#[derive(Clone)]
pub struct Repositories {
    pub profiles: Arc<dyn ProfileRepository>,
    pub projects: Arc<dyn ProjectRepository>,
    pub interests: Arc<dyn InterestRepository>,
    pub sessions: Arc<dyn SessionRepository>,
}

/// Tunables taken from [`crate::config::Config`].
#[derive(Debug, Clone)]
pub struct ServiceSettings {
    pub session_signing_secret: String,
    pub sponsorship_strategy: SponsorshipStrategy,
    pub sponsorship_concurrency: usize,
    pub store_timeout: Duration,
    pub cookie_secure: bool,
}

#[derive(Clone)]
pub struct AppState {
    pub project_service: Arc<Projects>,
    pub listing_service: Arc<Listing>,
    pub interest_service: Arc<Interests>,
    pub dashboard_service: Arc<Dashboards>,
    pub auth_service: Arc<Auth>,
    pub store_timeout: Duration,
    pub cookie_secure: bool,
}

impl AppState {
    /// Wires services over the given repositories.
    ///
    /// Each request builds nothing: the listing pipeline's components are
    /// shared, and all per-request data lives on the handler's stack.
    pub fn new(repositories: Repositories, settings: ServiceSettings) -> Self {
        let Repositories {
            profiles,
            projects,
            interests,
            sessions,
        } = repositories;
        let timeout = settings.store_timeout;

        let project_service = Arc::new(ProjectService::new(projects.clone(), timeout));
        let affiliation_service = Arc::new(AffiliationService::new(profiles, timeout));
        let sponsorship_service = Arc::new(SponsorshipService::new(
            interests.clone(),
            settings.sponsorship_strategy,
            settings.sponsorship_concurrency,
            timeout,
        ));

        let listing_service = Arc::new(ListingService::new(
            project_service.clone(),
            affiliation_service,
            sponsorship_service,
        ));
        let interest_service = Arc::new(InterestService::new(interests.clone(), timeout));
        let dashboard_service = Arc::new(DashboardService::new(projects, interests, timeout));
        let auth_service = Arc::new(AuthService::new(
            sessions,
            settings.session_signing_secret,
        ));

        Self {
            project_service,
            listing_service,
            interest_service,
            dashboard_service,
            auth_service,
            store_timeout: timeout,
            cookie_secure: settings.cookie_secure,
        }
    }
}
