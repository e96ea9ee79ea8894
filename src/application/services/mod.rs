//! Application services.
//!
//! Each service owns one use case and talks to the store only through the
//! repository traits in [`crate::domain::repositories`], with every call
//! bounded by the configured store timeout.

pub mod affiliation_service;
pub mod auth_service;
pub mod dashboard_service;
pub mod interest_service;
pub mod listing_service;
pub mod project_service;
pub mod sponsorship_service;

pub use affiliation_service::AffiliationService;
pub use auth_service::AuthService;
pub use dashboard_service::{Dashboard, DashboardService};
pub use interest_service::InterestService;
pub use listing_service::{ListingRequest, ListingService, ProjectListing};
pub use project_service::{ProjectDraft, ProjectService};
pub use sponsorship_service::{SponsorshipResult, SponsorshipService, SponsorshipStrategy};
