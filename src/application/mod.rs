//! Application layer services implementing business logic.
//!
//! This layer orchestrates domain operations by coordinating repository calls,
//! role checks, and degradation rules. Services consume repository traits and
//! provide a clean API for HTTP handlers.
//!
//! # Available Services
//!
//! - [`services::project_service::ProjectService`] - Project listing and publishing
//! - [`services::affiliation_service::AffiliationService`] - Requester organization lookup
//! - [`services::sponsorship_service::SponsorshipService`] - Sponsorship filtering
//! - [`services::listing_service::ListingService`] - The full listing pipeline
//! - [`services::interest_service::InterestService`] - Recording interests
//! - [`services::dashboard_service::DashboardService`] - Role-dependent dashboards
//! - [`services::auth_service::AuthService`] - Session token authentication

pub mod notice;
pub mod services;

pub use notice::{Notice, NoticeLevel};
