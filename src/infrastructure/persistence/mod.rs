//! PostgreSQL repository implementations.
//!
//! Concrete implementations of the domain repository traits on top of a
//! shared `sqlx` pool.
//!
//! # Repositories
//!
//! - [`PgProfileRepository`] - Profiles and affiliations
//! - [`PgProjectRepository`] - Project listings and creation
//! - [`PgInterestRepository`] - Interests and sponsorship lookups
//! - [`PgSessionRepository`] - Session token storage and validation

pub mod pg_interest_repository;
pub mod pg_profile_repository;
pub mod pg_project_repository;
pub mod pg_session_repository;
mod rows;

pub use pg_interest_repository::PgInterestRepository;
pub use pg_profile_repository::PgProfileRepository;
pub use pg_project_repository::PgProjectRepository;
pub use pg_session_repository::PgSessionRepository;
