//! Repository trait definitions for the domain layer.
//!
//! These traits abstract data access following the Repository pattern and are
//! implemented by concrete repositories in the infrastructure layer.
//!
//! # Architecture
//!
//! - Traits define the contract for data operations
//! - Implementations live in `crate::infrastructure::persistence`
//! - Mock implementations are auto-generated via `mockall` for testing
//!
//! # Available Repositories
//!
//! - [`ProfileRepository`] - User profiles and affiliations
//! - [`ProjectRepository`] - Charity projects
//! - [`InterestRepository`] - Declared interests and sponsorship lookups
//! - [`SessionRepository`] - Session token authentication

pub mod interest_repository;
pub mod profile_repository;
pub mod project_repository;
pub mod session_repository;

pub use interest_repository::InterestRepository;
pub use profile_repository::ProfileRepository;
pub use project_repository::ProjectRepository;
pub use session_repository::{Session, SessionRepository};

#[cfg(test)]
pub use interest_repository::MockInterestRepository;
#[cfg(test)]
pub use profile_repository::MockProfileRepository;
#[cfg(test)]
pub use project_repository::MockProjectRepository;
#[cfg(test)]
pub use session_repository::MockSessionRepository;
