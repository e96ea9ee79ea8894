//! Core domain entities of the marketplace.
//!
//! - [`Profile`] - A user with a role and an optional organization
//! - [`Project`] - A charity's project offer
//! - [`Interest`] - A declared interest in a project
//!
//! Entities follow the "New Type" pattern with separate structs for creation
//! (`NewProfile`, `NewProject`, `NewInterest`). The data store owns all of
//! them; the service only holds transient copies.

pub mod interest;
pub mod profile;
pub mod project;

pub use interest::{
    Interest, InterestOutcome, InterestWithProfile, InterestWithProject, InterestedUser,
    NewInterest,
};
pub use profile::{NewProfile, Profile, ProfileId, Role, UnknownRole};
pub use project::{NewProject, Project, ProjectId, ProjectStatus};
