//! HTTP request handlers for API endpoints.
//!
//! Each handler module corresponds to a logical grouping of endpoints.

pub mod health;
pub mod interests;
pub mod projects;

pub use health::health_handler;
pub use interests::express_interest_handler;
pub use projects::{create_project_handler, list_projects_handler};
