//! Server-rendered HTML pages.
//!
//! Uses Askama templates from `templates/`. Store trouble is shown as a
//! notice on the page rather than an error status.
//!
//! # Modules
//!
//! - [`flash`] - Notices carried across redirects
//! - [`handlers`] - Page handlers
//! - [`middleware`] - Session cookie authentication
//! - [`routes`] - Page route configuration
//! - [`views`] - Template-facing view models

pub mod flash;
pub mod handlers;
pub mod middleware;
pub mod routes;
pub mod views;
