//! HTML template rendering handlers.

mod create_project;
mod dashboard;
mod index;
mod login;
mod projects;

pub use create_project::{create_project_handler, create_project_submit_handler};
pub use dashboard::dashboard_handler;
pub use index::index_handler;
pub use login::{login_handler, login_submit_handler, logout_handler};
pub use projects::{express_interest_handler, projects_handler};
