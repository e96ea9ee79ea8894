//! Landing page handler.

use askama::Template;
use askama_web::WebTemplate;
use axum::{http::HeaderMap, response::Response};

use crate::application::Notice;
use crate::utils::cookies::find_cookie;
use crate::web::flash;
use crate::web::middleware::web_auth::SESSION_COOKIE;
use crate::web::views::Nav;

#[derive(Template, WebTemplate)]
#[template(path = "index.html")]
pub struct IndexTemplate {
    pub nav: Nav,
    pub notices: Vec<Notice>,
}

/// Renders the public landing page.
///
/// # Endpoint
///
/// `GET /`
pub async fn index_handler(headers: HeaderMap) -> Response {
    let pending = flash::take(&headers);
    let consumed = pending.is_some();

    let nav = Nav {
        signed_in: find_cookie(&headers, SESSION_COOKIE).is_some(),
        ..Nav::anonymous()
    };

    flash::render(
        IndexTemplate {
            nav,
            notices: pending.into_iter().collect(),
        },
        consumed,
    )
}
