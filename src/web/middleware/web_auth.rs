//! Cookie-based session middleware for the web pages.

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::{IntoResponse, Redirect, Response},
};

use crate::application::Notice;
use crate::state::AppState;
use crate::utils::cookies::find_cookie;
use crate::utils::deadline::within;
use crate::web::flash;

pub const SESSION_COOKIE: &str = "session_token";

/// Authenticates page requests from the `session_token` cookie.
///
/// On success the caller's [`crate::domain::identity::Identity`] is added to
/// the request extensions. A missing, unknown or revoked session redirects
/// to `/login`; so does an unreachable store, with a notice saying so.
pub async fn layer(State(st): State<AppState>, mut req: Request, next: Next) -> Response {
    let Some(token) = find_cookie(req.headers(), SESSION_COOKIE) else {
        return Redirect::to("/login").into_response();
    };

    match within(
        st.store_timeout,
        "authenticate",
        st.auth_service.authenticate(&token),
    )
    .await
    {
        Ok(identity) => {
            req.extensions_mut().insert(identity);
            next.run(req).await
        }
        Err(e) if e.is_retrieval() => {
            tracing::warn!(error = %e, "Session check failed");
            flash::redirect(
                "/login",
                Notice::error("Sign-in is temporarily unavailable. Please try again."),
                st.cookie_secure,
            )
        }
        Err(_) => Redirect::to("/login").into_response(),
    }
}
