//! Sign-in and sign-out handlers.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::State,
    http::{HeaderMap, header::SET_COOKIE},
    response::{AppendHeaders, IntoResponse, Redirect, Response},
};
use serde::Deserialize;

use crate::application::Notice;
use crate::state::AppState;
use crate::utils::cookies::{build_cookie, expired_cookie, find_cookie};
use crate::utils::deadline::within;
use crate::web::flash;
use crate::web::middleware::web_auth::SESSION_COOKIE;
use crate::web::views::Nav;

/// Session cookie lifetime: 30 days. Revocation still takes effect at once.
const SESSION_MAX_AGE_SECS: u64 = 30 * 24 * 60 * 60;

#[derive(Template, WebTemplate)]
#[template(path = "login.html")]
pub struct LoginTemplate {
    pub nav: Nav,
    pub notices: Vec<Notice>,
}

#[derive(Debug, Default, Deserialize)]
pub struct LoginForm {
    #[serde(default)]
    pub token: String,
}

/// Renders the sign-in form.
///
/// # Endpoint
///
/// `GET /login`
///
/// Users paste the session token issued by `admin session issue`.
pub async fn login_handler(headers: HeaderMap) -> Response {
    let pending = flash::take(&headers);
    let consumed = pending.is_some();

    flash::render(
        LoginTemplate {
            nav: Nav::anonymous(),
            notices: pending.into_iter().collect(),
        },
        consumed,
    )
}

/// Validates a session token and stores it in the `session_token` cookie.
///
/// # Endpoint
///
/// `POST /login`
pub async fn login_submit_handler(
    State(state): State<AppState>,
    Form(form): Form<LoginForm>,
) -> Response {
    let token = form.token.trim();
    let secure = state.cookie_secure;

    match within(
        state.store_timeout,
        "authenticate",
        state.auth_service.authenticate(token),
    )
    .await
    {
        Ok(identity) => {
            tracing::info!(profile_id = %identity.profile_id, role = %identity.role, "Signed in");
            (
                AppendHeaders([
                    (
                        SET_COOKIE,
                        build_cookie(SESSION_COOKIE, token, Some(SESSION_MAX_AGE_SECS), secure),
                    ),
                    (
                        SET_COOKIE,
                        flash::cookie(&Notice::success("Login successful!"), secure),
                    ),
                ]),
                Redirect::to("/dashboard"),
            )
                .into_response()
        }
        Err(e) if e.is_retrieval() => flash::redirect(
            "/login",
            Notice::error("Sign-in is temporarily unavailable. Please try again."),
            secure,
        ),
        Err(_) => flash::redirect(
            "/login",
            Notice::error("Invalid or revoked session token."),
            secure,
        ),
    }
}

/// Revokes the current session and clears its cookie.
///
/// # Endpoint
///
/// `GET /logout`
pub async fn logout_handler(State(state): State<AppState>, headers: HeaderMap) -> Response {
    if let Some(token) = find_cookie(&headers, SESSION_COOKIE)
        && let Err(e) = within(
            state.store_timeout,
            "sign_out",
            state.auth_service.sign_out(&token),
        )
        .await
    {
        tracing::warn!(error = %e, "Failed to revoke session on logout");
    }

    (
        AppendHeaders([
            (SET_COOKIE, expired_cookie(SESSION_COOKIE)),
            (
                SET_COOKIE,
                flash::cookie(&Notice::info("Logged out successfully."), state.cookie_secure),
            ),
        ]),
        Redirect::to("/login"),
    )
        .into_response()
}
