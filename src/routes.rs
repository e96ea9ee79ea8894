//! Top-level router combining API and web routes.
//!
//! # Route Structure
//!
//! - `GET  /health`      - Store connectivity check (public)
//! - `/api/*`            - JSON API (Bearer session token)
//! - `/`, `/login`, `/logout` - Public pages
//! - `/dashboard`, `/projects`, `/create_project`, `/project/*` - Pages (session cookie)
//! - `/static/*`         - Static assets
//!
//! # Middleware
//!
//! - **Tracing** - Structured request/response logging
//! - **Rate limiting** - Per-IP token bucket (configurable for proxy deployments)
//! - **Authentication** - Bearer token (API) or session cookie (web)
//! - **Path normalization** - Trailing slash handling

use crate::api;
use crate::api::handlers::health_handler;
use crate::api::middleware::{auth, rate_limit, tracing};
use crate::state::AppState;
use crate::web;
use crate::web::middleware::web_auth;
use axum::routing::get;
use axum::{Router, middleware};
use tower::Layer;
use tower_http::normalize_path::{NormalizePath, NormalizePathLayer};
use tower_http::services::ServeDir;

/// Routes and authentication without rate limiting.
///
/// Rate limiting needs the peer address from `ConnectInfo`, which in-process
/// test clients do not provide; [`app_router`] adds it on top.
pub fn routes(state: AppState) -> Router {
    build(state, None)
}

/// Constructs the application router with all routes and middleware.
///
/// # Arguments
///
/// - `state` - shared application state injected into all handlers
/// - `behind_proxy` - when `true`, rate limiting reads client IP from
///   `X-Forwarded-For` / `X-Real-IP` headers instead of the peer socket address;
///   enable only when the service runs behind a trusted reverse proxy
pub fn app_router(state: AppState, behind_proxy: bool) -> NormalizePath<Router> {
    NormalizePathLayer::trim_trailing_slash().layer(build(state, Some(behind_proxy)))
}

fn build(state: AppState, rate_limit: Option<bool>) -> Router {
    let mut api_router = api::routes::protected_routes()
        .route_layer(middleware::from_fn_with_state(state.clone(), auth::layer));

    let mut web_protected = web::routes::protected_routes().route_layer(
        middleware::from_fn_with_state(state.clone(), web_auth::layer),
    );

    let mut web_public = web::routes::public_routes();

    if let Some(behind_proxy) = rate_limit {
        api_router = api_router.layer(rate_limit::secure_layer(behind_proxy));
        web_protected = web_protected.layer(rate_limit::secure_layer(behind_proxy));
        web_public = web_public.layer(rate_limit::layer(behind_proxy));
    }

    Router::new()
        .route("/health", get(health_handler))
        .nest("/api", api_router)
        .merge(web_protected)
        .merge(web_public)
        .nest_service("/static", ServeDir::new("static"))
        .with_state(state)
        .layer(tracing::layer())
}
