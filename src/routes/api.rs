use crate::{AppState, handlers};
use axum::{
    Router,
    routing::{get, post},
};

/// API Router Module
///
/// The shell's JSON endpoints. None of them is gated: the session snapshot and the
/// navigation menu describe the signed-out state too.
pub fn api_routes() -> Router<AppState> {
    Router::new()
        // GET /health
        // Liveness probe.
        .route("/health", get(|| async { "ok" }))
        // POST /api/login
        // Exchanges credentials for a session via the backend.
        .route("/api/login", post(handlers::login))
        // POST /api/logout
        // Clears the session; answers with a redirect to the login page.
        .route("/api/logout", post(handlers::logout))
        // GET /api/session
        .route("/api/session", get(handlers::get_session))
        // GET /api/navigation
        // Role-filtered header entries.
        .route("/api/navigation", get(handlers::get_navigation))
}
