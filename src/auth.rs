use axum::{
    Extension,
    extract::{Request, State},
    middleware::Next,
    response::{IntoResponse, Response},
};

use crate::{
    config::AppConfig,
    guards::{GuardDecision, RoleGuard, RouteGuard},
    routes::table::RouteConfig,
    session::SessionState,
};

/// route_guard
///
/// Middleware wrapping the whole protected route group (the protected layout).
///
/// *Mechanism*: takes a read lock on the session, evaluates the RouteGuard against the
/// requested path and releases the lock before the nested route runs. A missing or
/// expired session short-circuits with a redirect to login carrying the requested path.
/// Because this layer is the outermost one on protected routes, the role guard never
/// runs for such a request.
pub async fn route_guard(
    State(session): State<SessionState>,
    request: Request,
    next: Next,
) -> Response {
    let decision = {
        let session = session.read().await;
        RouteGuard::default().check(&session, request.uri().path())
    };

    match decision {
        GuardDecision::Allow => next.run(request).await,
        GuardDecision::Redirect(navigation) => navigation.into_response(),
    }
}

/// role_guard
///
/// Middleware attached only to routes that declare `allowed_roles`. The route's own
/// table entry is attached to the request as an extension, so the guard needs no lookup.
/// Users without any allowed role are redirected to the configured unauthorized path.
///
/// The session gate is re-evaluated under the same read lock: a logout landing after
/// `route_guard` released its lock still redirects to login.
pub async fn role_guard(
    State(session): State<SessionState>,
    State(config): State<AppConfig>,
    Extension(route): Extension<&'static RouteConfig>,
    request: Request,
    next: Next,
) -> Response {
    let Some(allowed_roles) = route.role_set() else {
        return next.run(request).await;
    };

    let decision = {
        let session = session.read().await;
        RoleGuard::new(allowed_roles)
            .redirect_to(config.unauthorized_path.as_str())
            .check_behind(&RouteGuard::default(), &session, request.uri().path())
    };

    match decision {
        GuardDecision::Allow => next.run(request).await,
        GuardDecision::Redirect(navigation) => navigation.into_response(),
    }
}
