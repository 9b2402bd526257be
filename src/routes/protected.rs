use crate::{AppState, auth, handlers, routes::table};
use axum::{Extension, Router, middleware, routing::get};

/// Protected Router Module
///
/// Registers every table entry not flagged `is_public`. The caller wraps the returned
/// router in the session gate (`auth::route_guard`); this function only attaches the
/// per-route role gate. Each entry is also reachable with one trailing slash, so
/// `/creditos/` is gated exactly like `/creditos`.
///
/// Layer order per route, outermost first:
/// 1. `route_guard` (added by the caller with `route_layer`),
/// 2. the route's table entry as an `Extension`,
/// 3. `role_guard`, only when the entry declares `allowed_roles`,
/// 4. the page handler.
pub fn protected_routes(state: &AppState) -> Router<AppState> {
    table::protected_routes().fold(Router::new(), |router, route| {
        let view = get(handlers::render_view);
        let view = if route.allowed_roles.is_some() {
            view.route_layer(middleware::from_fn_with_state(
                state.clone(),
                auth::role_guard,
            ))
        } else {
            view
        };
        let view = view.layer(Extension(route));
        route
            .paths()
            .fold(router, |router, path| router.route(&path, view.clone()))
    })
}
