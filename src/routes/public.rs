use crate::{AppState, handlers, routes::table};
use axum::{Extension, Router, routing::get};

/// Public Router Module
///
/// Registers every table entry flagged `is_public`. No middleware is applied: these
/// pages must stay reachable by signed-out users, otherwise the login redirect would loop.
pub fn public_routes() -> Router<AppState> {
    table::public_routes().fold(Router::new(), |router, route| {
        let view = get(handlers::render_view).layer(Extension(route));
        route
            .paths()
            .fold(router, |router, path| router.route(&path, view.clone()))
    })
}
