use axum::{
    Router,
    extract::FromRef,
    http::HeaderName,
    middleware,
};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use tower::ServiceBuilder;
use tower_http::{
    cors::{Any, CorsLayer},
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    trace::{DefaultOnResponse, TraceLayer},
};
use tracing::{Level, Span};

// --- Module Structure ---

// Session core: durable storage, the session store and the two gates.
pub mod storage;
pub mod session;
pub mod guards;
pub mod navigation;
pub mod menu;

// Collaborators and ambient services.
pub mod backend;
pub mod config;
pub mod models;

// HTTP adapters.
pub mod auth;
pub mod handlers;
pub mod routes;
use routes::{api, protected, public};

// --- Public Re-exports ---

pub use backend::{AuthBackend, BackendState, HttpAuthBackend, MockAuthBackend};
pub use config::AppConfig;
pub use session::{SessionState, SessionStore};
pub use storage::{FileStorage, MemoryStorage, SessionStorage};

/// ApiDoc
///
/// OpenAPI document of the shell's JSON API, served at `/api-docs/openapi.json`.
#[derive(OpenApi)]
#[openapi(
    paths(
        handlers::login, handlers::logout, handlers::get_session, handlers::get_navigation
    ),
    components(
        schemas(
            models::LoginForm, models::LoginOutcome, models::SessionView, models::UserProfile,
            navigation::Navigation, navigation::LocationState, navigation::Location,
            routes::table::Page, menu::NavItem,
        )
    ),
    tags(
        (name = "creditos-console", description = "Academic credit console navigation shell")
    )
)]
struct ApiDoc;

/// AppState
///
/// Everything a request may need: the shared session context, the backend client and
/// the configuration. Cloned per request; the session itself sits behind a lock.
#[derive(Clone)]
pub struct AppState {
    pub session: SessionState,
    pub backend: BackendState,
    pub config: AppConfig,
}

// --- Axum FromRef Extractor Implementations ---

impl FromRef<AppState> for SessionState {
    fn from_ref(app_state: &AppState) -> SessionState {
        app_state.session.clone()
    }
}

impl FromRef<AppState> for BackendState {
    fn from_ref(app_state: &AppState) -> BackendState {
        app_state.backend.clone()
    }
}

impl FromRef<AppState> for AppConfig {
    fn from_ref(app_state: &AppState) -> AppConfig {
        app_state.config.clone()
    }
}

/// create_router
///
/// Composes the route table into the navigable application.
///
/// * Public pages and the JSON API are merged without gates.
/// * Protected pages are wrapped by the session gate first; role-restricted pages carry
///   their own role gate inside it, so an absent or expired session always ends at the
///   login page, never at the unauthorized page.
/// * Everything else falls through to the not-found view.
pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_methods(Any)
        .allow_origin(Any)
        .allow_headers(Any);

    let x_request_id = HeaderName::from_static("x-request-id");

    let base_router = Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .merge(api::api_routes())
        .merge(public::public_routes())
        .merge(
            protected::protected_routes(&state)
                .route_layer(middleware::from_fn_with_state(
                    state.clone(),
                    auth::route_guard,
                )),
        )
        .fallback(handlers::not_found)
        .with_state(state);

    base_router
        .layer(
            ServiceBuilder::new()
                .layer(SetRequestIdLayer::new(x_request_id.clone(), MakeRequestUuid))
                .layer(
                    TraceLayer::new_for_http()
                        .make_span_with(trace_span_logger)
                        .on_response(
                            DefaultOnResponse::new()
                                .level(Level::INFO)
                                .latency_unit(tower_http::LatencyUnit::Millis),
                        ),
                )
                .layer(PropagateRequestIdLayer::new(x_request_id)),
        )
        .layer(cors)
}

/// trace_span_logger
///
/// Span for every request, correlated by the `x-request-id` header.
fn trace_span_logger(request: &axum::http::Request<axum::body::Body>) -> Span {
    let request_id = request
        .headers()
        .get("x-request-id")
        .and_then(|value| value.to_str().ok())
        .unwrap_or("unknown");

    tracing::info_span!(
        "http_request",
        method = ?request.method(),
        uri = ?request.uri(),
        req_id = %request_id,
    )
}
