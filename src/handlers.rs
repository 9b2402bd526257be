use axum::{
    Extension, Json,
    extract::State,
    http::{StatusCode, Uri},
};

use crate::{
    AppState,
    menu::{self, NavItem},
    models::{LoginForm, LoginOutcome, LoginRequest, SessionView},
    navigation::Navigation,
    routes::table::{HOME_PATH, LOGIN_PATH, RouteConfig},
    session::SessionState,
};

const LOGIN_OK: &str = "Inicio de sesión exitoso";
const LOGIN_REJECTED: &str = "Usuario o contraseña incorrectos";
const LOGIN_FAILED: &str = "Error en el inicio de sesión";

// --- Page Handlers ---

/// render_view
///
/// Renders the page bound to the matched route. The route's table entry is attached as
/// an extension when the route is registered; any gating has already happened in the
/// layers around this handler.
pub async fn render_view(Extension(route): Extension<&'static RouteConfig>) -> Navigation {
    Navigation::render(route)
}

/// not_found
///
/// Catch-all for paths outside the route table. Not gated.
pub async fn not_found(uri: Uri) -> Navigation {
    Navigation::not_found(uri.path())
}

// --- Session API Handlers ---

/// login
///
/// Forwards the credentials to the backend and feeds its answer into the session store.
/// The backend's answer is always applied, so a rejected attempt also signs out any
/// previous user. On success the client is pointed back at the path it originally asked
/// for (`from`), or at the home page.
#[utoipa::path(
    post,
    path = "/api/login",
    request_body = LoginForm,
    responses(
        (status = 200, description = "Logged in", body = LoginOutcome),
        (status = 401, description = "Rejected credentials", body = LoginOutcome),
        (status = 502, description = "Backend unavailable", body = LoginOutcome)
    )
)]
pub async fn login(
    State(state): State<AppState>,
    Json(form): Json<LoginForm>,
) -> (StatusCode, Json<LoginOutcome>) {
    let credentials = LoginRequest {
        nombre: form.usuario,
        contrasena: form.contrasena,
    };

    let response = match state.backend.login(&credentials).await {
        Ok(response) => response,
        Err(e) => {
            tracing::error!(error = %e, "Login request failed");
            return failure(StatusCode::BAD_GATEWAY, LOGIN_FAILED);
        }
    };

    let mut session = state.session.write().await;
    if let Err(e) = session.set_auth(&response) {
        tracing::error!(error = %e, "Could not persist session");
        return failure(StatusCode::INTERNAL_SERVER_ERROR, LOGIN_FAILED);
    }

    if !response.success {
        tracing::info!(nombre = %credentials.nombre, "Login rejected");
        return failure(StatusCode::UNAUTHORIZED, LOGIN_REJECTED);
    }

    if !session.is_authenticated() {
        tracing::error!("Backend reported success without a token and user");
        return failure(StatusCode::BAD_GATEWAY, LOGIN_FAILED);
    }

    (
        StatusCode::OK,
        Json(LoginOutcome {
            success: true,
            message: LOGIN_OK.to_string(),
            redirect_to: Some(return_path(form.from.as_deref())),
        }),
    )
}

/// logout
///
/// Clears the session and navigates to the login screen.
#[utoipa::path(
    post,
    path = "/api/logout",
    responses((status = 303, description = "Redirect to login", body = Navigation))
)]
pub async fn logout(State(session): State<SessionState>) -> Navigation {
    session.write().await.logout()
}

/// get_session
///
/// The current session snapshot. Never fails: a signed-out shell reports
/// `authenticated: false`.
#[utoipa::path(
    get,
    path = "/api/session",
    responses((status = 200, description = "Session snapshot", body = SessionView))
)]
pub async fn get_session(State(session): State<SessionState>) -> Json<SessionView> {
    Json(session.read().await.view())
}

/// get_navigation
///
/// The header entries the current user may open.
#[utoipa::path(
    get,
    path = "/api/navigation",
    responses((status = 200, description = "Navigation menu", body = [NavItem]))
)]
pub async fn get_navigation(State(session): State<SessionState>) -> Json<Vec<NavItem>> {
    Json(menu::visible_items(&*session.read().await))
}

fn failure(status: StatusCode, message: &str) -> (StatusCode, Json<LoginOutcome>) {
    (
        status,
        Json(LoginOutcome {
            success: false,
            message: message.to_string(),
            redirect_to: None,
        }),
    )
}

/// return_path
///
/// Only same-origin absolute paths are honoured as a return target; anything else
/// (including the login page itself) falls back to home.
fn return_path(from: Option<&str>) -> String {
    match from {
        Some(path) if path.starts_with('/') && !path.starts_with("//") && path != LOGIN_PATH => {
            path.to_string()
        }
        _ => HOME_PATH.to_string(),
    }
}
