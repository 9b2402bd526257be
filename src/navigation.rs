use axum::{
    Json,
    http::{HeaderValue, StatusCode, header},
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};
use ts_rs::TS;
use utoipa::ToSchema;

use crate::routes::table::{Page, RouteConfig};

/// Location
///
/// The part of a requested location the login screen needs to send the user back.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS, ToSchema)]
#[ts(export)]
pub struct Location {
    pub pathname: String,
}

/// LocationState
///
/// State attached to a redirect. `from` is the location the user originally asked for.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS, ToSchema)]
#[ts(export)]
pub struct LocationState {
    pub from: Location,
}

/// Navigation
///
/// The outcome of resolving a path, handed to the rendering layer as JSON.
///
/// * `Render`: show `page` for `path`.
/// * `Redirect`: go to `to`; `replace` means the current history entry is replaced.
/// * `NotFound`: no route matched `path`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS, ToSchema)]
#[serde(tag = "kind", rename_all = "snake_case")]
#[ts(export)]
pub enum Navigation {
    Render {
        page: Page,
        path: String,
    },
    Redirect {
        to: String,
        replace: bool,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        state: Option<LocationState>,
    },
    NotFound {
        path: String,
    },
}

impl Navigation {
    pub fn render(route: &RouteConfig) -> Self {
        Navigation::Render {
            page: route.page,
            path: route.path.to_string(),
        }
    }

    /// A plain replacing redirect with no captured origin.
    pub fn redirect(to: &str) -> Self {
        Navigation::Redirect {
            to: to.to_string(),
            replace: true,
            state: None,
        }
    }

    /// A replacing redirect that remembers where the user was heading.
    pub fn redirect_from(to: &str, from: &str) -> Self {
        Navigation::Redirect {
            to: to.to_string(),
            replace: true,
            state: Some(LocationState {
                from: Location {
                    pathname: from.to_string(),
                },
            }),
        }
    }

    pub fn not_found(path: &str) -> Self {
        Navigation::NotFound {
            path: path.to_string(),
        }
    }

    /// The redirect target, if this is a redirect.
    pub fn target(&self) -> Option<&str> {
        match self {
            Navigation::Redirect { to, .. } => Some(to),
            _ => None,
        }
    }
}

/// Render → 200, Redirect → 303 with `Location`, NotFound → 404. The descriptor is
/// always in the body so the rendering layer never has to follow the redirect itself.
impl IntoResponse for Navigation {
    fn into_response(self) -> Response {
        let (status, location) = match &self {
            Navigation::Render { .. } => (StatusCode::OK, None),
            Navigation::Redirect { to, .. } => (StatusCode::SEE_OTHER, Some(to.clone())),
            Navigation::NotFound { .. } => (StatusCode::NOT_FOUND, None),
        };

        let mut response = (status, Json(self)).into_response();
        if let Some(value) = location.and_then(|to| HeaderValue::from_str(&to).ok()) {
            response.headers_mut().insert(header::LOCATION, value);
        }
        response
    }
}
