use serde::{Deserialize, Serialize};
use ts_rs::TS;
use utoipa::ToSchema;

use crate::models::{ADMINISTRADOR, DOCENTE, RoleSet};

pub const LOGIN_PATH: &str = "/login";
pub const UNAUTHORIZED_PATH: &str = "/unauthorized";
pub const HOME_PATH: &str = "/";

/// Page
///
/// The screens the rendering layer knows how to draw.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS, ToSchema)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum Page {
    Login,
    Unauthorized,
    Home,
    Creditos,
    Actividades,
    Alumnos,
    Docentes,
    Periodos,
    Usuarios,
    NotFound,
}

/// RouteConfig
///
/// One entry of the static route table. Public routes are never gated; protected routes
/// require a live session, and those with `allowed_roles` additionally require one of
/// the listed roles.
#[derive(Debug, PartialEq, Eq)]
pub struct RouteConfig {
    pub path: &'static str,
    pub page: Page,
    pub is_public: bool,
    pub allowed_roles: Option<&'static [&'static str]>,
}

impl RouteConfig {
    /// The role gate of this route, or `None` when any authenticated user may enter.
    pub fn role_set(&self) -> Option<RoleSet> {
        self.allowed_roles.map(RoleSet::from)
    }

    /// The paths this entry answers on: its own and, except for the root, the same path
    /// with one trailing slash.
    pub fn paths(&self) -> impl Iterator<Item = String> {
        let slashed = (self.path != HOME_PATH).then(|| format!("{}/", self.path));
        std::iter::once(self.path.to_string()).chain(slashed)
    }
}

const ADMIN_ONLY: &[&str] = &[ADMINISTRADOR];
const STAFF: &[&str] = &[ADMINISTRADOR, DOCENTE];

pub static ROUTES: &[RouteConfig] = &[
    RouteConfig {
        path: LOGIN_PATH,
        page: Page::Login,
        is_public: true,
        allowed_roles: None,
    },
    RouteConfig {
        path: UNAUTHORIZED_PATH,
        page: Page::Unauthorized,
        is_public: true,
        allowed_roles: None,
    },
    RouteConfig {
        path: HOME_PATH,
        page: Page::Home,
        is_public: false,
        allowed_roles: None,
    },
    RouteConfig {
        path: "/creditos",
        page: Page::Creditos,
        is_public: false,
        allowed_roles: Some(STAFF),
    },
    RouteConfig {
        path: "/actividades",
        page: Page::Actividades,
        is_public: false,
        allowed_roles: Some(STAFF),
    },
    RouteConfig {
        path: "/alumnos",
        page: Page::Alumnos,
        is_public: false,
        allowed_roles: Some(ADMIN_ONLY),
    },
    RouteConfig {
        path: "/docentes",
        page: Page::Docentes,
        is_public: false,
        allowed_roles: Some(ADMIN_ONLY),
    },
    RouteConfig {
        path: "/periodos",
        page: Page::Periodos,
        is_public: false,
        allowed_roles: Some(ADMIN_ONLY),
    },
    RouteConfig {
        path: "/usuarios",
        page: Page::Usuarios,
        is_public: false,
        allowed_roles: Some(ADMIN_ONLY),
    },
];

pub fn public_routes() -> impl Iterator<Item = &'static RouteConfig> {
    ROUTES.iter().filter(|route| route.is_public)
}

pub fn protected_routes() -> impl Iterator<Item = &'static RouteConfig> {
    ROUTES.iter().filter(|route| !route.is_public)
}

pub fn find(path: &str) -> Option<&'static RouteConfig> {
    ROUTES.iter().find(|route| route.path == path)
}
