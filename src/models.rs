use serde::{Deserialize, Serialize};
use ts_rs::TS;
use utoipa::ToSchema;

// --- Role Labels ---

/// Full access to every management screen.
pub const ADMINISTRADOR: &str = "ADMINISTRADOR";
/// Access to credit and activity screens.
pub const DOCENTE: &str = "DOCENTE";

/// Label shown when the user carries no role at all.
pub const NO_ROLE_LABEL: &str = "Sin rol";

/// RoleSet
///
/// A duplicate-free collection of role labels. Insertion order is preserved so the
/// first role returned by the backend stays the user's primary role.
///
/// A single label converts into a one-element set, so every role check in the crate
/// is a set intersection.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<String>", into = "Vec<String>")]
pub struct RoleSet(Vec<String>);

impl RoleSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, role: impl Into<String>) {
        let role = role.into();
        if !self.0.contains(&role) {
            self.0.push(role);
        }
    }

    pub fn contains(&self, role: &str) -> bool {
        self.0.iter().any(|r| r == role)
    }

    /// True iff the two sets share at least one label.
    pub fn intersects(&self, other: &RoleSet) -> bool {
        self.0.iter().any(|role| other.contains(role))
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn first(&self) -> Option<&str> {
        self.0.first().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }
}

impl From<Vec<String>> for RoleSet {
    fn from(roles: Vec<String>) -> Self {
        roles.into_iter().collect()
    }
}

impl From<RoleSet> for Vec<String> {
    fn from(roles: RoleSet) -> Self {
        roles.0
    }
}

impl From<&str> for RoleSet {
    fn from(role: &str) -> Self {
        Self(vec![role.to_string()])
    }
}

impl From<&[&str]> for RoleSet {
    fn from(roles: &[&str]) -> Self {
        roles.iter().copied().collect()
    }
}

impl<const N: usize> From<[&str; N]> for RoleSet {
    fn from(roles: [&str; N]) -> Self {
        roles.into_iter().collect()
    }
}

impl<S: Into<String>> FromIterator<S> for RoleSet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let mut set = RoleSet::new();
        for role in iter {
            set.insert(role);
        }
        set
    }
}

// --- Identity Schemas (Shared with the Backend) ---

/// UserProfile
///
/// The user record the backend returns on login (the password never leaves the backend).
/// `roles` is always present: a payload without it deserializes to the empty set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS, ToSchema)]
#[ts(export)]
pub struct UserProfile {
    pub id: i64,
    pub nombre: String,
    #[serde(default)]
    #[ts(type = "Array<string>")]
    #[schema(value_type = Vec<String>)]
    pub roles: RoleSet,
}

/// LoginRequest
///
/// Body sent to the backend login endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub nombre: String,
    #[serde(rename = "contraseña")]
    pub contrasena: String,
}

/// LoginResponse
///
/// The backend's answer to a login attempt. The session store consumes this shape
/// directly: a session is only established when both `token` and `usuario` are present.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, TS, ToSchema)]
#[ts(export)]
pub struct LoginResponse {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[ts(optional)]
    pub token: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[ts(optional)]
    pub usuario: Option<UserProfile>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[ts(optional)]
    pub message: Option<String>,
}

// --- Shell API Schemas ---

/// LoginForm
///
/// The login screen's submission. `from` carries the pathname the route guard captured
/// so the user returns to it after a successful login.
#[derive(Debug, Clone, Serialize, Deserialize, TS, ToSchema)]
#[ts(export)]
pub struct LoginForm {
    pub usuario: String,
    #[serde(rename = "contraseña")]
    pub contrasena: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[ts(optional)]
    pub from: Option<String>,
}

/// LoginOutcome
///
/// What the login screen shows after a submission, plus where to navigate on success.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS, ToSchema)]
#[ts(export)]
pub struct LoginOutcome {
    pub success: bool,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[ts(optional)]
    pub redirect_to: Option<String>,
}

/// SessionView
///
/// Snapshot of the current session for the header and other page chrome.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS, ToSchema)]
#[ts(export)]
pub struct SessionView {
    pub authenticated: bool,
    pub expired: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[ts(optional)]
    pub user: Option<UserProfile>,
    pub primary_role: String,
}
