use serde::{Deserialize, Serialize};
use ts_rs::TS;
use utoipa::ToSchema;

use crate::{routes::table, session::SessionStore};

/// NavItem
///
/// One entry of the header navigation bar.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS, ToSchema)]
#[ts(export)]
pub struct NavItem {
    pub label: String,
    pub path: String,
}

// (label, path) in display order. Visibility follows the route table's role gate.
const MENU: &[(&str, &str)] = &[
    ("Inicio", "/"),
    ("Créditos", "/creditos"),
    ("Actividades", "/actividades"),
    ("Alumnos", "/alumnos"),
    ("Docentes", "/docentes"),
    ("Usuarios", "/usuarios"),
];

/// visible_items
///
/// The entries the current user may open. Entries whose route has no role gate are
/// always listed; role-gated ones only when the user holds one of the allowed roles.
pub fn visible_items(session: &SessionStore) -> Vec<NavItem> {
    MENU.iter()
        .filter(|(_, path)| {
            table::find(path)
                .and_then(|route| route.role_set())
                .is_none_or(|allowed| session.has_role(allowed))
        })
        .map(|(label, path)| NavItem {
            label: label.to_string(),
            path: path.to_string(),
        })
        .collect()
}
