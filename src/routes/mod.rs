/// Router Module Index
///
/// The shell's routes split by gate. Access control is applied at the module level
/// (via axum layers) so a page can never be registered without its gate.

/// The static route table: paths, pages, public flag and allowed roles.
pub mod table;

/// Pages rendered without any gate (login, unauthorized).
pub mod public;

/// Pages behind the session gate, each optionally behind its own role gate.
pub mod protected;

/// The shell's JSON API (login, logout, session snapshot, navigation menu).
pub mod api;
