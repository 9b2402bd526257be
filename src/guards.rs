use chrono::{DateTime, Utc};

use crate::{
    models::RoleSet,
    navigation::Navigation,
    routes::table::{LOGIN_PATH, UNAUTHORIZED_PATH},
    session::SessionStore,
};

/// GuardDecision
///
/// What a gate decided for one request: let the nested route render, or navigate away.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GuardDecision {
    Allow,
    Redirect(Navigation),
}

/// RouteGuard
///
/// The session gate in front of every protected route.
///
/// REDIRECT_TO_LOGIN iff the session has no token or the token is expired. The redirect
/// captures `requested` so login can return the user to it.
#[derive(Debug, Clone)]
pub struct RouteGuard {
    pub login_path: String,
}

impl Default for RouteGuard {
    fn default() -> Self {
        Self {
            login_path: LOGIN_PATH.to_string(),
        }
    }
}

impl RouteGuard {
    pub fn check(&self, session: &SessionStore, requested: &str) -> GuardDecision {
        self.check_at(session, requested, Utc::now())
    }

    pub fn check_at(
        &self,
        session: &SessionStore,
        requested: &str,
        now: DateTime<Utc>,
    ) -> GuardDecision {
        if !session.is_authenticated() || session.is_token_expired_at(now) {
            tracing::debug!(requested, "No live session; redirecting to login");
            return GuardDecision::Redirect(Navigation::redirect_from(&self.login_path, requested));
        }
        GuardDecision::Allow
    }
}

/// RoleGuard
///
/// The authorization gate for role-restricted routes. It sits behind the RouteGuard;
/// `check_behind` re-applies the session gate against the same snapshot so that a
/// session cleared between the two gates still ends at login.
#[derive(Debug, Clone)]
pub struct RoleGuard {
    pub allowed_roles: RoleSet,
    /// Where to send users lacking every allowed role.
    pub redirect_to: String,
}

impl RoleGuard {
    pub fn new(allowed_roles: impl Into<RoleSet>) -> Self {
        Self {
            allowed_roles: allowed_roles.into(),
            redirect_to: UNAUTHORIZED_PATH.to_string(),
        }
    }

    pub fn redirect_to(mut self, path: impl Into<String>) -> Self {
        self.redirect_to = path.into();
        self
    }

    /// check_behind
    ///
    /// Evaluates `route_guard` and then this gate against one session snapshot. The
    /// session gate's redirect wins, so an absent or expired session never lands on the
    /// unauthorized path.
    pub fn check_behind(
        &self,
        route_guard: &RouteGuard,
        session: &SessionStore,
        requested: &str,
    ) -> GuardDecision {
        match route_guard.check(session, requested) {
            GuardDecision::Allow => self.check(session),
            redirect => redirect,
        }
    }

    pub fn check(&self, session: &SessionStore) -> GuardDecision {
        if session.has_role(self.allowed_roles.clone()) {
            return GuardDecision::Allow;
        }

        tracing::debug!(
            user_id = session.user().map(|u| u.id),
            redirect_to = %self.redirect_to,
            "Missing required role"
        );
        GuardDecision::Redirect(Navigation::redirect(&self.redirect_to))
    }
}
