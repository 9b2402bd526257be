use base64::{Engine as _, engine::general_purpose::URL_SAFE_NO_PAD};
use chrono::{DateTime, Utc};
use serde::Deserialize;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::{
    models::{LoginResponse, NO_ROLE_LABEL, RoleSet, SessionView, UserProfile},
    navigation::Navigation,
    routes::table::LOGIN_PATH,
    storage::{StorageState, TOKEN_KEY, USER_KEY},
};

/// Session
///
/// An established identity: the token and the user it was issued for.
/// The two only ever exist together.
#[derive(Debug, Clone, PartialEq)]
pub struct Session {
    pub token: String,
    pub user: UserProfile,
}

/// ExpiryClaim
///
/// The only claim the client reads out of the token payload. `exp` is a NumericDate
/// (seconds since the epoch, fractional values allowed).
#[derive(Debug, Deserialize)]
struct ExpiryClaim {
    exp: f64,
}

/// SessionStore
///
/// The client-side session context. It keeps the current session in memory and mirrors
/// every change into durable storage under two keys that are always written and cleared
/// as a pair.
///
/// Lifecycle:
/// 1. `hydrate` at startup restores a previously persisted session.
/// 2. `set_auth` establishes (or clears) the session from a login response.
/// 3. `logout` clears it and yields the navigation back to the login screen.
pub struct SessionStore {
    storage: StorageState,
    current: Option<Session>,
}

impl SessionStore {
    /// hydrate
    ///
    /// Builds the store from whatever the durable storage holds. A partial pair
    /// (token without user or the reverse) or an unreadable user record is treated as
    /// corrupt: both keys are removed and the store starts signed out.
    pub fn hydrate(storage: StorageState) -> Self {
        let token = storage.get_item(TOKEN_KEY).filter(|t| !t.is_empty());
        let user_raw = storage.get_item(USER_KEY);

        let current = match (token, user_raw) {
            (None, None) => None,
            (Some(token), Some(raw)) => match serde_json::from_str::<UserProfile>(&raw) {
                Ok(user) => {
                    tracing::info!(user_id = user.id, "Restored persisted session");
                    Some(Session { token, user })
                }
                Err(e) => {
                    tracing::warn!(error = %e, "Persisted user record is unreadable; clearing session");
                    None
                }
            },
            _ => {
                tracing::warn!("Persisted session is incomplete; clearing session");
                None
            }
        };

        let store = Self { storage, current };
        if store.current.is_none() {
            store.clear_storage();
        }
        store
    }

    /// An empty store over volatile storage.
    pub fn in_memory() -> Self {
        Self::hydrate(Arc::new(crate::storage::MemoryStorage::new()))
    }

    /// set_auth
    ///
    /// Consumes a login response. Both `token` (non-empty) and `usuario` must be present
    /// for a session to be established; otherwise the session is cleared. If the durable
    /// write fails half-way the pair is rolled back so no partial session survives.
    pub fn set_auth(&mut self, response: &LoginResponse) -> Result<(), String> {
        match (
            response.token.as_deref().filter(|t| !t.is_empty()),
            response.usuario.as_ref(),
        ) {
            (Some(token), Some(user)) => self.set_session(token, user.clone()),
            _ => {
                self.clear();
                Ok(())
            }
        }
    }

    /// set_session
    ///
    /// Stores the token and user atomically. An empty token clears the session instead.
    /// On a storage failure the in-memory and durable state are both cleared and the
    /// error is returned.
    pub fn set_session(&mut self, token: &str, user: UserProfile) -> Result<(), String> {
        if token.is_empty() {
            self.clear();
            return Ok(());
        }

        let user_raw = serde_json::to_string(&user).map_err(|e| e.to_string())?;

        let written = self
            .storage
            .set_item(TOKEN_KEY, token)
            .and_then(|_| self.storage.set_item(USER_KEY, &user_raw));

        if let Err(e) = written {
            tracing::warn!(error = %e, "Failed to persist session; rolling back");
            self.clear();
            return Err(e);
        }

        tracing::info!(user_id = user.id, "Session established");
        self.current = Some(Session {
            token: token.to_string(),
            user,
        });
        Ok(())
    }

    pub fn session(&self) -> Option<&Session> {
        self.current.as_ref()
    }

    pub fn token(&self) -> Option<&str> {
        self.current.as_ref().map(|s| s.token.as_str())
    }

    pub fn user(&self) -> Option<&UserProfile> {
        self.current.as_ref().map(|s| &s.user)
    }

    /// True iff a non-empty token is held. Says nothing about expiry.
    pub fn is_authenticated(&self) -> bool {
        self.token().is_some_and(|t| !t.is_empty())
    }

    pub fn is_token_expired(&self) -> bool {
        self.is_token_expired_at(Utc::now())
    }

    /// is_token_expired_at
    ///
    /// Fail-closed expiry check against `now`. No token, a token without a middle
    /// segment, invalid base64url, invalid JSON and a missing `exp` all count as expired.
    pub fn is_token_expired_at(&self, now: DateTime<Utc>) -> bool {
        match self.token() {
            Some(token) => token_expired_at(token, now),
            None => true,
        }
    }

    /// has_role
    ///
    /// True iff the user's roles intersect `allowed`. Accepts a single label or any
    /// collection convertible into a `RoleSet`. No user means no roles.
    pub fn has_role(&self, allowed: impl Into<RoleSet>) -> bool {
        let allowed = allowed.into();
        self.user()
            .is_some_and(|user| user.roles.intersects(&allowed))
    }

    /// logout
    ///
    /// Clears the session and returns the navigation to the login entry point.
    pub fn logout(&mut self) -> Navigation {
        if let Some(user) = self.user() {
            tracing::info!(user_id = user.id, "Logging out");
        }
        self.clear();
        Navigation::redirect(LOGIN_PATH)
    }

    /// view
    ///
    /// The snapshot exposed to page chrome; `primary_role` falls back to "Sin rol".
    pub fn view(&self) -> SessionView {
        let user = self.user().cloned();
        let primary_role = user
            .as_ref()
            .and_then(|u| u.roles.first())
            .unwrap_or(NO_ROLE_LABEL)
            .to_string();

        SessionView {
            authenticated: self.is_authenticated(),
            expired: self.is_token_expired(),
            user,
            primary_role,
        }
    }

    fn clear(&mut self) {
        self.current = None;
        self.clear_storage();
    }

    fn clear_storage(&self) {
        // Both removals are attempted even if the first one fails.
        let token = self.storage.remove_item(TOKEN_KEY);
        let user = self.storage.remove_item(USER_KEY);
        if let Err(e) = token.and(user) {
            tracing::warn!(error = %e, "Failed to remove persisted session");
        }
    }
}

/// token_expired_at
///
/// Decodes the payload (middle) segment of a dot-delimited token and compares its `exp`
/// claim with `now` at millisecond precision. Any parse failure yields `true`.
pub fn token_expired_at(token: &str, now: DateTime<Utc>) -> bool {
    let Some(payload) = token.split('.').nth(1) else {
        return true;
    };

    // Tolerate padded segments even though base64url tokens normally omit it.
    let Ok(bytes) = URL_SAFE_NO_PAD.decode(payload.trim_end_matches('=')) else {
        return true;
    };

    match serde_json::from_slice::<ExpiryClaim>(&bytes) {
        Ok(claim) if claim.exp.is_finite() => claim.exp * 1000.0 < now.timestamp_millis() as f64,
        _ => true,
    }
}

/// SessionState
///
/// The session context shared by the guards and handlers. One session per shell process.
pub type SessionState = Arc<RwLock<SessionStore>>;

/// Wraps a hydrated store for sharing through the application state.
pub fn shared(store: SessionStore) -> SessionState {
    Arc::new(RwLock::new(store))
}
