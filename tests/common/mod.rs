#![allow(dead_code)]

use chrono::Utc;
use creditos_console::{
    AppConfig, AppState, MemoryStorage, MockAuthBackend, SessionStore,
    backend::BackendState,
    models::{ADMINISTRADOR, DOCENTE, LoginResponse, RoleSet, UserProfile},
    session,
    storage::StorageState,
};
use jsonwebtoken::{EncodingKey, Header, encode};
use serde::Serialize;
use std::sync::Arc;

pub const TEST_JWT_SECRET: &str = "test-secret-value-1234567890";

#[derive(Serialize)]
struct TestClaims {
    sub: i64,
    exp: i64,
}

/// Signs a token expiring `exp_offset` seconds from now (negative for the past).
pub fn create_token(exp_offset: i64) -> String {
    let claims = TestClaims {
        sub: 1,
        exp: Utc::now().timestamp() + exp_offset,
    };
    let key = EncodingKey::from_secret(TEST_JWT_SECRET.as_bytes());
    encode(&Header::default(), &claims, &key).unwrap()
}

pub fn user(id: i64, nombre: &str, roles: &[&str]) -> UserProfile {
    UserProfile {
        id,
        nombre: nombre.to_string(),
        roles: RoleSet::from(roles),
    }
}

pub fn admin() -> UserProfile {
    user(1, "admin", &[ADMINISTRADOR])
}

pub fn docente() -> UserProfile {
    user(2, "docente", &[DOCENTE])
}

pub fn login_response(token: &str, usuario: UserProfile) -> LoginResponse {
    LoginResponse {
        success: true,
        token: Some(token.to_string()),
        usuario: Some(usuario),
        message: None,
    }
}

/// A store over fresh in-memory storage, signed in as `usuario` with `token`.
pub fn signed_in(token: &str, usuario: UserProfile) -> SessionStore {
    let mut store = SessionStore::in_memory();
    store.set_auth(&login_response(token, usuario)).unwrap();
    store
}

pub fn app_state(store: SessionStore, backend: MockAuthBackend) -> AppState {
    AppState {
        session: session::shared(store),
        backend: Arc::new(backend) as BackendState,
        config: AppConfig::default(),
    }
}

pub fn mock_backend() -> MockAuthBackend {
    MockAuthBackend::new("docente", "secreto", &create_token(3600), docente())
}

pub fn memory_storage() -> StorageState {
    Arc::new(MemoryStorage::new())
}
