use async_trait::async_trait;
use std::sync::{Arc, Mutex};

use crate::models::{LoginRequest, LoginResponse, UserProfile};

/// Path of the backend login endpoint, relative to the API base URL.
pub const LOGIN_ENDPOINT: &str = "/api/usuario/login";

// 1. AuthBackend Contract
/// AuthBackend
///
/// The REST backend as seen by the shell: it owns credentials and issues tokens.
/// The HTTP client (HttpAuthBackend) is used in production and the scripted mock
/// (MockAuthBackend) in tests.
#[async_trait]
pub trait AuthBackend: Send + Sync {
    /// Submits credentials. `Ok` carries whatever the backend answered, including a
    /// rejection (`success: false`); `Err` means the backend could not be reached or
    /// answered with something that is not a login response.
    async fn login(&self, credentials: &LoginRequest) -> Result<LoginResponse, String>;
}

// 2. The Real Implementation
/// HttpAuthBackend
///
/// reqwest client bound to the backend's base URL.
#[derive(Clone)]
pub struct HttpAuthBackend {
    client: reqwest::Client,
    base_url: String,
}

impl HttpAuthBackend {
    pub fn new(base_url: &str) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn login_url(&self) -> String {
        format!("{}{}", self.base_url, LOGIN_ENDPOINT)
    }
}

#[async_trait]
impl AuthBackend for HttpAuthBackend {
    async fn login(&self, credentials: &LoginRequest) -> Result<LoginResponse, String> {
        let response = self
            .client
            .post(self.login_url())
            .json(credentials)
            .send()
            .await
            .map_err(|e| e.to_string())?;

        let status = response.status();
        // Rejected credentials still come back as a JSON login response, whatever the status.
        match response.json::<LoginResponse>().await {
            Ok(body) => Ok(body),
            Err(e) => Err(format!("Backend answered {}: {}", status, e)),
        }
    }
}

// 3. The Mock Implementation (For Tests)
/// MockAuthBackend
///
/// Accepts exactly one name/password pair and answers with a fixed token and user.
/// Records every submitted name so tests can assert the backend was (or was not) called.
#[derive(Clone)]
pub struct MockAuthBackend {
    pub nombre: String,
    pub contrasena: String,
    pub token: String,
    pub user: UserProfile,
    /// When true, every call fails as if the backend were unreachable.
    pub should_fail: bool,
    pub calls: Arc<Mutex<Vec<String>>>,
}

impl MockAuthBackend {
    pub fn new(nombre: &str, contrasena: &str, token: &str, user: UserProfile) -> Self {
        Self {
            nombre: nombre.to_string(),
            contrasena: contrasena.to_string(),
            token: token.to_string(),
            user,
            should_fail: false,
            calls: Arc::default(),
        }
    }

    pub fn new_failing() -> Self {
        Self {
            nombre: String::new(),
            contrasena: String::new(),
            token: String::new(),
            user: UserProfile {
                id: 0,
                nombre: String::new(),
                roles: Default::default(),
            },
            should_fail: true,
            calls: Arc::default(),
        }
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().map(|c| c.clone()).unwrap_or_default()
    }
}

#[async_trait]
impl AuthBackend for MockAuthBackend {
    async fn login(&self, credentials: &LoginRequest) -> Result<LoginResponse, String> {
        if let Ok(mut calls) = self.calls.lock() {
            calls.push(credentials.nombre.clone());
        }

        if self.should_fail {
            return Err("Mock Backend Error: connection refused".to_string());
        }

        if credentials.nombre != self.nombre || credentials.contrasena != self.contrasena {
            return Ok(LoginResponse {
                success: false,
                message: Some("Credenciales inválidas".to_string()),
                ..Default::default()
            });
        }

        Ok(LoginResponse {
            success: true,
            token: Some(self.token.clone()),
            usuario: Some(self.user.clone()),
            message: None,
        })
    }
}

/// BackendState
///
/// The shared handle type held in the application state.
pub type BackendState = Arc<dyn AuthBackend>;
