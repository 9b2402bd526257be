use std::env;

use crate::routes::table::UNAUTHORIZED_PATH;

/// AppConfig
///
/// The shell's configuration, loaded once at startup and immutable afterwards.
/// Handlers and guards pull it out of the application state via FromRef.
#[derive(Clone, Debug)]
pub struct AppConfig {
    // Runtime environment marker. Controls log format and which settings are mandatory.
    pub env: Env,
    // Address the shell's HTTP server binds to.
    pub bind_addr: String,
    // Base URL of the REST backend that issues tokens.
    pub api_base_url: String,
    // File holding the persisted session. Survives shell restarts.
    pub session_file: String,
    // Where the role guard sends users lacking the required role.
    pub unauthorized_path: String,
}

/// Env
///
/// Local development versus production deployment.
#[derive(Clone, PartialEq, Debug)]
pub enum Env {
    Local,
    Production,
}

impl Default for AppConfig {
    /// default
    ///
    /// Safe, non-panicking values for test state setup.
    fn default() -> Self {
        Self {
            env: Env::Local,
            bind_addr: "127.0.0.1:0".to_string(),
            api_base_url: "http://localhost:8080".to_string(),
            session_file: ".creditos/session.json".to_string(),
            unauthorized_path: UNAUTHORIZED_PATH.to_string(),
        }
    }
}

impl AppConfig {
    /// load
    ///
    /// Reads the configuration from environment variables (after `.env` has been loaded).
    ///
    /// # Panics
    /// Panics in production when `API_BASE_URL` is not set: a shell that cannot reach
    /// the backend cannot log anyone in.
    pub fn load() -> Self {
        let env_str = env::var("APP_ENV").unwrap_or_else(|_| "local".to_string());
        let env = match env_str.as_str() {
            "production" => Env::Production,
            _ => Env::Local,
        };

        let api_base_url = match env {
            Env::Production => {
                env::var("API_BASE_URL").expect("FATAL: API_BASE_URL must be set in production.")
            }
            Env::Local => {
                env::var("API_BASE_URL").unwrap_or_else(|_| "http://localhost:8080".to_string())
            }
        };

        Self {
            env,
            bind_addr: env::var("APP_BIND_ADDR").unwrap_or_else(|_| "0.0.0.0:3000".to_string()),
            api_base_url,
            session_file: env::var("SESSION_FILE")
                .unwrap_or_else(|_| ".creditos/session.json".to_string()),
            unauthorized_path: env::var("UNAUTHORIZED_PATH")
                .unwrap_or_else(|_| UNAUTHORIZED_PATH.to_string()),
        }
    }
}
