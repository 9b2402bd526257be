use creditos_console::{
    AppState,
    backend::{BackendState, HttpAuthBackend},
    config::{AppConfig, Env},
    create_router, session,
    session::SessionStore,
    storage::{FileStorage, StorageState},
};
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// main
///
/// Loads configuration, initialises logging, restores the persisted session and serves
/// the navigation shell.
#[tokio::main]
async fn main() {
    dotenv::dotenv().ok();
    let config = AppConfig::load();

    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "creditos_console=debug,tower_http=info,axum=trace".into());

    match config.env {
        Env::Local => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(tracing_subscriber::fmt::layer().pretty())
                .init();
        }
        Env::Production => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(tracing_subscriber::fmt::layer().json())
                .init();
        }
    }

    tracing::info!("Console shell starting in {:?} mode", config.env);

    // Session hydration: the file plays the role of the browser's local storage.
    let storage = Arc::new(FileStorage::open(&config.session_file)) as StorageState;
    let session = session::shared(SessionStore::hydrate(storage));

    let backend = Arc::new(HttpAuthBackend::new(&config.api_base_url)) as BackendState;
    tracing::info!(api_base_url = %config.api_base_url, "Backend client ready");

    let bind_addr = config.bind_addr.clone();
    let app = create_router(AppState {
        session,
        backend,
        config,
    });

    let listener = TcpListener::bind(&bind_addr)
        .await
        .expect("FATAL: Failed to bind the HTTP listener. Check APP_BIND_ADDR.");

    tracing::info!("Listening on {}", bind_addr);
    tracing::info!("API Documentation (Swagger UI) available at: http://{}/swagger-ui", bind_addr);

    axum::serve(listener, app)
        .await
        .expect("FATAL: HTTP server terminated unexpectedly.");
}
