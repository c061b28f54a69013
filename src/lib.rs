pub mod config;
pub mod middleware;
pub mod server;
pub mod tmdb;
pub mod web;

use std::net::SocketAddr;
use std::sync::Arc;
use tower::make::Shared;
use tracing::info;

#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),
    #[error("TMDB client error: {0}")]
    Tmdb(#[from] tmdb::TmdbError),
    #[error("Server error: {0}")]
    Server(String),
}

/// Loads the configuration, builds the TMDB client and serves until the
/// listener fails. A missing API key aborts here, before any socket is bound.
pub async fn run(config_path: &str, config_required: bool, debug_logs: bool) -> Result<(), ServerError> {
    let mut config = config::Config::load(config_path, config_required)?;
    config.debug_logs = debug_logs;

    info!("Using config file: {}", config_path);
    info!("TMDB endpoint: {}", config.tmdb.base_url);
    if debug_logs {
        info!("Debug logging enabled");
    }

    let client = tmdb::TmdbClient::new(&config.tmdb)?;
    let provider: Arc<dyn tmdb::MovieProvider> = Arc::new(client);

    let address = config.listen.address.as_deref().unwrap_or("[::]");
    let port = &config.listen.port;
    let addr: SocketAddr = format!("{}:{}", address, port)
        .parse()
        .map_err(|e| ServerError::Server(format!("Invalid address: {}", e)))?;

    let tls_files = config.listen.tlscert.clone().zip(config.listen.tlskey.clone());

    if let Some(ref appdir) = config.appdir {
        info!("Serving static files from {}", appdir);
    }

    let state = server::AppState::new(config, provider);

    if let Some((cert_path, key_path)) = tls_files {
        info!("Loading TLS certificate from {}", cert_path);
        info!("Loading TLS key from {}", key_path);

        let tls_config = axum_server::tls_rustls::RustlsConfig::from_pem_file(&cert_path, &key_path)
            .await
            .map_err(|e| ServerError::Server(format!("Failed to load TLS config: {}", e)))?;

        info!("Serving HTTPS on {}", addr);

        let app = server::build_app(state);
        axum_server::bind_rustls(addr, tls_config)
            .serve(Shared::new(app))
            .await
            .map_err(|e| ServerError::Server(format!("Server error: {}", e)))?;
    } else {
        info!("Serving HTTP on {}", addr);

        let listener = tokio::net::TcpListener::bind(addr)
            .await
            .map_err(|e| ServerError::Server(format!("Failed to bind: {}", e)))?;

        let app = server::build_app::<axum::body::Body>(state);
        axum::serve(listener, Shared::new(app))
            .await
            .map_err(|e| ServerError::Server(format!("Server error: {}", e)))?;
    }

    Ok(())
}
