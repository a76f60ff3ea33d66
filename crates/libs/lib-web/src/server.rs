//! # Server Setup
//!
//! Server initialization, route registration, and HTTP server startup.
//!
//! This module builds the shared application state from configuration,
//! creates the Axum router with all routes and middleware, and starts the
//! HTTP server.

// region: --- Imports
use crate::handlers;
use crate::middleware::{log_requests, stamp_req};
use axum::{
    routing::{get, post},
    Router,
};
use lib_core::{Config, SigningMode};
use lib_solana::{CrossmintClient, JupiterClient, TokenRegistry, TransactionSigner};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tracing::info;
// endregion: --- Imports

// region: --- AppState
/// Application state shared across all routes
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub registry: Arc<TokenRegistry>,
    pub jupiter: Arc<JupiterClient>,
    pub signer: Arc<TransactionSigner>,
}

impl axum::extract::FromRef<AppState> for Config {
    fn from_ref(state: &AppState) -> Self {
        state.config.clone()
    }
}

impl axum::extract::FromRef<AppState> for Arc<TokenRegistry> {
    fn from_ref(state: &AppState) -> Self {
        state.registry.clone()
    }
}

impl axum::extract::FromRef<AppState> for Arc<JupiterClient> {
    fn from_ref(state: &AppState) -> Self {
        state.jupiter.clone()
    }
}

impl axum::extract::FromRef<AppState> for Arc<TransactionSigner> {
    fn from_ref(state: &AppState) -> Self {
        state.signer.clone()
    }
}
// endregion: --- AppState

// region: --- Server Configuration
/// Server configuration
#[derive(Default)]
pub struct ServerConfig {
    /// Bind address override; `None` defers to `BIND_ADDRESS` from the
    /// environment.
    pub bind_address: Option<String>,
}
// endregion: --- Server Configuration

// region: --- Server Setup
/// Build the shared application state from validated configuration.
///
/// Constructs the token registry, the aggregator client, and the signer for
/// whichever signing mode the configuration selects.
pub fn build_state(config: Config) -> anyhow::Result<AppState> {
    let registry = Arc::new(TokenRegistry::with_default_tokens());

    let jupiter = Arc::new(
        JupiterClient::builder()
            .api_base(config.jupiter_api_base.clone())
            .build()?,
    );

    let signer = match &config.signing {
        SigningMode::Local { private_key } => {
            TransactionSigner::local(private_key, config.rpc_url.clone())?
        }
        SigningMode::Custodial { api_key, linked_user } => {
            let crossmint = CrossmintClient::new(
                config.crossmint_api_base.clone(),
                api_key.clone(),
                linked_user.clone(),
            )?;
            TransactionSigner::custodial(crossmint)
        }
    };

    info!("Signing mode: {}", config.signing.name());

    Ok(AppState {
        config,
        registry,
        jupiter,
        signer: Arc::new(signer),
    })
}

/// Initialize and start the HTTP server
///
/// # Errors
///
/// Returns an error if configuration loading or validation fails, signer
/// construction fails, or the listener cannot bind.
pub async fn start_server(server_config: ServerConfig) -> anyhow::Result<()> {
    // Configure tracing subscriber
    let log_level = std::env::var("LOG_LEVEL")
        .unwrap_or_else(|_| "info".to_string())
        .to_lowercase();

    let filter = match log_level.as_str() {
        "trace" => tracing_subscriber::EnvFilter::new("trace"),
        "debug" => tracing_subscriber::EnvFilter::new("debug"),
        "info" => tracing_subscriber::EnvFilter::new("info"),
        "warn" => tracing_subscriber::EnvFilter::new("warn"),
        "error" => tracing_subscriber::EnvFilter::new("error"),
        _ => tracing_subscriber::EnvFilter::new("info"),
    };

    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .finish();

    tracing::subscriber::set_global_default(subscriber)
        .expect("Failed to set global tracing subscriber");

    info!("SOLA SWAP SERVICE STARTING");
    info!("Log level: {}", log_level);

    dotenvy::dotenv().ok();

    info!("Loading configuration...");
    let config = Config::from_env()?;
    config.validate()?;

    let bind_address = server_config
        .bind_address
        .unwrap_or_else(|| config.bind_address.clone());

    let state = build_state(config)?;
    let app = create_router(state);

    let listener = tokio::net::TcpListener::bind(&bind_address).await?;

    info!("SERVER READY: http://{}", bind_address);
    log_server_info();

    axum::serve(listener, app).await?;
    Ok(())
}

/// Create the main application router with all routes
pub fn create_router(state: AppState) -> Router {
    // The service fronts wallets and bots on arbitrary origins, so CORS is
    // fully permissive.
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    info!("[ROUTE SETUP] Registering HTTP routes...");
    Router::new()
        .route("/", get(handlers::root::root))
        .route("/swap-api/health", get(handlers::health::health))
        .route("/swap-api/swap", post(handlers::swap::swap_tokens))
        .fallback(|| async {
            (axum::http::StatusCode::NOT_FOUND, "Route not found")
        })
        .with_state(state)
        // Layers run outside-in, so later .layer calls wrap earlier ones:
        // the stamp must be added after the logging and trace layers for
        // both to see the request ID it inserts.
        .layer(axum::middleware::from_fn(log_requests))
        // Tower HTTP trace layer for spans
        .layer(
            tower_http::trace::TraceLayer::new_for_http().make_span_with(
                |request: &axum::http::Request<_>| {
                    let request_id = request
                        .extensions()
                        .get::<crate::middleware::mw_req_stamp::RequestStamp>()
                        .map(|s| s.id.clone())
                        .unwrap_or_else(|| "unknown".to_string());
                    tracing::info_span!(
                        "http_request",
                        request_id = %request_id,
                        method = %request.method(),
                        uri = %request.uri(),
                    )
                },
            ),
        )
        // Request stamping (adds request ID) - must run first
        .layer(axum::middleware::from_fn(stamp_req))
        .layer(cors)
}

/// Log server information
fn log_server_info() {
    info!("ROUTES:");
    info!("   • GET  /");
    info!("   • GET  /swap-api/health");
    info!("   • POST /swap-api/swap {{input_token, output_token, amount}}");
}
// endregion: --- Server Setup
