//! # Server Setup
//!
//! Server initialization, route registration, and HTTP server startup.
//!
//! [`start_server`] wires the Sanity content client, the drop gateway and the
//! page registry into [`AppState`]; [`create_router`] registers the routes and
//! middleware and is also what the handler tests drive.

// region: --- Imports
use crate::handlers;
use crate::middleware::{log_requests, stamp_req, stamp_visitor};
use crate::page::{PageRegistry, Renderer};
use crate::services::{DropPageService, SessionStore};
use axum::{
    extract::FromRef,
    routing::{get, post},
    Router,
};
use lib_core::config::init_config;
use lib_core::{Config, ContentStore, DropProvider, GatewayDropProvider, ImageUrlBuilder, SanityClient};
use std::sync::Arc;
use std::time::Duration;
use tower_http::cors::CorsLayer;
use tracing::info;
// endregion: --- Imports

// region: --- AppState
/// Application state shared across all routes
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub drop_pages: DropPageService,
    pub sessions: Arc<SessionStore>,
    pub images: ImageUrlBuilder,
    pub renderer: Arc<Renderer>,
}

impl AppState {
    /// Build the state from its external collaborators.
    ///
    /// # Errors
    ///
    /// Fails if the templates do not compile.
    pub fn new(
        config: Config,
        content: Arc<dyn ContentStore>,
        drops: Arc<dyn DropProvider>,
    ) -> lib_core::Result<Self> {
        let idle_ttl = Duration::from_secs(config.page_idle_minutes * 60);
        let pages = Arc::new(PageRegistry::new(idle_ttl, config.max_pages));
        let images = ImageUrlBuilder::new(config.sanity_project_id.clone(), config.sanity_dataset.clone());

        Ok(Self {
            drop_pages: DropPageService::new(content, drops, pages),
            sessions: Arc::new(SessionStore::new(idle_ttl)),
            images,
            renderer: Arc::new(Renderer::new()?),
            config,
        })
    }
}

impl FromRef<AppState> for Config {
    fn from_ref(state: &AppState) -> Self {
        state.config.clone()
    }
}

impl FromRef<AppState> for DropPageService {
    fn from_ref(state: &AppState) -> Self {
        state.drop_pages.clone()
    }
}

impl FromRef<AppState> for Arc<SessionStore> {
    fn from_ref(state: &AppState) -> Self {
        state.sessions.clone()
    }
}

impl FromRef<AppState> for ImageUrlBuilder {
    fn from_ref(state: &AppState) -> Self {
        state.images.clone()
    }
}

impl FromRef<AppState> for Arc<Renderer> {
    fn from_ref(state: &AppState) -> Self {
        state.renderer.clone()
    }
}
// endregion: --- AppState

// region: --- Server Configuration
/// Server configuration
pub struct ServerConfig {
    /// Bind address (e.g., "127.0.0.1:3000")
    pub bind_address: String,
    /// Allowed CORS origins
    pub allowed_origins: Vec<String>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_address: "127.0.0.1:3000".to_string(),
            allowed_origins: vec![
                "http://localhost:3000".to_string(),
                "http://127.0.0.1:3000".to_string(),
            ],
        }
    }
}
// endregion: --- Server Configuration

// region: --- Server Setup
fn init_tracing() -> anyhow::Result<String> {
    let log_level = std::env::var("LOG_LEVEL")
        .unwrap_or_else(|_| "info".to_string())
        .to_lowercase();

    let filter = match log_level.as_str() {
        "trace" | "debug" | "info" | "warn" | "error" => tracing_subscriber::EnvFilter::new(&log_level),
        _ => tracing_subscriber::EnvFilter::new("info"),
    };

    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_thread_ids(true)
        .with_line_number(true)
        .with_file(true)
        .finish();

    tracing::subscriber::set_global_default(subscriber)
        .map_err(|e| anyhow::anyhow!("Failed to set global tracing subscriber: {}", e))?;

    Ok(log_level)
}

/// Initialize and start the HTTP server
///
/// # Errors
///
/// This function will return an error if:
/// - Configuration loading or validation fails
/// - An HTTP client cannot be built
/// - The templates do not compile
/// - Server binding fails
pub async fn start_server(config: ServerConfig) -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let log_level = init_tracing()?;
    info!(" NFT DROP PAGE STARTING");
    info!(" Log level: {}", log_level);

    info!("Loading configuration...");
    let app_config = init_config().map_err(|e| anyhow::anyhow!(e))?;
    info!("Configuration: {:?}", app_config);

    let content: Arc<dyn ContentStore> = Arc::new(SanityClient::from_config(app_config)?);
    let drops: Arc<dyn DropProvider> = Arc::new(GatewayDropProvider::from_config(app_config)?);
    info!(
        " Content dataset {} / drops on {}",
        app_config.sanity_dataset, app_config.drop_chain
    );

    let state = AppState::new(app_config.clone(), content, drops)?;
    let app = create_router(state, &config.allowed_origins);

    let listener = tokio::net::TcpListener::bind(&config.bind_address).await?;

    info!(" SERVER READY: http://{}", config.bind_address);
    log_server_info();

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!(" Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
    }
    info!(" Shutdown signal received");
}

/// Create the application router with all routes and middleware.
pub fn create_router(state: AppState, allowed_origins: &[String]) -> Router {
    use axum::http::{header, HeaderValue, Method};

    let origins: Vec<HeaderValue> = allowed_origins
        .iter()
        .filter_map(|origin| origin.parse().ok())
        .collect();

    let cors = CorsLayer::new()
        .allow_origin(origins)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE])
        .allow_credentials(true);

    info!("[ROUTE SETUP] Registering HTTP routes...");
    Router::new()
        .route("/nft/{id}", get(handlers::nft::show))
        .route("/nft/{id}/mint", post(handlers::nft::mint))
        .route("/nft/{id}/disconnect", post(handlers::nft::disconnect))
        .route("/api/nft/{id}", get(handlers::nft::state))
        .route("/api/session", get(handlers::session::current))
        .route("/api/session/challenge", post(handlers::session::challenge))
        .route("/api/session/connect", post(handlers::session::connect))
        .route("/api/session/disconnect", post(handlers::session::disconnect))
        .route("/health", get(handlers::health::health))
        .fallback(|| async {
            info!("[404 HANDLER] Unmatched route - returning 404");
            (axum::http::StatusCode::NOT_FOUND, "Route not found")
        })
        .with_state(state)
        .layer(axum::middleware::from_fn(stamp_visitor))
        .layer(axum::middleware::from_fn(log_requests))
        .layer(
            tower_http::trace::TraceLayer::new_for_http()
                .make_span_with(|request: &axum::http::Request<_>| {
                    let request_id = request
                        .extensions()
                        .get::<crate::middleware::RequestStamp>()
                        .map(|s| s.id.clone())
                        .unwrap_or_else(|| "unknown".to_string());
                    tracing::info_span!(
                        "http_request",
                        request_id = %request_id,
                        method = %request.method(),
                        uri = %request.uri(),
                    )
                })
                .on_failure(
                    |error: tower_http::classify::ServerErrorsFailureClass,
                     latency: Duration,
                     _span: &tracing::Span| {
                        tracing::error!(
                            error = ?error,
                            latency_ms = latency.as_millis(),
                            "[HTTP FAILURE] Error: {:?}, Latency: {}ms",
                            error,
                            latency.as_millis()
                        );
                    },
                ),
        )
        // Stamped outside the trace layer so the span and the request log carry the id
        .layer(axum::middleware::from_fn(stamp_req))
        .layer(cors)
}

/// Log server information
fn log_server_info() {
    info!(" DROP PAGE:");
    info!("   • GET  /nft/{{slug}}");
    info!("   • POST /nft/{{slug}}/mint");
    info!("   • POST /nft/{{slug}}/disconnect");
    info!("   • GET  /api/nft/{{slug}}");
    info!(" SESSION:");
    info!("   • GET  /api/session");
    info!("   • POST /api/session/challenge");
    info!("   • POST /api/session/connect");
    info!("   • POST /api/session/disconnect");
    info!(" HEALTH:");
    info!("   • GET  /health");
}
// endregion: --- Server Setup
