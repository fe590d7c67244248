//! HTTP server
//!
//! Builds the axum router and runs it until the shutdown signal resolves.

use std::future::Future;
use std::sync::Arc;

use astro_core::{Config, ServerConfig};
use axum::{Router, extract::DefaultBodyLimit};
use http::HeaderValue;
use tower_http::{
    cors::{AllowOrigin, Any, CorsLayer},
    trace::TraceLayer,
};
use tracing::{info, warn};

use crate::error::{Result, WebError};
use crate::pages::page_routes;
use crate::pipeline::AstroPipeline;
use crate::routes::routes;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub pipeline: Arc<AstroPipeline>,
}

impl AppState {
    pub fn new(pipeline: AstroPipeline) -> Self {
        Self {
            pipeline: Arc::new(pipeline),
        }
    }
}

fn cors_layer(config: &ServerConfig) -> CorsLayer {
    match &config.allowed_origins {
        None => CorsLayer::permissive(),
        Some(origins) => {
            let origins: Vec<HeaderValue> = origins
                .iter()
                .filter_map(|origin| match origin.parse() {
                    Ok(value) => Some(value),
                    Err(_) => {
                        warn!("Ignoring invalid CORS origin: {}", origin);
                        None
                    }
                })
                .collect();

            CorsLayer::new()
                .allow_origin(AllowOrigin::list(origins))
                .allow_methods(Any)
                .allow_headers(Any)
        }
    }
}

/// Build the full application router
pub fn build_router(state: AppState, config: &ServerConfig) -> Router {
    routes()
        .merge(page_routes(&config.templates_dir))
        .layer(DefaultBodyLimit::max(config.max_upload_bytes))
        .layer(TraceLayer::new_for_http())
        .layer(cors_layer(config))
        .with_state(state)
}

/// Astro-Brief web server
pub struct WebServer {
    config: ServerConfig,
    state: AppState,
}

impl WebServer {
    /// Create a server with the configured vendor clients
    pub fn new(config: &Config) -> Result<Self> {
        let pipeline = AstroPipeline::from_config(config)?;
        Ok(Self::with_pipeline(config.server.clone(), pipeline))
    }

    /// Create a server around an existing pipeline
    pub fn with_pipeline(config: ServerConfig, pipeline: AstroPipeline) -> Self {
        Self {
            config,
            state: AppState::new(pipeline),
        }
    }

    /// Get the router
    pub fn router(&self) -> Router {
        build_router(self.state.clone(), &self.config)
    }

    /// Serve until `shutdown` resolves
    pub async fn run(self, shutdown: impl Future<Output = ()> + Send + 'static) -> Result<()> {
        let addr = format!("{}:{}", self.config.host, self.config.port);
        let app = self.router();

        let listener = tokio::net::TcpListener::bind(&addr)
            .await
            .map_err(|e| WebError::Server(format!("Failed to bind {}: {}", addr, e)))?;

        info!("Astro-Brief listening on http://{}", addr);
        info!("Serving pages from: {}", self.config.templates_dir);

        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown)
            .await
            .map_err(|e| WebError::Server(format!("Server error: {}", e)))?;

        info!("Server stopped");
        Ok(())
    }
}
