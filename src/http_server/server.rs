//! # HTTP Server
//!
//! Combines the dashboard and AAR routers behind CORS, tracing and a body
//! size limit.

use axum::extract::DefaultBodyLimit;
use axum::Router;
use tokio::net::TcpListener;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

use super::aar_routes::aar_routes;
use super::config::HttpServerConfig;
use super::dashboard_routes::dashboard_routes;
use super::state::AppState;

/// HTTP server for the AAR service
pub struct HttpServer {
    config: HttpServerConfig,
    router: Router,
}

impl HttpServer {
    /// Create a server around existing state
    pub fn with_state(config: HttpServerConfig, state: AppState) -> Self {
        let router = Self::build_router(&config, state);
        Self { config, router }
    }

    /// Build the combined router with all endpoints
    fn build_router(config: &HttpServerConfig, state: AppState) -> Router {
        let cors = if config.cors_origins.is_empty() {
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any)
        } else {
            let origins: Vec<_> = config
                .cors_origins
                .iter()
                .filter_map(|s| s.parse().ok())
                .collect();

            CorsLayer::new()
                .allow_origin(AllowOrigin::list(origins))
                .allow_methods(Any)
                .allow_headers(Any)
        };

        Router::new()
            .merge(dashboard_routes(state.clone()))
            .nest("/aar", aar_routes(state))
            .layer(DefaultBodyLimit::max(config.max_body_bytes))
            .layer(TraceLayer::new_for_http())
            .layer(cors)
    }

    /// Get the socket address
    pub fn socket_addr(&self) -> String {
        self.config.socket_addr()
    }

    /// Get the router (for testing)
    pub fn router(self) -> Router {
        self.router
    }

    /// Serve until Ctrl-C
    pub async fn start(self) -> Result<(), std::io::Error> {
        let addr = self.config.socket_addr();
        let listener = TcpListener::bind(&addr).await?;

        info!(addr = %listener.local_addr()?, "AAR server listening");
        info!("  GET  /                     dashboard");
        info!("  GET  /aar/list             browse and search");
        info!("  POST /aar/create           submit a report with attachments");
        info!("  GET  /aar/view?id=         report detail");
        info!("  POST /aar/status           change report status");
        info!("  GET  /aar/download         attachment download");
        info!("  POST /aar/generate-report  PDF report");

        axum::serve(listener, self.router)
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        info!("AAR server stopped");
        Ok(())
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!(error = %e, "could not listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    info!("shutdown signal received");
}
