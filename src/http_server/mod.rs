//! # AAR HTTP Server
//!
//! JSON API over the record store and attachment storage.
//!
//! # Endpoints
//!
//! - `/` - Dashboard statistics and recent reports
//! - `/health` - Health check
//! - `/aar/*` - Report creation, browsing, download and PDF export

pub mod aar_routes;
pub mod config;
pub mod dashboard_routes;
pub mod errors;
pub mod server;
pub mod state;

pub use config::HttpServerConfig;
pub use errors::{ApiError, ErrorResponse};
pub use server::HttpServer;
pub use state::AppState;
