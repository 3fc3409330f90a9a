//! Axum HTTP API server.
//!
//! This crate provides:
//! - Human-counting endpoints for uploaded images and image URLs
//! - An anomaly-classification endpoint
//! - Upstream error passthrough (status and body preserved verbatim)
//! - Prometheus metrics and a health probe

pub mod config;
pub mod error;
pub mod handlers;
pub mod metrics;
pub mod middleware;
pub mod routes;
pub mod state;

pub use config::ApiConfig;
pub use error::{ApiError, ApiResult};
pub use routes::create_router;
pub use state::AppState;
