//! # Axum Helpers
//!
//! Shared HTTP plumbing for the users service.
//!
//! - **[`errors`]**: `AppError` and the two JSON error bodies
//! - **[`extractors`]**: `UuidPath` and `ValidatedJson`
//! - **[`http`]**: CORS layer
//! - **[`server`]**: router assembly, `/health`, readiness probes, graceful shutdown

pub mod errors;
pub mod extractors;
pub mod http;
pub mod server;

pub use errors::{AppError, ErrorResponse, ValidationErrorResponse};
pub use extractors::{UuidPath, ValidatedJson};
pub use http::create_cors_layer;
pub use server::{
    HealthCheckFuture, HealthResponse, ShutdownCoordinator, create_production_app, create_router,
    health_router, run_health_checks, shutdown_signal,
};
