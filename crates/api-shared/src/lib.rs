//! # API Shared
//!
//! Shared wire types and services for the intake HTTP surfaces.
//!
//! Contains:
//! - Request/response bodies with OpenAPI schemas (`wire` module)
//! - Shared services like `HealthService`
//!
//! Used by `api-rest`; the root `intake-run` binary reaches it through `api_rest::router`.

pub mod health;
pub mod wire;

pub use health::HealthService;
pub use wire::*;
