//! # API Shared
//!
//! Shared definitions for the DiaLens API.
//!
//! Contains:
//! - Wire types for requests and responses (`dto` module), with OpenAPI schemas
//! - Shared services like `HealthService`
//!
//! Used by `api-rest`; deliberately free of core business logic.

pub mod dto;
pub mod health;

pub use dto::*;
pub use health::HealthService;
