//! HTTP/REST API layer for Murmur.
//!
//! Axum-based REST API at `/api/v1/` with cookie sessions, envelope response
//! format, and request tracing.

pub mod error;
pub mod extractors;
pub mod handlers;
pub mod response;
pub mod router;
