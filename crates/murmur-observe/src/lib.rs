//! Observability setup for Murmur: structured logging and optional
//! OpenTelemetry span export.

pub mod tracing_setup;
