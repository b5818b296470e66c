//! Observability setup for the club site: structured logging with an
//! optional OpenTelemetry span exporter.

pub mod tracing_setup;
