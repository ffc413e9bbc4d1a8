//! # driftguard-observability
//!
//! Tracing setup, named structured log events, span macros, and the
//! numeric readout surface consumed by an external metrics exporter.

pub mod readout;
pub mod tracing_setup;

pub use readout::{GaugeReadout, MetricSample};
pub use tracing_setup::{init_tracing, init_tracing_with_filter};
