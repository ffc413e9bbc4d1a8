//! # driftguard-runtime
//!
//! `DriftGuard` owns one instance of every subsystem and runs the
//! per-request pipeline: drift checks, alert evaluation, queued delivery.
//! Feedback flows independently into the threshold set.

pub mod guard;
pub mod options;

pub use driftguard_observability::init_tracing;
pub use guard::{DriftGuard, Observation};
pub use options::RuntimeOptions;
