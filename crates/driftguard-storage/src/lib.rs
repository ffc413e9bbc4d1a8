//! # driftguard-storage
//!
//! SQLite persistence layer and the threshold store.
//!
//! A single serialized writer connection handles every statement; state is
//! small and writes are rare relative to evaluations.

pub mod connection;
pub mod engine;
pub mod migrations;
pub mod queries;
pub mod threshold_store;

pub use connection::DatabaseManager;
pub use engine::StorageEngine;
pub use threshold_store::{ThresholdStore, ThresholdUpdate, ThresholdWriter};
