//! # driftguard-detection
//!
//! Holds the reference baseline and the live sample windows, and compares
//! each exchange against them along three axes: response, data (inputs),
//! and quality trend.

pub mod baseline_store;
pub mod detector;
pub mod embedder;
pub mod history;
pub mod status;
pub mod window;

pub use baseline_store::BaselineStore;
pub use detector::DriftDetector;
pub use embedder::TimedEmbedder;
pub use history::DriftHistory;
pub use status::{BaselineStatus, DriftStatus, SampleCounts};
pub use window::SampleWindow;
