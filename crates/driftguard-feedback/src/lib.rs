//! # driftguard-feedback
//!
//! Ingests human ratings, curates the reference dataset, and is the only
//! writer of the threshold set.

pub mod adjustment;
pub mod processor;
pub mod summary;

pub use adjustment::{AdjustmentRule, RatingWindow};
pub use processor::{FeedbackProcessor, SubmitOutcome};
pub use summary::{FeedbackSummary, TypeSummary};
