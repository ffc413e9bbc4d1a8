//! Feedback summaries.

use std::collections::BTreeMap;

use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TypeSummary {
    /// Retained records of this type.
    pub count: usize,
    /// Mean of the newest `rolling_window` ratings of this type.
    pub rolling_average: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FeedbackSummary {
    /// Lifetime record count, including records no longer retained in memory.
    pub total: u64,
    /// Mean rating over retained records; `None` when there are none.
    pub average_rating: Option<f64>,
    /// Rating → count over retained records. Always has keys 1..=5.
    pub distribution: BTreeMap<i32, usize>,
    pub by_type: BTreeMap<String, TypeSummary>,
    pub reference_size: usize,
}
