//! Fixed values that are not user-configurable.

/// Lowest valid feedback rating.
pub const MIN_RATING: i32 = 1;
/// Highest valid feedback rating.
pub const MAX_RATING: i32 = 5;

/// Score dimensions that are risk signals rather than quality signals.
/// They are alerted on separately and excluded from the overall quality mean.
pub const RISK_DIMENSIONS: &[&str] = &["toxicity", "hallucination"];

/// Metric name used for the mean of all quality dimensions.
pub const OVERALL_QUALITY_METRIC: &str = "overall_quality";

/// Number of most recent drift events inspected for the "recent" count in status reports.
pub const RECENT_DRIFT_WINDOW: usize = 20;

/// Number of most recent alerts counted as "recent" in alert statistics.
pub const RECENT_ALERT_WINDOW: usize = 10;

/// Overshoot ratio above which an alert is high severity.
pub const HIGH_SEVERITY_RATIO: f64 = 2.0;
/// Overshoot ratio above which an alert is medium severity.
pub const MEDIUM_SEVERITY_RATIO: f64 = 1.25;

/// Largest possible cosine distance.
pub const MAX_COSINE_DISTANCE: f64 = 2.0;
