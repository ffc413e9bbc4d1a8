// Single source of truth for all default values.

// --- Detection ---
pub const DEFAULT_WINDOW_CAPACITY: usize = 100;
pub const DEFAULT_QUALITY_SHORT_WINDOW: usize = 10;
pub const DEFAULT_QUALITY_MIN_HISTORY: usize = 10;
pub const DEFAULT_DRIFT_HISTORY_CAPACITY: usize = 1_000;
pub const DEFAULT_EMBED_TIMEOUT_MS: u64 = 5_000;
pub const DEFAULT_MIN_BASELINE_SAMPLES: usize = 2;
pub const DEFAULT_EMBEDDING_DIMENSIONS: usize = 384;
pub const DEFAULT_EMBEDDING_CACHE_SIZE: u64 = 10_000;

// --- Alerts ---
pub const DEFAULT_CONSECUTIVE_FAILURES: u32 = 10;
pub const DEFAULT_ALERT_COOLDOWN_SECS: u64 = 60;
pub const DEFAULT_ALERT_HISTORY_CAPACITY: usize = 100;
pub const DEFAULT_MONITORED_METRICS: &[&str] = &["relevance", "coherence", "overall_quality"];
pub const DEFAULT_CONSOLE_ALERTS: bool = true;
pub const DEFAULT_DELIVERY_RETRIES: u32 = 3;
pub const DEFAULT_RETRY_BACKOFF_MS: u64 = 200;
pub const DEFAULT_QUEUE_CAPACITY: usize = 1_024;
pub const DEFAULT_WEBHOOK_TIMEOUT_MS: u64 = 10_000;

// --- Feedback ---
pub const DEFAULT_ROLLING_WINDOW: usize = 20;
pub const DEFAULT_LOW_WATER: f64 = 3.0;
pub const DEFAULT_HIGH_WATER: f64 = 4.5;
pub const DEFAULT_ADJUSTMENT_STEP: f64 = 0.05;
pub const DEFAULT_RECENT_FEEDBACK_CAPACITY: usize = 500;
pub const DEFAULT_REFERENCE_MIN_RATING: i32 = 4;
pub const DEFAULT_LOW_RATING_MAX: i32 = 2;

// --- Threshold bounds ---
pub const SCORE_THRESHOLD_FLOOR: f64 = 0.3;
pub const SCORE_THRESHOLD_CEILING: f64 = 0.95;
pub const DISTANCE_THRESHOLD_FLOOR: f64 = 0.05;
pub const DISTANCE_THRESHOLD_CEILING: f64 = 1.0;
pub const DELTA_THRESHOLD_FLOOR: f64 = 0.01;
pub const DELTA_THRESHOLD_CEILING: f64 = 0.5;

// --- Storage ---
pub const DEFAULT_CONFIG_FILENAME: &str = "driftguard.toml";
pub const DEFAULT_BUSY_TIMEOUT_MS: u32 = 5_000;

// --- Observability ---
pub const DEFAULT_LOG_LEVEL: &str = "info";
pub const DEFAULT_JSON_LOGS: bool = true;
pub const LOG_FILTER_ENV: &str = "DRIFTGUARD_LOG";
