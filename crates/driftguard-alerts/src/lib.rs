//! # driftguard-alerts
//!
//! Turns drift verdicts and raw quality scores into alert events, and
//! delivers them off the request path.
//!
//! Evaluation is synchronous and cheap. Delivery (channels plus the durable
//! alert log) runs behind a bounded queue and is retried independently.

pub mod channels;
pub mod dispatcher;
pub mod evaluator;
pub mod gate;
pub mod stats;

pub use channels::{ConsoleChannel, FileChannel, WebhookChannel};
pub use dispatcher::{DeliveryStats, NotificationDispatcher};
pub use evaluator::AlertEvaluator;
pub use gate::{ConsecutiveGate, GateOutcome, MetricState};
pub use stats::AlertStats;
