//! Seams to external collaborators and persistence.

pub mod alert_channel;
pub mod embedding;
pub mod storage;

pub use alert_channel::IAlertChannel;
pub use embedding::IEmbeddingProvider;
pub use storage::IMonitorStorage;
