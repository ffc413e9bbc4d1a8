use std::sync::Arc;

use driftguard_core::traits::{IAlertChannel, IEmbeddingProvider, IMonitorStorage};

/// Collaborator overrides. Anything left `None` is built from config.
#[derive(Default)]
pub struct RuntimeOptions {
    /// Replaces the SQLite engine selected by `storage.db_path`.
    pub storage: Option<Arc<dyn IMonitorStorage>>,
    /// Replaces the cached TF-IDF provider.
    pub provider: Option<Arc<dyn IEmbeddingProvider>>,
    /// Replaces the console/file/webhook channels enabled in `alerts`.
    pub channels: Option<Vec<Arc<dyn IAlertChannel>>>,
}

impl RuntimeOptions {
    pub fn with_storage(mut self, storage: Arc<dyn IMonitorStorage>) -> Self {
        self.storage = Some(storage);
        self
    }

    pub fn with_provider(mut self, provider: Arc<dyn IEmbeddingProvider>) -> Self {
        self.provider = Some(provider);
        self
    }

    pub fn with_channels(mut self, channels: Vec<Arc<dyn IAlertChannel>>) -> Self {
        self.channels = Some(channels);
        self
    }
}
