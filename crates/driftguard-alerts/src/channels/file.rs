use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use driftguard_core::models::AlertEvent;
use driftguard_core::traits::IAlertChannel;

/// Appends one JSON object per alert to a file.
#[derive(Debug)]
pub struct FileChannel {
    path: PathBuf,
    lock: Mutex<()>,
}

impl FileChannel {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn append(&self, event: &AlertEvent) -> std::io::Result<()> {
        let mut line = serde_json::to_string(event)?;
        line.push('\n');
        let _guard = self.lock.lock().unwrap_or_else(|e| e.into_inner());
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;
        file.write_all(line.as_bytes())
    }
}

impl IAlertChannel for FileChannel {
    fn name(&self) -> &str {
        "file"
    }

    fn notify(&self, event: &AlertEvent) -> bool {
        match self.append(event) {
            Ok(()) => true,
            Err(e) => {
                tracing::debug!(path = %self.path.display(), error = %e, "alert file append failed");
                false
            }
        }
    }
}
