// Append-only stat log. One file handle, opened in append mode at startup
// and held for the life of the process.

use std::path::Path;
use tokio::io::{AsyncWriteExt, BufWriter};
use tokio::sync::Mutex;

#[derive(Debug, thiserror::Error)]
pub enum StatLogError {
    #[error("failed to write to snapshot file: {0}")]
    Append(#[source] std::io::Error),
    #[error("failed to flush snapshot file: {0}")]
    Flush(#[source] std::io::Error),
}

/// Snapshot writer shared by all sampling tasks. The mutex keeps each
/// append+flush pair whole; concurrent in-flight tasks never interleave
/// partial records.
#[derive(Debug)]
pub struct StatLog {
    file: Mutex<BufWriter<tokio::fs::File>>,
}

impl StatLog {
    /// Wrap an already-open append-mode handle (opened before daemonizing so
    /// a relative path resolves in the starting directory).
    pub fn new(file: std::fs::File) -> Self {
        Self {
            file: Mutex::new(BufWriter::new(tokio::fs::File::from_std(file))),
        }
    }

    /// Open `path` for appending, creating it if missing. Startup fault on error.
    pub fn open(path: &Path) -> anyhow::Result<Self> {
        let file = std::fs::OpenOptions::new()
            .append(true)
            .create(true)
            .open(path)
            .map_err(|e| anyhow::anyhow!("opening stat file {} failed: {}", path.display(), e))?;
        Ok(Self::new(file))
    }

    /// Append one encoded record, then flush. Append and flush failures are
    /// distinct fault conditions; neither is retried here - the caller decides
    /// what the next cycle does.
    pub async fn write_record(&self, record: &[u8]) -> Result<(), StatLogError> {
        let mut file = self.file.lock().await;
        file.write_all(record).await.map_err(StatLogError::Append)?;
        file.flush().await.map_err(StatLogError::Flush)?;
        Ok(())
    }
}
