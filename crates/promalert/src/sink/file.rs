use std::path::PathBuf;

use tokio::fs::OpenOptions;
use tokio::io::AsyncWriteExt;

use super::channel::{Sink, SinkError};
use crate::alert::AlertRecord;

/// Appends alerts to a JSON-lines file.
pub struct FileSink {
    path: PathBuf,
}

impl FileSink {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait::async_trait]
impl Sink for FileSink {
    fn name(&self) -> &str {
        "file"
    }

    async fn emit(&self, alert: &AlertRecord) -> Result<(), SinkError> {
        // serde_json writes NaN and infinities as null
        if !alert.value.is_finite() {
            return Err(SinkError::NonFinite(alert.value));
        }
        let mut line = serde_json::to_vec(alert).map_err(SinkError::Encode)?;
        line.push(b'\n');

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(SinkError::Open)?;
        }

        let mut opts = OpenOptions::new();
        opts.create(true).append(true);
        #[cfg(unix)]
        opts.mode(0o644);

        let mut file = opts.open(&self.path).await.map_err(SinkError::Open)?;
        // whole line in a single write
        file.write_all(&line).await.map_err(SinkError::Write)?;
        file.flush().await.map_err(SinkError::Write)?;

        tracing::info!(path = %self.path.display(), rule = %alert.name, "alert written to file");
        Ok(())
    }
}
