//! Staging file handed to the external sender, and the status file the
//! sender writes back.

use std::io;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::ServiceError;

/// The outbox file. Overwritten on every successful run.
#[derive(Debug, Clone)]
pub struct Outbox {
    path: PathBuf,
}

impl Outbox {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Write `message` via a sibling temp file and a rename, so a reader
    /// never sees a half-written outbox.
    ///
    /// # Errors
    /// Returns the underlying I/O error.
    pub async fn stage(&self, message: &str) -> io::Result<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent).await?;
        }
        let mut tmp = self.path.as_os_str().to_owned();
        tmp.push(".tmp");
        let tmp = PathBuf::from(tmp);

        tokio::fs::write(&tmp, message).await?;
        tokio::fs::rename(&tmp, &self.path).await?;
        tracing::info!(path = %self.path.display(), bytes = message.len(), "message staged in outbox");
        Ok(())
    }

    /// Current outbox content, if any.
    ///
    /// # Errors
    /// Returns I/O errors other than a missing file.
    pub async fn read(&self) -> io::Result<Option<String>> {
        match tokio::fs::read_to_string(&self.path).await {
            Ok(text) => Ok(Some(text)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e),
        }
    }
}

/// Result of the last delivery, as written by the sender.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SendStatus {
    pub success: bool,
    pub timestamp: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub remote_jid: Option<String>,
}

/// Read the sender's status file. A missing file is `Ok(None)`.
///
/// # Errors
/// Returns `ServiceError::Delivery` when the file exists but cannot be read
/// or parsed.
pub async fn read_send_status(path: &Path) -> Result<Option<SendStatus>, ServiceError> {
    let text = match tokio::fs::read_to_string(path).await {
        Ok(text) => text,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
        Err(e) => {
            return Err(ServiceError::Delivery(format!("reading {}: {e}", path.display())));
        },
    };
    serde_json::from_str(&text)
        .map(Some)
        .map_err(|e| ServiceError::Delivery(format!("parsing {}: {e}", path.display())))
}
