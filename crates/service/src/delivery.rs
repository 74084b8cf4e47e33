//! Hand-off to the out-of-process sender.
//!
//! The sender is any executable that reads the outbox and writes
//! `send_status.json`. It runs in the data directory, so a sender that uses
//! the bare file names finds them.

use std::path::PathBuf;

use devotional_core::{DataPaths, DeliveryConfig};
use tokio::process::Command;

use crate::error::ServiceError;
use crate::outbox::{SendStatus, read_send_status};

/// What a delivery run reported.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeliveryReport {
    /// `None` when the process was killed by a signal.
    pub exit_code: Option<i32>,
    pub status: Option<SendStatus>,
}

impl DeliveryReport {
    #[must_use]
    pub fn succeeded(&self) -> bool {
        self.exit_code == Some(0) && self.status.as_ref().is_none_or(|s| s.success)
    }
}

#[derive(Debug, Clone)]
pub struct DeliveryHook {
    program: String,
    args: Vec<String>,
    group_id: String,
    workdir: PathBuf,
    outbox: PathBuf,
    status_path: PathBuf,
}

impl DeliveryHook {
    /// `None` when no delivery command is configured. The command is split
    /// on whitespace, without quote handling.
    #[must_use]
    pub fn from_config(delivery: &DeliveryConfig, paths: &DataPaths) -> Option<Self> {
        let mut words = delivery.command.as_deref()?.split_whitespace().map(str::to_owned);
        let program = words.next()?;
        Some(Self {
            program,
            args: words.collect(),
            group_id: delivery.group_id.clone(),
            workdir: paths.root().to_path_buf(),
            outbox: paths.outbox(),
            status_path: paths.send_status(),
        })
    }

    /// Run the sender to completion and read back its status file.
    ///
    /// # Errors
    /// Returns `ServiceError::Delivery` if the process cannot be spawned or
    /// the status file is unreadable.
    pub async fn run(&self) -> Result<DeliveryReport, ServiceError> {
        tracing::info!(program = %self.program, "running delivery command");
        let exit = Command::new(&self.program)
            .args(&self.args)
            .current_dir(&self.workdir)
            .env("GROUP_ID", &self.group_id)
            .env("DEVOTIONAL_OUTBOX", &self.outbox)
            .env("DEVOTIONAL_SEND_STATUS", &self.status_path)
            .status()
            .await
            .map_err(|e| ServiceError::Delivery(format!("spawning {}: {e}", self.program)))?;

        let status = read_send_status(&self.status_path).await?;
        Ok(DeliveryReport { exit_code: exit.code(), status })
    }
}
