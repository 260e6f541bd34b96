//! Process supervision
//!
//! Owns the single live output process. Every start terminates the previous
//! process first, so at most one process is ever live.

use crate::backend::{OutputProcess, PlayerBackend};
use crate::error::Result;
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

#[derive(Debug)]
pub struct ProcessSupervisor {
    backend: Arc<dyn PlayerBackend>,
    live: Option<Box<dyn OutputProcess>>,
}

impl ProcessSupervisor {
    pub fn new(backend: Arc<dyn PlayerBackend>) -> Self {
        Self {
            backend,
            live: None,
        }
    }

    /// Replace the live process with one playing `path` from `offset`
    ///
    /// Returns the offset playback actually starts from, which is zero when
    /// the backend cannot seek. On failure no process is live.
    pub async fn start(&mut self, path: &Path, offset: Duration) -> Result<Duration> {
        self.stop().await;

        let offset = if offset > Duration::ZERO && !self.backend.supports_seek() {
            tracing::debug!(
                "{} cannot seek, starting {} from the beginning",
                self.backend.name(),
                path.display()
            );
            Duration::ZERO
        } else {
            offset
        };

        let process = self.backend.launch(path, offset)?;
        self.live = Some(process);
        Ok(offset)
    }

    /// Terminate the live process, if any
    pub async fn stop(&mut self) {
        if let Some(mut process) = self.live.take() {
            if let Err(e) = process.terminate().await {
                // Dropping the handle still kills the child
                tracing::warn!("Failed to terminate {} process: {}", self.backend.name(), e);
            }
        }
    }

    pub fn is_live(&self) -> bool {
        self.live.is_some()
    }

    pub fn backend(&self) -> &dyn PlayerBackend {
        self.backend.as_ref()
    }
}
