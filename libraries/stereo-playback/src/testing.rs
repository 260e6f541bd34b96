//! Test doubles
//!
//! [`RecordingBackend`] launches nothing. It records every launch and keeps
//! count of how many of its processes are live at once.

use crate::backend::{OutputProcess, PlayerBackend};
use crate::error::{PlaybackError, Result};
use async_trait::async_trait;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

/// One recorded call to [`PlayerBackend::launch`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Launch {
    pub path: PathBuf,
    pub offset: Duration,
}

#[derive(Debug, Default)]
struct Counters {
    live: AtomicUsize,
    peak: AtomicUsize,
    fail: AtomicBool,
    launches: Mutex<Vec<Launch>>,
}

/// Backend that records launches instead of spawning processes
///
/// Clones share their counters, so a test can keep one clone and hand the
/// other to the controller.
#[derive(Debug, Clone)]
pub struct RecordingBackend {
    seekable: bool,
    counters: Arc<Counters>,
}

impl RecordingBackend {
    pub fn new() -> Self {
        Self {
            seekable: true,
            counters: Arc::default(),
        }
    }

    /// Backend that, like `afplay`, always starts from the beginning
    pub fn without_seek() -> Self {
        Self {
            seekable: false,
            ..Self::new()
        }
    }

    /// Make subsequent launches fail (or succeed again)
    pub fn fail_launches(&self, fail: bool) {
        self.counters.fail.store(fail, Ordering::SeqCst);
    }

    /// Processes currently live
    pub fn live(&self) -> usize {
        self.counters.live.load(Ordering::SeqCst)
    }

    /// Most processes ever live at the same time
    pub fn peak(&self) -> usize {
        self.counters.peak.load(Ordering::SeqCst)
    }

    pub fn launches(&self) -> Vec<Launch> {
        self.counters
            .launches
            .lock()
            .map(|launches| launches.clone())
            .unwrap_or_default()
    }

    pub fn last_launch(&self) -> Option<Launch> {
        self.launches().pop()
    }
}

impl Default for RecordingBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl PlayerBackend for RecordingBackend {
    fn name(&self) -> &'static str {
        "recording"
    }

    fn supports_seek(&self) -> bool {
        self.seekable
    }

    fn launch(&self, path: &Path, offset: Duration) -> Result<Box<dyn OutputProcess>> {
        if self.counters.fail.load(Ordering::SeqCst) {
            return Err(PlaybackError::Launch {
                program: "recording",
                path: path.to_path_buf(),
                source: std::io::Error::new(std::io::ErrorKind::NotFound, "launch disabled"),
            });
        }

        let offset = if self.seekable { offset } else { Duration::ZERO };
        if let Ok(mut launches) = self.counters.launches.lock() {
            launches.push(Launch {
                path: path.to_path_buf(),
                offset,
            });
        }

        let live = self.counters.live.fetch_add(1, Ordering::SeqCst) + 1;
        self.counters.peak.fetch_max(live, Ordering::SeqCst);

        Ok(Box::new(RecordingProcess {
            counters: Arc::clone(&self.counters),
            terminated: false,
        }))
    }
}

#[derive(Debug)]
struct RecordingProcess {
    counters: Arc<Counters>,
    terminated: bool,
}

impl RecordingProcess {
    fn release(&mut self) {
        if !self.terminated {
            self.terminated = true;
            self.counters.live.fetch_sub(1, Ordering::SeqCst);
        }
    }
}

#[async_trait]
impl OutputProcess for RecordingProcess {
    async fn terminate(&mut self) -> Result<()> {
        // Give other tasks a chance to run mid-termination
        tokio::task::yield_now().await;
        self.release();
        Ok(())
    }
}

impl Drop for RecordingProcess {
    fn drop(&mut self) {
        self.release();
    }
}
