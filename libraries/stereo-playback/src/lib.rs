//! Stereo - Playback Controller
//!
//! Drives an external command-line audio player (`ffplay`, `ffmpeg`,
//! `afplay`) that has no pause or seek API of its own.
//!
//! This crate provides:
//! - Output backends and a startup capability probe
//! - Single-process supervision (at most one player process is live)
//! - Pause, resume and seek emulated by kill + restart at an offset
//! - Up-next queue and bounded play history
//! - Shuffle without replacement over a playlist or the whole library
//! - A once-a-second progress poller that advances finished tracks
//!
//! # Architecture
//!
//! [`PlaybackController`] is a handle to an actor task that owns all
//! playback state. Handlers and the poller only ever talk to it through
//! commands, so no two operations interleave.
//!
//! The library is consumed through [`stereo_core::LibraryStore`]; this
//! crate does not depend on storage.
//!
//! # Example
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use stereo_core::{MemoryLibrary, TrackId};
//! use stereo_playback::{CommandBackend, PlaybackConfig, PlaybackController, ProgressPoller};
//!
//! # async fn example() -> stereo_playback::Result<()> {
//! let backend = CommandBackend::probe(None, None)?;
//! let library = MemoryLibrary::new();
//!
//! let controller = PlaybackController::spawn(
//!     Arc::new(backend),
//!     Arc::new(library),
//!     PlaybackConfig::default(),
//! );
//! ProgressPoller::new(controller.clone(), stereo_playback::DEFAULT_POLL_INTERVAL).spawn();
//!
//! controller.enqueue(TrackId::new(1), false).await?;
//! controller.pause().await?;
//! controller.resume().await?;
//! controller.shutdown().await?;
//! # Ok(())
//! # }
//! ```

mod backend;
mod controller;
mod error;
mod history;
mod poller;
mod queue;
mod session;
mod shuffle;
mod supervisor;
#[cfg(any(test, feature = "test-utils"))]
pub mod testing;
pub mod types;

// Public exports
pub use backend::{
    find_in_path, ChildProcess, CommandBackend, OutputProcess, OutputProgram, PlayerBackend,
};
pub use controller::PlaybackController;
pub use error::{PlaybackError, Result};
pub use history::History;
pub use poller::{ProgressPoller, DEFAULT_POLL_INTERVAL};
pub use queue::UpNext;
pub use session::{Clock, NowPlaying, NOT_PLAYING};
pub use shuffle::ShufflePool;
pub use supervisor::ProcessSupervisor;
pub use types::{Advance, PlaybackConfig, PlaybackState, Snapshot};
