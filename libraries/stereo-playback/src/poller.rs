//! Progress polling
//!
//! The output process exits on its own at the end of a track, but nothing
//! reports that back. Once a second the poller compares elapsed time with
//! the track length and tells the controller when a track is done.

use crate::controller::PlaybackController;
use crate::error::{PlaybackError, Result};
use crate::types::Advance;
use std::time::Duration;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;

pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(1);

#[derive(Debug)]
pub struct ProgressPoller {
    controller: PlaybackController,
    interval: Duration,
    /// Last track load a completion was reported for
    last_fired: Option<u64>,
}

impl ProgressPoller {
    pub fn new(controller: PlaybackController, interval: Duration) -> Self {
        Self {
            controller,
            interval,
            last_fired: None,
        }
    }

    /// Check once; report a finished track at most once per load
    pub async fn tick(&mut self) -> Result<Option<Advance>> {
        let snapshot = self.controller.snapshot().await?;

        if !snapshot.is_finished() || self.last_fired == Some(snapshot.generation) {
            return Ok(None);
        }

        self.last_fired = Some(snapshot.generation);
        tracing::debug!(
            "Track {:?} finished at {}",
            snapshot.track_id,
            snapshot.elapsed()
        );

        self.controller
            .finish_track(snapshot.generation)
            .await
            .map(Some)
    }

    /// Poll on the current runtime until the controller shuts down
    pub fn spawn(self) -> JoinHandle<()> {
        tokio::spawn(self.run())
    }

    async fn run(mut self) {
        let mut interval = tokio::time::interval(self.interval);
        interval.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            interval.tick().await;

            match self.tick().await {
                Ok(_) => {}
                Err(PlaybackError::ControllerClosed) => break,
                Err(e) => tracing::warn!("Failed to advance after track end: {}", e),
            }
        }

        tracing::debug!("Progress poller stopped");
    }
}
