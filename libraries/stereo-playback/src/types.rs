//! Core types for playback management

use serde::{Deserialize, Serialize};
use stereo_core::TrackId;

/// Playback configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlaybackConfig {
    /// Maximum number of entries kept in the play history
    pub history_limit: usize,

    /// Capacity of the controller's command channel
    pub command_buffer: usize,
}

impl Default for PlaybackConfig {
    fn default() -> Self {
        Self {
            history_limit: 10,
            command_buffer: 32,
        }
    }
}

/// Playback state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlaybackState {
    /// No track loaded
    Stopped,

    /// Output process running
    Playing,

    /// Track loaded, output process stopped, elapsed frozen
    Paused,
}

/// Outcome of asking the controller to move on to the next track
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Advance {
    /// A track was started
    Started(TrackId),

    /// Queue or shuffle pool was exhausted, playback stopped
    Stopped,

    /// A completion report named a track load that is no longer current
    Ignored,
}

/// Point-in-time view of the controller
///
/// This is what the HTTP layer renders and what the progress poller reads.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot {
    pub track_id: Option<TrackId>,
    pub song: String,
    pub album: String,
    pub track_number: u32,
    /// Track length as `m:ss`
    pub length: String,
    pub length_seconds: u64,
    pub elapsed_seconds: u64,
    pub state: PlaybackState,
    /// A track is loaded (playing or paused)
    pub playing: bool,
    pub paused: bool,
    /// Identifies the current track load; 0 before anything played
    pub generation: u64,
    pub queue: Vec<TrackId>,
    /// Oldest first
    pub history: Vec<TrackId>,
    pub shuffle: bool,
    pub shuffle_remaining: usize,
}

impl Snapshot {
    /// Elapsed time as `m:ss`
    pub fn elapsed(&self) -> String {
        stereo_core::format_clock(std::time::Duration::from_secs(self.elapsed_seconds))
    }

    /// Whether the loaded track has played to its known end
    pub fn is_finished(&self) -> bool {
        self.state == PlaybackState::Playing
            && self.length_seconds > 0
            && self.elapsed_seconds >= self.length_seconds
    }
}
