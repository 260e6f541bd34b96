//! Elapsed-time bookkeeping for the loaded track
//!
//! The output process cannot be asked where it is. Position is derived from
//! an anchor instead: while running, `elapsed = offset + (now - since)`.
//! Pausing freezes that value. Resuming and seeking re-anchor at `now` with
//! the new offset, so paused time never counts.

use crate::types::PlaybackState;
use std::time::Duration;
use stereo_core::Track;
use tokio::time::Instant;

/// Title and album shown when nothing is loaded
pub const NOT_PLAYING: &str = "Not playing";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Clock {
    /// Output process running since `since`, which was `offset` into the track
    Running { since: Instant, offset: Duration },

    /// Output process stopped; position frozen at `elapsed`
    Paused { elapsed: Duration, paused_at: Instant },
}

/// The loaded track and its clock
#[derive(Debug, Clone)]
pub struct NowPlaying {
    pub track: Track,
    pub generation: u64,
    clock: Clock,
}

impl NowPlaying {
    /// A track that started playing at `now`, `offset` into the file
    pub fn start(track: Track, generation: u64, offset: Duration, now: Instant) -> Self {
        Self {
            track,
            generation,
            clock: Clock::Running { since: now, offset },
        }
    }

    pub fn clock(&self) -> Clock {
        self.clock
    }

    pub fn state(&self) -> PlaybackState {
        match self.clock {
            Clock::Running { .. } => PlaybackState::Playing,
            Clock::Paused { .. } => PlaybackState::Paused,
        }
    }

    pub fn is_paused(&self) -> bool {
        matches!(self.clock, Clock::Paused { .. })
    }

    pub fn elapsed(&self, now: Instant) -> Duration {
        match self.clock {
            Clock::Running { since, offset } => {
                offset.saturating_add(now.saturating_duration_since(since))
            }
            Clock::Paused { elapsed, .. } => elapsed,
        }
    }

    /// Freeze the clock; returns the frozen position
    pub fn pause(&mut self, now: Instant) -> Duration {
        let elapsed = self.elapsed(now);
        if !self.is_paused() {
            self.clock = Clock::Paused {
                elapsed,
                paused_at: now,
            };
        }
        elapsed
    }

    /// Run the clock again from `offset`, anchored at `now`
    pub fn run_from(&mut self, offset: Duration, now: Instant) {
        self.clock = Clock::Running { since: now, offset };
    }

    /// Clamp a seek target to the end of the track when its length is known
    pub fn within_track(&self, position: Duration) -> Duration {
        if self.track.duration.is_zero() {
            position
        } else {
            position.min(self.track.duration)
        }
    }

    /// Move a paused position without starting the clock
    pub fn set_paused_position(&mut self, position: Duration) {
        if let Clock::Paused { elapsed, .. } = &mut self.clock {
            *elapsed = position;
        }
    }

    /// How long the clock has been frozen
    pub fn paused_for(&self, now: Instant) -> Option<Duration> {
        match self.clock {
            Clock::Paused { paused_at, .. } => Some(now.saturating_duration_since(paused_at)),
            Clock::Running { .. } => None,
        }
    }
}

/// Position after moving `delta` backwards, clamped at the start
pub fn rewound(position: Duration, delta: Duration) -> Duration {
    position.saturating_sub(delta)
}

/// Position after moving `delta` forwards
pub fn forwarded(position: Duration, delta: Duration) -> Duration {
    position.saturating_add(delta)
}
