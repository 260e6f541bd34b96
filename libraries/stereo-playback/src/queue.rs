//! Up-next queue
//!
//! Plain FIFO of track ids waiting to be played. Tracks are looked up in the
//! library only when they reach the head, so a queued id may turn out to be
//! missing by the time it plays.

use std::collections::VecDeque;
use stereo_core::TrackId;

#[derive(Debug, Clone, Default)]
pub struct UpNext {
    tracks: VecDeque<TrackId>,
}

impl UpNext {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append to the tail
    pub fn push(&mut self, id: TrackId) {
        self.tracks.push_back(id);
    }

    /// Append several ids, keeping their order
    pub fn extend<I: IntoIterator<Item = TrackId>>(&mut self, ids: I) {
        self.tracks.extend(ids);
    }

    /// Take the head
    pub fn pop(&mut self) -> Option<TrackId> {
        self.tracks.pop_front()
    }

    pub fn peek(&self) -> Option<TrackId> {
        self.tracks.front().copied()
    }

    pub fn clear(&mut self) {
        self.tracks.clear();
    }

    pub fn len(&self) -> usize {
        self.tracks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tracks.is_empty()
    }

    /// Queued ids, head first
    pub fn to_vec(&self) -> Vec<TrackId> {
        self.tracks.iter().copied().collect()
    }
}
