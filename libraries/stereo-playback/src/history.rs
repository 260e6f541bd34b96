//! Playback history tracking
//!
//! Bounded record of recently started tracks, oldest first.

use std::collections::VecDeque;
use stereo_core::TrackId;

/// Playback history with bounded size
///
/// Starting the same track twice in a row records it once. When full, the
/// oldest entry is discarded.
#[derive(Debug, Clone)]
pub struct History {
    /// Most recent = back
    tracks: VecDeque<TrackId>,

    max_size: usize,
}

impl History {
    /// Create new history with specified maximum size
    ///
    /// A maximum of zero keeps nothing.
    pub fn new(max_size: usize) -> Self {
        Self {
            tracks: VecDeque::with_capacity(max_size),
            max_size,
        }
    }

    /// Record a track start
    pub fn push(&mut self, id: TrackId) {
        if self.max_size == 0 || self.tracks.back() == Some(&id) {
            return;
        }
        if self.tracks.len() >= self.max_size {
            self.tracks.pop_front();
        }
        self.tracks.push_back(id);
    }

    /// Most recent entry
    pub fn last(&self) -> Option<TrackId> {
        self.tracks.back().copied()
    }

    /// All entries, oldest first
    pub fn to_vec(&self) -> Vec<TrackId> {
        self.tracks.iter().copied().collect()
    }

    pub fn len(&self) -> usize {
        self.tracks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tracks.is_empty()
    }

    pub fn max_size(&self) -> usize {
        self.max_size
    }
}

impl Default for History {
    fn default() -> Self {
        Self::new(10)
    }
}
