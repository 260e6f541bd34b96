/// Track domain type
use crate::types::TrackId;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

/// Audio track
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Track {
    /// Unique track identifier
    pub id: TrackId,

    /// File path on disk
    pub path: PathBuf,

    /// Track title
    pub title: String,

    /// Album title
    pub album: String,

    /// Track number within the album (0 when unknown)
    pub track_number: u32,

    /// Track length, whole seconds (zero when unknown)
    pub duration: Duration,
}

impl Track {
    /// Create a new track with minimal metadata
    pub fn new(id: TrackId, title: impl Into<String>, path: PathBuf) -> Self {
        Self {
            id,
            path,
            title: title.into(),
            album: String::new(),
            track_number: 0,
            duration: Duration::ZERO,
        }
    }

    /// Set the album title
    #[must_use]
    pub fn with_album(mut self, album: impl Into<String>) -> Self {
        self.album = album.into();
        self
    }

    /// Set the track number
    #[must_use]
    pub fn with_track_number(mut self, track_number: u32) -> Self {
        self.track_number = track_number;
        self
    }

    /// Set the track length
    #[must_use]
    pub fn with_duration(mut self, duration: Duration) -> Self {
        self.duration = duration;
        self
    }

    /// Track length in whole seconds
    pub fn length_seconds(&self) -> u64 {
        self.duration.as_secs()
    }

    /// Track length formatted as `m:ss`
    pub fn length(&self) -> String {
        format_clock(self.duration)
    }
}

/// Format a duration as `m:ss`, truncating sub-second precision.
///
/// Minutes are not wrapped into hours: 65 minutes renders as `65:00`.
pub fn format_clock(duration: Duration) -> String {
    let secs = duration.as_secs();
    format!("{}:{:02}", secs / 60, secs % 60)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn format_pads_seconds() {
        assert_eq!(format_clock(Duration::ZERO), "0:00");
        assert_eq!(format_clock(Duration::from_secs(5)), "0:05");
        assert_eq!(format_clock(Duration::from_secs(61)), "1:01");
        assert_eq!(format_clock(Duration::from_millis(10_999)), "0:10");
        assert_eq!(format_clock(Duration::from_secs(3900)), "65:00");
    }

    #[test]
    fn length_is_derived_from_duration() {
        let track = Track::new(TrackId::new(1), "Song", PathBuf::from("/music/song.mp3"))
            .with_duration(Duration::from_secs(187));
        assert_eq!(track.length(), "3:07");
        assert_eq!(track.length_seconds(), 187);
    }
}
