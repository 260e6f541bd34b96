//! In-memory library store
//!
//! Used by tests and by embedders that already hold their catalog in memory.

use crate::error::{Result, StereoError};
use crate::library::LibraryStore;
use crate::types::{Track, TrackId};
use async_trait::async_trait;
use std::collections::{BTreeMap, HashMap};

/// Library store backed by plain collections
///
/// Populate it before sharing; it is immutable behind `Arc`.
#[derive(Debug, Clone, Default)]
pub struct MemoryLibrary {
    tracks: BTreeMap<TrackId, Track>,
    playlists: HashMap<String, Vec<TrackId>>,
}

impl MemoryLibrary {
    /// Create an empty library
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace a track
    pub fn insert(&mut self, track: Track) {
        self.tracks.insert(track.id, track);
    }

    /// Add or replace a playlist
    pub fn insert_playlist(&mut self, name: impl Into<String>, ids: Vec<TrackId>) {
        self.playlists.insert(name.into(), ids);
    }

    /// Number of tracks
    pub fn len(&self) -> usize {
        self.tracks.len()
    }

    /// Whether the library holds no tracks
    pub fn is_empty(&self) -> bool {
        self.tracks.is_empty()
    }
}

impl FromIterator<Track> for MemoryLibrary {
    fn from_iter<I: IntoIterator<Item = Track>>(iter: I) -> Self {
        let mut library = Self::new();
        for track in iter {
            library.insert(track);
        }
        library
    }
}

#[async_trait]
impl LibraryStore for MemoryLibrary {
    async fn track_by_id(&self, id: TrackId) -> Result<Option<Track>> {
        Ok(self.tracks.get(&id).cloned())
    }

    async fn playlist_track_ids(&self, name: &str) -> Result<Vec<TrackId>> {
        self.playlists
            .get(name)
            .cloned()
            .ok_or_else(|| StereoError::PlaylistNotFound(name.to_string()))
    }

    async fn all_track_ids(&self) -> Result<Vec<TrackId>> {
        Ok(self.tracks.keys().copied().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn track(id: i64) -> Track {
        Track::new(
            TrackId::new(id),
            format!("Track {id}"),
            PathBuf::from(format!("/music/{id}.mp3")),
        )
    }

    #[tokio::test]
    async fn lookup_present_and_missing() {
        let library: MemoryLibrary = [track(1), track(2)].into_iter().collect();

        let found = library.track_by_id(TrackId::new(2)).await.unwrap();
        assert_eq!(found.unwrap().title, "Track 2");

        let missing = library.track_by_id(TrackId::new(9)).await.unwrap();
        assert!(missing.is_none());
    }

    #[tokio::test]
    async fn all_ids_are_sorted() {
        let library: MemoryLibrary = [track(3), track(1), track(2)].into_iter().collect();
        let ids = library.all_track_ids().await.unwrap();
        assert_eq!(ids, vec![TrackId::new(1), TrackId::new(2), TrackId::new(3)]);
    }

    #[tokio::test]
    async fn unknown_playlist_is_an_error() {
        let mut library = MemoryLibrary::new();
        library.insert_playlist("road trip", vec![TrackId::new(4), TrackId::new(1)]);

        let ids = library.playlist_track_ids("road trip").await.unwrap();
        assert_eq!(ids, vec![TrackId::new(4), TrackId::new(1)]);

        let err = library.playlist_track_ids("missing").await.unwrap_err();
        assert!(matches!(err, StereoError::PlaylistNotFound(name) if name == "missing"));
    }
}
