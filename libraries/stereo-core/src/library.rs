//! Library store trait

use crate::error::Result;
use crate::types::{Track, TrackId};
use async_trait::async_trait;

/// Read-only view of the music library
///
/// The playback controller consumes the library through this trait only; it
/// never writes to it. Implemented by the `SQLite` store in `stereo-storage`
/// and by [`MemoryLibrary`](crate::MemoryLibrary).
#[async_trait]
pub trait LibraryStore: Send + Sync {
    /// Look up a track by id
    ///
    /// Returns `Ok(None)` when no such track exists.
    async fn track_by_id(&self, id: TrackId) -> Result<Option<Track>>;

    /// Get the ordered track ids of a named playlist
    ///
    /// # Errors
    /// Returns `StereoError::PlaylistNotFound` if the playlist does not exist
    async fn playlist_track_ids(&self, name: &str) -> Result<Vec<TrackId>>;

    /// Get the ids of every track in the library
    async fn all_track_ids(&self) -> Result<Vec<TrackId>>;
}
