//! Error types for the playback controller

use std::path::PathBuf;
use stereo_core::{StereoError, TrackId};
use thiserror::Error;

/// Playback errors
#[derive(Debug, Error)]
pub enum PlaybackError {
    /// The library has no track with this id
    #[error("Track not found: {0}")]
    TrackNotFound(TrackId),

    /// The library has no playlist with this name
    #[error("Playlist not found: {0}")]
    PlaylistNotFound(String),

    /// Any other library failure
    #[error("Library error: {0}")]
    Library(StereoError),

    /// The output program could not be launched
    #[error("Failed to launch {program} for {path:?}: {source}")]
    Launch {
        program: &'static str,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// No usable output program was found at startup
    #[error("No audio output program available (tried: {0})")]
    NoBackendAvailable(String),

    /// The controller actor has shut down
    #[error("Playback controller is not running")]
    ControllerClosed,

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<StereoError> for PlaybackError {
    fn from(err: StereoError) -> Self {
        match err {
            StereoError::TrackNotFound(id) => Self::TrackNotFound(id),
            StereoError::PlaylistNotFound(name) => Self::PlaylistNotFound(name),
            other => Self::Library(other),
        }
    }
}

/// Result type for playback operations
pub type Result<T> = std::result::Result<T, PlaybackError>;
