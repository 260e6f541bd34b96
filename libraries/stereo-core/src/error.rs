/// Core error types for Stereo
use crate::types::TrackId;
use thiserror::Error;

/// Result type alias using `StereoError`
pub type Result<T> = std::result::Result<T, StereoError>;

/// Core error type for Stereo
#[derive(Error, Debug)]
pub enum StereoError {
    /// Storage-related errors
    #[error("Storage error: {0}")]
    Storage(String),

    /// Track not found
    #[error("Track not found: {0}")]
    TrackNotFound(TrackId),

    /// Playlist not found
    #[error("Playlist not found: {0}")]
    PlaylistNotFound(String),

    /// Duplicate entry
    #[error("Duplicate entry: {0}")]
    Duplicate(String),

    /// I/O errors
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// Database errors (for storage implementations)
    #[error("Database error: {0}")]
    Database(String),
}

impl StereoError {
    /// Create a storage error
    pub fn storage(msg: impl Into<String>) -> Self {
        Self::Storage(msg.into())
    }
}

#[cfg(feature = "sqlx-support")]
impl From<sqlx::Error> for StereoError {
    fn from(err: sqlx::Error) -> Self {
        Self::Database(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn storage_message() {
        let err = StereoError::storage("pool closed");
        assert_eq!(err.to_string(), "Storage error: pool closed");
    }

    #[test]
    fn track_not_found_message() {
        let err = StereoError::TrackNotFound(TrackId::new(7));
        assert_eq!(err.to_string(), "Track not found: 7");
    }
}
