/// Server error types
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use stereo_playback::PlaybackError;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, ServerError>;

#[derive(Debug, Error)]
pub enum ServerError {
    #[error("Resource not found: {0}")]
    NotFound(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Service unavailable: {0}")]
    Unavailable(String),

    #[error("Playback error: {0}")]
    Playback(PlaybackError),

    #[error("Storage error: {0}")]
    Storage(#[from] stereo_storage::StorageError),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Internal server error: {0}")]
    Internal(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<PlaybackError> for ServerError {
    fn from(err: PlaybackError) -> Self {
        match err {
            PlaybackError::TrackNotFound(_) | PlaybackError::PlaylistNotFound(_) => {
                ServerError::NotFound(err.to_string())
            }
            PlaybackError::ControllerClosed => ServerError::Unavailable(err.to_string()),
            other => ServerError::Playback(other),
        }
    }
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        let (status, error_message) = match self {
            ServerError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            ServerError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            ServerError::Unavailable(msg) => {
                tracing::warn!("Unavailable: {}", msg);
                (StatusCode::SERVICE_UNAVAILABLE, msg)
            }
            ServerError::Playback(ref e) => {
                tracing::error!("Playback error: {:?}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Playback error".to_string(),
                )
            }
            ServerError::Storage(ref e) => {
                tracing::error!("Storage error: {:?}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Storage error".to_string(),
                )
            }
            ServerError::Config(ref msg) => {
                tracing::error!("Config error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Configuration error".to_string(),
                )
            }
            ServerError::Internal(ref msg) => {
                tracing::error!("Internal error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error".to_string(),
                )
            }
            ServerError::Io(ref e) => {
                tracing::error!("IO error: {:?}", e);
                (StatusCode::INTERNAL_SERVER_ERROR, "IO error".to_string())
            }
        };

        let body = Json(json!({
            "error": error_message,
        }));

        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use stereo_core::TrackId;

    #[test]
    fn playback_errors_map_to_statuses() {
        let not_found: ServerError = PlaybackError::TrackNotFound(TrackId::new(3)).into();
        assert_eq!(not_found.into_response().status(), StatusCode::NOT_FOUND);

        let missing_playlist: ServerError =
            PlaybackError::PlaylistNotFound("mix".to_string()).into();
        assert_eq!(
            missing_playlist.into_response().status(),
            StatusCode::NOT_FOUND
        );

        let closed: ServerError = PlaybackError::ControllerClosed.into();
        assert_eq!(
            closed.into_response().status(),
            StatusCode::SERVICE_UNAVAILABLE
        );

        let launch: ServerError = PlaybackError::NoBackendAvailable("ffplay".to_string()).into();
        assert_eq!(
            launch.into_response().status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
