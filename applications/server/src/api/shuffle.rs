/// Shuffle API routes
use crate::{
    error::{Result, ServerError},
    state::AppState,
};
use axum::{body::Bytes, extract::State, Json};
use serde::Deserialize;
use stereo_playback::Snapshot;

#[derive(Debug, Default, Deserialize)]
pub struct ShuffleRequest {
    /// Playlist to shuffle; the whole library when absent
    #[serde(default)]
    pub playlist: Option<String>,
}

impl ShuffleRequest {
    /// An empty body means the whole library; anything else must parse
    fn from_body(body: &[u8]) -> Result<Self> {
        if body.iter().all(u8::is_ascii_whitespace) {
            return Ok(Self::default());
        }

        serde_json::from_slice(body)
            .map_err(|e| ServerError::BadRequest(format!("Invalid shuffle request: {e}")))
    }
}

/// POST /api/shuffle - Start shuffling and play the first pick
pub async fn begin(State(app_state): State<AppState>, body: Bytes) -> Result<Json<Snapshot>> {
    let request = ShuffleRequest::from_body(&body)?;
    Ok(Json(
        app_state.controller.begin_shuffle(request.playlist).await?,
    ))
}

/// DELETE /api/shuffle - Leave shuffle mode
pub async fn end(State(app_state): State<AppState>) -> Result<Json<Snapshot>> {
    Ok(Json(app_state.controller.end_shuffle().await?))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_body_shuffles_library() {
        assert!(ShuffleRequest::from_body(b"").unwrap().playlist.is_none());
        assert!(ShuffleRequest::from_body(b" \n").unwrap().playlist.is_none());
        assert!(ShuffleRequest::from_body(b"{}").unwrap().playlist.is_none());
    }

    #[test]
    fn named_playlist_is_parsed() {
        let request = ShuffleRequest::from_body(br#"{"playlist": "evening"}"#).unwrap();
        assert_eq!(request.playlist.as_deref(), Some("evening"));
    }

    #[test]
    fn malformed_body_is_rejected() {
        assert!(matches!(
            ShuffleRequest::from_body(br#"{"playlist": 5}"#),
            Err(ServerError::BadRequest(_))
        ));
        assert!(matches!(
            ShuffleRequest::from_body(b"playlist=evening"),
            Err(ServerError::BadRequest(_))
        ));
    }
}
