/// Playback control API routes
use crate::{error::Result, state::AppState};
use axum::{
    extract::{Path, State},
    Json,
};
use serde::Deserialize;
use std::time::Duration;
use stereo_core::TrackId;
use stereo_playback::Snapshot;

#[derive(Debug, Deserialize)]
pub struct SeekRequest {
    pub seconds: u64,
}

/// GET /api/now-playing - Current track, position, queue and history
pub async fn now_playing(State(app_state): State<AppState>) -> Result<Json<Snapshot>> {
    Ok(Json(app_state.controller.snapshot().await?))
}

/// POST /api/play/:track_id - Play a track now
///
/// Picking a track explicitly ends any shuffle session.
pub async fn play(
    State(app_state): State<AppState>,
    Path(track_id): Path<TrackId>,
) -> Result<Json<Snapshot>> {
    let controller = &app_state.controller;
    controller.end_shuffle().await?;
    Ok(Json(controller.play_track(track_id).await?))
}

/// POST /api/playback/next - Skip to the next track
pub async fn next(State(app_state): State<AppState>) -> Result<Json<Snapshot>> {
    Ok(Json(app_state.controller.next().await?))
}

/// POST /api/playback/stop - Stop playback
pub async fn stop(State(app_state): State<AppState>) -> Result<Json<Snapshot>> {
    Ok(Json(app_state.controller.stop().await?))
}

/// POST /api/playback/pause - Pause playback
pub async fn pause(State(app_state): State<AppState>) -> Result<Json<Snapshot>> {
    Ok(Json(app_state.controller.pause().await?))
}

/// POST /api/playback/resume - Resume paused playback
pub async fn resume(State(app_state): State<AppState>) -> Result<Json<Snapshot>> {
    Ok(Json(app_state.controller.resume().await?))
}

/// POST /api/playback/rewind - Jump back
pub async fn rewind(
    State(app_state): State<AppState>,
    Json(request): Json<SeekRequest>,
) -> Result<Json<Snapshot>> {
    let by = Duration::from_secs(request.seconds);
    Ok(Json(app_state.controller.rewind(by).await?))
}

/// POST /api/playback/forward - Jump ahead
pub async fn forward(
    State(app_state): State<AppState>,
    Json(request): Json<SeekRequest>,
) -> Result<Json<Snapshot>> {
    let by = Duration::from_secs(request.seconds);
    Ok(Json(app_state.controller.forward(by).await?))
}
