/// Up-next queue API routes
use crate::{
    error::{Result, ServerError},
    state::AppState,
};
use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde::Deserialize;
use stereo_core::TrackId;
use stereo_playback::Snapshot;

#[derive(Debug, Default, Deserialize)]
pub struct EnqueueQuery {
    /// Queue without starting playback
    #[serde(default)]
    pub priority: bool,
}

#[derive(Debug, Deserialize)]
pub struct EnqueueManyRequest {
    pub track_ids: Vec<TrackId>,
}

/// POST /api/up-next/:track_id - Add a track to the queue
///
/// Queueing a track explicitly ends any shuffle session.
pub async fn enqueue(
    State(app_state): State<AppState>,
    Path(track_id): Path<TrackId>,
    Query(query): Query<EnqueueQuery>,
) -> Result<Json<Snapshot>> {
    let controller = &app_state.controller;
    controller.end_shuffle().await?;
    Ok(Json(controller.enqueue(track_id, query.priority).await?))
}

/// POST /api/up-next - Add several tracks (an album, a playlist) in order
pub async fn enqueue_many(
    State(app_state): State<AppState>,
    Json(request): Json<EnqueueManyRequest>,
) -> Result<Json<Snapshot>> {
    if request.track_ids.is_empty() {
        return Err(ServerError::BadRequest("track_ids is empty".to_string()));
    }

    Ok(Json(
        app_state.controller.enqueue_many(request.track_ids).await?,
    ))
}

/// DELETE /api/up-next - Empty the queue
pub async fn clear(State(app_state): State<AppState>) -> Result<Json<Snapshot>> {
    Ok(Json(app_state.controller.clear_queue().await?))
}
