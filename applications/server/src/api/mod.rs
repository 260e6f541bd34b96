/// API route modules
pub mod health;
pub mod playback;
pub mod queue;
pub mod shuffle;

use crate::state::AppState;
use axum::{
    routing::{delete, get, post},
    Router,
};
use tower_http::{
    cors::CorsLayer,
    trace::{DefaultMakeSpan, TraceLayer},
};

/// Routes mounted under `/api`
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(health::health))
        .route("/now-playing", get(playback::now_playing))
        .route("/play/:track_id", post(playback::play))
        .route("/playback/next", post(playback::next))
        .route("/playback/stop", post(playback::stop))
        .route("/playback/pause", post(playback::pause))
        .route("/playback/resume", post(playback::resume))
        .route("/playback/rewind", post(playback::rewind))
        .route("/playback/forward", post(playback::forward))
        .route("/up-next/:track_id", post(queue::enqueue))
        .route("/up-next", post(queue::enqueue_many))
        .route("/up-next", delete(queue::clear))
        .route("/shuffle", post(shuffle::begin))
        .route("/shuffle", delete(shuffle::end))
}

/// The full application router
pub fn create_router(app_state: AppState) -> Router {
    Router::new()
        .nest("/api", routes())
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::default().include_headers(true)),
        )
        .layer(CorsLayer::permissive())
        .with_state(app_state)
}
