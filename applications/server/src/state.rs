/// Shared application state
use stereo_playback::PlaybackController;

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub controller: PlaybackController,
}

impl AppState {
    pub fn new(controller: PlaybackController) -> Self {
        Self { controller }
    }
}
