/// Common test utilities and fixtures
use axum::Router;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use stereo_core::{MemoryLibrary, Track, TrackId};
use stereo_playback::testing::RecordingBackend;
use stereo_playback::{PlaybackConfig, PlaybackController};
use stereo_server::{create_router, AppState};

/// A small library: tracks 1..=4 on one album, playlist "evening" = [2, 3]
pub fn create_test_library() -> MemoryLibrary {
    let mut library: MemoryLibrary = (1..=4)
        .map(|n| {
            Track::new(
                TrackId::new(n),
                format!("Track {n}"),
                PathBuf::from(format!("/music/album/{n:02}.flac")),
            )
            .with_album("Fixture Album")
            .with_track_number(u32::try_from(n).unwrap())
            .with_duration(Duration::from_secs(60 * u64::try_from(n).unwrap()))
        })
        .collect();
    library.insert_playlist("evening", vec![TrackId::new(2), TrackId::new(3)]);
    library
}

pub struct TestApp {
    pub router: Router,
    pub controller: PlaybackController,
    pub backend: RecordingBackend,
}

/// Create test app router backed by a recording backend
pub fn create_test_app() -> TestApp {
    let backend = RecordingBackend::new();
    let controller = PlaybackController::spawn(
        Arc::new(backend.clone()),
        Arc::new(create_test_library()),
        PlaybackConfig::default(),
    );

    TestApp {
        router: create_router(AppState::new(controller.clone())),
        controller,
        backend,
    }
}
