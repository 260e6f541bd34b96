//! Integration tests for the playlists vertical slice and the
//! `LibraryStore` implementation


use stereo_core::{LibraryStore, StereoError};
use stereo_storage::SqliteLibrary;
use test_helpers::*;

#[tokio::test]
async fn test_playlist_keeps_insertion_order() {
    let test_db = TestDb::new().await;
    let pool = test_db.pool();

    let a = create_test_track(pool, "A", "X", 1, 10).await;
    let b = create_test_track(pool, "B", "X", 2, 10).await;
    let c = create_test_track(pool, "C", "X", 3, 10).await;

    create_test_playlist(pool, "mix", &[c.id, a.id, b.id, a.id]).await;

    let ids = stereo_storage::playlists::track_ids_by_name(pool, "mix")
        .await
        .unwrap();
    assert_eq!(ids, vec![c.id, a.id, b.id, a.id]);
}

#[tokio::test]
async fn test_missing_playlist() {
    let test_db = TestDb::new().await;

    let result = stereo_storage::playlists::track_ids_by_name(test_db.pool(), "nope").await;
    assert!(matches!(result, Err(StereoError::PlaylistNotFound(name)) if name == "nope"));

    let result = stereo_storage::playlists::append_track(
        test_db.pool(),
        "nope",
        stereo_core::TrackId::new(1),
    )
    .await;
    assert!(matches!(result, Err(StereoError::PlaylistNotFound(_))));
}

#[tokio::test]
async fn test_duplicate_playlist_name() {
    let test_db = TestDb::new().await;
    let pool = test_db.pool();

    stereo_storage::playlists::create(pool, "road trip")
        .await
        .unwrap();
    let result = stereo_storage::playlists::create(pool, "road trip").await;

    assert!(matches!(result, Err(StereoError::Duplicate(_))));
}

#[tokio::test]
async fn test_empty_playlist_and_names() {
    let test_db = TestDb::new().await;
    let pool = test_db.pool();

    create_test_playlist(pool, "first", &[]).await;
    create_test_playlist(pool, "second", &[]).await;

    let ids = stereo_storage::playlists::track_ids_by_name(pool, "first")
        .await
        .unwrap();
    assert!(ids.is_empty());

    let names = stereo_storage::playlists::names(pool).await.unwrap();
    assert_eq!(names, vec!["first".to_string(), "second".to_string()]);
}

#[tokio::test]
async fn test_sqlite_library_store() {
    let test_db = TestDb::new().await;
    let pool = test_db.pool();

    let a = create_test_track(pool, "A", "X", 1, 200).await;
    let b = create_test_track(pool, "B", "X", 2, 180).await;
    create_test_playlist(pool, "evening", &[b.id]).await;

    let library = SqliteLibrary::open(&test_db.url).await.unwrap();

    let track = library.track_by_id(a.id).await.unwrap().unwrap();
    assert_eq!(track.title, "A");

    assert_eq!(library.all_track_ids().await.unwrap(), vec![a.id, b.id]);
    assert_eq!(
        library.playlist_track_ids("evening").await.unwrap(),
        vec![b.id]
    );
    assert!(matches!(
        library.playlist_track_ids("morning").await,
        Err(StereoError::PlaylistNotFound(_))
    ));
}
