use sqlx::{Row, SqlitePool};
use stereo_core::{error::Result, StereoError, TrackId};

async fn find_id(pool: &SqlitePool, name: &str) -> Result<i64> {
    let row = sqlx::query("SELECT id FROM playlists WHERE name = ?")
        .bind(name)
        .fetch_optional(pool)
        .await?;

    row.map(|row| row.get("id"))
        .ok_or_else(|| StereoError::PlaylistNotFound(name.to_string()))
}

/// Create new, empty playlist
///
/// # Errors
/// Returns `StereoError::Duplicate` if a playlist with that name exists
pub async fn create(pool: &SqlitePool, name: &str) -> Result<i64> {
    let result = sqlx::query("INSERT INTO playlists (name) VALUES (?)")
        .bind(name)
        .execute(pool)
        .await;

    match result {
        Ok(done) => Ok(done.last_insert_rowid()),
        Err(sqlx::Error::Database(e)) if e.is_unique_violation() => {
            Err(StereoError::Duplicate(format!("playlist {name}")))
        }
        Err(e) => Err(e.into()),
    }
}

/// Append a track to the end of a playlist
pub async fn append_track(pool: &SqlitePool, name: &str, track_id: TrackId) -> Result<()> {
    let playlist_id = find_id(pool, name).await?;

    let mut tx = pool.begin().await?;

    sqlx::query(
        r#"
        INSERT INTO playlist_tracks (playlist_id, track_id, position)
        VALUES (?, ?, (SELECT COALESCE(MAX(position) + 1, 0)
                       FROM playlist_tracks WHERE playlist_id = ?))
        "#,
    )
    .bind(playlist_id)
    .bind(track_id)
    .bind(playlist_id)
    .execute(&mut *tx)
    .await?;

    sqlx::query(
        "UPDATE playlists SET modified_at = CAST(strftime('%s', 'now') AS INTEGER) WHERE id = ?",
    )
    .bind(playlist_id)
    .execute(&mut *tx)
    .await?;

    tx.commit().await?;

    Ok(())
}

/// Get the ordered track ids of a playlist
///
/// # Errors
/// Returns `StereoError::PlaylistNotFound` if the playlist does not exist
pub async fn track_ids_by_name(pool: &SqlitePool, name: &str) -> Result<Vec<TrackId>> {
    let playlist_id = find_id(pool, name).await?;

    let rows = sqlx::query(
        "SELECT track_id FROM playlist_tracks WHERE playlist_id = ? ORDER BY position",
    )
    .bind(playlist_id)
    .fetch_all(pool)
    .await?;

    Ok(rows.iter().map(|row| row.get("track_id")).collect())
}

/// Get all playlist names, least recently modified first
pub async fn names(pool: &SqlitePool) -> Result<Vec<String>> {
    let rows = sqlx::query("SELECT name FROM playlists ORDER BY modified_at, id")
        .fetch_all(pool)
        .await?;

    Ok(rows.iter().map(|row| row.get("name")).collect())
}
