use sqlx::{sqlite::SqliteRow, Row, SqlitePool};
use std::path::PathBuf;
use std::time::Duration;
use stereo_core::{error::Result, Track, TrackId};

/// Data for inserting a new track
#[derive(Debug, Clone)]
pub struct CreateTrack {
    pub path: PathBuf,
    pub title: String,
    pub album: String,
    pub track_number: u32,
    pub duration: Duration,
}

fn from_row(row: &SqliteRow) -> Track {
    let track_number: i64 = row.get("track_number");
    let length_seconds: i64 = row.get("length_seconds");

    Track {
        id: row.get("id"),
        path: PathBuf::from(row.get::<String, _>("file_path")),
        title: row.get("title"),
        album: row.get("album"),
        track_number: u32::try_from(track_number).unwrap_or(0),
        duration: Duration::from_secs(u64::try_from(length_seconds).unwrap_or(0)),
    }
}

/// Get track by ID
pub async fn get_by_id(pool: &SqlitePool, id: TrackId) -> Result<Option<Track>> {
    let row = sqlx::query(
        r#"
        SELECT id, file_path, title, album, track_number, length_seconds
        FROM tracks
        WHERE id = ?
        "#,
    )
    .bind(id)
    .fetch_optional(pool)
    .await?;

    Ok(row.as_ref().map(from_row))
}

/// Get the ids of all tracks, in assignment order
pub async fn all_ids(pool: &SqlitePool) -> Result<Vec<TrackId>> {
    let rows = sqlx::query("SELECT id FROM tracks ORDER BY id")
        .fetch_all(pool)
        .await?;

    Ok(rows.iter().map(|row| row.get("id")).collect())
}

/// Create new track
pub async fn create(pool: &SqlitePool, track: CreateTrack) -> Result<Track> {
    let length_seconds = i64::try_from(track.duration.as_secs()).unwrap_or(i64::MAX);

    let result = sqlx::query(
        r#"
        INSERT INTO tracks (file_path, title, album, track_number, length_seconds)
        VALUES (?, ?, ?, ?, ?)
        "#,
    )
    .bind(track.path.to_string_lossy().into_owned())
    .bind(&track.title)
    .bind(&track.album)
    .bind(i64::from(track.track_number))
    .bind(length_seconds)
    .execute(pool)
    .await?;

    Ok(Track {
        id: TrackId::new(result.last_insert_rowid()),
        path: track.path,
        title: track.title,
        album: track.album,
        track_number: track.track_number,
        duration: Duration::from_secs(track.duration.as_secs()),
    })
}
