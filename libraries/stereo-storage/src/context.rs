use crate::{playlists, tracks, StorageError};
use async_trait::async_trait;
use sqlx::SqlitePool;
use stereo_core::{error::Result, LibraryStore, Track, TrackId};

/// Library store backed by `SQLite`
#[derive(Debug, Clone)]
pub struct SqliteLibrary {
    pool: SqlitePool,
}

impl SqliteLibrary {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Connect to `database_url` and bring the schema up to date
    pub async fn open(database_url: &str) -> std::result::Result<Self, StorageError> {
        let pool = crate::create_pool(database_url).await?;
        crate::run_migrations(&pool).await?;
        Ok(Self::new(pool))
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }
}

#[async_trait]
impl LibraryStore for SqliteLibrary {
    async fn track_by_id(&self, id: TrackId) -> Result<Option<Track>> {
        tracks::get_by_id(&self.pool, id).await
    }

    async fn playlist_track_ids(&self, name: &str) -> Result<Vec<TrackId>> {
        playlists::track_ids_by_name(&self.pool, name).await
    }

    async fn all_track_ids(&self) -> Result<Vec<TrackId>> {
        tracks::all_ids(&self.pool).await
    }
}
