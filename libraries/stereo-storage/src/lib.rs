//! Stereo Storage
//!
//! `SQLite` library store for the Stereo audio server.
//!
//! The playback controller only reads from the library (track lookup,
//! playlist contents, full catalog). Writes exist for the import tooling and
//! for tests.
//!
//! # Architecture
//!
//! - **Vertical Slicing**: each table family owns its own queries
//!   (`tracks`, `playlists`)
//! - **Embedded Migrations**: the schema ships inside the binary
//!
//! # Example
//!
//! ```rust,no_run
//! use stereo_storage::SqliteLibrary;
//! use stereo_core::{LibraryStore, TrackId};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let library = SqliteLibrary::open("sqlite://stereo.db").await?;
//! let track = library.track_by_id(TrackId::new(1)).await?;
//! # Ok(())
//! # }
//! ```

mod context;
mod error;

// Vertical slices
pub mod playlists;
pub mod tracks;

pub use context::SqliteLibrary;
pub use error::StorageError;
pub use tracks::CreateTrack;

use sqlx::migrate::Migrator;
use sqlx::sqlite::SqlitePool;

// Embed migrations into binary
static MIGRATOR: Migrator = sqlx::migrate!("./migrations");

/// Run database migrations
///
/// This should be called once when the application starts to ensure
/// the database schema is up to date.
///
/// # Errors
///
/// Returns an error if migrations fail to run
pub async fn run_migrations(pool: &SqlitePool) -> Result<(), sqlx::migrate::MigrateError> {
    MIGRATOR.run(pool).await
}

/// Create a new `SQLite` pool
///
/// # Arguments
///
/// * `database_url` - `SQLite` connection string (e.g., `<sqlite://stereo.db>`)
///
/// # Errors
///
/// Returns an error if the connection fails
pub async fn create_pool(database_url: &str) -> Result<SqlitePool, sqlx::Error> {
    use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions};
    use std::str::FromStr;

    tracing::debug!("Creating pool with URL: {}", database_url);

    let options = SqliteConnectOptions::from_str(database_url)?
        .create_if_missing(true)
        .journal_mode(SqliteJournalMode::Wal)
        .foreign_keys(true)
        .busy_timeout(std::time::Duration::from_secs(30));

    let pool = SqlitePoolOptions::new()
        .max_connections(5)
        .connect_with(options)
        .await?;

    Ok(pool)
}
