//! Stereo Core
//!
//! Shared domain types, the library store abstraction and error handling for
//! the Stereo audio server.
//!
//! # Architecture
//!
//! The core crate defines:
//! - **Domain Types**: `Track`, `TrackId`
//! - **Library Store**: the read-only `LibraryStore` trait the playback
//!   controller consumes (track lookup, playlist contents, full catalog)
//! - **Error Handling**: unified `StereoError` and `Result` types
//!
//! # Example
//!
//! ```rust
//! use stereo_core::{format_clock, MemoryLibrary, Track, TrackId};
//! use std::path::PathBuf;
//! use std::time::Duration;
//!
//! let track = Track::new(TrackId::new(1), "Intro", PathBuf::from("/music/intro.flac"))
//!     .with_album("Debut")
//!     .with_duration(Duration::from_secs(75));
//!
//! assert_eq!(track.length(), "1:15");
//! assert_eq!(format_clock(Duration::from_secs(9)), "0:09");
//!
//! let mut library = MemoryLibrary::new();
//! library.insert(track);
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod error;
pub mod library;
pub mod memory;
pub mod types;

// Re-export commonly used types
pub use error::{Result, StereoError};
pub use library::LibraryStore;
pub use memory::MemoryLibrary;
pub use types::{format_clock, Track, TrackId};
