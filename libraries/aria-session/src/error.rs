//! Error types for session operations

use thiserror::Error;

/// Session errors
///
/// None of these leave the session in an invalid state; navigation failures
/// are no-ops and driver failures are recorded into the session.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SessionError {
    /// Navigation attempted over an empty collection
    #[error("Track collection is empty")]
    EmptyCollection,

    /// Index does not address the current collection
    #[error("Index {index} out of range for collection of {len} tracks")]
    IndexOutOfRange { index: usize, len: usize },

    /// No playlist with this id
    #[error("Playlist not found: {0}")]
    PlaylistNotFound(String),

    /// A playlist with this id already exists
    #[error("Playlist already exists: {0}")]
    DuplicatePlaylist(String),

    /// Reorder is not a permutation of the playlist's tracks
    #[error("Invalid track order for playlist {0}")]
    InvalidTrackOrder(String),

    /// Failure reported by the audio driver
    #[error("Audio driver error: {0}")]
    Driver(String),
}

/// Result type for session operations
pub type Result<T> = std::result::Result<T, SessionError>;
