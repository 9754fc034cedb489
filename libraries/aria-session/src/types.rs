//! Core types for the playback session

use serde::{Deserialize, Serialize};

/// Track as supplied by the library provider
///
/// The session never mutates tracks; it only records which one is current.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Track {
    /// Opaque track identifier from the library
    pub id: String,

    /// Track title
    pub title: String,

    /// Artist name
    pub artist: String,

    /// Album name (optional)
    pub album: Option<String>,

    /// Duration in seconds as known by the library (0 if unknown)
    pub duration: f64,

    /// Cover art reference (path or URL)
    pub cover: Option<String>,
}

impl Track {
    /// Create a track with only an id and title
    pub fn new(id: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            artist: String::new(),
            album: None,
            duration: 0.0,
            cover: None,
        }
    }

    /// Set the artist
    pub fn with_artist(mut self, artist: impl Into<String>) -> Self {
        self.artist = artist.into();
        self
    }

    /// Set the album
    pub fn with_album(mut self, album: impl Into<String>) -> Self {
        self.album = Some(album.into());
        self
    }

    /// Set the duration in seconds
    pub fn with_duration(mut self, seconds: f64) -> Self {
        self.duration = seconds;
        self
    }
}

/// Repeat mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RepeatMode {
    /// Play through the collection once
    #[default]
    None,

    /// Loop current track only
    One,

    /// Loop entire collection
    All,
}

impl RepeatMode {
    /// Next mode in the toggle order: None -> One -> All -> None
    pub fn cycle(self) -> Self {
        match self {
            Self::None => Self::One,
            Self::One => Self::All,
            Self::All => Self::None,
        }
    }
}

/// Navigation direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Direction {
    Next,
    Previous,
}

/// Field a library view is ordered by
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortField {
    #[default]
    Title,
    Artist,
    Album,
    Duration,
}

/// Sort direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    #[default]
    Asc,
    Desc,
}

/// Coarse playback phase as reported by the audio driver
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LifecycleState {
    /// Nothing loaded
    #[default]
    Idle,

    /// Track requested, driver not ready yet
    Loading,

    /// Driver is producing audio
    Playing,

    /// Paused mid-track
    Paused,

    /// Driver reached the end of the track
    Ended,
}

/// Initial user preferences for a session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// Initial volume (0.0-1.0, default: 0.8)
    pub volume: f32,

    /// Initial repeat mode (default: None)
    pub repeat: RepeatMode,

    /// Initial shuffle flag (default: false)
    pub shuffle: bool,

    /// Initial playback rate (default: 1.0)
    pub playback_rate: f32,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            volume: 0.8,
            repeat: RepeatMode::None,
            shuffle: false,
            playback_rate: 1.0,
        }
    }
}
