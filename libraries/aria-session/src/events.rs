//! Driver events and commands
//!
//! The session talks to the audio driver through two message types:
//! - [`DriverEvent`]: reports fed into the session (position, readiness, end of track)
//! - [`DriverCommand`]: requests queued by the session for the driver to execute

use crate::types::Track;
use serde::{Deserialize, Serialize};

/// Reports from the audio driver
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum DriverEvent {
    /// Periodic position update in seconds
    PositionUpdate(f64),

    /// Track duration became known (seconds)
    DurationKnown(f64),

    /// Loaded track is ready to produce audio
    Ready,

    /// Playback actually started or resumed
    Playing,

    /// Playback actually paused
    Paused,

    /// Track reached its end naturally
    Ended,

    /// Driver failure
    Error(String),
}

/// Requests for the audio driver
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum DriverCommand {
    /// Load a track, superseding anything in flight
    Load(Track),

    /// Start or resume playback
    Play,

    /// Pause playback
    Pause,

    /// Seek to position in seconds
    Seek(f64),

    /// Set output volume (0.0-1.0)
    SetVolume(f32),

    /// Set playback rate multiplier
    SetPlaybackRate(f32),
}
