//! Volume clamping and mute overlay
//!
//! The session stores a plain linear volume in 0.0-1.0. Muting is not session
//! state: the UI keeps a [`MuteOverlay`] that remembers the pre-mute level and
//! drives the session volume to zero and back.

use crate::session::Session;

/// Clamp a volume level into 0.0-1.0
///
/// NaN is treated as silence.
pub fn clamp_volume(level: f32) -> f32 {
    if level.is_nan() {
        0.0
    } else {
        level.clamp(0.0, 1.0)
    }
}

/// Caller-side mute state
///
/// Caches the level in effect when mute was engaged so unmuting restores it.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct MuteOverlay {
    saved_level: Option<f32>,
}

impl MuteOverlay {
    pub fn new() -> Self {
        Self::default()
    }

    /// Check if muted
    pub fn is_muted(&self) -> bool {
        self.saved_level.is_some()
    }

    /// Level that unmuting would restore
    pub fn saved_level(&self) -> Option<f32> {
        self.saved_level
    }

    /// Mute (preserves the current session volume)
    pub fn mute(&mut self, session: &mut Session) {
        if self.saved_level.is_none() {
            self.saved_level = Some(session.volume());
            session.set_volume(0.0);
        }
    }

    /// Unmute (restores the cached volume)
    pub fn unmute(&mut self, session: &mut Session) {
        if let Some(level) = self.saved_level.take() {
            session.set_volume(level);
        }
    }

    /// Toggle mute state
    pub fn toggle(&mut self, session: &mut Session) {
        if self.is_muted() {
            self.unmute(session);
        } else {
            self.mute(session);
        }
    }

    /// Explicit volume change from the UI
    ///
    /// Dragging the slider while muted cancels the mute.
    pub fn set_volume(&mut self, session: &mut Session, level: f32) {
        self.saved_level = None;
        session.set_volume(level);
    }
}
