//! Session store - core orchestration
//!
//! Owns the playback session and every transition on it: navigation, shuffle
//! bookkeeping, transport intent and driver feedback. Nothing here blocks or
//! performs I/O; driver work is queued as [`DriverCommand`]s.

use crate::{
    driver::AudioDriver,
    error::{Result, SessionError},
    events::{DriverCommand, DriverEvent},
    history::ShuffleHistory,
    shuffle::pick_shuffle_index,
    types::{Direction, LifecycleState, RepeatMode, SessionConfig, Track},
    volume::clamp_volume,
};
use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

/// Slowest supported playback rate
pub const MIN_PLAYBACK_RATE: f32 = 0.25;

/// Fastest supported playback rate
pub const MAX_PLAYBACK_RATE: f32 = 4.0;

/// Equalizer band gain limit in dB (applies to both directions)
pub const MAX_EQ_GAIN_DB: f32 = 12.0;

/// Playback session
///
/// Created once at startup and passed around as an explicit handle. All
/// mutations go through the methods below; the track collection is never
/// stored, only indexed into through the snapshot passed at call time.
#[derive(Debug, Clone)]
pub struct Session {
    // State
    lifecycle: LifecycleState,
    current_index: Option<usize>,
    current_track: Option<Track>,
    is_playing: bool,
    position: f64,
    duration: f64,
    last_error: Option<String>,

    // Shuffle
    shuffle_enabled: bool,
    shuffle_history: ShuffleHistory,

    // User preferences (survive reset)
    volume: f32,
    repeat: RepeatMode,
    playback_rate: f32,
    equalizer: Vec<f32>,

    // Commands waiting for the audio driver
    pending_commands: Vec<DriverCommand>,
}

/// Read-only view of the session for the UI layer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionSnapshot {
    pub current_index: Option<usize>,
    pub current_track: Option<Track>,
    pub is_playing: bool,
    pub volume: f32,
    pub position: f64,
    pub duration: f64,
    pub playback_rate: f32,
    pub equalizer: Vec<f32>,
    pub repeat_mode: RepeatMode,
    pub shuffle_enabled: bool,
    pub shuffle_history: Vec<usize>,
    pub lifecycle: LifecycleState,
    pub last_error: Option<String>,
}

impl Session {
    /// Create new session with the given preferences
    pub fn new(config: SessionConfig) -> Self {
        Self {
            lifecycle: LifecycleState::Idle,
            current_index: None,
            current_track: None,
            is_playing: false,
            position: 0.0,
            duration: 0.0,
            last_error: None,
            shuffle_enabled: config.shuffle,
            shuffle_history: ShuffleHistory::new(),
            volume: clamp_volume(config.volume),
            repeat: config.repeat,
            playback_rate: clamp_playback_rate(config.playback_rate),
            equalizer: Vec::new(),
            pending_commands: Vec::new(),
        }
    }

    // ===== Navigation =====

    /// Move to the next or previous track
    ///
    /// Shuffle takes precedence over repeat: with shuffle on, "next" is a new
    /// unvisited pick and "previous" walks back through the shuffle history.
    /// Otherwise navigation is positional and wraps at both ends.
    ///
    /// On success the new index is loaded, transport intent is set and the
    /// lifecycle moves to `Loading` until the driver reports ready.
    ///
    /// # Errors
    /// `EmptyCollection` if `tracks` is empty; the session is left unchanged.
    pub fn advance<R: Rng + ?Sized>(
        &mut self,
        direction: Direction,
        tracks: &[Track],
        rng: &mut R,
    ) -> Result<usize> {
        let len = tracks.len();
        if len == 0 {
            debug!(?direction, "Ignoring navigation over empty collection");
            return Err(SessionError::EmptyCollection);
        }

        // Stale index is repaired in place; navigation continues from there
        if let Err(err) = self.recover_index(tracks) {
            debug!(%err, "Recovered stale index before navigation");
        }

        let index = if self.shuffle_enabled {
            self.shuffle_target(direction, len, rng)
        } else {
            sequential_target(self.current_index, direction, self.repeat, len)
        };

        debug!(
            ?direction,
            from = ?self.current_index,
            to = index,
            shuffle = self.shuffle_enabled,
            repeat = ?self.repeat,
            "Advancing"
        );

        self.load_index(index, tracks);
        Ok(index)
    }

    /// Skip to next track
    pub fn next<R: Rng + ?Sized>(&mut self, tracks: &[Track], rng: &mut R) -> Result<usize> {
        self.advance(Direction::Next, tracks, rng)
    }

    /// Go to previous track
    pub fn previous<R: Rng + ?Sized>(&mut self, tracks: &[Track], rng: &mut R) -> Result<usize> {
        self.advance(Direction::Previous, tracks, rng)
    }

    /// Internal: target index in shuffle mode
    fn shuffle_target<R: Rng + ?Sized>(
        &mut self,
        direction: Direction,
        len: usize,
        rng: &mut R,
    ) -> usize {
        if direction == Direction::Previous {
            // History tail must be the current index for stepping back to land before it
            if let Some(current) = self.current_index {
                if self.shuffle_history.last() != Some(current) {
                    self.shuffle_history.record(current);
                }
            }
            if let Some(index) = self.shuffle_history.step_back() {
                return index;
            }
        }
        self.pick_shuffled(len, rng)
    }

    /// Internal: draw a new shuffled index and record it
    fn pick_shuffled<R: Rng + ?Sized>(&mut self, len: usize, rng: &mut R) -> usize {
        let Some(pick) =
            pick_shuffle_index(rng, self.current_index, self.shuffle_history.as_slice(), len)
        else {
            return 0;
        };

        if pick.exhausted {
            debug!(len, "Shuffle exhausted, restarting history");
            self.shuffle_history.seed(self.current_index);
        }
        self.shuffle_history.record(pick.index);
        pick.index
    }

    /// Internal: make `index` current and ask the driver to play it
    fn load_index(&mut self, index: usize, tracks: &[Track]) {
        self.current_index = Some(index);
        self.current_track = tracks.get(index).cloned();
        self.is_playing = true;
        self.lifecycle = LifecycleState::Loading;
        self.position = 0.0;
        self.duration = 0.0;
        self.last_error = None;

        if let Some(track) = &self.current_track {
            self.pending_commands.push(DriverCommand::Load(track.clone()));
            self.pending_commands.push(DriverCommand::Play);
        }
    }

    /// Re-check the current index against a collection snapshot
    ///
    /// If the collection shrank, the index is clamped to the last track (or
    /// cleared when the collection is empty) and shuffle history entries past
    /// the end are dropped.
    ///
    /// # Errors
    /// `IndexOutOfRange` describing the stale index that was repaired.
    pub fn recover_index(&mut self, tracks: &[Track]) -> Result<()> {
        let len = tracks.len();
        let dropped = self.shuffle_history.retain_below(len);
        if dropped > 0 {
            debug!(dropped, len, "Dropped stale shuffle history entries");
        }

        let Some(index) = self.current_index else {
            return Ok(());
        };
        if index < len {
            return Ok(());
        }

        let recovered = len.checked_sub(1);
        warn!(index, len, ?recovered, "Current index out of range, recovering");
        self.current_index = recovered;
        self.current_track = recovered.and_then(|i| tracks.get(i).cloned());
        Err(SessionError::IndexOutOfRange { index, len })
    }

    // ===== Track Selection =====

    /// Set current track and its index together
    ///
    /// The index must be the track's position in the active collection; this
    /// is not cross-checked. Under shuffle the index becomes the most recent
    /// history entry, even if it was visited before.
    pub fn set_current_track(&mut self, track: Track, index: usize) {
        debug!(index, track_id = %track.id, "Setting current track");

        self.pending_commands.push(DriverCommand::Load(track.clone()));
        if self.is_playing {
            self.pending_commands.push(DriverCommand::Play);
        }

        self.current_index = Some(index);
        self.current_track = Some(track);
        self.lifecycle = LifecycleState::Loading;
        self.position = 0.0;
        self.duration = 0.0;
        self.last_error = None;

        if self.shuffle_enabled {
            self.shuffle_history.record(index);
        }
    }

    /// Select the track at `index` in the given collection
    ///
    /// # Errors
    /// `IndexOutOfRange` if `index` does not address `tracks`.
    pub fn set_current_index(&mut self, index: usize, tracks: &[Track]) -> Result<()> {
        let track = tracks
            .get(index)
            .cloned()
            .ok_or(SessionError::IndexOutOfRange {
                index,
                len: tracks.len(),
            })?;
        self.set_current_track(track, index);
        Ok(())
    }

    // ===== Transport =====

    /// Flip transport intent
    pub fn toggle_play(&mut self) {
        self.set_playing(!self.is_playing);
    }

    /// Set transport intent
    ///
    /// The lifecycle follows driver reports, except that dropping intent while
    /// `Playing` records `Paused` right away.
    pub fn set_playing(&mut self, playing: bool) {
        if self.is_playing == playing {
            return;
        }

        self.is_playing = playing;
        if playing {
            self.pending_commands.push(DriverCommand::Play);
        } else {
            if self.lifecycle == LifecycleState::Playing {
                self.lifecycle = LifecycleState::Paused;
            }
            self.pending_commands.push(DriverCommand::Pause);
        }
    }

    /// Seek within the current track (seconds)
    ///
    /// Clamped to the known duration. No-op without a current track.
    pub fn seek(&mut self, seconds: f64) {
        if self.current_track.is_none() {
            debug!(seconds, "Ignoring seek with no track loaded");
            return;
        }

        let mut target = non_negative(seconds);
        if self.duration > 0.0 {
            target = target.min(self.duration);
        }
        self.position = target;
        self.pending_commands.push(DriverCommand::Seek(target));
    }

    /// Mirror the driver-reported position (seconds)
    pub fn set_current_time(&mut self, seconds: f64) {
        self.position = non_negative(seconds);
    }

    /// Mirror the driver-reported duration (seconds, 0 = unknown)
    pub fn set_duration(&mut self, seconds: f64) {
        self.duration = non_negative(seconds);
    }

    // ===== Volume & Sound =====

    /// Set volume (clamped to 0.0-1.0)
    pub fn set_volume(&mut self, level: f32) {
        self.volume = clamp_volume(level);
        self.pending_commands
            .push(DriverCommand::SetVolume(self.volume));
    }

    /// Set playback rate (clamped to 0.25-4.0)
    pub fn set_playback_rate(&mut self, rate: f32) {
        self.playback_rate = clamp_playback_rate(rate);
        self.pending_commands
            .push(DriverCommand::SetPlaybackRate(self.playback_rate));
    }

    /// Set equalizer band gains in dB (each clamped to +/-12 dB)
    pub fn set_equalizer(&mut self, bands: Vec<f32>) {
        self.equalizer = bands
            .into_iter()
            .map(|gain| {
                if gain.is_finite() {
                    gain.clamp(-MAX_EQ_GAIN_DB, MAX_EQ_GAIN_DB)
                } else {
                    0.0
                }
            })
            .collect();
    }

    // ===== Shuffle & Repeat =====

    /// Enable or disable shuffle
    ///
    /// Enabling seeds history with the current index so the first pick never
    /// replays the track already playing. Disabling clears history.
    pub fn set_shuffle(&mut self, enabled: bool) {
        if self.shuffle_enabled == enabled {
            return;
        }

        self.shuffle_enabled = enabled;
        if enabled {
            self.shuffle_history.seed(self.current_index);
        } else {
            self.shuffle_history.clear();
        }
        debug!(enabled, history = ?self.shuffle_history.as_slice(), "Shuffle changed");
    }

    /// Toggle shuffle
    pub fn toggle_shuffle(&mut self) {
        self.set_shuffle(!self.shuffle_enabled);
    }

    /// Set repeat mode
    pub fn set_repeat_mode(&mut self, mode: RepeatMode) {
        self.repeat = mode;
    }

    /// Advance repeat mode (None -> One -> All -> None) and return it
    pub fn cycle_repeat_mode(&mut self) -> RepeatMode {
        self.repeat = self.repeat.cycle();
        self.repeat
    }

    // ===== Driver Feedback =====

    /// Apply a report from the audio driver
    ///
    /// `Ended` replays the current index under repeat-one and otherwise
    /// advances to the next track, so it needs the collection and RNG. It is
    /// only honoured while `Playing` or `Paused`; a stale report from a
    /// superseded load is dropped.
    ///
    /// # Errors
    /// Only `EmptyCollection`, when a track ends and there is nothing to
    /// advance to. The session then stays `Ended`.
    pub fn handle_driver_event<R: Rng + ?Sized>(
        &mut self,
        event: DriverEvent,
        tracks: &[Track],
        rng: &mut R,
    ) -> Result<()> {
        match event {
            DriverEvent::PositionUpdate(seconds) => self.set_current_time(seconds),
            DriverEvent::DurationKnown(seconds) => self.set_duration(seconds),
            DriverEvent::Ready => {
                if self.current_track.is_none() {
                    debug!("Ignoring ready report with no track loaded");
                    return Ok(());
                }
                self.lifecycle = if self.is_playing {
                    LifecycleState::Playing
                } else {
                    LifecycleState::Paused
                };
            }
            DriverEvent::Playing => {
                if self.current_track.is_none() {
                    debug!("Ignoring playing report with no track loaded");
                    return Ok(());
                }
                self.is_playing = true;
                self.lifecycle = LifecycleState::Playing;
            }
            DriverEvent::Paused => {
                if self.current_track.is_none() {
                    return Ok(());
                }
                self.is_playing = false;
                self.lifecycle = LifecycleState::Paused;
            }
            DriverEvent::Ended => {
                if !matches!(
                    self.lifecycle,
                    LifecycleState::Playing | LifecycleState::Paused
                ) {
                    debug!(lifecycle = ?self.lifecycle, "Ignoring end of track outside playback");
                    return Ok(());
                }
                return self.handle_track_ended(tracks, rng);
            }
            DriverEvent::Error(reason) => self.record_driver_error(reason),
        }
        Ok(())
    }

    /// Internal: end of track
    fn handle_track_ended<R: Rng + ?Sized>(&mut self, tracks: &[Track], rng: &mut R) -> Result<()> {
        self.lifecycle = LifecycleState::Ended;

        if self.repeat == RepeatMode::One {
            if let Some(index) = self.current_index.filter(|&i| i < tracks.len()) {
                debug!(index, "Repeating current track");
                self.current_track = tracks.get(index).cloned();
                self.is_playing = true;
                self.lifecycle = LifecycleState::Loading;
                self.position = 0.0;
                self.pending_commands.push(DriverCommand::Seek(0.0));
                self.pending_commands.push(DriverCommand::Play);
                return Ok(());
            }
        }

        self.advance(Direction::Next, tracks, rng).map(|_| ())
    }

    /// Internal: driver failure puts the session back to idle with an error flag
    fn record_driver_error(&mut self, reason: String) {
        warn!(%reason, index = ?self.current_index, "Audio driver reported an error");
        self.lifecycle = LifecycleState::Idle;
        self.is_playing = false;
        self.last_error = Some(reason);
    }

    // ===== Driver Commands =====

    /// Drain commands queued for the audio driver (in order)
    pub fn take_commands(&mut self) -> Vec<DriverCommand> {
        std::mem::take(&mut self.pending_commands)
    }

    /// Check if commands are waiting for the driver
    pub fn has_pending_commands(&self) -> bool {
        !self.pending_commands.is_empty()
    }

    /// Forward queued commands to a driver
    ///
    /// Stops at the first failure: the error is recorded into the session and
    /// the remaining commands are dropped.
    pub fn flush_commands<D: AudioDriver + ?Sized>(&mut self, driver: &mut D) -> Result<()> {
        for command in self.take_commands() {
            if let Err(err) = driver.execute(&command) {
                let reason = match &err {
                    SessionError::Driver(reason) => reason.clone(),
                    other => other.to_string(),
                };
                self.record_driver_error(reason);
                return Err(err);
            }
        }
        Ok(())
    }

    // ===== Lifecycle =====

    /// Return to initial state, keeping user preferences
    ///
    /// Volume, repeat mode, shuffle flag, playback rate and equalizer survive.
    pub fn reset(&mut self) {
        debug!("Resetting session");

        let had_track = self.current_track.is_some();
        self.lifecycle = LifecycleState::Idle;
        self.current_index = None;
        self.current_track = None;
        self.is_playing = false;
        self.position = 0.0;
        self.duration = 0.0;
        self.last_error = None;
        self.shuffle_history.clear();

        // Anything queued for the old track is superseded
        self.pending_commands.clear();
        if had_track {
            self.pending_commands.push(DriverCommand::Pause);
        }
    }

    // ===== State Queries =====

    pub fn lifecycle(&self) -> LifecycleState {
        self.lifecycle
    }

    pub fn current_index(&self) -> Option<usize> {
        self.current_index
    }

    pub fn current_track(&self) -> Option<&Track> {
        self.current_track.as_ref()
    }

    /// Transport intent (may run ahead of the driver)
    pub fn is_playing(&self) -> bool {
        self.is_playing
    }

    pub fn volume(&self) -> f32 {
        self.volume
    }

    /// Current position in seconds
    pub fn position(&self) -> f64 {
        self.position
    }

    /// Current track duration in seconds (0 = unknown)
    pub fn duration(&self) -> f64 {
        self.duration
    }

    pub fn playback_rate(&self) -> f32 {
        self.playback_rate
    }

    pub fn equalizer(&self) -> &[f32] {
        &self.equalizer
    }

    pub fn repeat_mode(&self) -> RepeatMode {
        self.repeat
    }

    pub fn is_shuffle_enabled(&self) -> bool {
        self.shuffle_enabled
    }

    /// Indices visited since shuffle was enabled (oldest first)
    pub fn shuffle_history(&self) -> &[usize] {
        self.shuffle_history.as_slice()
    }

    /// Last driver error, cleared when a new track loads
    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    /// Copy of all session fields for the UI
    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            current_index: self.current_index,
            current_track: self.current_track.clone(),
            is_playing: self.is_playing,
            volume: self.volume,
            position: self.position,
            duration: self.duration,
            playback_rate: self.playback_rate,
            equalizer: self.equalizer.clone(),
            repeat_mode: self.repeat,
            shuffle_enabled: self.shuffle_enabled,
            shuffle_history: self.shuffle_history.as_slice().to_vec(),
            lifecycle: self.lifecycle,
            last_error: self.last_error.clone(),
        }
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new(SessionConfig::default())
    }
}

/// Positional target when shuffle is off
///
/// Repeat-none still wraps "next" to the start; whether to stop at the end
/// is the caller's decision.
fn sequential_target(
    current: Option<usize>,
    direction: Direction,
    repeat: RepeatMode,
    len: usize,
) -> usize {
    match (direction, current) {
        (Direction::Next, None) => 0,
        (Direction::Next, Some(index)) => match repeat {
            RepeatMode::One => index,
            RepeatMode::All | RepeatMode::None => (index + 1) % len,
        },
        (Direction::Previous, None) => len - 1,
        (Direction::Previous, Some(index)) => {
            if index > 0 {
                index - 1
            } else {
                len - 1
            }
        }
    }
}

fn clamp_playback_rate(rate: f32) -> f32 {
    if rate.is_nan() {
        1.0
    } else {
        rate.clamp(MIN_PLAYBACK_RATE, MAX_PLAYBACK_RATE)
    }
}

fn non_negative(seconds: f64) -> f64 {
    if seconds.is_nan() {
        0.0
    } else {
        seconds.max(0.0)
    }
}
