//! Aria Player - Playback Session
//!
//! Playback navigation and session state for Aria Player.
//!
//! This crate provides:
//! - Next/previous navigation over an externally supplied track collection
//! - Shuffle without repeats until every track has been visited
//! - Repeat modes (None, One, All)
//! - Transport intent, volume, seek and lifecycle tracking (idle/loading/playing/paused/ended)
//! - Driver feedback handling (ready, end of track, errors)
//! - Library views: search, artist filter, sorting and user playlists
//!
//! # Architecture
//!
//! `aria-session` holds no audio, timers or library access:
//! - The track collection is passed in as a slice on every call
//! - Randomness is injected, so shuffle is reproducible with a seeded RNG
//! - Driver work is queued as [`DriverCommand`]s and reports come back as [`DriverEvent`]s
//!
//! Platform code implements [`AudioDriver`] and [`LibraryProvider`].
//!
//! # Example: Navigation
//!
//! ```rust
//! use aria_session::{Session, Track, RepeatMode};
//! use rand::rngs::StdRng;
//! use rand::SeedableRng;
//!
//! let tracks = vec![
//!     Track::new("a", "First"),
//!     Track::new("b", "Second"),
//!     Track::new("c", "Third"),
//! ];
//! let mut rng = StdRng::seed_from_u64(7);
//!
//! let mut session = Session::default();
//! session.set_repeat_mode(RepeatMode::All);
//!
//! assert_eq!(session.next(&tracks, &mut rng), Ok(0));
//! assert_eq!(session.next(&tracks, &mut rng), Ok(1));
//! assert_eq!(session.previous(&tracks, &mut rng), Ok(0));
//! ```
//!
//! # Example: Driver Integration
//!
//! ```rust
//! use aria_session::{AudioDriver, DriverEvent, LifecycleState, Result, Session, Track};
//! use rand::thread_rng;
//!
//! struct NullDriver;
//!
//! impl AudioDriver for NullDriver {
//!     fn load(&mut self, _track: &Track) -> Result<()> { Ok(()) }
//!     fn play(&mut self) -> Result<()> { Ok(()) }
//!     fn pause(&mut self) -> Result<()> { Ok(()) }
//!     fn seek(&mut self, _seconds: f64) -> Result<()> { Ok(()) }
//!     fn set_volume(&mut self, _level: f32) -> Result<()> { Ok(()) }
//! }
//!
//! let tracks = vec![Track::new("a", "Only")];
//! let mut session = Session::default();
//! let mut driver = NullDriver;
//!
//! session.next(&tracks, &mut thread_rng()).unwrap();
//! session.flush_commands(&mut driver).unwrap();
//!
//! session
//!     .handle_driver_event(DriverEvent::Ready, &tracks, &mut thread_rng())
//!     .unwrap();
//! assert_eq!(session.lifecycle(), LifecycleState::Playing);
//! ```

mod driver;
mod error;
mod events;
mod history;
mod playlist;
mod session;
mod shuffle;
mod types;
mod volume;

// Public exports
pub use driver::{AudioDriver, LibraryProvider};
pub use error::{Result, SessionError};
pub use events::{DriverCommand, DriverEvent};
pub use history::ShuffleHistory;
pub use playlist::{Playlist, PlaylistView, Playlists};
pub use session::{
    Session, SessionSnapshot, MAX_EQ_GAIN_DB, MAX_PLAYBACK_RATE, MIN_PLAYBACK_RATE,
};
pub use shuffle::{pick_shuffle_index, ShufflePick};
pub use types::{
    Direction, LifecycleState, RepeatMode, SessionConfig, SortField, SortOrder, Track,
};
pub use volume::{clamp_volume, MuteOverlay};
