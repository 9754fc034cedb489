//! Collaborator seams
//!
//! The session has no audio or library access of its own. Platforms provide:
//! - [`AudioDriver`]: executes [`DriverCommand`]s against a real output
//! - [`LibraryProvider`]: supplies the ordered track collection

use crate::error::Result;
use crate::events::DriverCommand;
use crate::types::{SortField, SortOrder, Track};
use std::cmp::Ordering;

/// Platform audio output
///
/// Implementors play, pause and seek an audio resource and report progress
/// back through [`crate::DriverEvent`]s. A `load` may arrive before the
/// previous one completed; the driver must drop the earlier request.
pub trait AudioDriver {
    /// Load a track (replaces whatever is loaded or loading)
    fn load(&mut self, track: &Track) -> Result<()>;

    /// Start or resume playback
    fn play(&mut self) -> Result<()>;

    /// Pause playback
    fn pause(&mut self) -> Result<()>;

    /// Seek to position in seconds
    fn seek(&mut self, seconds: f64) -> Result<()>;

    /// Set output volume (0.0-1.0)
    fn set_volume(&mut self, level: f32) -> Result<()>;

    /// Set playback rate multiplier
    ///
    /// Drivers without rate control ignore it.
    fn set_playback_rate(&mut self, _rate: f32) -> Result<()> {
        Ok(())
    }

    /// Execute a queued command
    fn execute(&mut self, command: &DriverCommand) -> Result<()> {
        match command {
            DriverCommand::Load(track) => self.load(track),
            DriverCommand::Play => self.play(),
            DriverCommand::Pause => self.pause(),
            DriverCommand::Seek(seconds) => self.seek(*seconds),
            DriverCommand::SetVolume(level) => self.set_volume(*level),
            DriverCommand::SetPlaybackRate(rate) => self.set_playback_rate(*rate),
        }
    }
}

/// Source of the track collection
///
/// Each call returns a snapshot; the collection may change between calls.
pub trait LibraryProvider {
    /// Ordered track collection
    fn track_collection(&self) -> Vec<Track>;

    /// Tracks whose title, artist or album contains `query` (case-insensitive)
    ///
    /// An empty query returns the whole collection.
    fn search(&self, query: &str) -> Vec<Track> {
        let needle = query.trim().to_lowercase();
        let tracks = self.track_collection();
        if needle.is_empty() {
            return tracks;
        }

        tracks
            .into_iter()
            .filter(|track| {
                track.title.to_lowercase().contains(&needle)
                    || track.artist.to_lowercase().contains(&needle)
                    || track
                        .album
                        .as_ref()
                        .is_some_and(|album| album.to_lowercase().contains(&needle))
            })
            .collect()
    }

    /// Tracks by the given artist (case-insensitive exact match)
    fn filter_by_artist(&self, artist: &str) -> Vec<Track> {
        self.track_collection()
            .into_iter()
            .filter(|track| track.artist.eq_ignore_ascii_case(artist))
            .collect()
    }

    /// Whole collection ordered by `field`
    ///
    /// Text fields compare case-insensitively and tracks without an album
    /// sort first. The sort is stable, so equal keys keep collection order.
    fn sorted(&self, field: SortField, order: SortOrder) -> Vec<Track> {
        let mut tracks = self.track_collection();
        tracks.sort_by(|a, b| {
            let ordering = compare_by(a, b, field);
            match order {
                SortOrder::Asc => ordering,
                SortOrder::Desc => ordering.reverse(),
            }
        });
        tracks
    }
}

fn compare_by(a: &Track, b: &Track, field: SortField) -> Ordering {
    match field {
        SortField::Title => a.title.to_lowercase().cmp(&b.title.to_lowercase()),
        SortField::Artist => a.artist.to_lowercase().cmp(&b.artist.to_lowercase()),
        SortField::Album => {
            let album = |track: &Track| track.album.as_ref().map(|album| album.to_lowercase());
            album(a).cmp(&album(b))
        }
        SortField::Duration => a.duration.total_cmp(&b.duration),
    }
}

impl LibraryProvider for Vec<Track> {
    fn track_collection(&self) -> Vec<Track> {
        self.clone()
    }
}
