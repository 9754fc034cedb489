//! User playlists
//!
//! Playlists hold track ids, not tracks. [`PlaylistView`] resolves them
//! against a library so a playlist can be navigated like any other
//! collection.

use crate::driver::LibraryProvider;
use crate::error::{Result, SessionError};
use crate::types::Track;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use tracing::debug;

/// Named, ordered list of track ids
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Playlist {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub track_ids: Vec<String>,
}

impl Playlist {
    /// Create an empty playlist
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            track_ids: Vec::new(),
        }
    }
}

/// All playlists plus the one currently selected
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Playlists {
    playlists: Vec<Playlist>,
    current: Option<String>,
}

impl Playlists {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace every playlist (e.g. after loading from storage)
    ///
    /// The selection is kept only if its playlist is still present.
    pub fn set_all(&mut self, playlists: Vec<Playlist>) {
        self.playlists = playlists;
        if let Some(id) = &self.current {
            if self.get(id).is_none() {
                self.current = None;
            }
        }
    }

    /// Add a playlist
    ///
    /// # Errors
    /// `DuplicatePlaylist` if the id is taken.
    pub fn add(&mut self, playlist: Playlist) -> Result<()> {
        if self.get(&playlist.id).is_some() {
            return Err(SessionError::DuplicatePlaylist(playlist.id));
        }
        debug!(id = %playlist.id, "Adding playlist");
        self.playlists.push(playlist);
        Ok(())
    }

    /// Delete a playlist, clearing the selection if it pointed there
    ///
    /// # Errors
    /// `PlaylistNotFound` for an unknown id.
    pub fn delete(&mut self, id: &str) -> Result<Playlist> {
        let position = self
            .playlists
            .iter()
            .position(|playlist| playlist.id == id)
            .ok_or_else(|| SessionError::PlaylistNotFound(id.to_string()))?;

        if self.current.as_deref() == Some(id) {
            self.current = None;
        }
        Ok(self.playlists.remove(position))
    }

    /// Rename a playlist
    ///
    /// # Errors
    /// `PlaylistNotFound` for an unknown id.
    pub fn rename(&mut self, id: &str, name: impl Into<String>) -> Result<()> {
        self.get_mut(id)?.name = name.into();
        Ok(())
    }

    /// Select a playlist, or clear the selection with `None`
    ///
    /// # Errors
    /// `PlaylistNotFound` for an unknown id; the selection is unchanged.
    pub fn set_current(&mut self, id: Option<&str>) -> Result<()> {
        if let Some(id) = id {
            if self.get(id).is_none() {
                return Err(SessionError::PlaylistNotFound(id.to_string()));
            }
        }
        self.current = id.map(str::to_string);
        Ok(())
    }

    /// Currently selected playlist
    pub fn current(&self) -> Option<&Playlist> {
        self.current.as_deref().and_then(|id| self.get(id))
    }

    /// Append a track; returns `false` if it was already in the playlist
    ///
    /// # Errors
    /// `PlaylistNotFound` for an unknown playlist id.
    pub fn add_track(&mut self, id: &str, track_id: &str) -> Result<bool> {
        let playlist = self.get_mut(id)?;
        if playlist.track_ids.iter().any(|t| t == track_id) {
            return Ok(false);
        }
        playlist.track_ids.push(track_id.to_string());
        Ok(true)
    }

    /// Remove a track; returns `false` if it was not in the playlist
    ///
    /// # Errors
    /// `PlaylistNotFound` for an unknown playlist id.
    pub fn remove_track(&mut self, id: &str, track_id: &str) -> Result<bool> {
        let playlist = self.get_mut(id)?;
        let before = playlist.track_ids.len();
        playlist.track_ids.retain(|t| t != track_id);
        Ok(playlist.track_ids.len() != before)
    }

    /// Replace the track order
    ///
    /// # Errors
    /// `PlaylistNotFound` for an unknown id, `InvalidTrackOrder` unless
    /// `track_ids` holds exactly the playlist's current tracks.
    pub fn reorder(&mut self, id: &str, track_ids: Vec<String>) -> Result<()> {
        let playlist = self.get_mut(id)?;
        let existing: HashSet<&String> = playlist.track_ids.iter().collect();
        let proposed: HashSet<&String> = track_ids.iter().collect();
        if track_ids.len() != playlist.track_ids.len()
            || proposed.len() != track_ids.len()
            || existing != proposed
        {
            return Err(SessionError::InvalidTrackOrder(id.to_string()));
        }
        playlist.track_ids = track_ids;
        Ok(())
    }

    pub fn get(&self, id: &str) -> Option<&Playlist> {
        self.playlists.iter().find(|playlist| playlist.id == id)
    }

    fn get_mut(&mut self, id: &str) -> Result<&mut Playlist> {
        self.playlists
            .iter_mut()
            .find(|playlist| playlist.id == id)
            .ok_or_else(|| SessionError::PlaylistNotFound(id.to_string()))
    }

    pub fn iter(&self) -> impl Iterator<Item = &Playlist> {
        self.playlists.iter()
    }

    pub fn len(&self) -> usize {
        self.playlists.len()
    }

    pub fn is_empty(&self) -> bool {
        self.playlists.is_empty()
    }
}

/// A playlist resolved against a library
///
/// Ids missing from the library are skipped, so removing a track from the
/// library shrinks every view that referenced it.
pub struct PlaylistView<'a, L: LibraryProvider + ?Sized> {
    playlist: &'a Playlist,
    library: &'a L,
}

impl<'a, L: LibraryProvider + ?Sized> PlaylistView<'a, L> {
    pub fn new(playlist: &'a Playlist, library: &'a L) -> Self {
        Self { playlist, library }
    }
}

impl<L: LibraryProvider + ?Sized> LibraryProvider for PlaylistView<'_, L> {
    fn track_collection(&self) -> Vec<Track> {
        let library = self.library.track_collection();
        self.playlist
            .track_ids
            .iter()
            .filter_map(|id| library.iter().find(|track| &track.id == id).cloned())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn playlists() -> Playlists {
        let mut playlists = Playlists::new();
        playlists.add(Playlist::new("p1", "Morning")).unwrap();
        playlists.add(Playlist::new("p2", "Night")).unwrap();
        playlists
    }

    fn ids(ids: &[&str]) -> Vec<String> {
        ids.iter().map(|id| id.to_string()).collect()
    }

    #[test]
    fn add_rejects_duplicate_id() {
        let mut playlists = playlists();
        assert_eq!(
            playlists.add(Playlist::new("p1", "Again")),
            Err(SessionError::DuplicatePlaylist("p1".to_string()))
        );
        assert_eq!(playlists.len(), 2);
    }

    #[test]
    fn delete_clears_current_selection() {
        let mut playlists = playlists();
        playlists.set_current(Some("p2")).unwrap();

        playlists.delete("p1").unwrap();
        assert_eq!(playlists.current().unwrap().name, "Night");

        playlists.delete("p2").unwrap();
        assert!(playlists.current().is_none());
        assert!(playlists.is_empty());
        assert_eq!(
            playlists.delete("p2"),
            Err(SessionError::PlaylistNotFound("p2".to_string()))
        );
    }

    #[test]
    fn set_current_requires_known_playlist() {
        let mut playlists = playlists();
        playlists.set_current(Some("p1")).unwrap();
        assert!(playlists.set_current(Some("missing")).is_err());
        assert_eq!(playlists.current().unwrap().id, "p1");

        playlists.set_current(None).unwrap();
        assert!(playlists.current().is_none());
    }

    #[test]
    fn rename_updates_current_view() {
        let mut playlists = playlists();
        playlists.set_current(Some("p1")).unwrap();
        playlists.rename("p1", "Commute").unwrap();
        assert_eq!(playlists.current().unwrap().name, "Commute");
    }

    #[test]
    fn set_all_drops_stale_selection() {
        let mut playlists = playlists();
        playlists.set_current(Some("p2")).unwrap();

        playlists.set_all(vec![Playlist::new("p1", "Morning")]);
        assert!(playlists.current().is_none());
        assert_eq!(playlists.iter().count(), 1);
    }

    #[test]
    fn add_and_remove_tracks() {
        let mut playlists = playlists();
        assert!(playlists.add_track("p1", "a").unwrap());
        assert!(playlists.add_track("p1", "b").unwrap());
        assert!(!playlists.add_track("p1", "a").unwrap());
        assert_eq!(playlists.get("p1").unwrap().track_ids, ids(&["a", "b"]));

        assert!(playlists.remove_track("p1", "a").unwrap());
        assert!(!playlists.remove_track("p1", "a").unwrap());
        assert_eq!(playlists.get("p1").unwrap().track_ids, ids(&["b"]));
        assert!(playlists.add_track("nope", "a").is_err());
    }

    #[test]
    fn reorder_must_be_a_permutation() {
        let mut playlists = playlists();
        for id in ["a", "b", "c"] {
            playlists.add_track("p1", id).unwrap();
        }

        playlists.reorder("p1", ids(&["c", "a", "b"])).unwrap();
        assert_eq!(playlists.get("p1").unwrap().track_ids, ids(&["c", "a", "b"]));

        let invalid = Err(SessionError::InvalidTrackOrder("p1".to_string()));
        assert_eq!(playlists.reorder("p1", ids(&["c", "a"])), invalid);
        assert_eq!(playlists.reorder("p1", ids(&["c", "a", "a"])), invalid);
        assert_eq!(playlists.reorder("p1", ids(&["c", "a", "x"])), invalid);
        assert_eq!(playlists.get("p1").unwrap().track_ids, ids(&["c", "a", "b"]));
    }

    #[test]
    fn view_resolves_ids_in_playlist_order() {
        let library = vec![
            Track::new("a", "Alpha"),
            Track::new("b", "Bravo"),
            Track::new("c", "Charlie"),
        ];
        let mut playlist = Playlist::new("p", "Mix");
        playlist.track_ids = ids(&["c", "gone", "a"]);

        let view = PlaylistView::new(&playlist, &library);
        let titles: Vec<_> = view
            .track_collection()
            .into_iter()
            .map(|track| track.title)
            .collect();
        assert_eq!(titles, vec!["Charlie", "Alpha"]);
        assert_eq!(view.search("alp").len(), 1);
    }

    #[test]
    fn playlists_deserialize_without_tracks() {
        let playlist: Playlist =
            serde_json::from_str(r#"{"id": "p", "name": "Empty"}"#).unwrap();
        assert!(playlist.track_ids.is_empty());
    }
}
