// Copyright (C) 2026  Caprica Software Limited
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
// GNU General Public License for more details.
//
// You should have received a copy of the GNU General Public License
// along with this program.  If not, see <https://www.gnu.org/licenses/>.

//! Favourite tracks.
//!
//! A small insertion-ordered set of tracks keyed by id. Tracks are stored
//! exactly as given, without validation.

use crate::model::Track;

#[derive(Debug, Default, Clone)]
pub(crate) struct Favourites {
    tracks: Vec<Track>,
}

impl Favourites {
    pub(crate) fn new() -> Self {
        Self { tracks: Vec::new() }
    }

    /// Removes the track if a track with the same id is present, otherwise
    /// appends it. Returns `true` when the track is a favourite afterwards.
    pub(crate) fn toggle(&mut self, track: Track) -> bool {
        match self.tracks.iter().position(|t| t.id == track.id) {
            Some(idx) => {
                self.tracks.remove(idx);
                false
            }
            None => {
                self.tracks.push(track);
                true
            }
        }
    }

    /// Replaces the whole set, used when rehydrating from storage.
    ///
    /// Later duplicates of an id already seen are dropped.
    pub(crate) fn replace_all(&mut self, tracks: Vec<Track>) {
        self.tracks.clear();
        for track in tracks {
            if !self.contains(&track.id) {
                self.tracks.push(track);
            }
        }
    }

    pub(crate) fn contains(&self, track_id: &str) -> bool {
        self.tracks.iter().any(|t| t.id == track_id)
    }

    pub(crate) fn len(&self) -> usize {
        self.tracks.len()
    }

    pub(crate) fn tracks(&self) -> &[Track] {
        &self.tracks
    }
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;
    use crate::model::track::track;

    #[test]
    fn toggle_adds_then_removes() {
        let mut favourites = Favourites::new();

        assert!(favourites.toggle(track("a", "100")));
        assert!(favourites.contains("a"));
        assert!(!favourites.toggle(track("a", "100")));
        assert!(!favourites.contains("a"));
        assert_eq!(favourites.len(), 0);
    }

    #[test]
    fn toggle_matches_on_id_only() {
        let mut favourites = Favourites::new();
        favourites.toggle(track("a", "100"));

        let mut renamed = track("a", "5");
        renamed.name = "Renamed".to_string();
        assert!(!favourites.toggle(renamed));
        assert_eq!(favourites.len(), 0);
    }

    #[test]
    fn tracks_are_kept_unvalidated_in_insertion_order() {
        let mut favourites = Favourites::new();
        favourites.toggle(track("b", "0"));
        favourites.toggle(track("a", "100"));

        let ids: Vec<&str> = favourites.tracks().iter().map(|t| t.id.as_str()).collect();
        assert_eq!(ids, vec!["b", "a"]);
        assert_eq!(favourites.tracks()[0].duration, "0");
    }

    #[test]
    fn replace_all_drops_duplicate_ids() {
        let mut favourites = Favourites::new();
        favourites.toggle(track("z", "1"));
        favourites.replace_all(vec![track("a", "1"), track("b", "1"), track("a", "2")]);

        let ids: Vec<&str> = favourites.tracks().iter().map(|t| t.id.as_str()).collect();
        assert_eq!(ids, vec!["a", "b"]);
    }

    proptest! {
        #[test]
        fn double_toggle_restores_membership(
            initial in prop::collection::vec("[a-e]", 0..8),
            id in "[a-g]",
        ) {
            let mut favourites = Favourites::new();
            favourites.replace_all(initial.iter().map(|i| track(i, "10")).collect());
            let was_member = favourites.contains(&id);
            let len = favourites.len();

            favourites.toggle(track(&id, "10"));
            favourites.toggle(track(&id, "10"));

            prop_assert_eq!(favourites.contains(&id), was_member);
            prop_assert_eq!(favourites.len(), len);
        }
    }
}
