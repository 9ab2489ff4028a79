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

//! Recently played tracks.
//!
//! A bounded, most-recent-first play history with no duplicate ids. It is
//! shown to the user and also used to refill the queue when the whole queue
//! repeats.

use crate::model::Track;

pub(crate) const MAX_RECENT_TRACKS: usize = 10;

#[derive(Debug, Default, Clone)]
pub(crate) struct RecentTracks {
    tracks: Vec<Track>,
}

impl RecentTracks {
    pub(crate) fn new() -> Self {
        Self { tracks: Vec::new() }
    }

    /// Records a play: the validated track moves (or is inserted) at the
    /// front and the history is truncated to [`MAX_RECENT_TRACKS`].
    pub(crate) fn record(&mut self, track: Track) {
        let track = track.validate();
        self.tracks.retain(|t| t.id != track.id);
        self.tracks.insert(0, track);
        self.tracks.truncate(MAX_RECENT_TRACKS);
    }

    /// Replaces the history, used when rehydrating from storage.
    ///
    /// Stored blobs are not trusted: the first occurrence of each id wins and
    /// the result is truncated to the usual bound.
    pub(crate) fn replace_all(&mut self, tracks: Vec<Track>) {
        self.tracks.clear();
        for track in tracks {
            if self.tracks.len() == MAX_RECENT_TRACKS {
                break;
            }
            if !self.tracks.iter().any(|t| t.id == track.id) {
                self.tracks.push(track.validate());
            }
        }
    }

    /// Drops the most recent entry, returning it.
    pub(crate) fn drop_latest(&mut self) -> Option<Track> {
        if self.tracks.is_empty() {
            None
        } else {
            Some(self.tracks.remove(0))
        }
    }

    pub(crate) fn get(&self, idx: usize) -> Option<&Track> {
        self.tracks.get(idx)
    }

    pub(crate) fn len(&self) -> usize {
        self.tracks.len()
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.tracks.is_empty()
    }

    /// Most recent first.
    pub(crate) fn tracks(&self) -> &[Track] {
        &self.tracks
    }

    /// The history in play order, oldest first.
    pub(crate) fn oldest_first(&self) -> Vec<Track> {
        self.tracks.iter().rev().cloned().collect()
    }
}
