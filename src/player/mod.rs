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

//! Playback state and transitions.
//!
//! This module owns the simulated player: the current track, the queue, the
//! play/pause, shuffle and repeat settings, the playhead, favourites and the
//! recently played history. There is no audio; "playing" means the playhead
//! is advanced once per second by a [`timer::PlaybackTimer`] owned by the
//! UI.
//!
//! Every mutation goes through a named transition on [`PlayerState`]. All
//! transitions are total: none of them fails, the worst case is a no-op.
//! Transitions never touch storage directly; those that need to persist
//! something queue a [`StoreWrite`] which the caller drains with
//! [`PlayerState::take_pending_writes`] and hands to the task worker.

pub(crate) mod timer;

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::{
    model::{Track, favourites::Favourites, queue::Queue, recent::RecentTracks},
    store::{FAVOURITES_KEY, RECENT_TRACKS_KEY},
};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub(crate) enum RepeatMode {
    #[default]
    Off,
    Track,
    Queue,
}

impl RepeatMode {
    /// The next mode in the order the repeat button cycles through.
    pub(crate) fn cycle(self) -> Self {
        match self {
            RepeatMode::Off => RepeatMode::Queue,
            RepeatMode::Queue => RepeatMode::Track,
            RepeatMode::Track => RepeatMode::Off,
        }
    }
}

impl fmt::Display for RepeatMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            RepeatMode::Off => "off",
            RepeatMode::Track => "track",
            RepeatMode::Queue => "queue",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("unknown repeat mode '{0}', expected off, track or queue")]
pub(crate) struct UnknownRepeatMode(String);

impl FromStr for RepeatMode {
    type Err = UnknownRepeatMode;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "off" => Ok(RepeatMode::Off),
            "track" => Ok(RepeatMode::Track),
            "queue" => Ok(RepeatMode::Queue),
            _ => Err(UnknownRepeatMode(s.to_string())),
        }
    }
}

/// Coarse playback status derived from the player state.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum PlaybackStatus {
    Idle,
    Paused,
    Playing,
}

/// A snapshot of a persisted collection that must be written to storage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum StoreWrite {
    Favourites(Vec<Track>),
    RecentTracks(Vec<Track>),
}

impl StoreWrite {
    pub(crate) fn key(&self) -> &'static str {
        match self {
            StoreWrite::Favourites(_) => FAVOURITES_KEY,
            StoreWrite::RecentTracks(_) => RECENT_TRACKS_KEY,
        }
    }

    pub(crate) fn tracks(&self) -> &[Track] {
        match self {
            StoreWrite::Favourites(tracks) | StoreWrite::RecentTracks(tracks) => tracks,
        }
    }
}

#[derive(Debug, Default)]
pub(crate) struct PlayerState {
    current_track: Option<Track>,
    queue: Queue,
    is_playing: bool,
    is_shuffled: bool,
    repeat_mode: RepeatMode,
    favourites: Favourites,
    recent: RecentTracks,
    current_time: u64,

    // Bumped every time the current slot is (re)assigned, so observers can
    // tell a restart or a track change apart from an unchanged track.
    load_count: u64,

    pending_writes: Vec<StoreWrite>,
}

impl PlayerState {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Restores the persisted collections at startup.
    ///
    /// Storage is already the source of these, so nothing is queued for
    /// writing.
    pub(crate) fn rehydrate(&mut self, favourites: Vec<Track>, recent: Vec<Track>) {
        self.favourites.replace_all(favourites);
        self.recent.replace_all(recent);
        tracing::info!(
            favourites = self.favourites.len(),
            recent = self.recent.len(),
            "Player state rehydrated"
        );
    }

    /// Loads a track into the current slot, paused, with the playhead at 0.
    pub(crate) fn select_track(&mut self, track: Track) {
        let track = track.validate();
        tracing::debug!(track_id = %track.id, "Select track");

        self.record_recent(track.clone());
        self.load(track);
        self.is_playing = false;
    }

    pub(crate) fn set_queue(&mut self, tracks: Vec<Track>) {
        self.queue.set_tracks(tracks);
    }

    /// Replaces the queue with `tracks`, rotated so the given track is at the
    /// head.
    pub(crate) fn set_queue_starting_at(&mut self, tracks: Vec<Track>, track_id: &str) {
        self.queue.set_tracks(tracks);
        self.queue.rotate_to_front(track_id);
    }

    pub(crate) fn add_to_queue(&mut self, track: Track) {
        self.queue.append(track);
    }

    pub(crate) fn toggle_play(&mut self) {
        self.is_playing = !self.is_playing;
    }

    /// Flips the shuffle flag. The queue order is not changed.
    pub(crate) fn toggle_shuffle(&mut self) {
        self.is_shuffled = !self.is_shuffled;
    }

    pub(crate) fn set_repeat_mode(&mut self, mode: RepeatMode) {
        self.repeat_mode = mode;
    }

    /// Moves to the next track, also used at end of track.
    ///
    /// * Repeat track: the current track restarts.
    /// * Otherwise the queue head (the track that was playing) is consumed
    ///   and the new head plays.
    /// * An exhausted queue under repeat queue is refilled from the play
    ///   history, oldest first, and playback continues from its head.
    /// * With nothing left the player goes idle and stops.
    pub(crate) fn advance(&mut self) {
        let Some(current) = self.current_track.clone() else {
            return;
        };

        if self.repeat_mode == RepeatMode::Track {
            self.restart(current);
            return;
        }

        let mut next = self.queue.advance().cloned();

        if next.is_none() && self.repeat_mode == RepeatMode::Queue && !self.recent.is_empty() {
            tracing::debug!(len = self.recent.len(), "Refilling queue from recent tracks");
            self.queue.set_tracks(self.recent.oldest_first());
            next = self.queue.front().cloned();
        }

        match next {
            Some(track) => {
                let track = track.validate();
                tracing::debug!(track_id = %track.id, "Advance to next track");
                self.record_recent(track.clone());
                self.load(track);
            }
            None => {
                tracing::debug!("Queue exhausted, player idle");
                self.current_track = None;
                self.current_time = 0;
                self.is_playing = false;
                self.load_count += 1;
            }
        }
    }

    /// Moves to the previous track.
    ///
    /// * Repeat track: the current track restarts.
    /// * With at least two history entries, the latest entry is dropped and
    ///   the one before it becomes current, pushed back onto the queue head.
    /// * Otherwise, under repeat queue, the queue tail becomes current and is
    ///   also pushed onto the queue head.
    pub(crate) fn reverse(&mut self) {
        let Some(current) = self.current_track.clone() else {
            return;
        };

        if self.repeat_mode == RepeatMode::Track {
            self.restart(current);
            return;
        }

        let previous = if self.recent.len() >= 2 {
            self.recent.drop_latest();
            self.queue_write(StoreWrite::RecentTracks(self.recent.tracks().to_vec()));
            self.recent.get(0).cloned()
        } else if self.repeat_mode == RepeatMode::Queue {
            self.queue.back().cloned()
        } else {
            None
        };

        if let Some(track) = previous {
            let track = track.validate();
            tracing::debug!(track_id = %track.id, "Reverse to previous track");
            self.queue.push_front(track.clone());
            self.load(track);
        }
    }

    /// Moves the playhead, clamped to the current track's duration.
    pub(crate) fn update_current_time(&mut self, seconds: u64) {
        self.current_time = match &self.current_track {
            Some(track) => seconds.min(track.duration_secs()),
            None => seconds,
        };
    }

    /// Adds or removes a favourite, returning whether it is now a favourite.
    pub(crate) fn toggle_favourite(&mut self, track: Track) -> bool {
        let track_id = track.id.clone();
        let is_favourite = self.favourites.toggle(track);
        tracing::debug!(%track_id, is_favourite, "Toggle favourite");

        self.queue_write(StoreWrite::Favourites(self.favourites.tracks().to_vec()));
        is_favourite
    }

    /// Drains the store writes queued by transitions since the last call.
    pub(crate) fn take_pending_writes(&mut self) -> Vec<StoreWrite> {
        std::mem::take(&mut self.pending_writes)
    }

    pub(crate) fn status(&self) -> PlaybackStatus {
        match (&self.current_track, self.is_playing) {
            (None, _) => PlaybackStatus::Idle,
            (Some(_), false) => PlaybackStatus::Paused,
            (Some(_), true) => PlaybackStatus::Playing,
        }
    }

    pub(crate) fn current_track(&self) -> Option<&Track> {
        self.current_track.as_ref()
    }

    pub(crate) fn queue(&self) -> &Queue {
        &self.queue
    }

    pub(crate) fn is_playing(&self) -> bool {
        self.is_playing
    }

    pub(crate) fn is_shuffled(&self) -> bool {
        self.is_shuffled
    }

    pub(crate) fn repeat_mode(&self) -> RepeatMode {
        self.repeat_mode
    }

    pub(crate) fn favourites(&self) -> &Favourites {
        &self.favourites
    }

    pub(crate) fn recent(&self) -> &RecentTracks {
        &self.recent
    }

    pub(crate) fn current_time(&self) -> u64 {
        self.current_time
    }

    pub(crate) fn load_count(&self) -> u64 {
        self.load_count
    }

    fn load(&mut self, track: Track) {
        self.current_track = Some(track);
        self.current_time = 0;
        self.load_count += 1;
    }

    fn restart(&mut self, current: Track) {
        let track = current.validate();
        tracing::debug!(track_id = %track.id, "Restart current track");
        self.record_recent(track.clone());
        self.load(track);
    }

    fn record_recent(&mut self, track: Track) {
        self.recent.record(track);
        self.queue_write(StoreWrite::RecentTracks(self.recent.tracks().to_vec()));
    }

    // Only the latest snapshot of each collection is worth writing.
    fn queue_write(&mut self, write: StoreWrite) {
        self.pending_writes.retain(|w| w.key() != write.key());
        self.pending_writes.push(write);
    }
}
