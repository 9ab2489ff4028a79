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

//! Play queue management.
//!
//! This module provides state for the "up next" queue: an ordered sequence
//! of validated tracks consumed from the head by playback.

use std::collections::VecDeque;

use crate::model::Track;

#[derive(Debug, Default, Clone)]
pub(crate) struct Queue {
    queued: VecDeque<Track>,
}

impl Queue {
    pub(crate) fn new() -> Self {
        Self {
            queued: VecDeque::new(),
        }
    }

    /// Replaces the whole queue, validating every track.
    pub(crate) fn set_tracks(&mut self, tracks: Vec<Track>) {
        self.queued = tracks.into_iter().map(Track::validate).collect();
    }

    /// Appends one track to the tail.
    pub(crate) fn append(&mut self, track: Track) {
        self.queued.push_back(track.validate());
    }

    /// Puts a track back at the head, ahead of everything queued.
    pub(crate) fn push_front(&mut self, track: Track) {
        self.queued.push_front(track.validate());
    }

    /// Consumes the head and returns the new head, if any.
    pub(crate) fn advance(&mut self) -> Option<&Track> {
        self.queued.pop_front();
        self.queued.front()
    }

    /// Rotates the queue so the track with the given id is at the head,
    /// keeping the relative order of everything else.
    ///
    /// A track that is not queued leaves the queue unchanged.
    pub(crate) fn rotate_to_front(&mut self, track_id: &str) {
        if let Some(idx) = self.queued.iter().position(|t| t.id == track_id) {
            self.queued.rotate_left(idx);
        }
    }

    pub(crate) fn front(&self) -> Option<&Track> {
        self.queued.front()
    }

    pub(crate) fn back(&self) -> Option<&Track> {
        self.queued.back()
    }

    pub(crate) fn len(&self) -> usize {
        self.queued.len()
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.queued.is_empty()
    }

    pub(crate) fn iter(&self) -> impl Iterator<Item = &Track> {
        self.queued.iter()
    }

    pub(crate) fn tracks(&self) -> Vec<Track> {
        self.queued.iter().cloned().collect()
    }

    pub(crate) fn ids(&self) -> Vec<&str> {
        self.queued.iter().map(|t| t.id.as_str()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{DEFAULT_DURATION, track::track};

    fn queue_of(ids: &[&str]) -> Queue {
        let mut queue = Queue::new();
        queue.set_tracks(ids.iter().map(|id| track(id, "100")).collect());
        queue
    }

    #[test]
    fn set_tracks_validates_everything() {
        let mut queue = Queue::new();
        queue.set_tracks(vec![track("a", "0"), track("b", "12")]);

        let tracks = queue.tracks();
        assert_eq!(tracks[0].duration, DEFAULT_DURATION);
        assert_eq!(tracks[1].duration, "12");
    }

    #[test]
    fn append_validates_and_goes_to_tail() {
        let mut queue = queue_of(&["a"]);
        queue.append(track("b", "nope"));

        assert_eq!(queue.ids(), vec!["a", "b"]);
        assert_eq!(queue.back().unwrap().duration, DEFAULT_DURATION);
    }

    #[test]
    fn advance_consumes_head() {
        let mut queue = queue_of(&["a", "b", "c"]);

        assert_eq!(queue.advance().map(|t| t.id.as_str()), Some("b"));
        assert_eq!(queue.ids(), vec!["b", "c"]);
        assert_eq!(queue.advance().map(|t| t.id.as_str()), Some("c"));
        assert_eq!(queue.advance(), None);
        assert!(queue.is_empty());
    }

    #[test]
    fn advance_on_empty_queue_is_a_no_op() {
        let mut queue = Queue::new();
        assert_eq!(queue.advance(), None);
        assert_eq!(queue.len(), 0);
    }

    #[test]
    fn rotate_to_front_keeps_order() {
        let mut queue = queue_of(&["a", "b", "c", "d"]);
        queue.rotate_to_front("c");
        assert_eq!(queue.ids(), vec!["c", "d", "a", "b"]);
    }

    #[test]
    fn rotate_to_front_of_missing_track_is_unchanged() {
        let mut queue = queue_of(&["a", "b", "c"]);
        queue.rotate_to_front("zzz");
        assert_eq!(queue.ids(), vec!["a", "b", "c"]);
    }

    #[test]
    fn push_front_puts_track_at_head() {
        let mut queue = queue_of(&["b"]);
        queue.push_front(track("a", "-1"));
        assert_eq!(queue.ids(), vec!["a", "b"]);
        assert_eq!(queue.front().unwrap().duration, DEFAULT_DURATION);
    }
}
