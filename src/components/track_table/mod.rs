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

//! Navigable track table state.
//!
//! The table does not own its tracks: the lists it shows live in the player
//! state or the loaded chart. The state only keeps the highlighted row, and
//! its navigation takes the current row count so it can never point past the
//! end of a list that has changed underneath it.

mod event;
mod render;

use ratatui::widgets::TableState;

pub(crate) use render::{TrackRow, TrackTable};

/// What a key press on a table asks the application to do with the
/// highlighted row, by index.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum TrackTableAction {
    Play(usize),
    ToggleFavourite(usize),
    Enqueue(usize),
    ShowArtist(usize),
}

#[derive(Debug, Default)]
pub(crate) struct TrackTableState {
    pub(crate) table_state: TableState,
}

impl TrackTableState {
    pub(crate) fn new() -> Self {
        Self {
            table_state: TableState::default(),
        }
    }

    pub(crate) fn selected(&self) -> Option<usize> {
        self.table_state.selected()
    }

    /// Highlights the first row, or nothing for an empty list.
    pub(crate) fn reset_selection(&mut self, len: usize) {
        self.table_state.select(if len == 0 { None } else { Some(0) });
    }

    /// Keeps the highlight inside a list of `len` rows.
    pub(crate) fn clamp_selection(&mut self, len: usize) {
        match self.table_state.selected() {
            _ if len == 0 => self.table_state.select(None),
            Some(i) if i >= len => self.table_state.select(Some(len - 1)),
            None => self.table_state.select(Some(0)),
            Some(_) => {}
        }
    }

    fn goto_next(&mut self, len: usize) {
        if len == 0 {
            return;
        }
        let i = match self.table_state.selected() {
            Some(i) if i + 1 < len => i + 1,
            _ => 0,
        };
        self.table_state.select(Some(i));
    }

    fn goto_previous(&mut self, len: usize) {
        if len == 0 {
            return;
        }
        let i = match self.table_state.selected() {
            Some(0) | None => len - 1,
            Some(i) => (i - 1).min(len - 1),
        };
        self.table_state.select(Some(i));
    }

    fn goto_first(&mut self, len: usize) {
        if len > 0 {
            self.table_state.select(Some(0));
        }
    }

    fn goto_last(&mut self, len: usize) {
        if len > 0 {
            self.table_state.select(Some(len - 1));
        }
    }
}
