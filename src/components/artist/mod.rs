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

//! Artist details view.
//!
//! Shows the artist last loaded from the chart service. Each newly loaded
//! artist gets its own accent colour. Similar artists form a navigable list;
//! activating one loads that artist in turn.

mod event;
mod render;

use ratatui::{style::Color, widgets::ListState};

use crate::model::ArtistInfo;

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum ArtistAction {
    ShowArtist(String),
}

pub(crate) struct ArtistView {
    pub(crate) artist: Option<ArtistInfo>,
    pub(crate) accent_colour: Color,
    pub(crate) similar_state: ListState,
    pub(crate) loading: Option<String>,
}

impl ArtistView {
    pub(crate) fn new(accent_colour: Color) -> Self {
        Self {
            artist: None,
            accent_colour,
            similar_state: ListState::default(),
            loading: None,
        }
    }

    /// Notes that an artist has been requested and is on its way.
    pub(crate) fn start_loading(&mut self, name: String) {
        self.loading = Some(name);
    }

    /// Stops waiting for a requested artist, after a failed fetch.
    pub(crate) fn cancel_loading(&mut self) {
        self.loading = None;
    }

    pub(crate) fn set_artist(&mut self, artist: ArtistInfo, accent_colour: Color) {
        let has_similar = !artist.similar.is_empty();
        self.artist = Some(artist);
        self.accent_colour = accent_colour;
        self.loading = None;
        self.similar_state.select(has_similar.then_some(0));
    }

    fn similar_count(&self) -> usize {
        self.artist.as_ref().map_or(0, |a| a.similar.len())
    }

    fn selected_similar(&self) -> Option<&str> {
        let artist = self.artist.as_ref()?;
        let idx = self.similar_state.selected()?;
        artist.similar.get(idx).map(|s| s.name.as_str())
    }
}
