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

//! Interactive view components.
//!
//! * [`TrackTableState`]: a navigable table of tracks, shared by the chart,
//!   queue, favourites and recently played views.
//! * [`ArtistView`]: details of a single artist with a navigable list of
//!   similar artists.

mod artist;
mod track_table;

pub(crate) use artist::{ArtistAction, ArtistView};
pub(crate) use track_table::{TrackRow, TrackTable, TrackTableAction, TrackTableState};

/// The latest message shown on the status line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum StatusMessage {
    Info(String),
    Error(String),
}
