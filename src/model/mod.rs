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

//! Domain models and core data structures.
//!
//! This module defines the central entities of the application, such as
//! tracks, chart entries and artist details, together with the collections
//! the player keeps them in.

mod artist;
pub(crate) mod favourites;
pub(crate) mod queue;
pub(crate) mod recent;
pub(crate) mod track;

pub(crate) use artist::{ArtistInfo, BioSummary, SimilarArtist};
pub(crate) use track::{DEFAULT_DURATION, Track};

/// A track as ranked by a chart.
#[derive(Debug, Clone)]
pub(crate) struct ChartEntry {
    /// Zero-based chart position.
    pub(crate) rank: u32,
    pub(crate) track: Track,
}
