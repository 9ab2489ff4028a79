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

//! Visual styling and color configuration for the TUI.
//!
//! This module defines the application's color palette and provides utilities
//! for converting colors between Ratatui's internal representation and external
//! formats (such as hexadecimal strings) used for terminal emulator styling.

use rand::{rng, seq::SliceRandom};
use ratatui::style::Color;

/// High contrast colours used to tint the artist view.
pub(crate) const ACCENT_PALETTE: [Color; 15] = [
    Color::Rgb(0x1e, 0x90, 0xff),
    Color::Rgb(0xff, 0x45, 0x00),
    Color::Rgb(0x32, 0xcd, 0x32),
    Color::Rgb(0xff, 0x14, 0x93),
    Color::Rgb(0x4b, 0x00, 0x82),
    Color::Rgb(0x00, 0x80, 0x80),
    Color::Rgb(0x94, 0x00, 0xd3),
    Color::Rgb(0xff, 0x8c, 0x00),
    Color::Rgb(0x00, 0xce, 0xd1),
    Color::Rgb(0x8b, 0x00, 0x00),
    Color::Rgb(0x2f, 0x4f, 0x4f),
    Color::Rgb(0x99, 0x32, 0xcc),
    Color::Rgb(0x22, 0x8b, 0x22),
    Color::Rgb(0x46, 0x82, 0xb4),
    Color::Rgb(0x80, 0x00, 0x00),
];

#[derive(Clone, Copy)]
pub(crate) struct Theme {
    pub(crate) background_colour: Color,
    pub(crate) accent_colour: Color,
    pub(crate) border_colour: Color,
    pub(crate) gauge_track_colour: Color,
    pub(crate) commander_colour: Color,
    pub(crate) error_colour: Color,
    pub(crate) highlight_bg: Color,

    pub(crate) table_rank_fg: Color,
    pub(crate) table_time_fg: Color,
    pub(crate) table_artist_fg: Color,
    pub(crate) table_track_fg: Color,
    pub(crate) favourite_fg: Color,
}

impl Default for Theme {
    // Returns the standard application theme.
    fn default() -> Self {
        Self::default_theme()
    }
}

impl Theme {
    // Constructs the default theme.
    pub(crate) const fn default_theme() -> Self {
        Self {
            background_colour: Color::Rgb(40, 20, 50),
            accent_colour: Color::Rgb(250, 189, 47),
            border_colour: Color::Rgb(102, 102, 102),
            gauge_track_colour: Color::Rgb(50, 30, 60),
            commander_colour: Color::Rgb(255, 255, 255),
            error_colour: Color::Rgb(255, 99, 71),
            highlight_bg: Color::Rgb(70, 50, 110),

            table_rank_fg: Color::Rgb(162, 161, 166),
            table_time_fg: Color::Rgb(162, 161, 166),
            table_artist_fg: Color::Rgb(255, 215, 0),
            table_track_fg: Color::Rgb(255, 255, 255),
            favourite_fg: Color::Rgb(255, 20, 147),
        }
    }

    /// Picks an accent colour from [`ACCENT_PALETTE`] at random.
    pub(crate) fn random_accent() -> Color {
        let mut palette = ACCENT_PALETTE;
        palette.shuffle(&mut rng());
        palette[0]
    }

    /// Converts a [`ratatui::style::Color`] into a CSS-style hexadecimal
    /// string.
    ///
    /// This is primarily used to set the terminal emulator's background color
    /// via escape sequences. Only `Rgb` colours have a hex form.
    pub(crate) fn to_hex(colour: Color) -> Option<String> {
        match colour {
            Color::Rgb(r, g, b) => Some(format!("#{:02x}{:02x}{:02x}", r, g, b)),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn random_accent_comes_from_the_palette() {
        for _ in 0..50 {
            assert!(ACCENT_PALETTE.contains(&Theme::random_accent()));
        }
    }

    #[test]
    fn hex_conversion() {
        assert_eq!(Theme::to_hex(Color::Rgb(30, 144, 255)).as_deref(), Some("#1e90ff"));
        assert_eq!(Theme::to_hex(Color::Blue), None);
    }
}
