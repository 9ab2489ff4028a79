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

//! UI rendering logic for the track table.
//!
//! This module handles the visual representation of track data, including
//! column layout, highlighting of the playing and favourite tracks, and theme
//! application using the Ratatui widget system.

use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::Line,
    widgets::{Block, Borders, Cell, Padding, Paragraph, Row, Table},
};

use crate::{
    components::TrackTableState,
    model::{Track, favourites::Favourites},
    render::icons::{ICON_FAVOURITE, ICON_PLAY},
    theme::Theme,
    util::format::{format_time, format_total_time},
};

/// One table row: a leading label (rank or position) and the track.
pub(crate) struct TrackRow<'a> {
    pub(crate) label: String,
    pub(crate) track: &'a Track,
}

/// Everything a track table shows for one frame.
pub(crate) struct TrackTable<'a> {
    pub(crate) title: &'a str,
    pub(crate) rows: Vec<TrackRow<'a>>,
    pub(crate) favourites: &'a Favourites,
    pub(crate) playing_id: Option<&'a str>,
    pub(crate) empty_text: &'a str,
}

impl TrackTableState {
    pub(crate) fn draw(&mut self, f: &mut Frame, area: Rect, table: TrackTable, theme: &Theme) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(2), Constraint::Min(0)])
            .split(area);

        let total: u64 = table.rows.iter().map(|row| row.track.duration_secs()).sum();
        let header_text = format!(
            "{} | {} tracks | {}",
            table.title,
            table.rows.len(),
            format_total_time(total)
        );

        let header_block = Block::default()
            .borders(Borders::BOTTOM)
            .border_style(Style::default().fg(theme.border_colour))
            .padding(Padding::horizontal(1));
        f.render_widget(
            Paragraph::new(header_text)
                .style(Style::default().fg(theme.accent_colour))
                .block(header_block),
            chunks[0],
        );

        if table.rows.is_empty() {
            f.render_widget(
                Paragraph::new(table.empty_text)
                    .style(Style::default().fg(theme.table_time_fg))
                    .block(Block::default().padding(Padding::uniform(1))),
                chunks[1],
            );
            return;
        }

        self.draw_table(f, chunks[1], &table, theme);
    }

    fn draw_table(&mut self, f: &mut Frame, area: Rect, table: &TrackTable, theme: &Theme) {
        let rows = table.rows.iter().map(|row| {
            let track = row.track;

            let marker = if table.playing_id == Some(track.id.as_str()) {
                Line::from(ICON_PLAY).style(Style::default().fg(theme.accent_colour))
            } else if table.favourites.contains(&track.id) {
                Line::from(ICON_FAVOURITE).style(Style::default().fg(theme.favourite_fg))
            } else {
                Line::from("")
            };

            Row::new(vec![
                Cell::from(marker),
                Cell::from(
                    Line::from(row.label.as_str())
                        .style(Style::default().fg(theme.table_rank_fg))
                        .alignment(Alignment::Right),
                ),
                Cell::from(
                    Line::from(format_time(track.duration_secs()))
                        .style(Style::default().fg(theme.table_time_fg))
                        .alignment(Alignment::Right),
                ),
                Cell::from(""),
                Cell::from(
                    Line::from(track.artist.as_str()).style(Style::default().fg(theme.table_artist_fg)),
                ),
                Cell::from(
                    Line::from(track.name.as_str()).style(Style::default().fg(theme.table_track_fg)),
                ),
            ])
        });

        let widget = Table::new(
            rows,
            [
                Constraint::Length(1),
                Constraint::Length(4),
                Constraint::Length(6),
                Constraint::Length(1),
                Constraint::Percentage(35),
                Constraint::Percentage(65),
            ],
        )
        .header(
            Row::new(vec![
                Cell::from(""),
                Cell::from(Line::from("#").alignment(Alignment::Right)),
                Cell::from(Line::from("Time").alignment(Alignment::Right)),
                Cell::from(""),
                Cell::from("Artist"),
                Cell::from("Title"),
            ])
            .style(
                Style::default()
                    .add_modifier(Modifier::BOLD)
                    .fg(theme.accent_colour),
            )
            .bottom_margin(1),
        )
        .row_highlight_style(Style::default().bg(theme.highlight_bg))
        .block(Block::default().padding(Padding::horizontal(1)));

        f.render_stateful_widget(widget, area, &mut self.table_state);
    }
}
