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

//! User interface rendering logic.
//!
//! This module handles the translation of the [`App`] state into visual
//! widgets using the `ratatui` framework. It is responsible for layout
//! management, widget styling, and terminal frame composition.
//!
//! # Rendering Pipeline
//!
//! The primary entry point is the [`draw`] function, which is called after
//! every processed event, including the periodic UI tick.

mod commander;
pub(crate) mod icons;
mod player;

use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
};

use crate::{
    App, MainView,
    components::{TrackRow, TrackTable},
    render::{
        commander::{draw_commander, draw_status},
        player::draw_player,
    },
};

const VIEW_TABS: [(MainView, &str); 5] = [
    (MainView::Charts, "1 Charts"),
    (MainView::Queue, "2 Queue"),
    (MainView::Favourites, "3 Favourites"),
    (MainView::Recent, "4 Recent"),
    (MainView::Artist, "5 Artist"),
];

/// Renders the user interface to the terminal frame.
///
/// The screen is split into the view tabs, the active main view, the now
/// playing panel, the status line and the command line.
pub(crate) fn draw(f: &mut Frame, app: &mut App) {
    let area = f.area();

    let outer = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Min(0),
            Constraint::Length(7),
            Constraint::Length(1),
            Constraint::Length(1),
        ])
        .split(area);

    draw_tabs(f, outer[0], app);

    match app.main_view {
        MainView::Charts => {
            let title = format!("Top tracks: {}", app.chart_region);
            let rows = app
                .chart
                .iter()
                .map(|entry| TrackRow {
                    label: (entry.rank + 1).to_string(),
                    track: &entry.track,
                })
                .collect();
            let table = TrackTable {
                title: &title,
                rows,
                favourites: app.player.favourites(),
                playing_id: app.player.current_track().map(|t| t.id.as_str()),
                empty_text: "No chart loaded yet, press R to reload",
            };
            app.chart_view.draw(f, outer[1], table, &app.theme);
        }
        MainView::Queue => {
            let table = TrackTable {
                title: "Queue",
                rows: numbered(app.player.queue().iter()),
                favourites: app.player.favourites(),
                playing_id: app.player.current_track().map(|t| t.id.as_str()),
                empty_text: "The queue is empty, press a on a track to add it",
            };
            app.queue_view.draw(f, outer[1], table, &app.theme);
        }
        MainView::Favourites => {
            let table = TrackTable {
                title: "Favourites",
                rows: numbered(app.player.favourites().tracks().iter()),
                favourites: app.player.favourites(),
                playing_id: app.player.current_track().map(|t| t.id.as_str()),
                empty_text: "No favourites yet, press f on a track to add it",
            };
            app.favourites_view.draw(f, outer[1], table, &app.theme);
        }
        MainView::Recent => {
            let table = TrackTable {
                title: "Recently played",
                rows: numbered(app.player.recent().tracks().iter()),
                favourites: app.player.favourites(),
                playing_id: app.player.current_track().map(|t| t.id.as_str()),
                empty_text: "Nothing played yet",
            };
            app.recent_view.draw(f, outer[1], table, &app.theme);
        }
        MainView::Artist => app.artist_view.draw(f, outer[1], &app.theme),
    }

    draw_player(f, outer[2], app);
    draw_status(f, outer[3], app);
    draw_commander(f, outer[4], app);
}

fn numbered<'a>(tracks: impl Iterator<Item = &'a crate::model::Track>) -> Vec<TrackRow<'a>> {
    tracks
        .enumerate()
        .map(|(i, track)| TrackRow {
            label: (i + 1).to_string(),
            track,
        })
        .collect()
}

fn draw_tabs(f: &mut Frame, area: Rect, app: &App) {
    let spans: Vec<Span> = VIEW_TABS
        .iter()
        .flat_map(|(view, label)| {
            let style = if *view == app.main_view {
                Style::default()
                    .fg(app.theme.accent_colour)
                    .add_modifier(Modifier::BOLD | Modifier::REVERSED)
            } else {
                Style::default().fg(app.theme.table_time_fg)
            };
            [Span::styled(format!(" {label} "), style), Span::raw(" ")]
        })
        .collect();

    f.render_widget(Paragraph::new(Line::from(spans)), area);
}
