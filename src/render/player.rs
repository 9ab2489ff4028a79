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

//! Render the now playing panel.
//!
//! This module renders the current track, its progress, the shuffle and
//! repeat settings and whether the track is a favourite.

use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style, Stylize},
    text::{Line, Span},
    widgets::{Block, Borders, Gauge, Padding, Paragraph},
};

use crate::{
    App,
    player::{PlaybackStatus, RepeatMode},
    render::icons::{ICON_FAVOURITE, ICON_PAUSE, ICON_PLAY, ICON_REPEAT, ICON_REPEAT_ONE, ICON_SHUFFLE, ICON_STOP},
    util::format::format_time,
};

/// Renders the main player widget including track info and settings.
pub(crate) fn draw_player(f: &mut Frame, area: Rect, app: &App) {
    let theme = &app.theme;
    let player = &app.player;

    let block = Block::default()
        .borders(Borders::TOP | Borders::BOTTOM)
        .border_style(Style::default().fg(theme.border_colour))
        .padding(Padding::horizontal(1));

    let inner_area = block.inner(area);
    f.render_widget(block, area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(1),
        ])
        .split(inner_area);

    let info_chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Min(0), Constraint::Length(24)])
        .split(chunks[0]);

    let bold = Style::default().add_modifier(Modifier::BOLD);

    let icon = match player.status() {
        PlaybackStatus::Playing => ICON_PLAY,
        PlaybackStatus::Paused => ICON_PAUSE,
        PlaybackStatus::Idle => ICON_STOP,
    };

    let mut position = 0.0;

    match player.current_track() {
        Some(track) => {
            let mut spans = vec![
                Span::styled(format!(" {} ", icon), bold).fg(theme.table_track_fg),
                Span::styled(track.name.as_str(), bold).fg(theme.accent_colour),
                Span::raw(" by "),
                Span::styled(track.artist.as_str(), bold).fg(theme.accent_colour),
            ];
            if player.favourites().contains(&track.id) {
                spans.push(Span::raw(" "));
                spans.push(Span::raw(ICON_FAVOURITE).fg(theme.favourite_fg));
            }
            f.render_widget(Paragraph::new(Line::from(spans)), info_chunks[0]);

            let duration = track.duration_secs();
            let time = player.current_time();
            let remaining = duration.saturating_sub(time);

            let time_line = Line::from(vec![
                Span::styled(format_time(time), bold).fg(theme.accent_colour),
                Span::styled(" / ", bold).fg(theme.table_track_fg),
                Span::styled(format_time(duration), bold).fg(theme.accent_colour),
                Span::styled(" (-", bold).fg(theme.table_track_fg),
                Span::styled(format_time(remaining), bold).fg(theme.accent_colour),
                Span::styled(")", bold).fg(theme.table_track_fg),
            ]);
            f.render_widget(
                Paragraph::new(time_line).alignment(Alignment::Right),
                info_chunks[1],
            );

            if duration > 0 {
                position = (time as f64 / duration as f64).clamp(0.0, 1.0);
            }
        }
        None => {
            let idle = Line::from(vec![
                Span::styled(format!(" {} ", icon), bold).fg(theme.table_track_fg),
                Span::raw("Nothing playing").fg(theme.table_time_fg),
            ]);
            f.render_widget(Paragraph::new(idle), info_chunks[0]);
        }
    }

    f.render_widget(Paragraph::new(settings_line(app)), chunks[2]);

    let position_gauge = Gauge::default()
        .gauge_style(
            Style::default()
                .fg(theme.accent_colour)
                .bg(theme.gauge_track_colour),
        )
        .ratio(position)
        .label("")
        .use_unicode(true);

    f.render_widget(position_gauge, chunks[4]);
}

fn settings_line(app: &App) -> Line<'static> {
    let theme = &app.theme;
    let player = &app.player;

    let on_off = |enabled: bool| {
        if enabled {
            Style::default().fg(theme.accent_colour).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(theme.border_colour)
        }
    };

    let repeat_icon = match player.repeat_mode() {
        RepeatMode::Track => ICON_REPEAT_ONE,
        _ => ICON_REPEAT,
    };

    Line::from(vec![
        Span::styled(format!(" {} shuffle", ICON_SHUFFLE), on_off(player.is_shuffled())),
        Span::raw("   "),
        Span::styled(
            format!("{} repeat {}", repeat_icon, player.repeat_mode()),
            on_off(player.repeat_mode() != RepeatMode::Off),
        ),
        Span::raw("   "),
        Span::styled(
            format!("{} queued", player.queue().len()),
            Style::default().fg(theme.table_time_fg),
        ),
        Span::raw("   "),
        Span::styled(
            format!("{} {}", ICON_FAVOURITE, player.favourites().len()),
            Style::default().fg(theme.favourite_fg),
        ),
    ])
}
