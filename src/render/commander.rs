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

//! Render the command line and the status line.
//!
//! The command line shows the text being typed after `:` and the cursor.
//! The status line shows the latest info or error message.

use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::Paragraph,
};

use crate::{App, components::StatusMessage};

pub(crate) fn draw_commander(f: &mut Frame, area: Rect, app: &App) {
    let commander = &app.commander;

    let container = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(1), Constraint::Min(1)])
        .horizontal_margin(1)
        .split(area);

    let style = Style::default()
        .fg(app.theme.commander_colour)
        .bg(app.theme.gauge_track_colour);

    let prompt = if commander.active() { ":" } else { "" };
    f.render_widget(Paragraph::new(prompt).style(style), container[0]);
    f.render_widget(Paragraph::new(commander.input.value()).style(style), container[1]);

    if commander.active() {
        let cursor_x = container[1].x + commander.input.cursor() as u16;
        let cursor_y = container[1].y;
        f.set_cursor_position((cursor_x, cursor_y));
    }
}

pub(crate) fn draw_status(f: &mut Frame, area: Rect, app: &App) {
    let line = match &app.status {
        Some(StatusMessage::Info(message)) => Line::from(Span::styled(
            message.as_str(),
            Style::default().fg(app.theme.table_time_fg),
        )),
        Some(StatusMessage::Error(message)) => Line::from(Span::styled(
            message.as_str(),
            Style::default().fg(app.theme.error_colour),
        )),
        None => Line::from(""),
    };

    let container = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Min(1)])
        .horizontal_margin(1)
        .split(area);

    f.render_widget(Paragraph::new(line), container[0]);
}
