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

//! UI rendering logic for the artist view.

use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Padding, Paragraph, Wrap},
};

use crate::{components::ArtistView, theme::Theme, util::format::format_count};

impl ArtistView {
    pub(crate) fn draw(&mut self, f: &mut Frame, area: Rect, theme: &Theme) {
        let accent = self.accent_colour;

        let Some(artist) = &self.artist else {
            let text = match &self.loading {
                Some(name) => format!("Loading {name}..."),
                None => "Press i on a track, or :artist <name>, to look up an artist".to_string(),
            };
            f.render_widget(
                Paragraph::new(text)
                    .style(Style::default().fg(theme.table_time_fg))
                    .block(Block::default().padding(Padding::uniform(1))),
                area,
            );
            return;
        };

        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(65), Constraint::Percentage(35)])
            .split(area);

        let mut lines = vec![
            Line::from(Span::styled(
                artist.name.as_str(),
                Style::default().fg(accent).add_modifier(Modifier::BOLD),
            )),
            Line::from(vec![
                Span::styled(format_count(artist.listeners), Style::default().fg(accent)),
                Span::raw(" listeners, "),
                Span::styled(format_count(artist.play_count), Style::default().fg(accent)),
                Span::raw(" plays"),
            ]),
        ];

        if !artist.tags.is_empty() {
            lines.push(Line::from(
                artist
                    .tags
                    .iter()
                    .map(|tag| Span::styled(format!("#{tag} "), Style::default().fg(theme.table_time_fg)))
                    .collect::<Vec<_>>(),
            ));
        }

        lines.push(Line::from(""));
        lines.push(Line::from(artist.bio.text.as_str()));

        if let Some(link) = &artist.bio.link {
            let label = artist.bio.link_text.as_deref().unwrap_or("Read more");
            lines.push(Line::from(""));
            lines.push(Line::from(vec![
                Span::styled(label, Style::default().fg(accent)),
                Span::raw(": "),
                Span::styled(link.as_str(), Style::default().add_modifier(Modifier::UNDERLINED)),
            ]));
        }

        if let Some(name) = &self.loading {
            lines.push(Line::from(""));
            lines.push(Line::from(Span::styled(
                format!("Loading {name}..."),
                Style::default().fg(theme.table_time_fg),
            )));
        }

        let details = Paragraph::new(lines)
            .wrap(Wrap { trim: true })
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(accent))
                    .padding(Padding::horizontal(1)),
            );
        f.render_widget(details, columns[0]);

        let items: Vec<ListItem> = artist
            .similar
            .iter()
            .map(|similar| ListItem::new(similar.name.as_str()))
            .collect();

        let similar = List::new(items)
            .block(
                Block::default()
                    .title(" Similar ")
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(theme.border_colour)),
            )
            .highlight_style(Style::default().bg(accent))
            .highlight_symbol("> ");

        f.render_stateful_widget(similar, columns[1], &mut self.similar_state);
    }
}
