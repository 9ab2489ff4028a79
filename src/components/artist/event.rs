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

//! Input handling for the artist view.

use crossterm::event::{Event, KeyCode};

use crate::components::{ArtistAction, ArtistView};

impl ArtistView {
    pub(crate) fn process_event(&mut self, event: &Event) -> Option<ArtistAction> {
        let Event::Key(key_event) = event else {
            return None;
        };

        let len = self.similar_count();
        if len == 0 {
            return None;
        }

        match key_event.code {
            KeyCode::Char('j') | KeyCode::Down => {
                let next = self.similar_state.selected().map_or(0, |i| (i + 1) % len);
                self.similar_state.select(Some(next));
                None
            }
            KeyCode::Char('k') | KeyCode::Up => {
                let previous = match self.similar_state.selected() {
                    Some(0) | None => len - 1,
                    Some(i) => i - 1,
                };
                self.similar_state.select(Some(previous));
                None
            }
            KeyCode::Enter => self
                .selected_similar()
                .map(|name| ArtistAction::ShowArtist(name.to_string())),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use crossterm::event::{KeyEvent, KeyModifiers};
    use ratatui::style::Color;

    use super::*;
    use crate::components::artist::tests::artist;

    fn key(code: KeyCode) -> Event {
        Event::Key(KeyEvent::new(code, KeyModifiers::NONE))
    }

    #[test]
    fn similar_artists_can_be_opened() {
        let mut view = ArtistView::new(Color::White);
        view.set_artist(artist("Shakira", &["Thalía", "Juanes", "Maná"]), Color::Red);

        assert_eq!(view.process_event(&key(KeyCode::Char('k'))), None);
        assert_eq!(
            view.process_event(&key(KeyCode::Enter)),
            Some(ArtistAction::ShowArtist("Maná".to_string()))
        );

        view.process_event(&key(KeyCode::Char('j')));
        assert_eq!(
            view.process_event(&key(KeyCode::Enter)),
            Some(ArtistAction::ShowArtist("Thalía".to_string()))
        );
    }

    #[test]
    fn keys_do_nothing_without_an_artist() {
        let mut view = ArtistView::new(Color::White);
        assert_eq!(view.process_event(&key(KeyCode::Enter)), None);
    }
}
