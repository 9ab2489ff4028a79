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

//! Keyboard routing.
//!
//! A key is offered first to the command line, then to the active view, and
//! finally to the global bindings.

use anyhow::Result;
use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind};

use crate::{
    App, MainView,
    components::{ArtistAction, TrackTableAction},
    events::{AppEvent, handlers::*},
};

const FINE_SEEK_DELTA: i64 = 5;
const SEEK_DELTA: i64 = 20;

/// Maps keyboard input to application actions and playback transitions.
///
/// # Errors
///
/// Returns an error if a task or event cannot be sent.
pub(super) fn process_key_event(app: &mut App, key: KeyEvent) -> Result<()> {
    if key.kind == KeyEventKind::Release {
        return Ok(());
    }

    let event = Event::Key(key);
    if app.commander.handle_event(&event, &app.event_tx) {
        return Ok(());
    }

    if process_view_key_event(app, &event)? {
        return Ok(());
    }

    process_global_key_event(app, key)
}

/// Offers a key to the active view, returning whether it triggered an action.
fn process_view_key_event(app: &mut App, event: &Event) -> Result<bool> {
    let view = app.main_view;

    if view == MainView::Artist {
        return match app.artist_view.process_event(event) {
            Some(ArtistAction::ShowArtist(name)) => {
                handle_show_artist(app, name)?;
                Ok(true)
            }
            None => Ok(false),
        };
    }

    let tracks = app.view_tracks(view);
    let table = match view {
        MainView::Queue => &mut app.queue_view,
        MainView::Favourites => &mut app.favourites_view,
        MainView::Recent => &mut app.recent_view,
        MainView::Charts | MainView::Artist => &mut app.chart_view,
    };

    let Some(action) = table.process_event(event, tracks.len()) else {
        return Ok(false);
    };

    match action {
        TrackTableAction::Play(i) => {
            let track_id = tracks[i].id.clone();
            handle_play_from_list(app, tracks, &track_id);
        }
        TrackTableAction::ToggleFavourite(i) => handle_toggle_favourite(app, tracks[i].clone()),
        TrackTableAction::Enqueue(i) => handle_add_to_queue(app, tracks[i].clone()),
        TrackTableAction::ShowArtist(i) => handle_show_artist(app, tracks[i].artist.clone())?,
    }

    Ok(true)
}

fn process_global_key_event(app: &mut App, key: KeyEvent) -> Result<()> {
    match key.code {
        KeyCode::Char('q') => app.event_tx.send(AppEvent::ExitApplication)?,

        KeyCode::Char('1') => handle_set_main_view(app, MainView::Charts),
        KeyCode::Char('2') => handle_set_main_view(app, MainView::Queue),
        KeyCode::Char('3') => handle_set_main_view(app, MainView::Favourites),
        KeyCode::Char('4') => handle_set_main_view(app, MainView::Recent),
        KeyCode::Char('5') => handle_set_main_view(app, MainView::Artist),

        KeyCode::Char(' ') => app.player.toggle_play(),
        KeyCode::Char('n') => app.player.advance(),
        KeyCode::Char('p') => app.player.reverse(),
        KeyCode::Char('s') => app.player.toggle_shuffle(),
        KeyCode::Char('r') => {
            let mode = app.player.repeat_mode().cycle();
            app.player.set_repeat_mode(mode);
        }

        KeyCode::Char(',') => seek_by(app, -FINE_SEEK_DELTA),
        KeyCode::Char('.') => seek_by(app, FINE_SEEK_DELTA),
        KeyCode::Char('<') => seek_by(app, -SEEK_DELTA),
        KeyCode::Char('>') => seek_by(app, SEEK_DELTA),

        KeyCode::Char('F') => {
            if let Some(track) = app.player.current_track().cloned() {
                handle_toggle_favourite(app, track);
            }
        }

        KeyCode::Char('R') => handle_reload_chart(app)?,

        _ => {}
    }

    Ok(())
}

fn seek_by(app: &mut App, delta: i64) {
    if app.player.current_track().is_none() {
        return;
    }
    let seconds = app.player.current_time().saturating_add_signed(delta);
    app.player.update_current_time(seconds);
}
