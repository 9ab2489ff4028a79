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

//! Application event handling.
//!
//! This module is the central hub for the "Controller" logic of the
//! application. Keyboard input, UI ticks, playback ticks and results from the
//! task worker all arrive as [`AppEvent`]s on one channel and are applied to
//! the [`App`] state in order.
//!
//! After every event the player is reconciled with its collaborators: queued
//! store writes are handed to the task worker and the playback timer is
//! started, restarted or cancelled to match the player. Then the UI is drawn.

mod handlers;
mod key_handlers;

use handlers::*;
use key_handlers::process_key_event;

use std::io::Stdout;

use anyhow::Result;
use crossterm::event::KeyEvent;
use ratatui::{Terminal, prelude::CrosstermBackend};

use crate::{
    App, MainView,
    commander::Command,
    model::{ArtistInfo, ChartEntry, Track},
    render::draw,
    tasks::AppTask,
};

#[derive(Debug)]
pub(crate) enum AppEvent {
    Key(KeyEvent),

    /// Periodic UI refresh.
    Tick,

    /// One second of playback, from the ticker with this generation.
    PlaybackTick(u64),

    SetMainView(MainView),

    Command(Command),

    /// Play `track_id`, with `tracks` (the list it was chosen from) as the
    /// new queue.
    PlayFromList { tracks: Vec<Track>, track_id: String },
    AddToQueue(Track),
    ToggleFavourite(Track),
    ShowArtist(String),
    ReloadChart,

    ChartLoaded { region: String, entries: Vec<ChartEntry> },
    ArtistLoaded(ArtistInfo),
    FetchFailed(String),

    Info(String),
    Error(String),

    ExitApplication,
}

/// Runs the main application loop, handling events and rendering the UI in the
/// terminal.
///
/// This function loops until an exit event is received or the event channel
/// is closed.
pub(crate) fn process_events(
    terminal: &mut Terminal<CrosstermBackend<Stdout>>,
    app: &mut App,
) -> Result<()> {
    terminal.draw(|f| draw(f, app))?;

    while let Ok(event) = app.event_rx.recv() {
        if matches!(event, AppEvent::ExitApplication) {
            break;
        }

        handle_event(app, event)?;
        reconcile_player(app)?;

        terminal.draw(|f| draw(f, app))?;
    }

    Ok(())
}

/// Applies a single event to the application state.
pub(crate) fn handle_event(app: &mut App, event: AppEvent) -> Result<()> {
    match event {
        AppEvent::Key(key) => process_key_event(app, key)?,
        AppEvent::Tick => {}
        AppEvent::PlaybackTick(generation) => handle_playback_tick(app, generation),
        AppEvent::SetMainView(view) => handle_set_main_view(app, view),
        AppEvent::Command(command) => handle_command(app, command)?,
        AppEvent::PlayFromList { tracks, track_id } => handle_play_from_list(app, tracks, &track_id),
        AppEvent::AddToQueue(track) => handle_add_to_queue(app, track),
        AppEvent::ToggleFavourite(track) => handle_toggle_favourite(app, track),
        AppEvent::ShowArtist(name) => handle_show_artist(app, name)?,
        AppEvent::ReloadChart => handle_reload_chart(app)?,
        AppEvent::ChartLoaded { region, entries } => handle_chart_loaded(app, region, entries),
        AppEvent::ArtistLoaded(info) => handle_artist_loaded(app, info),
        AppEvent::FetchFailed(message) => handle_fetch_failed(app, message),
        AppEvent::Info(message) => handle_info(app, message),
        AppEvent::Error(message) => handle_error(app, message),
        AppEvent::ExitApplication => {}
    }

    Ok(())
}

/// Forwards queued store writes to the task worker and brings the playback
/// timer in line with the player.
pub(crate) fn reconcile_player(app: &mut App) -> Result<()> {
    for write in app.player.take_pending_writes() {
        app.task_tx.send(AppTask::Save(write))?;
    }

    app.playback_timer.sync(&app.player, &app.event_tx);

    Ok(())
}

#[cfg(test)]
mod tests {
    use std::sync::mpsc::{self, Receiver};

    use crossterm::event::{KeyCode, KeyModifiers};

    use super::*;
    use crate::{
        components::StatusMessage,
        config::AppConfig,
        model::track::track,
        player::{PlaybackStatus, RepeatMode, StoreWrite},
    };

    fn app() -> (App, Receiver<AppTask>) {
        let (task_tx, task_rx) = mpsc::channel();
        (App::new(AppConfig::default(), task_tx), task_rx)
    }

    fn send(app: &mut App, event: AppEvent) {
        handle_event(app, event).unwrap();
        reconcile_player(app).unwrap();
    }

    fn press(app: &mut App, code: KeyCode) {
        send(app, AppEvent::Key(KeyEvent::new(code, KeyModifiers::NONE)));
    }

    fn chart(app: &mut App, ids: &[&str]) {
        let entries = ids
            .iter()
            .enumerate()
            .map(|(rank, id)| ChartEntry {
                rank: rank as u32,
                track: track(id, "200"),
            })
            .collect();
        let region = app.config.region.clone();
        send(app, AppEvent::ChartLoaded { region, entries });
    }

    fn queued_ids(app: &App) -> Vec<String> {
        app.player.queue().iter().map(|t| t.id.clone()).collect()
    }

    #[test]
    fn playing_from_the_chart_queues_the_chart_from_that_track() {
        let (mut app, _tasks) = app();
        chart(&mut app, &["a", "b", "c"]);

        press(&mut app, KeyCode::Char('j'));
        press(&mut app, KeyCode::Enter);

        assert_eq!(app.player.current_track().map(|t| t.id.as_str()), Some("b"));
        assert_eq!(app.player.status(), PlaybackStatus::Playing);
        assert_eq!(queued_ids(&app), vec!["b", "c", "a"]);
        assert!(app.playback_timer.is_running());
    }

    #[test]
    fn pausing_cancels_the_playback_timer() {
        let (mut app, _tasks) = app();
        chart(&mut app, &["a"]);
        press(&mut app, KeyCode::Enter);
        assert!(app.playback_timer.is_running());

        press(&mut app, KeyCode::Char(' '));
        assert_eq!(app.player.status(), PlaybackStatus::Paused);
        assert!(!app.playback_timer.is_running());
    }

    #[test]
    fn stale_playback_ticks_are_ignored() {
        let (mut app, _tasks) = app();
        chart(&mut app, &["a"]);
        press(&mut app, KeyCode::Enter);

        send(&mut app, AppEvent::PlaybackTick(u64::MAX));
        assert_eq!(app.player.current_time(), 0);
    }

    #[test]
    fn favourites_are_saved_through_the_task_worker() {
        let (mut app, tasks) = app();
        chart(&mut app, &["a", "b"]);

        press(&mut app, KeyCode::Char('f'));

        assert!(app.player.favourites().contains("a"));
        match tasks.try_recv().unwrap() {
            AppTask::Save(StoreWrite::Favourites(tracks)) => assert_eq!(tracks.len(), 1),
            other => panic!("unexpected task {:?}", other),
        }
    }

    #[test]
    fn playing_records_recent_tracks_and_saves_them() {
        let (mut app, tasks) = app();
        chart(&mut app, &["a", "b"]);
        press(&mut app, KeyCode::Enter);

        assert_eq!(app.player.recent().len(), 1);
        let saved_recent = tasks
            .try_iter()
            .any(|task| matches!(task, AppTask::Save(StoreWrite::RecentTracks(_))));
        assert!(saved_recent);
    }

    #[test]
    fn global_keys_drive_the_player() {
        let (mut app, _tasks) = app();
        chart(&mut app, &["a", "b"]);
        press(&mut app, KeyCode::Enter);

        press(&mut app, KeyCode::Char('s'));
        assert!(app.player.is_shuffled());

        press(&mut app, KeyCode::Char('r'));
        assert_eq!(app.player.repeat_mode(), RepeatMode::Queue);

        press(&mut app, KeyCode::Char('>'));
        assert_eq!(app.player.current_time(), 20);
        press(&mut app, KeyCode::Char(','));
        assert_eq!(app.player.current_time(), 15);
        press(&mut app, KeyCode::Char('<'));
        press(&mut app, KeyCode::Char('<'));
        assert_eq!(app.player.current_time(), 0);

        press(&mut app, KeyCode::Char('n'));
        assert_eq!(app.player.current_track().map(|t| t.id.as_str()), Some("b"));

        press(&mut app, KeyCode::Char('F'));
        assert!(app.player.favourites().contains("b"));
    }

    #[test]
    fn views_switch_with_number_keys() {
        let (mut app, _tasks) = app();
        press(&mut app, KeyCode::Char('3'));
        assert_eq!(app.main_view, MainView::Favourites);
        press(&mut app, KeyCode::Char('5'));
        assert_eq!(app.main_view, MainView::Artist);
        press(&mut app, KeyCode::Char('1'));
        assert_eq!(app.main_view, MainView::Charts);
    }

    #[test]
    fn artist_lookup_goes_to_the_worker() {
        let (mut app, tasks) = app();
        chart(&mut app, &["a"]);

        press(&mut app, KeyCode::Char('i'));

        match tasks.try_recv().unwrap() {
            AppTask::FetchArtistInfo(name) => assert_eq!(name, "Artist a"),
            other => panic!("unexpected task {:?}", other),
        }
        assert_eq!(app.main_view, MainView::Artist);
        assert_eq!(app.artist_view.loading.as_deref(), Some("Artist a"));
    }

    #[test]
    fn failed_fetch_keeps_the_previous_chart() {
        let (mut app, _tasks) = app();
        chart(&mut app, &["a", "b"]);

        send(&mut app, AppEvent::FetchFailed("boom".to_string()));

        assert_eq!(app.chart.len(), 2);
        assert_eq!(app.status, Some(StatusMessage::Error("boom".to_string())));
    }

    #[test]
    fn charts_for_another_region_are_dropped() {
        let (mut app, _tasks) = app();
        chart(&mut app, &["a"]);

        send(
            &mut app,
            AppEvent::ChartLoaded {
                region: "elsewhere".to_string(),
                entries: vec![],
            },
        );

        assert_eq!(app.chart.len(), 1);
    }

    #[test]
    fn commands_drive_the_player() {
        let (mut app, _tasks) = app();
        chart(&mut app, &["a", "b"]);
        press(&mut app, KeyCode::Enter);

        send(&mut app, AppEvent::Command(Command::Repeat(RepeatMode::Track)));
        assert_eq!(app.player.repeat_mode(), RepeatMode::Track);

        send(&mut app, AppEvent::Command(Command::Seek(42)));
        assert_eq!(app.player.current_time(), 42);

        send(&mut app, AppEvent::Command(Command::Play));
        assert_eq!(app.player.status(), PlaybackStatus::Paused);

        send(&mut app, AppEvent::Command(Command::Shuffle));
        assert!(app.player.is_shuffled());
    }

    #[test]
    fn appending_from_a_table_extends_the_queue() {
        let (mut app, _tasks) = app();
        chart(&mut app, &["a", "b"]);

        press(&mut app, KeyCode::Char('a'));
        press(&mut app, KeyCode::Char('j'));
        press(&mut app, KeyCode::Char('a'));

        assert_eq!(queued_ids(&app), vec!["a", "b"]);
        assert_eq!(app.player.status(), PlaybackStatus::Idle);
    }
}
