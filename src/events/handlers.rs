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

use anyhow::Result;

use crate::{
    App, MainView,
    commander::Command,
    components::StatusMessage,
    config,
    events::AppEvent,
    model::{ArtistInfo, ChartEntry, Track},
    player::timer::{TickOutcome, on_tick},
    tasks::AppTask,
    theme::Theme,
};

pub(super) fn handle_playback_tick(app: &mut App, generation: u64) {
    if !app.playback_timer.is_current(generation) {
        tracing::trace!(generation, "Ignoring stale playback tick");
        return;
    }

    if on_tick(&mut app.player) == TickOutcome::TrackEnded {
        app.queue_view.clamp_selection(app.player.queue().len());
    }
}

pub(super) fn handle_set_main_view(app: &mut App, main_view: MainView) {
    let len = app.view_tracks(main_view).len();
    match main_view {
        MainView::Charts => app.chart_view.clamp_selection(len),
        MainView::Queue => app.queue_view.clamp_selection(len),
        MainView::Favourites => app.favourites_view.clamp_selection(len),
        MainView::Recent => app.recent_view.clamp_selection(len),
        MainView::Artist => {}
    }
    app.main_view = main_view;
}

pub(super) fn handle_command(app: &mut App, command: Command) -> Result<()> {
    match command {
        Command::Quit => app.event_tx.send(AppEvent::ExitApplication)?,
        Command::Region(region) => handle_set_region(app, region)?,
        Command::Artist(name) => handle_show_artist(app, name)?,
        Command::Repeat(mode) => app.player.set_repeat_mode(mode),
        Command::Shuffle => app.player.toggle_shuffle(),
        Command::Seek(seconds) => app.player.update_current_time(seconds),
        Command::Next => app.player.advance(),
        Command::Previous => app.player.reverse(),
        Command::Play => app.player.toggle_play(),
    }

    Ok(())
}

/// Switches the chart region, remembering it for the next start.
fn handle_set_region(app: &mut App, region: String) -> Result<()> {
    app.config.region = region;
    if let Err(e) = config::save_config(&app.config) {
        tracing::warn!(error = %e, "Failed to save configuration");
    }
    handle_reload_chart(app)
}

/// Makes `tracks` the queue, starting at the chosen track, and plays it.
pub(super) fn handle_play_from_list(app: &mut App, tracks: Vec<Track>, track_id: &str) {
    let Some(track) = tracks.iter().find(|t| t.id == track_id).cloned() else {
        return;
    };

    app.player.set_queue_starting_at(tracks, track_id);
    app.player.select_track(track);
    app.player.toggle_play();

    app.queue_view.reset_selection(app.player.queue().len());
}

pub(super) fn handle_add_to_queue(app: &mut App, track: Track) {
    let message = format!("Queued {}", track.name);
    app.player.add_to_queue(track);
    app.status = Some(StatusMessage::Info(message));
}

pub(super) fn handle_toggle_favourite(app: &mut App, track: Track) {
    let name = track.name.clone();
    let message = if app.player.toggle_favourite(track) {
        format!("Added {name} to favourites")
    } else {
        format!("Removed {name} from favourites")
    };
    app.favourites_view
        .clamp_selection(app.player.favourites().len());
    app.status = Some(StatusMessage::Info(message));
}

pub(super) fn handle_show_artist(app: &mut App, name: String) -> Result<()> {
    app.task_tx.send(AppTask::FetchArtistInfo(name.clone()))?;
    app.artist_view.start_loading(name);
    app.main_view = MainView::Artist;

    Ok(())
}

pub(super) fn handle_reload_chart(app: &mut App) -> Result<()> {
    let region = app.config.region.clone();
    app.status = Some(StatusMessage::Info(format!("Loading the {region} chart...")));
    app.task_tx.send(AppTask::FetchTopTracks(region))?;

    Ok(())
}

pub(super) fn handle_chart_loaded(app: &mut App, region: String, entries: Vec<ChartEntry>) {
    // A reply for a region that has since been replaced.
    if region != app.config.region {
        tracing::debug!(region, "Dropping chart for a previous region");
        return;
    }

    app.status = Some(StatusMessage::Info(format!(
        "Loaded {} top tracks for {}",
        entries.len(),
        region
    )));
    app.chart_view.reset_selection(entries.len());
    app.chart = entries;
    app.chart_region = region;
}

pub(super) fn handle_artist_loaded(app: &mut App, info: ArtistInfo) {
    app.status = Some(StatusMessage::Info(format!("Loaded {}", info.name)));
    app.artist_view.set_artist(info, Theme::random_accent());
}

pub(super) fn handle_fetch_failed(app: &mut App, message: String) {
    app.artist_view.cancel_loading();
    app.status = Some(StatusMessage::Error(message));
}

pub(super) fn handle_info(app: &mut App, message: String) {
    app.status = Some(StatusMessage::Info(message));
}

pub(super) fn handle_error(app: &mut App, message: String) {
    tracing::error!(message, "Application error");
    app.status = Some(StatusMessage::Error(message));
}
