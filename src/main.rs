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

//! # Chart Deck.
//!
//! A terminal music discovery client: browse the top tracks of a region,
//! queue and "play" them, keep favourites and a recently played history, and
//! look up artists.
//!
//! There is no audio. Playback is simulated by a playhead advanced once per
//! second while a track is playing, with repeat and shuffle settings
//! applied when a track ends.
//!
//! ## Architecture
//!
//! * The **Main Thread** owns the terminal, the application state and the
//!   event loop, and renders after every event.
//! * A **Task Worker** thread performs blocking work: HTTP requests to the
//!   chart service and writes to the persistent store.
//! * **Input**, **UI tick** and **playback tick** threads feed events into
//!   the loop.
//!
//! Communication between threads is handled via `std::sync::mpsc` channels.
//! The application follows a strict setup-run-teardown pattern so the
//! terminal state is restored even when the event loop fails.

mod commander;
mod components;
mod config;
mod events;
mod lastfm;
mod logging;
mod model;
mod player;
mod render;
mod store;
mod tasks;
mod theme;
mod util;

use std::{
    io,
    sync::mpsc::{self, Receiver, Sender},
    thread,
    time::Duration,
};

use anyhow::{Context, Result};
use crossterm::{
    event, execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, backend::CrosstermBackend};

use crate::{
    commander::Commander,
    components::{ArtistView, StatusMessage, TrackTableState},
    config::AppConfig,
    events::{AppEvent, process_events},
    lastfm::{ChartSource, LastFmClient},
    model::{ChartEntry, Track},
    player::{
        PlayerState,
        timer::{PlaybackTimer, TICK_INTERVAL},
    },
    store::{FAVOURITES_KEY, FileStore, KeyValueStore, RECENT_TRACKS_KEY},
    tasks::AppTask,
    theme::Theme,
};

const UI_TICK_INTERVAL: Duration = Duration::from_millis(250);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum MainView {
    Charts,
    Queue,
    Favourites,
    Recent,
    Artist,
}

/// Application state.
pub(crate) struct App {
    config: AppConfig,

    theme: Theme,
    main_view: MainView,

    event_tx: Sender<AppEvent>,
    event_rx: Receiver<AppEvent>,

    task_tx: Sender<AppTask>,

    player: PlayerState,
    playback_timer: PlaybackTimer,

    chart_region: String,
    chart: Vec<ChartEntry>,

    chart_view: TrackTableState,
    queue_view: TrackTableState,
    favourites_view: TrackTableState,
    recent_view: TrackTableState,
    artist_view: ArtistView,

    commander: Commander,
    status: Option<StatusMessage>,
}

impl App {
    /// Create a new instance of application state.
    pub(crate) fn new(config: AppConfig, task_tx: Sender<AppTask>) -> Self {
        let (event_tx, event_rx) = mpsc::channel();
        let theme = Theme::default();

        Self {
            chart_region: config.region.clone(),
            config,
            theme,
            main_view: MainView::Charts,
            event_tx,
            event_rx,
            task_tx,
            player: PlayerState::new(),
            playback_timer: PlaybackTimer::new(TICK_INTERVAL),
            chart: vec![],
            chart_view: TrackTableState::new(),
            queue_view: TrackTableState::new(),
            favourites_view: TrackTableState::new(),
            recent_view: TrackTableState::new(),
            artist_view: ArtistView::new(theme.accent_colour),
            commander: Commander::new(),
            status: None,
        }
    }

    /// The tracks listed by a view, in display order.
    pub(crate) fn view_tracks(&self, view: MainView) -> Vec<Track> {
        match view {
            MainView::Charts => self.chart.iter().map(|e| e.track.clone()).collect(),
            MainView::Queue => self.player.queue().tracks(),
            MainView::Favourites => self.player.favourites().tracks().to_vec(),
            MainView::Recent => self.player.recent().tracks().to_vec(),
            MainView::Artist => vec![],
        }
    }
}

/// The entry point of the application.
///
/// Loads the configuration, starts logging, rehydrates the player from the
/// persistent store, then runs the UI until the user quits.
fn main() -> Result<()> {
    let config = config::load_config();

    // The guard flushes the log file on exit
    let _log_guard = match logging::init_logging(&config.log_dir()) {
        Ok(guard) => Some(guard),
        Err(e) => {
            eprintln!("Logging disabled: {:#}", e);
            None
        }
    };

    let file_store = FileStore::new(config.store_dir());
    let favourites = store::load_tracks(&file_store, FAVOURITES_KEY);
    let recent = store::load_tracks(&file_store, RECENT_TRACKS_KEY);

    let source = LastFmClient::new(&config).context("Failed to create chart service client")?;

    let (task_tx, task_rx) = mpsc::channel();

    let mut app = App::new(config, task_tx);
    app.player.rehydrate(favourites, recent);

    let mut terminal = setup_terminal(&app)?;
    let res = run(
        &mut terminal,
        &mut app,
        Box::new(source),
        Box::new(file_store),
        task_rx,
    );
    restore_terminal(&mut terminal);

    if let Err(e) = &res {
        tracing::error!("Application failed: {:#}", e);
    }

    res.context("Application error occurred")
}

/// Prepares the terminal for the TUI application.
///
/// Sets the terminal background colour from the theme, enables raw mode and
/// switches to the alternate screen buffer.
///
/// # Errors
///
/// Returns an error if raw mode cannot be enabled or if the alternate screen
/// cannot be entered.
fn setup_terminal(app: &App) -> Result<Terminal<CrosstermBackend<io::Stdout>>> {
    // Set the background of the entire terminal window, without this we'd get
    // a thin black outline
    if let Some(hex) = Theme::to_hex(app.theme.background_colour) {
        util::term::set_terminal_bg(&hex).ok();
    }

    enable_raw_mode().context("Failed to enable raw mode")?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen).context("Failed to enter alternate screen")?;

    let backend = CrosstermBackend::new(stdout);
    let terminal = Terminal::new(backend).context("Failed to create terminal")?;

    Ok(terminal)
}

/// Restores the terminal to its original state.
///
/// This reverses the changes made by [`setup_terminal`]. It is best-effort
/// and does not return a result, as it runs during cleanup.
fn restore_terminal(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>) {
    disable_raw_mode().ok();
    execute!(terminal.backend_mut(), LeaveAlternateScreen).ok();
    util::term::reset_terminal_bg().ok();
    terminal.show_cursor().ok();
}

/// Starts the application's background workers and enters the main event loop.
///
/// This function spawns several long-running background threads:
/// * A task worker to process [`AppTask`]s.
/// * An input thread to poll for terminal keyboard events.
/// * A tick thread to trigger periodic UI refreshes.
///
/// After requesting the initial chart, it hands control to
/// [`process_events`].
fn run(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    source: Box<dyn ChartSource>,
    store: Box<dyn KeyValueStore>,
    task_rx: Receiver<AppTask>,
) -> Result<()> {
    tasks::spawn_task_worker(source, store, task_rx, app.event_tx.clone());

    // Spawn a thread to translate raw key events to application events.
    let tx_keys = app.event_tx.clone();
    thread::spawn(move || {
        loop {
            match event::read() {
                Ok(event::Event::Key(key)) => {
                    if tx_keys.send(AppEvent::Key(key)).is_err() {
                        break;
                    }
                }
                Ok(_) => {}
                Err(e) => {
                    tracing::error!(error = %e, "Failed to read terminal input");
                    break;
                }
            }
        }
    });

    // Spawn a thread to send a periodic tick application event, this is
    // effectively the minimum "frame rate" for rendering the TUI application.
    let tx_tick = app.event_tx.clone();
    thread::spawn(move || {
        while tx_tick.send(AppEvent::Tick).is_ok() {
            thread::sleep(UI_TICK_INTERVAL);
        }
    });

    app.task_tx
        .send(AppTask::FetchTopTracks(app.config.region.clone()))
        .context("Failed to request the initial chart")?;

    process_events(terminal, app)
}
