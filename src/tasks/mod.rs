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

//! Asynchronous application task processing.
//!
//! This module offloads work that blocks (HTTP requests to the chart service
//! and writes to the persistent store) from the main UI thread. A dedicated
//! worker loop executes [`AppTask`] requests one at a time and broadcasts any
//! results back to the application via [`AppEvent`]s.
//!
//! Only actions that may block, or may take more than a trivial amount of time
//! to process, should be implemented as tasks. Everything else is handled
//! directly by events.

mod handlers;
use handlers::*;

use std::{
    sync::mpsc::{Receiver, Sender},
    thread::{self, JoinHandle},
};

use anyhow::Result;

use crate::{events::AppEvent, lastfm::ChartSource, player::StoreWrite, store::KeyValueStore};

#[derive(Debug)]
pub(crate) enum AppTask {
    /// Fetch the top tracks chart for a region.
    FetchTopTracks(String),

    /// Fetch the details of an artist, by name.
    FetchArtistInfo(String),

    /// Persist a collection, fire-and-forget.
    Save(StoreWrite),
}

/// Spawns a background thread to process application tasks.
///
/// The worker owns the chart source and the store for its whole lifetime and
/// runs until the task channel is closed.
///
/// # Arguments
///
/// * `source` - Where charts and artist details come from.
/// * `store` - The persistent key-value store.
/// * `task_rx` - The receiving end of the task channel.
/// * `event_tx` - The sending end of the channel for broadcasting results.
pub(crate) fn spawn_task_worker(
    source: Box<dyn ChartSource>,
    mut store: Box<dyn KeyValueStore>,
    task_rx: Receiver<AppTask>,
    event_tx: Sender<AppEvent>,
) -> JoinHandle<()> {
    thread::spawn(move || {
        while let Ok(task) = task_rx.recv() {
            let mut ctx = TaskContext {
                event_tx: &event_tx,
                source: source.as_ref(),
                store: store.as_mut(),
            };

            if let Err(e) = handle_task(task, &mut ctx) {
                let _ = event_tx.send(AppEvent::Error(e.to_string()));
            }
        }

        tracing::debug!("Task worker finished");
    })
}

/// Bundles shared resources required by task handlers to simplify resource
/// passing when invoking those handler functions.
pub(crate) struct TaskContext<'a> {
    event_tx: &'a Sender<AppEvent>,
    source: &'a dyn ChartSource,
    store: &'a mut dyn KeyValueStore,
}

/// Orchestrates the execution of a single task.
fn handle_task(task: AppTask, ctx: &mut TaskContext) -> Result<()> {
    match task {
        AppTask::FetchTopTracks(region) => fetch_top_tracks(ctx, region),
        AppTask::FetchArtistInfo(artist) => fetch_artist_info(ctx, artist),
        AppTask::Save(write) => save(ctx, write),
    }
}

#[cfg(test)]
mod tests {
    use std::{
        sync::mpsc::{self, Receiver},
        time::Duration,
    };

    use super::*;
    use crate::{
        lastfm::{FetchError, parse::ParseError},
        model::{ArtistInfo, BioSummary, ChartEntry, track::track},
        store::{FAVOURITES_KEY, MemoryStore, RECENT_TRACKS_KEY, load_tracks},
    };

    /// Chart source returning canned results.
    struct FakeSource {
        fail: bool,
    }

    impl ChartSource for FakeSource {
        fn top_tracks(&self, region: &str) -> Result<Vec<ChartEntry>, FetchError> {
            if self.fail {
                return Err(ParseError::MissingField("tracks").into());
            }
            Ok(vec![
                ChartEntry {
                    rank: 0,
                    track: track(&format!("{region}-1"), "200"),
                },
                ChartEntry {
                    rank: 1,
                    track: track(&format!("{region}-2"), "0"),
                },
            ])
        }

        fn artist_info(&self, artist: &str) -> Result<ArtistInfo, FetchError> {
            if self.fail {
                return Err(FetchError::Api {
                    code: 6,
                    message: "The artist you supplied could not be found".to_string(),
                });
            }
            Ok(ArtistInfo {
                name: artist.to_string(),
                image: String::new(),
                listeners: 10,
                play_count: 20,
                tags: vec![],
                similar: vec![],
                bio: BioSummary::default(),
            })
        }
    }

    fn run(task: AppTask, fail: bool, store: &mut MemoryStore) -> Receiver<AppEvent> {
        let (event_tx, event_rx) = mpsc::channel();
        let source = FakeSource { fail };
        let mut ctx = TaskContext {
            event_tx: &event_tx,
            source: &source,
            store,
        };
        handle_task(task, &mut ctx).unwrap();
        event_rx
    }

    #[test]
    fn chart_results_are_broadcast() {
        let mut store = MemoryStore::default();
        let events = run(AppTask::FetchTopTracks("colombia".into()), false, &mut store);

        match events.try_recv().unwrap() {
            AppEvent::ChartLoaded { region, entries } => {
                assert_eq!(region, "colombia");
                assert_eq!(entries.len(), 2);
                assert_eq!(entries[0].track.id, "colombia-1");
            }
            other => panic!("unexpected event {:?}", other),
        }
    }

    #[test]
    fn failed_fetches_are_reported_not_raised() {
        let mut store = MemoryStore::default();

        let events = run(AppTask::FetchTopTracks("nowhere".into()), true, &mut store);
        match events.try_recv().unwrap() {
            AppEvent::FetchFailed(message) => assert!(message.contains("missing field 'tracks'")),
            other => panic!("unexpected event {:?}", other),
        }

        let events = run(AppTask::FetchArtistInfo("Nobody".into()), true, &mut store);
        match events.try_recv().unwrap() {
            AppEvent::FetchFailed(message) => assert!(message.contains("could not be found")),
            other => panic!("unexpected event {:?}", other),
        }
    }

    #[test]
    fn artist_info_is_broadcast() {
        let mut store = MemoryStore::default();
        let events = run(AppTask::FetchArtistInfo("Shakira".into()), false, &mut store);

        match events.try_recv().unwrap() {
            AppEvent::ArtistLoaded(info) => assert_eq!(info.name, "Shakira"),
            other => panic!("unexpected event {:?}", other),
        }
    }

    #[test]
    fn saves_reach_the_store() {
        let mut store = MemoryStore::default();
        let tracks = vec![track("a", "100"), track("b", "200")];

        let events = run(AppTask::Save(StoreWrite::Favourites(tracks.clone())), false, &mut store);
        let more_events = run(AppTask::Save(StoreWrite::RecentTracks(vec![])), false, &mut store);

        assert_eq!(load_tracks(&store, FAVOURITES_KEY), tracks);
        assert!(load_tracks(&store, RECENT_TRACKS_KEY).is_empty());
        assert!(events.try_recv().is_err());
        assert!(more_events.try_recv().is_err());
    }

    #[test]
    fn failed_saves_are_swallowed() {
        let mut store = MemoryStore {
            fail_writes: true,
            ..MemoryStore::default()
        };

        let write = StoreWrite::Favourites(vec![track("a", "1")]);
        let events = run(AppTask::Save(write), false, &mut store);

        assert!(store.entries.is_empty());
        assert!(events.try_recv().is_err());
    }

    #[test]
    fn worker_processes_tasks_in_order() {
        let (task_tx, task_rx) = mpsc::channel();
        let (event_tx, event_rx) = mpsc::channel();

        let handle = spawn_task_worker(
            Box::new(FakeSource { fail: false }),
            Box::new(MemoryStore::default()),
            task_rx,
            event_tx,
        );

        task_tx.send(AppTask::FetchTopTracks("peru".into())).unwrap();
        task_tx.send(AppTask::FetchArtistInfo("Shakira".into())).unwrap();

        let timeout = Duration::from_secs(5);
        assert!(matches!(
            event_rx.recv_timeout(timeout).unwrap(),
            AppEvent::ChartLoaded { .. }
        ));
        assert!(matches!(
            event_rx.recv_timeout(timeout).unwrap(),
            AppEvent::ArtistLoaded(_)
        ));

        drop(task_tx);
        handle.join().unwrap();
    }
}
