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

//! Simulated playback clock.
//!
//! While a track is playing, a ticker thread sends one
//! [`AppEvent::PlaybackTick`] per second to the main event loop, where
//! [`on_tick`] advances the playhead and detects the end of the track.
//!
//! A ticker belongs to exactly one loaded track: it is cancelled as soon as
//! playback pauses, stops or the current slot is reassigned, and a fresh
//! ticker with a new generation number is started if playback continues.
//! Ticks already queued by a cancelled ticker carry a stale generation and
//! are ignored by the caller.

use std::{
    sync::mpsc::{self, RecvTimeoutError, Sender},
    thread,
    time::Duration,
};

use crate::{
    events::AppEvent,
    player::{PlaybackStatus, PlayerState},
};

pub(crate) const TICK_INTERVAL: Duration = Duration::from_secs(1);

/// What a single playback tick did to the player.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum TickOutcome {
    /// Nothing is playing.
    Ignored,
    /// The playhead moved to the given second.
    Advanced(u64),
    /// The track reached its duration and the player moved on.
    TrackEnded,
}

/// Applies one second of playback.
///
/// The track ends on the tick that would move the playhead onto its
/// duration; that tick calls [`PlayerState::advance`] instead, which also
/// covers the repeat modes.
pub(crate) fn on_tick(state: &mut PlayerState) -> TickOutcome {
    if state.status() != PlaybackStatus::Playing {
        return TickOutcome::Ignored;
    }

    let duration = state
        .current_track()
        .map(|t| t.duration_secs())
        .unwrap_or(0);
    let next = state.current_time() + 1;

    if next >= duration {
        tracing::debug!(duration, "End of track");
        state.advance();
        TickOutcome::TrackEnded
    } else {
        state.update_current_time(next);
        TickOutcome::Advanced(next)
    }
}

struct RunningTicker {
    load_count: u64,
    // Dropping this disconnects the ticker thread, which then exits.
    cancel_tx: Sender<()>,
}

pub(crate) struct PlaybackTimer {
    interval: Duration,
    generation: u64,
    running: Option<RunningTicker>,
}

impl PlaybackTimer {
    pub(crate) fn new(interval: Duration) -> Self {
        Self {
            interval,
            generation: 0,
            running: None,
        }
    }

    /// Starts, restarts or cancels the ticker to match the player.
    ///
    /// The ticker runs only while a track is playing, and is restarted when
    /// a different load of the current slot is observed.
    pub(crate) fn sync(&mut self, state: &PlayerState, event_tx: &Sender<AppEvent>) {
        let wanted = (state.status() == PlaybackStatus::Playing).then(|| state.load_count());

        match (&self.running, wanted) {
            (Some(running), Some(load_count)) if running.load_count == load_count => {}
            (_, Some(load_count)) => {
                self.cancel();
                self.start(load_count, event_tx.clone());
            }
            (Some(_), None) => self.cancel(),
            (None, None) => {}
        }
    }

    /// Whether a tick with this generation came from the live ticker.
    pub(crate) fn is_current(&self, generation: u64) -> bool {
        self.running.is_some() && generation == self.generation
    }

    pub(crate) fn is_running(&self) -> bool {
        self.running.is_some()
    }

    pub(crate) fn cancel(&mut self) {
        if let Some(running) = self.running.take() {
            let _ = running.cancel_tx.send(());
            tracing::trace!(generation = self.generation, "Playback ticker cancelled");
        }
    }

    fn start(&mut self, load_count: u64, event_tx: Sender<AppEvent>) {
        self.generation += 1;
        let generation = self.generation;
        let interval = self.interval;
        let (cancel_tx, cancel_rx) = mpsc::channel::<()>();

        thread::spawn(move || {
            loop {
                match cancel_rx.recv_timeout(interval) {
                    Err(RecvTimeoutError::Timeout) => {
                        if event_tx.send(AppEvent::PlaybackTick(generation)).is_err() {
                            break;
                        }
                    }
                    Ok(()) | Err(RecvTimeoutError::Disconnected) => break,
                }
            }
        });

        tracing::trace!(generation, load_count, "Playback ticker started");
        self.running = Some(RunningTicker {
            load_count,
            cancel_tx,
        });
    }
}

impl Drop for PlaybackTimer {
    fn drop(&mut self) {
        self.cancel();
    }
}

#[cfg(test)]
mod tests {
    use std::sync::mpsc::Receiver;

    use super::*;
    use crate::{model::track::track, player::RepeatMode};

    const TEST_INTERVAL: Duration = Duration::from_millis(5);
    const WAIT: Duration = Duration::from_secs(2);

    fn playing(id: &str, duration: &str) -> PlayerState {
        let mut state = PlayerState::new();
        state.select_track(track(id, duration));
        state.toggle_play();
        state
    }

    fn next_tick(rx: &Receiver<AppEvent>) -> u64 {
        match rx.recv_timeout(WAIT) {
            Ok(AppEvent::PlaybackTick(generation)) => generation,
            other => panic!("expected a playback tick, got {:?}", other),
        }
    }

    #[test]
    fn track_ends_exactly_once_on_its_final_second() {
        let mut state = playing("t1", "200");
        let mut ended_at = vec![];

        for tick in 1..=250 {
            if on_tick(&mut state) == TickOutcome::TrackEnded {
                ended_at.push(tick);
            }
        }

        assert_eq!(ended_at, vec![200]);
        assert_eq!(state.status(), PlaybackStatus::Idle);
        assert!(!state.is_playing());
    }

    #[test]
    fn playhead_reaches_the_last_second_before_ending() {
        let mut state = playing("t1", "3");
        assert_eq!(on_tick(&mut state), TickOutcome::Advanced(1));
        assert_eq!(on_tick(&mut state), TickOutcome::Advanced(2));
        assert_eq!(state.current_time(), 2);
        assert_eq!(on_tick(&mut state), TickOutcome::TrackEnded);
    }

    #[test]
    fn paused_player_ignores_ticks() {
        let mut state = playing("t1", "10");
        state.toggle_play();
        assert_eq!(on_tick(&mut state), TickOutcome::Ignored);
        assert_eq!(state.current_time(), 0);
        assert_eq!(on_tick(&mut PlayerState::new()), TickOutcome::Ignored);
    }

    #[test]
    fn end_of_track_under_repeat_track_restarts() {
        let mut state = playing("loop", "2");
        state.set_repeat_mode(RepeatMode::Track);

        assert_eq!(on_tick(&mut state), TickOutcome::Advanced(1));
        assert_eq!(on_tick(&mut state), TickOutcome::TrackEnded);

        assert_eq!(state.current_track().map(|t| t.id.as_str()), Some("loop"));
        assert_eq!(state.current_time(), 0);
        assert!(state.is_playing());
        assert_eq!(on_tick(&mut state), TickOutcome::Advanced(1));
    }

    #[test]
    fn end_of_track_moves_to_queued_track() {
        let mut state = PlayerState::new();
        state.select_track(track("a", "1"));
        state.set_queue(vec![track("a", "1"), track("b", "5")]);
        state.toggle_play();

        assert_eq!(on_tick(&mut state), TickOutcome::TrackEnded);
        assert_eq!(state.current_track().map(|t| t.id.as_str()), Some("b"));
        assert_eq!(state.status(), PlaybackStatus::Playing);
    }

    #[test]
    fn timer_ticks_only_while_playing() {
        let (tx, rx) = mpsc::channel();
        let mut timer = PlaybackTimer::new(TEST_INTERVAL);
        let mut state = playing("a", "100");

        timer.sync(&state, &tx);
        assert!(timer.is_running());
        let generation = next_tick(&rx);
        assert!(timer.is_current(generation));

        state.toggle_play();
        timer.sync(&state, &tx);
        assert!(!timer.is_running());
        assert!(!timer.is_current(generation));
    }

    #[test]
    fn timer_restarts_when_the_track_changes() {
        let (tx, rx) = mpsc::channel();
        let mut timer = PlaybackTimer::new(TEST_INTERVAL);
        let mut state = playing("a", "100");

        timer.sync(&state, &tx);
        let first = next_tick(&rx);

        // Same load: the ticker is kept.
        timer.sync(&state, &tx);
        assert!(timer.is_current(first));

        state.select_track(track("b", "100"));
        state.toggle_play();
        timer.sync(&state, &tx);
        assert!(!timer.is_current(first));

        // Ticks from the cancelled ticker may still be queued; skip them.
        let mut latest = next_tick(&rx);
        while latest == first {
            latest = next_tick(&rx);
        }
        assert!(timer.is_current(latest));
    }

    #[test]
    fn dropping_the_timer_stops_the_ticker() {
        let (tx, rx) = mpsc::channel();
        let mut timer = PlaybackTimer::new(TEST_INTERVAL);
        timer.sync(&playing("a", "100"), &tx);
        next_tick(&rx);

        drop(timer);
        drop(tx);

        // Once the ticker thread exits, every sender is gone and the channel
        // disconnects after the remaining ticks are drained.
        let deadline = std::time::Instant::now() + WAIT;
        loop {
            match rx.recv_timeout(WAIT) {
                Ok(_) => assert!(std::time::Instant::now() < deadline, "ticker kept running"),
                Err(RecvTimeoutError::Disconnected) => break,
                Err(RecvTimeoutError::Timeout) => panic!("ticker kept its sender alive"),
            }
        }
    }
}
