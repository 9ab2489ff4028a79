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

//! Command-line input logic and state management.
//!
//! This module implements the logic for a command-line processing component:
//! a text input activated with `:`, and the parsing of a submitted line into a
//! [`Command`] that is dispatched to the application as an event.

use std::sync::mpsc::Sender;

use crossterm::event::{Event, KeyCode};
use thiserror::Error;
use tui_input::{Input, backend::crossterm::EventHandler};

use crate::{events::AppEvent, player::RepeatMode};

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Command {
    Quit,
    Region(String),
    Artist(String),
    Repeat(RepeatMode),
    Shuffle,
    Seek(u64),
    Next,
    Previous,
    Play,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub(crate) enum CommandError {
    #[error("unknown command '{0}'")]
    Unknown(String),

    #[error("'{0}' needs an argument")]
    MissingArgument(&'static str),

    #[error("invalid argument '{value}' for '{command}'")]
    InvalidArgument { command: &'static str, value: String },
}

impl Command {
    pub(crate) fn parse(buffer: &str) -> Result<Self, CommandError> {
        let parts: Vec<&str> = buffer.split_whitespace().collect();

        let command = match parts.as_slice() {
            ["q"] | ["quit"] => Command::Quit,

            ["region"] => return Err(CommandError::MissingArgument("region")),
            ["region", name @ ..] => Command::Region(name.join(" ")),

            ["artist"] => return Err(CommandError::MissingArgument("artist")),
            ["artist", name @ ..] => Command::Artist(name.join(" ")),

            ["repeat"] => return Err(CommandError::MissingArgument("repeat")),
            ["repeat", mode] => {
                let mode = mode.parse().map_err(|_| CommandError::InvalidArgument {
                    command: "repeat",
                    value: mode.to_string(),
                })?;
                Command::Repeat(mode)
            }

            ["seek"] => return Err(CommandError::MissingArgument("seek")),
            ["seek", secs] => {
                let secs = secs.parse().map_err(|_| CommandError::InvalidArgument {
                    command: "seek",
                    value: secs.to_string(),
                })?;
                Command::Seek(secs)
            }

            ["shuffle"] => Command::Shuffle,
            ["next"] => Command::Next,
            ["prev"] => Command::Previous,
            ["play"] => Command::Play,

            _ => return Err(CommandError::Unknown(buffer.trim().to_string())),
        };

        Ok(command)
    }
}

pub(crate) struct Commander {
    active: bool,
    pub(crate) input: Input,
}

impl Commander {
    pub(crate) fn new() -> Self {
        Self {
            active: false,
            input: Input::default(),
        }
    }

    pub(crate) fn active(&self) -> bool {
        self.active
    }

    /// Offers a terminal event to the command line, returning whether it was
    /// consumed.
    ///
    /// While inactive only `:` is consumed (it activates the command line).
    /// While active every key is consumed: `Esc` cancels, `Enter` submits and
    /// everything else edits the input.
    pub(crate) fn handle_event(&mut self, event: &Event, event_tx: &Sender<AppEvent>) -> bool {
        let Event::Key(key_event) = event else {
            return false;
        };

        if !self.active {
            if key_event.code == KeyCode::Char(':') {
                self.active = true;
                return true;
            }
            return false;
        }

        match key_event.code {
            KeyCode::Esc => {
                self.input.reset();
                self.active = false;
            }

            KeyCode::Enter => {
                let buffer = self.input.value().trim().to_string();
                self.input.reset();
                self.active = false;

                if !buffer.is_empty() {
                    let event = match Command::parse(&buffer) {
                        Ok(command) => AppEvent::Command(command),
                        Err(e) => AppEvent::Error(e.to_string()),
                    };
                    let _ = event_tx.send(event);
                }
            }

            _ => {
                self.input.handle_event(event);
            }
        }

        true
    }
}
