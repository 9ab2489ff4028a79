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

//! Playable track metadata and duration validation.
//!
//! Track durations arrive from the chart service as strings and are not
//! always usable: they may be zero, negative or not a number at all. Every
//! track that enters the queue, the current slot or the recent history is
//! passed through [`Track::validate`] first, which guarantees a positive
//! duration.

use serde::{Deserialize, Serialize};

/// Duration, in seconds, substituted for missing or invalid durations.
pub(crate) const DEFAULT_DURATION: &str = "180";

/// A single playable item.
///
/// Two tracks are equal when their ids are equal, whatever the rest of the
/// metadata says.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub(crate) struct Track {
    pub(crate) id: String,
    pub(crate) name: String,
    pub(crate) artist: String,
    pub(crate) image: String,
    pub(crate) duration: String,
}

impl PartialEq for Track {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Track {}

impl Track {
    /// Returns the track with a guaranteed positive duration.
    ///
    /// A duration whose leading integer is zero or negative, or that has no
    /// leading integer at all, is replaced by [`DEFAULT_DURATION`]. Valid
    /// tracks are returned unchanged.
    pub(crate) fn validate(self) -> Self {
        match parse_leading_int(&self.duration) {
            Some(secs) if secs > 0 => self,
            _ => Self {
                duration: DEFAULT_DURATION.to_string(),
                ..self
            },
        }
    }

    /// The track duration in whole seconds, or 0 when it does not parse.
    pub(crate) fn duration_secs(&self) -> u64 {
        parse_leading_int(&self.duration)
            .filter(|secs| *secs > 0)
            .map(|secs| secs as u64)
            .unwrap_or(0)
    }
}

/// Parses the leading integer of a string, ignoring surrounding whitespace
/// and any trailing garbage (`"200s"` is 200).
///
/// Returns `None` when the string does not start with a digit (after an
/// optional sign). Values too large for an `i64` saturate.
fn parse_leading_int(value: &str) -> Option<i64> {
    let trimmed = value.trim_start();
    let (negative, digits) = match trimmed.as_bytes().first() {
        Some(b'-') => (true, &trimmed[1..]),
        Some(b'+') => (false, &trimmed[1..]),
        _ => (false, trimmed),
    };

    let end = digits
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(digits.len());
    if end == 0 {
        return None;
    }

    let magnitude = digits[..end]
        .bytes()
        .try_fold(0i64, |acc, b| {
            acc.checked_mul(10)?.checked_add(i64::from(b - b'0'))
        })
        .unwrap_or(i64::MAX);

    Some(if negative { -magnitude } else { magnitude })
}

#[cfg(test)]
pub(crate) fn track(id: &str, duration: &str) -> Track {
    Track {
        id: id.to_string(),
        name: format!("Track {}", id),
        artist: format!("Artist {}", id),
        image: format!("https://img.example/{}.png", id),
        duration: duration.to_string(),
    }
}
