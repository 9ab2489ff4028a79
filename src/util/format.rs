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

//! Formatting of durations and counts for display.

/// Formats a duration in seconds into a `MM:SS` string.
///
/// This is used primarily for displaying track positions and durations in
/// the player interface. Minutes are not wrapped into hours.
pub(crate) fn format_time(total_seconds: u64) -> String {
    let mins = total_seconds / 60;
    let secs = total_seconds % 60;
    format!("{:02}:{:02}", mins, secs)
}

/// Formats a longer duration, such as the length of a whole queue, as
/// `H:MM:SS` once it reaches an hour and `MM:SS` below that.
pub(crate) fn format_total_time(total_seconds: u64) -> String {
    let hours = total_seconds / 3600;
    if hours == 0 {
        return format_time(total_seconds);
    }
    let mins = (total_seconds % 3600) / 60;
    let secs = total_seconds % 60;
    format!("{}:{:02}:{:02}", hours, mins, secs)
}

/// Formats a count with thousands separators, e.g. `4,561,234`.
pub(crate) fn format_count(count: u64) -> String {
    let digits = count.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);

    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }

    out
}
