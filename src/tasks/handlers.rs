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
    events::AppEvent,
    player::StoreWrite,
    store,
    tasks::TaskContext,
};

pub(super) fn fetch_top_tracks(ctx: &mut TaskContext, region: String) -> Result<()> {
    match ctx.source.top_tracks(&region) {
        Ok(entries) => ctx.event_tx.send(AppEvent::ChartLoaded { region, entries })?,
        Err(e) => {
            tracing::error!(region, error = %e, "Failed to fetch top tracks");
            ctx.event_tx.send(AppEvent::FetchFailed(format!(
                "Could not load the {region} chart: {e}"
            )))?;
        }
    }

    Ok(())
}

pub(super) fn fetch_artist_info(ctx: &mut TaskContext, artist: String) -> Result<()> {
    match ctx.source.artist_info(&artist) {
        Ok(info) => ctx.event_tx.send(AppEvent::ArtistLoaded(info))?,
        Err(e) => {
            tracing::error!(artist, error = %e, "Failed to fetch artist info");
            ctx.event_tx.send(AppEvent::FetchFailed(format!(
                "Could not load {artist}: {e}"
            )))?;
        }
    }

    Ok(())
}

/// Writes are fire-and-forget: a failure is logged and otherwise ignored.
pub(super) fn save(ctx: &mut TaskContext, write: StoreWrite) -> Result<()> {
    let key = write.key();
    match store::save_tracks(ctx.store, key, write.tracks()) {
        Ok(()) => tracing::debug!(key, count = write.tracks().len(), "Saved tracks"),
        Err(e) => tracing::warn!(key, error = %e, "Failed to save tracks"),
    }

    Ok(())
}
