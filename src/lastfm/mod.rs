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

//! Chart and artist metadata source.
//!
//! The application reads the top tracks of a region and artist details from
//! the last.fm web API. [`ChartSource`] is the seam used by the task worker;
//! [`LastFmClient`] is the HTTP implementation. Requests are blocking (they
//! only ever run on the worker thread), time out after
//! [`REQUEST_TIMEOUT`], and are never retried: any failure is reported to
//! the caller as a single [`FetchError`].

pub(crate) mod parse;

use std::time::Duration;

use reqwest::{StatusCode, blocking::Client};
use thiserror::Error;

use crate::{
    config::AppConfig,
    lastfm::parse::ParseError,
    model::{ArtistInfo, ChartEntry},
};

pub(crate) const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

const TOP_TRACKS_METHOD: &str = "geo.gettoptracks";
const ARTIST_INFO_METHOD: &str = "artist.getinfo";

#[derive(Debug, Error)]
pub(crate) enum FetchError {
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("chart service returned HTTP {0}")]
    Status(StatusCode),

    #[error("chart service error {code}: {message}")]
    Api { code: i64, message: String },

    #[error("unexpected response: {0}")]
    Parse(#[from] ParseError),
}

pub(crate) trait ChartSource: Send {
    /// The current top tracks for a region (a country name).
    fn top_tracks(&self, region: &str) -> Result<Vec<ChartEntry>, FetchError>;

    /// Details for an artist, looked up by name.
    fn artist_info(&self, artist: &str) -> Result<ArtistInfo, FetchError>;
}

pub(crate) struct LastFmClient {
    http: Client,
    api_url: String,
    api_key: String,
}

impl LastFmClient {
    pub(crate) fn new(config: &AppConfig) -> Result<Self, FetchError> {
        let http = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
            .build()?;

        if config.api_key.is_empty() {
            tracing::warn!("No API key configured, chart requests will be rejected");
        }

        Ok(Self {
            http,
            api_url: config.api_url.clone(),
            api_key: config.api_key.clone(),
        })
    }

    fn call(&self, method: &str, params: &[(&str, &str)]) -> Result<String, FetchError> {
        let mut query = vec![
            ("method", method),
            ("api_key", self.api_key.as_str()),
            ("format", "json"),
        ];
        query.extend_from_slice(params);

        tracing::debug!(method, "API request started");

        let response = self.http.get(&self.api_url).query(&query).send()?;
        let status = response.status();
        let body = response.text()?;

        // Service errors come back as a JSON object, often with a 4xx status.
        if let Some(api_error) = parse::api_error(&body) {
            return Err(FetchError::Api {
                code: api_error.code,
                message: api_error.message,
            });
        }

        if !status.is_success() {
            return Err(FetchError::Status(status));
        }

        Ok(body)
    }
}

impl ChartSource for LastFmClient {
    fn top_tracks(&self, region: &str) -> Result<Vec<ChartEntry>, FetchError> {
        let body = self.call(TOP_TRACKS_METHOD, &[("country", region)])?;
        let entries = parse::parse_top_tracks(&body)?;
        tracing::info!(region, count = entries.len(), "Top tracks fetched");
        Ok(entries)
    }

    fn artist_info(&self, artist: &str) -> Result<ArtistInfo, FetchError> {
        let body = self.call(ARTIST_INFO_METHOD, &[("artist", artist)])?;
        let info = parse::parse_artist_info(&body)?;
        tracing::info!(artist = %info.name, "Artist info fetched");
        Ok(info)
    }
}
