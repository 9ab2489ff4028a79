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

//! Boundary parsing of chart service payloads.
//!
//! Responses are loosely typed: numbers arrive as strings, optional blocks
//! go missing and single-element lists sometimes collapse into objects.
//! The raw shapes below absorb that looseness; the public functions turn
//! them into strict [`ChartEntry`] and [`ArtistInfo`] values or fail with a
//! [`ParseError`].

use serde::Deserialize;
use thiserror::Error;

use crate::model::{ArtistInfo, BioSummary, ChartEntry, SimilarArtist, Track};

/// Image used when the service has no artwork for a track.
pub(crate) const PLACEHOLDER_IMAGE: &str = "https://via.placeholder.com/64";

const TRACK_IMAGE_SIZE: &str = "medium";

#[derive(Debug, Error)]
pub(crate) enum ParseError {
    #[error("malformed JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("missing field '{0}'")]
    MissingField(&'static str),

    #[error("invalid number '{value}' in field '{field}'")]
    InvalidNumber { field: &'static str, value: String },
}

/// An error object reported by the service itself.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub(crate) struct ApiError {
    #[serde(rename = "error")]
    pub(crate) code: i64,
    #[serde(default)]
    pub(crate) message: String,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum Scalar {
    Text(String),
    Number(i64),
}

impl Scalar {
    fn to_text(&self) -> String {
        match self {
            Scalar::Text(text) => text.clone(),
            Scalar::Number(n) => n.to_string(),
        }
    }

    fn to_u64(&self, field: &'static str) -> Result<u64, ParseError> {
        let invalid = || ParseError::InvalidNumber {
            field,
            value: self.to_text(),
        };
        match self {
            Scalar::Text(text) => text.trim().parse().map_err(|_| invalid()),
            Scalar::Number(n) => u64::try_from(*n).map_err(|_| invalid()),
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum OneOrMany<T> {
    Many(Vec<T>),
    One(T),
}

impl<T> Default for OneOrMany<T> {
    fn default() -> Self {
        OneOrMany::Many(Vec::new())
    }
}

impl<T> OneOrMany<T> {
    fn into_vec(self) -> Vec<T> {
        match self {
            OneOrMany::Many(items) => items,
            OneOrMany::One(item) => vec![item],
        }
    }
}

#[derive(Debug, Default, Deserialize)]
struct RawImage {
    #[serde(rename = "#text", default)]
    url: String,
    #[serde(default)]
    size: String,
}

#[derive(Debug, Deserialize)]
struct TopTracksResponse {
    tracks: Option<RawTrackList>,
}

#[derive(Debug, Deserialize)]
struct RawTrackList {
    #[serde(default)]
    track: OneOrMany<RawTrack>,
}

#[derive(Debug, Deserialize)]
struct RawTrack {
    #[serde(default)]
    name: String,
    duration: Option<Scalar>,
    #[serde(default)]
    mbid: Option<String>,
    artist: Option<RawArtistRef>,
    #[serde(default)]
    image: Vec<RawImage>,
    #[serde(rename = "@attr")]
    attr: Option<RawRankAttr>,
}

#[derive(Debug, Deserialize)]
struct RawArtistRef {
    #[serde(default)]
    name: String,
}

#[derive(Debug, Deserialize)]
struct RawRankAttr {
    rank: Option<Scalar>,
}

#[derive(Debug, Deserialize)]
struct ArtistInfoResponse {
    artist: Option<RawArtist>,
}

#[derive(Debug, Deserialize)]
struct RawArtist {
    #[serde(default)]
    name: String,
    #[serde(default)]
    image: Vec<RawImage>,
    stats: Option<RawStats>,
    #[serde(default)]
    tags: Option<RawTags>,
    #[serde(default)]
    similar: Option<RawSimilar>,
    bio: Option<RawBio>,
}

#[derive(Debug, Deserialize)]
struct RawStats {
    listeners: Option<Scalar>,
    playcount: Option<Scalar>,
}

#[derive(Debug, Deserialize)]
struct RawTags {
    #[serde(default)]
    tag: OneOrMany<RawTag>,
}

#[derive(Debug, Deserialize)]
struct RawTag {
    #[serde(default)]
    name: String,
}

#[derive(Debug, Deserialize)]
struct RawSimilar {
    #[serde(default)]
    artist: OneOrMany<RawSimilarArtist>,
}

#[derive(Debug, Deserialize)]
struct RawSimilarArtist {
    #[serde(default)]
    name: String,
    #[serde(default)]
    image: Vec<RawImage>,
}

#[derive(Debug, Deserialize)]
struct RawBio {
    #[serde(default)]
    summary: String,
}

/// Returns the service error carried by a response body, if it is one.
pub(crate) fn api_error(body: &str) -> Option<ApiError> {
    serde_json::from_str::<ApiError>(body).ok()
}

/// Parses a top tracks response into ranked chart entries.
pub(crate) fn parse_top_tracks(body: &str) -> Result<Vec<ChartEntry>, ParseError> {
    let response: TopTracksResponse = serde_json::from_str(body)?;
    let list = response.tracks.ok_or(ParseError::MissingField("tracks"))?;

    list.track
        .into_vec()
        .into_iter()
        .enumerate()
        .map(|(position, raw)| chart_entry(position, raw))
        .collect()
}

fn chart_entry(position: usize, raw: RawTrack) -> Result<ChartEntry, ParseError> {
    if raw.name.trim().is_empty() {
        return Err(ParseError::MissingField("track.name"));
    }

    let artist = raw
        .artist
        .map(|a| a.name)
        .filter(|name| !name.trim().is_empty())
        .ok_or(ParseError::MissingField("track.artist.name"))?;

    let rank = match raw.attr.and_then(|attr| attr.rank) {
        Some(rank) => rank.to_u64("track.@attr.rank")? as u32,
        None => position as u32,
    };

    let id = raw
        .mbid
        .filter(|mbid| !mbid.trim().is_empty())
        .unwrap_or_else(|| raw.name.clone());

    let image = raw
        .image
        .iter()
        .find(|img| img.size == TRACK_IMAGE_SIZE && !img.url.is_empty())
        .map(|img| img.url.clone())
        .unwrap_or_else(|| PLACEHOLDER_IMAGE.to_string());

    let duration = raw.duration.map(|d| d.to_text()).unwrap_or_default();

    Ok(ChartEntry {
        rank,
        track: Track {
            id,
            name: raw.name,
            artist,
            image,
            duration,
        },
    })
}

/// Parses an artist info response.
pub(crate) fn parse_artist_info(body: &str) -> Result<ArtistInfo, ParseError> {
    let response: ArtistInfoResponse = serde_json::from_str(body)?;
    let raw = response.artist.ok_or(ParseError::MissingField("artist"))?;

    if raw.name.trim().is_empty() {
        return Err(ParseError::MissingField("artist.name"));
    }

    let (listeners, play_count) = match &raw.stats {
        Some(stats) => (
            stats
                .listeners
                .as_ref()
                .map(|v| v.to_u64("artist.stats.listeners"))
                .transpose()?
                .unwrap_or(0),
            stats
                .playcount
                .as_ref()
                .map(|v| v.to_u64("artist.stats.playcount"))
                .transpose()?
                .unwrap_or(0),
        ),
        None => (0, 0),
    };

    let tags = raw
        .tags
        .map(|t| t.tag.into_vec())
        .unwrap_or_default()
        .into_iter()
        .map(|tag| tag.name)
        .filter(|name| !name.is_empty())
        .collect();

    let similar = raw
        .similar
        .map(|s| s.artist.into_vec())
        .unwrap_or_default()
        .into_iter()
        .filter(|a| !a.name.is_empty())
        .map(|a| SimilarArtist {
            image: largest_image(&a.image),
            name: a.name,
        })
        .collect();

    let bio = raw
        .bio
        .map(|b| BioSummary::parse(&b.summary))
        .unwrap_or_default();

    Ok(ArtistInfo {
        image: largest_image(&raw.image),
        name: raw.name,
        listeners,
        play_count,
        tags,
        similar,
        bio,
    })
}

// Images are listed smallest first.
fn largest_image(images: &[RawImage]) -> String {
    images
        .iter()
        .rev()
        .find(|img| !img.url.is_empty())
        .map(|img| img.url.clone())
        .unwrap_or_else(|| PLACEHOLDER_IMAGE.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    const TOP_TRACKS: &str = r##"{
        "tracks": {
            "track": [
                {
                    "name": "Hips Don't Lie",
                    "duration": "218",
                    "listeners": "1000",
                    "mbid": "f2f2d3c1-1111-2222-3333-444455556666",
                    "url": "https://www.last.fm/music/Shakira/_/Hips+Don%27t+Lie",
                    "artist": { "name": "Shakira", "mbid": "", "url": "https://www.last.fm/music/Shakira" },
                    "image": [
                        { "#text": "https://img/small.png", "size": "small" },
                        { "#text": "https://img/medium.png", "size": "medium" }
                    ],
                    "@attr": { "rank": "0" }
                },
                {
                    "name": "Tusa",
                    "duration": "0",
                    "mbid": "",
                    "artist": { "name": "KAROL G" },
                    "image": [
                        { "#text": "", "size": "small" },
                        { "#text": "", "size": "medium" }
                    ],
                    "@attr": { "rank": "1" }
                }
            ],
            "@attr": { "country": "Colombia", "page": "1" }
        }
    }"##;

    const ARTIST_INFO: &str = r##"{
        "artist": {
            "name": "Shakira",
            "image": [
                { "#text": "https://img/s.png", "size": "small" },
                { "#text": "https://img/xl.png", "size": "extralarge" },
                { "#text": "", "size": "mega" }
            ],
            "stats": { "listeners": "4561234", "playcount": "198765432" },
            "similar": { "artist": [
                { "name": "Thalía", "image": [ { "#text": "https://img/t.png", "size": "small" } ] },
                { "name": "Paulina Rubio", "image": [] }
            ] },
            "tags": { "tag": [ { "name": "latin" }, { "name": "pop" } ] },
            "bio": { "summary": "Colombian singer. <a href=\"https://www.last.fm/music/Shakira\">Read more on Last.fm</a>", "content": "..." }
        }
    }"##;

    #[test]
    fn top_tracks_become_ranked_entries() {
        let entries = parse_top_tracks(TOP_TRACKS).unwrap();
        assert_eq!(entries.len(), 2);

        let first = &entries[0];
        assert_eq!(first.rank, 0);
        assert_eq!(first.track.id, "f2f2d3c1-1111-2222-3333-444455556666");
        assert_eq!(first.track.name, "Hips Don't Lie");
        assert_eq!(first.track.artist, "Shakira");
        assert_eq!(first.track.image, "https://img/medium.png");
        assert_eq!(first.track.duration, "218");
    }

    #[test]
    fn missing_mbid_and_image_fall_back() {
        let entries = parse_top_tracks(TOP_TRACKS).unwrap();
        let second = &entries[1].track;
        assert_eq!(second.id, "Tusa");
        assert_eq!(second.image, PLACEHOLDER_IMAGE);
        // Left for the player to validate.
        assert_eq!(second.duration, "0");
    }

    #[test]
    fn single_track_object_and_missing_rank() {
        let body = r#"{"tracks":{"track":{"name":"Solo","duration":90,"artist":{"name":"One"}}}}"#;
        let entries = parse_top_tracks(body).unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].rank, 0);
        assert_eq!(entries[0].track.duration, "90");
        assert_eq!(entries[0].track.id, "Solo");
    }

    #[test]
    fn empty_chart_is_fine() {
        let entries = parse_top_tracks(r#"{"tracks":{"track":[]}}"#).unwrap();
        assert!(entries.is_empty());
    }

    #[test]
    fn malformed_top_tracks_are_rejected() {
        assert!(matches!(parse_top_tracks("not json"), Err(ParseError::Json(_))));
        assert!(matches!(
            parse_top_tracks(r#"{"toptracks":{}}"#),
            Err(ParseError::MissingField("tracks"))
        ));
        assert!(matches!(
            parse_top_tracks(r#"{"tracks":{"track":[{"name":"","artist":{"name":"x"}}]}}"#),
            Err(ParseError::MissingField("track.name"))
        ));
        assert!(matches!(
            parse_top_tracks(r#"{"tracks":{"track":[{"name":"x"}]}}"#),
            Err(ParseError::MissingField("track.artist.name"))
        ));
        assert!(matches!(
            parse_top_tracks(
                r#"{"tracks":{"track":[{"name":"x","artist":{"name":"y"},"@attr":{"rank":"first"}}]}}"#
            ),
            Err(ParseError::InvalidNumber { field: "track.@attr.rank", .. })
        ));
    }

    #[test]
    fn artist_info_is_parsed() {
        let info = parse_artist_info(ARTIST_INFO).unwrap();

        assert_eq!(info.name, "Shakira");
        assert_eq!(info.image, "https://img/xl.png");
        assert_eq!(info.listeners, 4_561_234);
        assert_eq!(info.play_count, 198_765_432);
        assert_eq!(info.tags, vec!["latin", "pop"]);
        assert_eq!(info.similar.len(), 2);
        assert_eq!(info.similar[0].name, "Thalía");
        assert_eq!(info.similar[1].image, PLACEHOLDER_IMAGE);
        assert_eq!(info.bio.text, "Colombian singer.");
        assert_eq!(info.bio.link.as_deref(), Some("https://www.last.fm/music/Shakira"));
    }

    #[test]
    fn sparse_artist_info_uses_defaults() {
        let info = parse_artist_info(r#"{"artist":{"name":"Nobody","tags":{"tag":{"name":"solo"}}}}"#).unwrap();
        assert_eq!(info.listeners, 0);
        assert_eq!(info.play_count, 0);
        assert_eq!(info.tags, vec!["solo"]);
        assert!(info.similar.is_empty());
        assert_eq!(info.bio, BioSummary::default());
        assert_eq!(info.image, PLACEHOLDER_IMAGE);
    }

    #[test]
    fn artist_info_with_bad_counts_is_rejected() {
        let body = r#"{"artist":{"name":"X","stats":{"listeners":"lots","playcount":"1"}}}"#;
        match parse_artist_info(body) {
            Err(ParseError::InvalidNumber { field, value }) => {
                assert_eq!(field, "artist.stats.listeners");
                assert_eq!(value, "lots");
            }
            other => panic!("unexpected result {:?}", other),
        }

        assert!(matches!(
            parse_artist_info(r#"{"error":6}"#),
            Err(ParseError::MissingField("artist"))
        ));
    }

    #[test]
    fn api_errors_are_recognised() {
        let error = api_error(r#"{"error":6,"message":"The artist you supplied could not be found"}"#);
        assert_eq!(
            error,
            Some(ApiError {
                code: 6,
                message: "The artist you supplied could not be found".to_string()
            })
        );

        assert_eq!(api_error(TOP_TRACKS), None);
        assert_eq!(api_error("<html>"), None);
    }
}
