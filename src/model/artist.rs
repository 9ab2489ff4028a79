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

//! Artist details shown on the artist view.

use std::sync::LazyLock;

use regex::Regex;

static LINK_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?s)<a\s+[^>]*href="([^"]*)"[^>]*>(.*?)</a>"#).expect("valid link regex")
});

static TAG_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)<[^>]*>").expect("valid tag regex"));

#[derive(Debug, Clone)]
pub(crate) struct ArtistInfo {
    pub(crate) name: String,
    pub(crate) image: String,
    pub(crate) listeners: u64,
    pub(crate) play_count: u64,
    pub(crate) tags: Vec<String>,
    pub(crate) similar: Vec<SimilarArtist>,
    pub(crate) bio: BioSummary,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct SimilarArtist {
    pub(crate) name: String,
    pub(crate) image: String,
}

/// Plain-text biography plus its "read more" link.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub(crate) struct BioSummary {
    pub(crate) text: String,
    pub(crate) link: Option<String>,
    pub(crate) link_text: Option<String>,
}

impl BioSummary {
    /// Splits an HTML biography summary into its text and the first link.
    ///
    /// The link element is removed from the text, any other markup is
    /// stripped and surrounding whitespace trimmed.
    pub(crate) fn parse(summary: &str) -> Self {
        let (text, link, link_text) = match LINK_RE.captures(summary) {
            Some(caps) => {
                let whole = caps.get(0).map(|m| m.range()).unwrap_or(0..0);
                let mut text = String::with_capacity(summary.len());
                text.push_str(&summary[..whole.start]);
                text.push_str(&summary[whole.end..]);

                let link = caps.get(1).map(|m| m.as_str().to_string());
                let link_text = caps
                    .get(2)
                    .map(|m| TAG_RE.replace_all(m.as_str(), "").trim().to_string());
                (text, link, link_text)
            }
            None => (summary.to_string(), None, None),
        };

        Self {
            text: TAG_RE.replace_all(&text, "").trim().to_string(),
            link: link.filter(|l| !l.is_empty()),
            link_text: link_text.filter(|l| !l.is_empty()),
        }
    }
}
