// Playgate - Offer-gated streaming content toolkit
// Copyright (C) 2025 Playgate contributors
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE. See the
// GNU General Public License for more details.
//
// You should have received a copy of the GNU General Public License
// along with this program. If not, see <https://www.gnu.org/licenses/>.


//! Catalog record shapes
//!
//! [`ContentRecord`] mirrors the persisted JSON exactly, camelCase keys
//! included. Movies carry `vidLink`; series carry the `season` and
//! `seasonEpisodesVids` placeholders instead. Uniqueness is by id within
//! each kind.

use serde::{Deserialize, Serialize};

/// One playable title as persisted in the site config.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContentRecord {
    /// External metadata-service id; the uniqueness key.
    pub id: u64,

    #[serde(default)]
    pub title: String,

    #[serde(default)]
    pub description: String,

    /// Backdrop image URL (full size)
    #[serde(default)]
    pub thumbnail: String,

    /// Poster image URL (card size)
    #[serde(default)]
    pub poster: String,

    #[serde(default)]
    pub quality: String,

    #[serde(default)]
    pub duration: String,

    #[serde(default)]
    pub rating: String,

    #[serde(default)]
    pub genre: String,

    #[serde(rename = "releaseDate", default)]
    pub release_date: String,

    /// Director for movies, creator for series.
    #[serde(default)]
    pub director: String,

    #[serde(default)]
    pub cast: String,

    #[serde(default)]
    pub production: String,

    /// Movie playback link; absent on series records.
    #[serde(rename = "vidLink", default, skip_serializing_if = "Option::is_none")]
    pub vid_link: Option<String>,

    /// Series season label; absent on movie records.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub season: Option<String>,

    /// Series per-episode playback links; absent on movie records.
    #[serde(
        rename = "seasonEpisodesVids",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub season_episodes_vids: Option<Vec<String>>,
}

/// The whole persisted config document.
///
/// Only the two record arrays are interpreted; any other top-level keys the
/// deployment keeps in the same file pass through serialization untouched.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Catalog {
    #[serde(rename = "Movies", default)]
    pub movies: Vec<ContentRecord>,

    #[serde(rename = "Series", default)]
    pub series: Vec<ContentRecord>,

    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl Catalog {
    pub fn contains_movie(&self, id: u64) -> bool {
        self.movies.iter().any(|record| record.id == id)
    }

    pub fn contains_series(&self, id: u64) -> bool {
        self.series.iter().any(|record| record.id == id)
    }

    pub fn movie(&self, id: u64) -> Option<&ContentRecord> {
        self.movies.iter().find(|record| record.id == id)
    }

    pub fn series(&self, id: u64) -> Option<&ContentRecord> {
        self.series.iter().find(|record| record.id == id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn movie_records_serialize_without_series_fields() {
        let record = ContentRecord {
            id: 575265,
            title: "Example".to_string(),
            vid_link: Some("vids/Universal.mp4".to_string()),
            season: None,
            season_episodes_vids: None,
            description: String::new(),
            thumbnail: String::new(),
            poster: String::new(),
            quality: "4K".to_string(),
            duration: "2h 49m".to_string(),
            rating: "7.2".to_string(),
            genre: "Action".to_string(),
            release_date: "2025".to_string(),
            director: "N/A".to_string(),
            cast: "N/A".to_string(),
            production: "N/A".to_string(),
        };

        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["vidLink"], "vids/Universal.mp4");
        assert_eq!(json["releaseDate"], "2025");
        assert!(json.get("season").is_none());
        assert!(json.get("seasonEpisodesVids").is_none());
    }

    #[test]
    fn foreign_top_level_keys_round_trip() {
        let document = r#"{
            "siteName": "example",
            "Movies": [{"id": 1, "title": "A"}],
            "Series": [],
            "theme": {"dark": true}
        }"#;

        let catalog: Catalog = serde_json::from_str(document).unwrap();
        assert!(catalog.contains_movie(1));
        assert_eq!(catalog.extra["siteName"], "example");

        let back = serde_json::to_value(&catalog).unwrap();
        assert_eq!(back["siteName"], "example");
        assert_eq!(back["theme"]["dark"], true);
    }

    #[test]
    fn lookup_is_per_kind() {
        let catalog: Catalog = serde_json::from_str(
            r#"{"Movies": [{"id": 7}], "Series": [{"id": 9}]}"#,
        )
        .unwrap();
        assert!(catalog.contains_movie(7));
        assert!(!catalog.contains_series(7));
        assert!(catalog.contains_series(9));
        assert!(catalog.movie(9).is_none());
    }
}
