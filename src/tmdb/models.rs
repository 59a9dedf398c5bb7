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


//! TMDB response models and record mapping
//!
//! Every field the API might omit is optional here; the mapping into
//! [`ContentRecord`] supplies the literal fallbacks (`"N/A"`, placeholder
//! playback links) the catalog format uses. Backdrops render from the
//! full-size image base, posters from the `w342` base.

use serde::Deserialize;

use crate::catalog::records::ContentRecord;

/// Full-size image base, used for backdrops.
pub const IMAGE_BASE_ORIGINAL: &str = "https://image.tmdb.org/t/p/original";

/// Card-size image base, used for posters.
pub const IMAGE_BASE_W342: &str = "https://image.tmdb.org/t/p/w342";

/// Placeholder playback link stamped on new movie records.
pub const DEFAULT_MOVIE_VID_LINK: &str = "vids/Universal.mp4";

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ImageRef {
    #[serde(default)]
    pub file_path: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ImageCollections {
    #[serde(default)]
    pub backdrops: Vec<ImageRef>,
    #[serde(default)]
    pub posters: Vec<ImageRef>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct CastMember {
    #[serde(default)]
    pub name: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct CrewMember {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub job: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Credits {
    #[serde(default)]
    pub cast: Vec<CastMember>,
    #[serde(default)]
    pub crew: Vec<CrewMember>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Genre {
    #[serde(default)]
    pub name: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProductionCompany {
    #[serde(default)]
    pub name: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Creator {
    #[serde(default)]
    pub name: Option<String>,
}

/// `GET /movie/{id}?append_to_response=images,credits`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct MovieDetails {
    pub id: u64,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub overview: Option<String>,
    #[serde(default)]
    pub backdrop_path: Option<String>,
    #[serde(default)]
    pub poster_path: Option<String>,
    #[serde(default)]
    pub runtime: Option<u32>,
    #[serde(default)]
    pub vote_average: Option<f64>,
    #[serde(default)]
    pub release_date: Option<String>,
    #[serde(default)]
    pub genres: Vec<Genre>,
    #[serde(default)]
    pub production_companies: Vec<ProductionCompany>,
    #[serde(default)]
    pub images: Option<ImageCollections>,
    #[serde(default)]
    pub credits: Option<Credits>,
}

/// `GET /tv/{id}?append_to_response=images,credits`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TvDetails {
    pub id: u64,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub overview: Option<String>,
    #[serde(default)]
    pub backdrop_path: Option<String>,
    #[serde(default)]
    pub poster_path: Option<String>,
    #[serde(default)]
    pub vote_average: Option<f64>,
    #[serde(default)]
    pub first_air_date: Option<String>,
    #[serde(default)]
    pub genres: Vec<Genre>,
    #[serde(default)]
    pub production_companies: Vec<ProductionCompany>,
    #[serde(default)]
    pub created_by: Vec<Creator>,
    #[serde(default)]
    pub images: Option<ImageCollections>,
    #[serde(default)]
    pub credits: Option<Credits>,
}

const NOT_AVAILABLE: &str = "N/A";

fn image_url(base: &str, direct: Option<String>, fallback: Option<&[ImageRef]>) -> String {
    let path = direct.or_else(|| {
        fallback
            .and_then(|images| images.first())
            .and_then(|image| image.file_path.clone())
    });
    match path {
        Some(path) => format!("{}{}", base, path),
        None => String::new(),
    }
}

fn rating_text(vote_average: Option<f64>) -> String {
    match vote_average {
        Some(avg) if avg > 0.0 => format!("{:.1}", avg),
        _ => NOT_AVAILABLE.to_string(),
    }
}

fn genre_text(genres: &[Genre]) -> String {
    let joined = genres
        .iter()
        .filter_map(|genre| genre.name.as_deref())
        .collect::<Vec<_>>()
        .join(", ");
    if joined.is_empty() {
        NOT_AVAILABLE.to_string()
    } else {
        joined
    }
}

fn release_year(date: Option<&str>) -> String {
    match date {
        Some(date) if date.len() >= 4 => date[..4].to_string(),
        _ => NOT_AVAILABLE.to_string(),
    }
}

/// First six cast members, comma-joined.
fn main_cast(credits: Option<&Credits>) -> String {
    let joined = credits
        .map(|credits| {
            credits
                .cast
                .iter()
                .take(6)
                .filter_map(|member| member.name.as_deref())
                .collect::<Vec<_>>()
                .join(", ")
        })
        .unwrap_or_default();
    if joined.is_empty() {
        NOT_AVAILABLE.to_string()
    } else {
        joined
    }
}

fn crew_with_job(credits: Option<&Credits>, job: &str) -> Option<String> {
    credits?
        .crew
        .iter()
        .find(|member| member.job.as_deref() == Some(job))
        .and_then(|member| member.name.clone())
}

fn production_text(companies: &[ProductionCompany]) -> String {
    companies
        .first()
        .and_then(|company| company.name.clone())
        .unwrap_or_else(|| NOT_AVAILABLE.to_string())
}

impl MovieDetails {
    /// Map into the persisted movie record shape.
    pub fn into_record(self) -> ContentRecord {
        let duration = match self.runtime {
            Some(runtime) if runtime > 0 => format!("{}h {}m", runtime / 60, runtime % 60),
            _ => NOT_AVAILABLE.to_string(),
        };

        let images = self.images.as_ref();
        ContentRecord {
            id: self.id,
            title: self.title.unwrap_or_default(),
            description: self.overview.unwrap_or_default(),
            thumbnail: image_url(
                IMAGE_BASE_ORIGINAL,
                self.backdrop_path,
                images.map(|i| i.backdrops.as_slice()),
            ),
            poster: image_url(
                IMAGE_BASE_W342,
                self.poster_path,
                images.map(|i| i.posters.as_slice()),
            ),
            quality: "4K".to_string(),
            duration,
            rating: rating_text(self.vote_average),
            genre: genre_text(&self.genres),
            release_date: release_year(self.release_date.as_deref()),
            director: crew_with_job(self.credits.as_ref(), "Director")
                .unwrap_or_else(|| NOT_AVAILABLE.to_string()),
            cast: main_cast(self.credits.as_ref()),
            production: production_text(&self.production_companies),
            vid_link: Some(DEFAULT_MOVIE_VID_LINK.to_string()),
            season: None,
            season_episodes_vids: None,
        }
    }
}

impl TvDetails {
    /// Map into the persisted series record shape.
    ///
    /// Series carry a creator in the director slot, a fixed `"HD"` quality
    /// tag, and season/episode placeholders instead of a playback link.
    pub fn into_record(self) -> ContentRecord {
        let creator = self
            .created_by
            .first()
            .and_then(|creator| creator.name.clone())
            .or_else(|| crew_with_job(self.credits.as_ref(), "Creator"))
            .unwrap_or_else(|| NOT_AVAILABLE.to_string());

        let images = self.images.as_ref();
        ContentRecord {
            id: self.id,
            title: self.name.unwrap_or_default(),
            description: self.overview.unwrap_or_default(),
            thumbnail: image_url(
                IMAGE_BASE_ORIGINAL,
                self.backdrop_path,
                images.map(|i| i.backdrops.as_slice()),
            ),
            poster: image_url(
                IMAGE_BASE_W342,
                self.poster_path,
                images.map(|i| i.posters.as_slice()),
            ),
            quality: "HD".to_string(),
            duration: NOT_AVAILABLE.to_string(),
            rating: rating_text(self.vote_average),
            genre: genre_text(&self.genres),
            release_date: release_year(self.first_air_date.as_deref()),
            director: creator,
            cast: main_cast(self.credits.as_ref()),
            production: production_text(&self.production_companies),
            vid_link: None,
            season: Some("season 1".to_string()),
            season_episodes_vids: Some(vec!["vidLink".to_string()]),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn movie_json() -> serde_json::Value {
        serde_json::json!({
            "id": 575265,
            "title": "Mission: Impossible - The Final Reckoning",
            "overview": "The team races against time.",
            "backdrop_path": "/back.jpg",
            "poster_path": "/poster.jpg",
            "runtime": 169,
            "vote_average": 7.31,
            "release_date": "2025-05-21",
            "genres": [{"name": "Action"}, {"name": "Thriller"}],
            "production_companies": [{"name": "Paramount Pictures"}],
            "credits": {
                "cast": [
                    {"name": "A"}, {"name": "B"}, {"name": "C"}, {"name": "D"},
                    {"name": "E"}, {"name": "F"}, {"name": "G"}
                ],
                "crew": [
                    {"name": "Someone Else", "job": "Producer"},
                    {"name": "Christopher McQuarrie", "job": "Director"}
                ]
            }
        })
    }

    #[test]
    fn movie_maps_all_primary_fields() {
        let details: MovieDetails = serde_json::from_value(movie_json()).unwrap();
        let record = details.into_record();

        assert_eq!(record.id, 575265);
        assert_eq!(
            record.thumbnail,
            "https://image.tmdb.org/t/p/original/back.jpg"
        );
        assert_eq!(record.poster, "https://image.tmdb.org/t/p/w342/poster.jpg");
        assert_eq!(record.quality, "4K");
        assert_eq!(record.duration, "2h 49m");
        assert_eq!(record.rating, "7.3");
        assert_eq!(record.genre, "Action, Thriller");
        assert_eq!(record.release_date, "2025");
        assert_eq!(record.director, "Christopher McQuarrie");
        assert_eq!(record.cast, "A, B, C, D, E, F");
        assert_eq!(record.production, "Paramount Pictures");
        assert_eq!(record.vid_link.as_deref(), Some("vids/Universal.mp4"));
        assert!(record.season.is_none());
    }

    #[test]
    fn movie_falls_back_to_image_collections() {
        let details: MovieDetails = serde_json::from_value(serde_json::json!({
            "id": 1,
            "title": "Sparse",
            "images": {
                "backdrops": [{"file_path": "/b0.jpg"}],
                "posters": [{"file_path": "/p0.jpg"}]
            }
        }))
        .unwrap();
        let record = details.into_record();
        assert_eq!(record.thumbnail, "https://image.tmdb.org/t/p/original/b0.jpg");
        assert_eq!(record.poster, "https://image.tmdb.org/t/p/w342/p0.jpg");
    }

    #[test]
    fn movie_literal_fallbacks_for_missing_fields() {
        let details: MovieDetails =
            serde_json::from_value(serde_json::json!({"id": 2})).unwrap();
        let record = details.into_record();

        assert_eq!(record.thumbnail, "");
        assert_eq!(record.poster, "");
        assert_eq!(record.duration, "N/A");
        assert_eq!(record.rating, "N/A");
        assert_eq!(record.genre, "N/A");
        assert_eq!(record.release_date, "N/A");
        assert_eq!(record.director, "N/A");
        assert_eq!(record.cast, "N/A");
        assert_eq!(record.production, "N/A");
    }

    #[test]
    fn zero_vote_average_is_not_a_rating() {
        let details: MovieDetails =
            serde_json::from_value(serde_json::json!({"id": 3, "vote_average": 0.0})).unwrap();
        assert_eq!(details.into_record().rating, "N/A");
    }

    #[test]
    fn series_uses_creator_and_placeholders() {
        let details: TvDetails = serde_json::from_value(serde_json::json!({
            "id": 248852,
            "name": "Some Series",
            "first_air_date": "2024-09-01",
            "created_by": [{"name": "Show Creator"}],
            "credits": {"cast": [{"name": "Lead"}], "crew": []}
        }))
        .unwrap();
        let record = details.into_record();

        assert_eq!(record.quality, "HD");
        assert_eq!(record.duration, "N/A");
        assert_eq!(record.director, "Show Creator");
        assert_eq!(record.release_date, "2024");
        assert!(record.vid_link.is_none());
        assert_eq!(record.season.as_deref(), Some("season 1"));
        assert_eq!(
            record.season_episodes_vids.as_deref(),
            Some(["vidLink".to_string()].as_slice())
        );
    }

    #[test]
    fn series_creator_falls_back_to_crew_job() {
        let details: TvDetails = serde_json::from_value(serde_json::json!({
            "id": 4,
            "name": "Crew Credit",
            "credits": {
                "cast": [],
                "crew": [{"name": "From Crew", "job": "Creator"}]
            }
        }))
        .unwrap();
        assert_eq!(details.into_record().director, "From Crew");
    }
}
