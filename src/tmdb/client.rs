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


//! HTTP client for the TMDB API

use std::time::Duration;

use serde::de::DeserializeOwned;
use tracing::debug;

use crate::config::TmdbConfig;
use crate::error::{PlaygateError, Result};
use crate::tmdb::models::{MovieDetails, TvDetails};

/// Default request timeout
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// TMDB API client.
///
/// Details requests always append the `images` and `credits` sub-resources;
/// the record mapping needs both.
#[derive(Debug, Clone)]
pub struct TmdbClient {
    client: reqwest::Client,
    config: TmdbConfig,
}

impl TmdbClient {
    pub fn new(config: TmdbConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()?;
        Ok(Self { client, config })
    }

    pub fn base_url(&self) -> &str {
        &self.config.base_url
    }

    /// Fetch movie details by id.
    pub async fn movie_details(&self, id: u64) -> Result<MovieDetails> {
        self.get_details("movie", id).await
    }

    /// Fetch TV series details by id.
    pub async fn tv_details(&self, id: u64) -> Result<TvDetails> {
        self.get_details("tv", id).await
    }

    async fn get_details<T: DeserializeOwned>(&self, kind: &str, id: u64) -> Result<T> {
        let endpoint = format!("/{}/{}", kind, id);
        let url = format!("{}{}", self.config.base_url, endpoint);
        debug!(%endpoint, "fetching details");

        let response = self
            .client
            .get(&url)
            .query(&[
                ("api_key", self.config.api_key.as_str()),
                ("append_to_response", "images,credits"),
            ])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(PlaygateError::api_failed(
                format!("HTTP {}: {}", status.as_u16(), body),
                Some(status.as_u16()),
                Some(endpoint),
            ));
        }

        let body = response.text().await?;
        serde_json::from_str(&body).map_err(|err| PlaygateError::InvalidApiResponse {
            message: format!("parse error at {}: {}", endpoint, err),
            response_body: Some(body.chars().take(200).collect()),
        })
    }
}
