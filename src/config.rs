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


//! Static per-deployment configuration
//!
//! Two independent configuration surfaces live here:
//! - [`LockerConfig`]: the offer-network account identifiers and unlock
//!   parameters for a content-locker session. Immutable after construction.
//! - [`TmdbConfig`]: credentials for the metadata importer, read from the
//!   environment at process start (a `.env` file is honored via dotenvy
//!   in the binaries).

use std::env;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{PlaygateError, Result};

/// Fixed upper bound for a single offer-feed request.
pub const FEED_TIMEOUT: Duration = Duration::from_secs(10);

mod defaults {
    pub(super) fn offer_feed_url() -> String {
        String::from("https://d1y3y09sav47f5.cloudfront.net/public/offers/feed.php")
    }
    pub(super) fn check_leads_url() -> String {
        String::from("https://d1y3y09sav47f5.cloudfront.net/public/external/check2.php")
    }
    pub(super) const fn num_offers() -> usize {
        3
    }
    pub(super) const fn required_offers() -> usize {
        1
    }
    pub(super) const fn check_interval_ms() -> u64 {
        15_000
    }
}

/// Offer-network account identifiers and unlock parameters.
///
/// Owned by a [`crate::locker::LockerSession`]; one instance per page view.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LockerConfig {
    /// Network account id
    #[serde(default)]
    pub user_id: String,

    /// Network API key
    #[serde(default)]
    pub api_key: String,

    /// Offer feed endpoint
    #[serde(default = "defaults::offer_feed_url")]
    pub offer_feed_url: String,

    /// Completed-lead check endpoint
    #[serde(default = "defaults::check_leads_url")]
    pub check_leads_url: String,

    /// Maximum number of offers to display
    #[serde(default = "defaults::num_offers")]
    pub num_offers: usize,

    /// Distinct completed offers required to unlock
    #[serde(default = "defaults::required_offers")]
    pub required_offers: usize,

    /// Lead-check poll interval in milliseconds
    #[serde(default = "defaults::check_interval_ms")]
    pub check_interval_ms: u64,

    /// Ask the network for simulated leads instead of real ones
    #[serde(default)]
    pub testing: bool,
}

impl Default for LockerConfig {
    fn default() -> Self {
        Self {
            user_id: String::new(),
            api_key: String::new(),
            offer_feed_url: defaults::offer_feed_url(),
            check_leads_url: defaults::check_leads_url(),
            num_offers: defaults::num_offers(),
            required_offers: defaults::required_offers(),
            check_interval_ms: defaults::check_interval_ms(),
            testing: false,
        }
    }
}

impl LockerConfig {
    /// Validate that account credentials are present.
    ///
    /// Missing credentials are a fatal startup error for the locker
    /// feature; the caller logs it and leaves the content ungated.
    pub fn validate(&self) -> Result<()> {
        if self.user_id.is_empty() {
            return Err(PlaygateError::MissingRequiredField("user_id".to_string()));
        }
        if self.api_key.is_empty() {
            return Err(PlaygateError::MissingRequiredField("api_key".to_string()));
        }
        Ok(())
    }

    /// Poll interval as a [`Duration`].
    pub fn check_interval(&self) -> Duration {
        Duration::from_millis(self.check_interval_ms)
    }
}

/// Default public API base of the metadata service.
pub const TMDB_DEFAULT_BASE_URL: &str = "https://api.themoviedb.org/3";

/// Credentials for the metadata importer, read from the environment.
#[derive(Debug, Clone)]
pub struct TmdbConfig {
    pub api_key: String,
    pub base_url: String,
}

impl TmdbConfig {
    /// Read `TMDB_API_KEY` and optional `TMDB_BASE_URL` from the environment.
    ///
    /// Absence of the key is a fatal startup error.
    pub fn from_env() -> Result<Self> {
        let api_key = env::var("TMDB_API_KEY").map_err(|_| {
            PlaygateError::config(
                "TMDB_API_KEY not found in environment. \
                 Create a .env file with TMDB_API_KEY=your_api_key_here",
            )
        })?;
        if api_key.is_empty() {
            return Err(PlaygateError::config("TMDB_API_KEY is empty"));
        }

        let base_url = env::var("TMDB_BASE_URL")
            .ok()
            .filter(|url| !url.is_empty())
            .unwrap_or_else(|| TMDB_DEFAULT_BASE_URL.to_string());

        Ok(Self { api_key, base_url })
    }

    pub fn new<K: Into<String>, U: Into<String>>(api_key: K, base_url: U) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: base_url.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_matches_deployment_defaults() {
        let config = LockerConfig::default();
        assert_eq!(config.num_offers, 3);
        assert_eq!(config.required_offers, 1);
        assert_eq!(config.check_interval(), Duration::from_secs(15));
        assert!(!config.testing);
    }

    #[test]
    fn validate_rejects_missing_credentials() {
        let config = LockerConfig::default();
        assert!(matches!(
            config.validate(),
            Err(PlaygateError::MissingRequiredField(field)) if field == "user_id"
        ));

        let config = LockerConfig {
            user_id: "321842".to_string(),
            ..LockerConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(PlaygateError::MissingRequiredField(field)) if field == "api_key"
        ));
    }

    #[test]
    fn validate_accepts_full_credentials() {
        let config = LockerConfig {
            user_id: "321842".to_string(),
            api_key: "cfe031daa224cb470f9d4c9a7a531982".to_string(),
            ..LockerConfig::default()
        };
        assert!(config.validate().is_ok());
    }

    #[test]
    fn partial_json_fills_defaults() {
        let config: LockerConfig =
            serde_json::from_str(r#"{"user_id":"1","api_key":"k","required_offers":2}"#).unwrap();
        assert_eq!(config.required_offers, 2);
        assert_eq!(config.num_offers, 3);
        assert!(config.offer_feed_url.contains("feed.php"));
    }
}
