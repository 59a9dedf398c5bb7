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


//! HTTP client for the offer network
//!
//! Two calls, both GET, both JSONP-wrapped:
//! - the offer feed, with account credentials and two free-form tracking
//!   slots; bounded by the fixed 10-second feed timeout, and failing with
//!   the recoverable [`PlaygateError::FeedUnavailable`];
//! - the lead check, with the test-mode flag; failures here are the
//!   caller's problem to ignore (best-effort polling, no guaranteed
//!   delivery).
//!
//! A malformed or non-array body is "no data" (an empty list), never an
//! error; only transport-level failures are surfaced.

use async_trait::async_trait;
use tracing::debug;

use crate::config::{LockerConfig, FEED_TIMEOUT};
use crate::error::{PlaygateError, Result};
use crate::offers::jsonp;
use crate::offers::models::{LeadEvent, Offer};

const FEED_CALLBACK_PREFIX: &str = "playgate_offers";
const LEADS_CALLBACK_PREFIX: &str = "playgate_leads";

/// The two offer-network calls, behind a trait so sessions can be driven
/// by a stub in tests.
#[async_trait]
pub trait OfferNetwork: Send + Sync {
    /// Fetch the offer list. Transport failure or timeout is an error;
    /// an empty or malformed body is an empty list.
    async fn fetch_offers(&self) -> Result<Vec<Offer>>;

    /// Fetch completed-lead events accumulated since the visitor arrived.
    async fn check_leads(&self) -> Result<Vec<LeadEvent>>;
}

/// Offer-network client over plain HTTP.
#[derive(Debug)]
pub struct OfferClient {
    client: reqwest::Client,
    user_id: String,
    api_key: String,
    offer_feed_url: String,
    check_leads_url: String,
    testing: bool,
    /// Free-form tracking slots passed through to the feed, empty by default.
    tracking: (String, String),
}

impl OfferClient {
    pub fn new(config: &LockerConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(FEED_TIMEOUT)
            .build()?;

        Ok(Self {
            client,
            user_id: config.user_id.clone(),
            api_key: config.api_key.clone(),
            offer_feed_url: config.offer_feed_url.clone(),
            check_leads_url: config.check_leads_url.clone(),
            testing: config.testing,
            tracking: (String::new(), String::new()),
        })
    }

    /// Set the two free-form tracking slots sent with the feed request.
    pub fn with_tracking<S1: Into<String>, S2: Into<String>>(mut self, s1: S1, s2: S2) -> Self {
        self.tracking = (s1.into(), s2.into());
        self
    }

    async fn get_feed_body(&self, callback: &str) -> Result<String> {
        let response = self
            .client
            .get(&self.offer_feed_url)
            .query(&[
                ("user_id", self.user_id.as_str()),
                ("api_key", self.api_key.as_str()),
                ("s1", self.tracking.0.as_str()),
                ("s2", self.tracking.1.as_str()),
                ("callback", callback),
            ])
            .send()
            .await
            .map_err(feed_transport_error)?;

        if !response.status().is_success() {
            return Err(PlaygateError::feed_unavailable(
                format!("feed endpoint returned {}", response.status()),
                false,
            ));
        }

        response.text().await.map_err(feed_transport_error)
    }

    async fn get_leads_body(&self, callback: &str) -> Result<String> {
        let testing = if self.testing { "1" } else { "0" };
        let response = self
            .client
            .get(&self.check_leads_url)
            .query(&[("testing", testing), ("callback", callback)])
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(PlaygateError::api_failed(
                format!("lead check returned {}", response.status()),
                Some(response.status().as_u16()),
                Some(self.check_leads_url.clone()),
            ));
        }

        Ok(response.text().await?)
    }
}

#[async_trait]
impl OfferNetwork for OfferClient {
    async fn fetch_offers(&self) -> Result<Vec<Offer>> {
        let callback = jsonp::callback_name(FEED_CALLBACK_PREFIX);
        let body = self.get_feed_body(&callback).await?;
        let offers: Vec<Offer> = jsonp::parse_items(&body, &callback);
        debug!(count = offers.len(), "offer feed fetched");
        Ok(offers)
    }

    async fn check_leads(&self) -> Result<Vec<LeadEvent>> {
        let callback = jsonp::callback_name(LEADS_CALLBACK_PREFIX);
        let body = self.get_leads_body(&callback).await?;
        let leads: Vec<LeadEvent> = jsonp::parse_items(&body, &callback);
        debug!(count = leads.len(), "lead check completed");
        Ok(leads)
    }
}

fn feed_transport_error(err: reqwest::Error) -> PlaygateError {
    let timed_out = err.is_timeout();
    PlaygateError::feed_unavailable(err.to_string(), timed_out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn client_builds_from_default_config() {
        let config = LockerConfig {
            user_id: "321842".to_string(),
            api_key: "k".to_string(),
            ..LockerConfig::default()
        };
        let client = OfferClient::new(&config).unwrap();
        assert!(client.offer_feed_url.contains("feed.php"));
        assert!(client.check_leads_url.contains("check2.php"));
        assert_eq!(client.tracking, (String::new(), String::new()));
    }

    #[test]
    fn tracking_slots_are_settable() {
        let config = LockerConfig::default();
        let client = OfferClient::new(&config)
            .unwrap()
            .with_tracking("campaign-7", "");
        assert_eq!(client.tracking.0, "campaign-7");
    }
}
