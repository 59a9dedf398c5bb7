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


//! Unlock session: polling, completion tracking, lock state machine
//!
//! Two independent state machines live here:
//!
//! - Display: `Idle -> Loading -> { Ready, Error }`, driven by the offer
//!   feed. A feed failure keeps a previously rendered offer list; only when
//!   there was none does the error card appear.
//! - Lock: `Locked -> Unlocking -> Unlocked`, driven purely by the
//!   completed-offer count reaching the configured threshold. The
//!   `Unlocking -> Unlocked` step is a timed, one-way grace transition so
//!   the visitor sees the completion acknowledged before the overlay goes
//!   away.
//!
//! Lead events are credited at most once per offer id; duplicate events for
//! an id are ignored entirely, points included. Poll rounds run strictly
//! sequentially (each round is awaited before the next tick is scheduled),
//! so overlapping in-flight checks cannot occur.

use std::collections::HashSet;
use std::time::Duration;

use tracing::{debug, info, warn};

use crate::config::LockerConfig;
use crate::error::Result;
use crate::offers::{LeadEvent, Offer, OfferClient, OfferNetwork};

/// Grace delay between reaching the threshold and hiding the overlay.
pub const UNLOCK_GRACE: Duration = Duration::from_millis(500);

/// Offer list display state.
#[derive(Debug, Clone, Default)]
pub enum DisplayState {
    /// Nothing fetched yet
    #[default]
    Idle,
    /// Feed request in flight
    Loading,
    /// Offers fetched and trimmed to the display limit
    Ready(Vec<Offer>),
    /// Feed unavailable and no prior offer list to keep showing
    Error,
}

impl DisplayState {
    pub fn is_ready(&self) -> bool {
        matches!(self, DisplayState::Ready(_))
    }

    /// Offers to render, if any.
    pub fn offers(&self) -> Option<&[Offer]> {
        match self {
            DisplayState::Ready(offers) => Some(offers),
            _ => None,
        }
    }
}

/// Lock state machine, driven by the completion-count threshold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LockState {
    #[default]
    Locked,
    /// Threshold reached; grace delay running. One-way, non-cancelable.
    Unlocking,
    Unlocked,
}

/// Summary of one lead-check round.
#[derive(Debug, Clone, Default)]
pub struct LeadRound {
    /// Offer ids recorded for the first time this round
    pub newly_completed: Vec<u64>,
    /// Points credited this round (duplicates credit nothing)
    pub points_credited: f64,
}

impl LeadRound {
    pub fn is_empty(&self) -> bool {
        self.newly_completed.is_empty()
    }
}

type UnlockHook = Box<dyn FnOnce() + Send>;

/// Per-page-view unlock session.
///
/// Owns the config, the network client and all mutable locker state; no
/// module-level globals. Construct one per page view and drive it with
/// [`LockerSession::load_offers`] and [`LockerSession::run_until_unlocked`],
/// or step it manually with [`LockerSession::poll_once`].
pub struct LockerSession<N: OfferNetwork = OfferClient> {
    config: LockerConfig,
    network: N,
    display: DisplayState,
    lock: LockState,
    completed: HashSet<u64>,
    total_points: f64,
    on_unlock: Option<UnlockHook>,
    running: bool,
}

impl LockerSession<OfferClient> {
    /// Build a session over the real offer network.
    ///
    /// Fails fast when account credentials are missing; the caller logs the
    /// error and leaves the content ungated.
    pub fn new(config: LockerConfig) -> Result<Self> {
        config.validate()?;
        let network = OfferClient::new(&config)?;
        Ok(Self::with_network_unchecked(config, network))
    }
}

impl<N: OfferNetwork> LockerSession<N> {
    /// Build a session over any [`OfferNetwork`] implementation.
    pub fn with_network(config: LockerConfig, network: N) -> Result<Self> {
        config.validate()?;
        Ok(Self::with_network_unchecked(config, network))
    }

    fn with_network_unchecked(config: LockerConfig, network: N) -> Self {
        Self {
            config,
            network,
            display: DisplayState::Idle,
            lock: LockState::Locked,
            completed: HashSet::new(),
            total_points: 0.0,
            on_unlock: None,
            running: false,
        }
    }

    pub fn config(&self) -> &LockerConfig {
        &self.config
    }

    pub fn display(&self) -> &DisplayState {
        &self.display
    }

    pub fn lock_state(&self) -> LockState {
        self.lock
    }

    pub fn is_unlocked(&self) -> bool {
        self.lock == LockState::Unlocked
    }

    /// Distinct completed offers so far, against the required count.
    pub fn progress(&self) -> (usize, usize) {
        (self.completed.len(), self.config.required_offers)
    }

    /// Cumulative reward points, in the network's cent units.
    pub fn total_points(&self) -> f64 {
        self.total_points
    }

    /// Register the hook invoked once when the content unlocks.
    pub fn on_unlock<F: FnOnce() + Send + 'static>(&mut self, hook: F) {
        self.on_unlock = Some(Box::new(hook));
    }

    /// Fetch the offer feed and update the display state.
    ///
    /// Call again to retry after an error; a prior offer list survives a
    /// failed refresh.
    pub async fn load_offers(&mut self) {
        let previous = std::mem::replace(&mut self.display, DisplayState::Loading);

        match self.network.fetch_offers().await {
            Ok(offers) if !offers.is_empty() => {
                let mut offers = offers;
                offers.truncate(self.config.num_offers);
                info!(count = offers.len(), "offers ready");
                self.display = DisplayState::Ready(offers);
            }
            Ok(_) => {
                warn!("offer feed returned no offers");
                self.keep_or_error(previous);
            }
            Err(err) => {
                warn!(error = %err, "offer feed unavailable");
                self.keep_or_error(previous);
            }
        }
    }

    fn keep_or_error(&mut self, previous: DisplayState) {
        self.display = match previous {
            DisplayState::Ready(offers) => DisplayState::Ready(offers),
            _ => DisplayState::Error,
        };
    }

    /// Record a batch of lead events.
    ///
    /// Each offer id is credited at most once for the whole session; a
    /// second event for the same id is ignored, points included. Events
    /// without a valid non-zero id are skipped.
    pub fn apply_leads(&mut self, leads: &[LeadEvent]) -> LeadRound {
        let mut round = LeadRound::default();

        for lead in leads {
            let Some(id) = lead.valid_id() else {
                continue;
            };
            if !self.completed.insert(id) {
                continue;
            }

            round.newly_completed.push(id);
            round.points_credited += lead.points;
            self.total_points += lead.points;
            info!(
                offer_id = id,
                earnings = %format!("${:.2}", lead.points / 100.0),
                "lead completed"
            );
        }

        if !round.is_empty() {
            let (done, required) = self.progress();
            info!(
                completed = done,
                required,
                points = self.total_points,
                "completion progress"
            );
        }

        round
    }

    /// Threshold comparison after a poll round.
    ///
    /// Returns true the one time the session moves `Locked -> Unlocking`.
    /// The generic comparison handles thresholds of zero and one without
    /// special-casing.
    fn evaluate_unlock(&mut self) -> bool {
        if self.lock != LockState::Locked {
            return false;
        }
        if self.completed.len() >= self.config.required_offers {
            info!(
                completed = self.completed.len(),
                required = self.config.required_offers,
                "unlock threshold reached"
            );
            self.lock = LockState::Unlocking;
            return true;
        }
        false
    }

    /// Complete the `Unlocking -> Unlocked` transition and fire the hook.
    ///
    /// Idempotent: calling this in any other state does nothing, and the
    /// hook can only ever fire once.
    pub fn finish_unlock(&mut self) {
        if self.lock != LockState::Unlocking {
            return;
        }
        self.lock = LockState::Unlocked;
        self.running = false;
        info!("content unlocked");
        if let Some(hook) = self.on_unlock.take() {
            hook();
        }
    }

    /// Run one lead-check round.
    ///
    /// A failed round is logged and otherwise ignored; the next tick is the
    /// retry. Returns true when this round reached the unlock threshold
    /// (the session is now `Unlocking`).
    pub async fn poll_once(&mut self) -> bool {
        if self.lock != LockState::Locked {
            return false;
        }

        match self.network.check_leads().await {
            Ok(leads) => {
                let round = self.apply_leads(&leads);
                if round.is_empty() {
                    debug!("lead check: nothing new");
                }
            }
            Err(err) => {
                debug!(error = %err, "lead check failed, retrying next tick");
            }
        }

        self.evaluate_unlock()
    }

    /// Poll until the unlock threshold is reached.
    ///
    /// Checks immediately, then once per configured interval. Rounds are
    /// strictly sequential: a slow check delays the next tick instead of
    /// overlapping it. After the threshold is reached the fixed grace delay
    /// elapses, the hook fires, and the loop returns.
    pub async fn run_until_unlocked(&mut self) {
        self.running = true;

        while self.running {
            if self.poll_once().await {
                tokio::time::sleep(UNLOCK_GRACE).await;
                self.finish_unlock();
                return;
            }
            tokio::time::sleep(self.config.check_interval()).await;
        }
    }

    /// Ask a manually driven poll loop to stop after the current round.
    pub fn stop(&mut self) {
        self.running = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::collections::VecDeque;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::{Arc, Mutex};

    use crate::error::PlaygateError;

    /// Scripted network: each call pops the next queued response; an empty
    /// queue yields an empty list.
    #[derive(Default)]
    struct StubNetwork {
        offers: Mutex<VecDeque<Result<Vec<Offer>>>>,
        leads: Mutex<VecDeque<Result<Vec<LeadEvent>>>>,
    }

    impl StubNetwork {
        fn queue_offers(&self, response: Result<Vec<Offer>>) {
            self.offers.lock().unwrap().push_back(response);
        }

        fn queue_leads(&self, response: Result<Vec<LeadEvent>>) {
            self.leads.lock().unwrap().push_back(response);
        }
    }

    #[async_trait]
    impl OfferNetwork for Arc<StubNetwork> {
        async fn fetch_offers(&self) -> Result<Vec<Offer>> {
            self.offers
                .lock()
                .unwrap()
                .pop_front()
                .unwrap_or_else(|| Ok(Vec::new()))
        }

        async fn check_leads(&self) -> Result<Vec<LeadEvent>> {
            self.leads
                .lock()
                .unwrap()
                .pop_front()
                .unwrap_or_else(|| Ok(Vec::new()))
        }
    }

    fn test_config(required: usize) -> LockerConfig {
        LockerConfig {
            user_id: "321842".to_string(),
            api_key: "test-key".to_string(),
            required_offers: required,
            check_interval_ms: 100,
            ..LockerConfig::default()
        }
    }

    fn session(required: usize) -> (LockerSession<Arc<StubNetwork>>, Arc<StubNetwork>) {
        let network = Arc::new(StubNetwork::default());
        let session = LockerSession::with_network(test_config(required), network.clone()).unwrap();
        (session, network)
    }

    fn lead(id: u64, points: f64) -> LeadEvent {
        serde_json::from_value(serde_json::json!({ "offer_id": id, "points": points })).unwrap()
    }

    fn offer(title: &str) -> Offer {
        serde_json::from_value(serde_json::json!({ "anchor": title, "url": "https://x" })).unwrap()
    }

    #[test]
    fn session_requires_credentials() {
        let result = LockerSession::new(LockerConfig::default());
        assert!(matches!(
            result,
            Err(PlaygateError::MissingRequiredField(_))
        ));
    }

    #[tokio::test]
    async fn duplicate_leads_credit_at_most_once() {
        let (mut session, _) = session(5);

        let first = session.apply_leads(&[lead(9, 100.0), lead(9, 100.0), lead(4, 50.0)]);
        assert_eq!(first.newly_completed, vec![9, 4]);
        assert_eq!(first.points_credited, 150.0);

        // A later round repeating id 9 changes nothing.
        let second = session.apply_leads(&[lead(9, 999.0)]);
        assert!(second.is_empty());
        assert_eq!(session.progress().0, 2);
        assert_eq!(session.total_points(), 150.0);
    }

    #[tokio::test]
    async fn invalid_ids_are_skipped() {
        let (mut session, _) = session(1);
        let round = session.apply_leads(&[
            serde_json::from_value(serde_json::json!({ "offer_id": 0, "points": 10 })).unwrap(),
            serde_json::from_value(serde_json::json!({ "points": 10 })).unwrap(),
        ]);
        assert!(round.is_empty());
        assert_eq!(session.progress().0, 0);
    }

    #[tokio::test]
    async fn unlock_fires_hook_exactly_once() {
        let (mut session, network) = session(2);
        let fired = Arc::new(AtomicUsize::new(0));
        let counter = fired.clone();
        session.on_unlock(move || {
            counter.fetch_add(1, Ordering::SeqCst);
        });

        network.queue_leads(Ok(vec![lead(1, 10.0)]));
        assert!(!session.poll_once().await);
        assert_eq!(session.lock_state(), LockState::Locked);

        network.queue_leads(Ok(vec![lead(2, 10.0)]));
        assert!(session.poll_once().await);
        assert_eq!(session.lock_state(), LockState::Unlocking);

        session.finish_unlock();
        assert!(session.is_unlocked());
        assert_eq!(fired.load(Ordering::SeqCst), 1);

        // Further polls and a second finish are no-ops.
        network.queue_leads(Ok(vec![lead(3, 10.0)]));
        assert!(!session.poll_once().await);
        session.finish_unlock();
        assert_eq!(session.progress().0, 2);
        assert_eq!(fired.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn zero_threshold_unlocks_on_first_empty_round() {
        let (mut session, _) = session(0);
        assert!(session.poll_once().await);
        session.finish_unlock();
        assert!(session.is_unlocked());
    }

    #[tokio::test]
    async fn failed_lead_round_is_silently_retried() {
        let (mut session, network) = session(1);
        network.queue_leads(Err(PlaygateError::network_error("down", true)));
        assert!(!session.poll_once().await);
        assert_eq!(session.lock_state(), LockState::Locked);

        network.queue_leads(Ok(vec![lead(5, 25.0)]));
        assert!(session.poll_once().await);
    }

    #[tokio::test]
    async fn feed_failure_without_prior_offers_shows_error() {
        let (mut session, network) = session(1);
        network.queue_offers(Err(PlaygateError::feed_unavailable("timeout", true)));
        session.load_offers().await;
        assert!(matches!(session.display(), DisplayState::Error));
    }

    #[tokio::test]
    async fn empty_feed_is_displayed_like_a_failure_without_panicking() {
        let (mut session, network) = session(1);
        network.queue_offers(Ok(Vec::new()));
        session.load_offers().await;
        assert!(matches!(session.display(), DisplayState::Error));
    }

    #[tokio::test]
    async fn feed_failure_keeps_prior_offer_list() {
        let (mut session, network) = session(1);
        network.queue_offers(Ok(vec![offer("A"), offer("B")]));
        session.load_offers().await;
        assert!(session.display().is_ready());

        network.queue_offers(Err(PlaygateError::feed_unavailable("flaky", false)));
        session.load_offers().await;
        let offers = session.display().offers().expect("prior offers kept");
        assert_eq!(offers.len(), 2);
    }

    #[tokio::test]
    async fn offer_list_is_trimmed_to_display_limit() {
        let (mut session, network) = session(1);
        network.queue_offers(Ok(vec![
            offer("A"),
            offer("B"),
            offer("C"),
            offer("D"),
            offer("E"),
        ]));
        session.load_offers().await;
        assert_eq!(session.display().offers().unwrap().len(), 3);
    }

    #[tokio::test(start_paused = true)]
    async fn polling_loop_unlocks_after_grace_delay() {
        let (mut session, network) = session(1);
        let fired = Arc::new(AtomicUsize::new(0));
        let counter = fired.clone();
        session.on_unlock(move || {
            counter.fetch_add(1, Ordering::SeqCst);
        });

        // Round 1: nothing. Round 2: the completing lead.
        network.queue_leads(Ok(Vec::new()));
        network.queue_leads(Ok(vec![lead(11, 75.0)]));

        session.run_until_unlocked().await;

        assert!(session.is_unlocked());
        assert_eq!(fired.load(Ordering::SeqCst), 1);
        assert_eq!(session.total_points(), 75.0);
    }
}
