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


//! Batch content import
//!
//! Sequential, deliberately slow: one fetch at a time with a fixed delay
//! between requests as rate-limit courtesy. Ids already present in the
//! catalog are skipped without touching the network; a failed fetch is
//! logged and skipped without aborting the batch.

use std::fmt;
use std::time::Duration;

use async_trait::async_trait;
use tracing::{info, warn};

use crate::catalog::records::Catalog;
use crate::error::Result;
use crate::tmdb::models::{MovieDetails, TvDetails};
use crate::tmdb::TmdbClient;

/// Fixed delay between consecutive metadata fetches.
pub const REQUEST_DELAY: Duration = Duration::from_millis(500);

/// The two metadata lookups the importer needs, behind a trait so batches
/// can run against a stub in tests.
#[async_trait]
pub trait MetadataSource: Send + Sync {
    async fn movie_details(&self, id: u64) -> Result<MovieDetails>;
    async fn tv_details(&self, id: u64) -> Result<TvDetails>;
}

#[async_trait]
impl MetadataSource for TmdbClient {
    async fn movie_details(&self, id: u64) -> Result<MovieDetails> {
        TmdbClient::movie_details(self, id).await
    }

    async fn tv_details(&self, id: u64) -> Result<TvDetails> {
        TmdbClient::tv_details(self, id).await
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContentKind {
    Movie,
    Series,
}

impl fmt::Display for ContentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ContentKind::Movie => write!(f, "movie"),
            ContentKind::Series => write!(f, "series"),
        }
    }
}

/// What one batch run did.
#[derive(Debug, Default)]
pub struct ImportOutcome {
    pub added_movies: usize,
    pub added_series: usize,
    pub skipped_movies: usize,
    pub skipped_series: usize,
    /// Ids whose fetch failed; reported, not fatal.
    pub failed: Vec<(ContentKind, u64)>,
}

impl ImportOutcome {
    pub fn added(&self) -> usize {
        self.added_movies + self.added_series
    }

    /// True when the catalog changed and is worth saving.
    pub fn anything_added(&self) -> bool {
        self.added() > 0
    }
}

/// Merge the requested ids into the catalog.
///
/// Existing ids are skipped by id equality per kind. New records are
/// appended in request order. The caller decides whether to save based on
/// [`ImportOutcome::anything_added`].
pub async fn import_content<S: MetadataSource>(
    source: &S,
    catalog: &mut Catalog,
    movie_ids: &[u64],
    tv_ids: &[u64],
) -> ImportOutcome {
    let mut outcome = ImportOutcome::default();

    for &id in movie_ids {
        if catalog.contains_movie(id) {
            info!(id, "movie already exists, skipping");
            outcome.skipped_movies += 1;
            continue;
        }

        match source.movie_details(id).await {
            Ok(details) => {
                let record = details.into_record();
                info!(id, title = %record.title, year = %record.release_date, "movie added");
                catalog.movies.push(record);
                outcome.added_movies += 1;
            }
            Err(err) => {
                warn!(id, error = %err, "failed to fetch movie, skipping");
                outcome.failed.push((ContentKind::Movie, id));
            }
        }

        tokio::time::sleep(REQUEST_DELAY).await;
    }

    for &id in tv_ids {
        if catalog.contains_series(id) {
            info!(id, "series already exists, skipping");
            outcome.skipped_series += 1;
            continue;
        }

        match source.tv_details(id).await {
            Ok(details) => {
                let record = details.into_record();
                info!(id, title = %record.title, year = %record.release_date, "series added");
                catalog.series.push(record);
                outcome.added_series += 1;
            }
            Err(err) => {
                warn!(id, error = %err, "failed to fetch series, skipping");
                outcome.failed.push((ContentKind::Series, id));
            }
        }

        tokio::time::sleep(REQUEST_DELAY).await;
    }

    outcome
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use crate::error::PlaygateError;

    /// Stub source: succeeds for any id not in the failure set, and counts
    /// how many fetches actually happened.
    #[derive(Default)]
    struct StubSource {
        failing: HashSet<u64>,
        fetches: AtomicUsize,
    }

    impl StubSource {
        fn failing(ids: &[u64]) -> Self {
            Self {
                failing: ids.iter().copied().collect(),
                fetches: AtomicUsize::new(0),
            }
        }

        fn fetch_count(&self) -> usize {
            self.fetches.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl MetadataSource for StubSource {
        async fn movie_details(&self, id: u64) -> Result<MovieDetails> {
            self.fetches.fetch_add(1, Ordering::SeqCst);
            if self.failing.contains(&id) {
                return Err(PlaygateError::api_failed("not found", Some(404), None));
            }
            Ok(serde_json::from_value(serde_json::json!({
                "id": id,
                "title": format!("Movie {}", id),
            }))
            .unwrap())
        }

        async fn tv_details(&self, id: u64) -> Result<TvDetails> {
            self.fetches.fetch_add(1, Ordering::SeqCst);
            if self.failing.contains(&id) {
                return Err(PlaygateError::api_failed("not found", Some(404), None));
            }
            Ok(serde_json::from_value(serde_json::json!({
                "id": id,
                "name": format!("Series {}", id),
            }))
            .unwrap())
        }
    }

    #[tokio::test(start_paused = true)]
    async fn adds_new_movies_and_series() {
        let source = StubSource::default();
        let mut catalog = Catalog::default();

        let outcome = import_content(&source, &mut catalog, &[1, 2], &[10]).await;

        assert_eq!(outcome.added_movies, 2);
        assert_eq!(outcome.added_series, 1);
        assert!(outcome.anything_added());
        assert!(catalog.contains_movie(1));
        assert!(catalog.contains_series(10));
        assert_eq!(catalog.movies[0].vid_link.as_deref(), Some("vids/Universal.mp4"));
        assert_eq!(catalog.series[0].season.as_deref(), Some("season 1"));
    }

    #[tokio::test(start_paused = true)]
    async fn existing_ids_are_skipped_without_fetching() {
        let source = StubSource::default();
        let mut catalog = Catalog::default();
        import_content(&source, &mut catalog, &[1], &[]).await;
        let original = catalog.movie(1).unwrap().clone();
        let fetches_before = source.fetch_count();

        let outcome = import_content(&source, &mut catalog, &[1], &[]).await;

        assert_eq!(outcome.added(), 0);
        assert_eq!(outcome.skipped_movies, 1);
        assert!(!outcome.anything_added());
        assert_eq!(source.fetch_count(), fetches_before);
        assert_eq!(catalog.movies.len(), 1);
        assert_eq!(catalog.movie(1).unwrap(), &original);
    }

    #[tokio::test(start_paused = true)]
    async fn one_failure_does_not_abort_the_batch() {
        let source = StubSource::failing(&[2]);
        let mut catalog = Catalog::default();

        let outcome = import_content(&source, &mut catalog, &[1, 2, 3], &[]).await;

        assert_eq!(outcome.added_movies, 2);
        assert_eq!(outcome.failed, vec![(ContentKind::Movie, 2)]);
        assert!(catalog.contains_movie(1));
        assert!(!catalog.contains_movie(2));
        assert!(catalog.contains_movie(3));
    }

    #[tokio::test(start_paused = true)]
    async fn same_id_can_exist_as_movie_and_series() {
        let source = StubSource::default();
        let mut catalog = Catalog::default();

        let outcome = import_content(&source, &mut catalog, &[7], &[7]).await;

        assert_eq!(outcome.added(), 2);
        assert!(catalog.contains_movie(7));
        assert!(catalog.contains_series(7));
    }
}
