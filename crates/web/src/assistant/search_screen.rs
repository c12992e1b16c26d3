//! State behind the search screen.
//!
//! One [`SearchScreen`] exists per session. It owns the query text, the
//! loading flag, the last results and the two flags of the preferences
//! summary control (personalization toggle and disclosure).

use std::sync::{Mutex, MutexGuard, PoisonError};

use fashion_assistant_core::{Product, SearchRequest};
use tracing::instrument;

use super::preferences::PreferencesStore;
use crate::search_api::ProductSearch;

/// A point-in-time copy of the search screen, used for rendering.
#[derive(Debug, Clone, Default)]
pub struct SearchState {
    pub query_text: String,
    pub is_loading: bool,
    pub results: Vec<Product>,
    /// Personalization toggle.
    pub use_preferences: bool,
    /// Whether the preferences summary is expanded.
    pub summary_open: bool,
}

/// What a search trigger did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchOutcome {
    /// Results were replaced with `count` products.
    Completed { count: usize },
    /// The search service failed; previous results were kept.
    Failed,
    /// Nothing happened because the query was empty.
    EmptyQuery,
    /// Nothing happened because a search was already running.
    InFlight,
}

/// Per-session search screen state.
#[derive(Debug, Default)]
pub struct SearchScreen {
    state: Mutex<SearchState>,
}

impl SearchScreen {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, SearchState> {
        // State stays consistent even if a holder panicked
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    #[must_use]
    pub fn snapshot(&self) -> SearchState {
        self.lock().clone()
    }

    #[must_use]
    pub fn is_loading(&self) -> bool {
        self.lock().is_loading
    }

    /// Set the personalization toggle. Never touches stored preferences.
    pub fn set_use_preferences(&self, enabled: bool) {
        self.lock().use_preferences = enabled;
    }

    /// Expand or collapse the preferences summary; returns the new state.
    pub fn toggle_summary(&self) -> bool {
        let mut state = self.lock();
        state.summary_open = !state.summary_open;
        state.summary_open
    }

    /// Run a search for `query`.
    ///
    /// A no-op if `query` is empty or another search of this screen is still
    /// running. Otherwise the request is built from `preferences` only when
    /// the personalization toggle is on. On success the results are replaced;
    /// on failure they are kept and the error is logged. The loading flag is
    /// cleared in every case, including when this future is dropped.
    #[instrument(skip(self, preferences, api))]
    pub async fn search(
        &self,
        query: &str,
        preferences: &PreferencesStore,
        api: &dyn ProductSearch,
    ) -> SearchOutcome {
        let (_loading, use_preferences) = match self.begin(query) {
            Ok(started) => started,
            Err(skipped) => return skipped,
        };

        let filters =
            SearchRequest::for_toggle(use_preferences, || preferences.get_preferences());
        tracing::debug!(?filters, use_preferences, "Searching products");

        match api.search_products(query, &filters).await {
            Ok(products) => {
                let count = products.len();
                self.lock().results = products;
                tracing::info!(count, "Search completed");
                SearchOutcome::Completed { count }
            }
            Err(err) => {
                tracing::error!(error = %err, query, "Failed to load products");
                SearchOutcome::Failed
            }
        }
    }

    /// Record the query and claim the loading flag.
    ///
    /// A running search leaves the state untouched. An empty query is
    /// recorded but does not start a search.
    fn begin(&self, query: &str) -> Result<(LoadingGuard<'_>, bool), SearchOutcome> {
        let mut state = self.lock();
        if state.is_loading {
            return Err(SearchOutcome::InFlight);
        }
        query.clone_into(&mut state.query_text);
        if query.is_empty() {
            return Err(SearchOutcome::EmptyQuery);
        }
        state.is_loading = true;
        let use_preferences = state.use_preferences;
        drop(state);

        Ok((LoadingGuard { screen: self }, use_preferences))
    }
}

/// Clears the loading flag when dropped.
struct LoadingGuard<'a> {
    screen: &'a SearchScreen,
}

impl Drop for LoadingGuard<'_> {
    fn drop(&mut self) {
        self.screen.lock().is_loading = false;
    }
}
