//! Application state shared across handlers.

use std::sync::Arc;

use crate::assistant::ContextRegistry;
use crate::config::AssistantConfig;
use crate::search_api::{ProductSearch, SearchApiClient};

/// Application state shared across all handlers.
///
/// This struct is cheaply cloneable via `Arc` and provides access to
/// shared resources like the search client and the session contexts.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: AssistantConfig,
    search: Arc<dyn ProductSearch>,
    contexts: ContextRegistry,
}

impl AppState {
    /// Create application state that talks to the configured search service.
    #[must_use]
    pub fn new(config: AssistantConfig) -> Self {
        let search = Arc::new(SearchApiClient::new(&config.search_api_url));
        Self::with_search(config, search)
    }

    /// Create application state with a custom search backend.
    #[must_use]
    pub fn with_search(config: AssistantConfig, search: Arc<dyn ProductSearch>) -> Self {
        let contexts = ContextRegistry::new(config.session_idle);

        Self {
            inner: Arc::new(AppStateInner {
                config,
                search,
                contexts,
            }),
        }
    }

    /// Get a reference to the application configuration.
    #[must_use]
    pub fn config(&self) -> &AssistantConfig {
        &self.inner.config
    }

    /// Get the product search client.
    #[must_use]
    pub fn search(&self) -> &dyn ProductSearch {
        self.inner.search.as_ref()
    }

    /// Get the session context registry.
    #[must_use]
    pub fn contexts(&self) -> &ContextRegistry {
        &self.inner.contexts
    }
}
