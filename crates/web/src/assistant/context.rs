//! Per-session context: the state one browser session owns.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use fashion_assistant_core::OnboardingFlow;
use moka::future::Cache;
use uuid::Uuid;

use super::preferences::PreferencesStore;
use super::search_screen::SearchScreen;

/// Maximum number of live sessions, shared by the session store and the
/// context registry.
pub const MAX_SESSIONS: u64 = 100_000;

/// Everything a single session owns.
///
/// Handlers receive it through the
/// [`SessionContextHandle`](crate::middleware::SessionContextHandle)
/// extractor, never through global state.
#[derive(Debug)]
pub struct SessionContext {
    id: Uuid,
    preferences: PreferencesStore,
    onboarding: Mutex<OnboardingFlow>,
    search: SearchScreen,
}

impl SessionContext {
    /// A fresh context with default preferences and a new survey.
    #[must_use]
    pub fn new(id: Uuid) -> Self {
        Self {
            id,
            preferences: PreferencesStore::new(),
            onboarding: Mutex::new(Self::new_flow(id)),
            search: SearchScreen::new(),
        }
    }

    fn new_flow(id: Uuid) -> OnboardingFlow {
        OnboardingFlow::with_completion_hook(move || {
            tracing::info!(session_id = %id, "Onboarding complete");
        })
    }

    #[must_use]
    pub const fn id(&self) -> Uuid {
        self.id
    }

    #[must_use]
    pub const fn preferences(&self) -> &PreferencesStore {
        &self.preferences
    }

    /// Lock the onboarding survey. Do not hold across an `.await`.
    ///
    /// A finished survey whose completion flag was cleared by another writer
    /// starts over at the first question.
    pub fn onboarding(&self) -> MutexGuard<'_, OnboardingFlow> {
        let mut flow = self
            .onboarding
            .lock()
            .unwrap_or_else(PoisonError::into_inner);

        if flow.is_done() && !self.onboarding_complete() {
            tracing::info!(session_id = %self.id, "Completion cleared, restarting onboarding");
            *flow = Self::new_flow(self.id);
        }

        flow
    }

    #[must_use]
    pub const fn search(&self) -> &SearchScreen {
        &self.search
    }

    /// Whether the root page should show the search screen.
    #[must_use]
    pub fn onboarding_complete(&self) -> bool {
        self.preferences.get_preferences().onboarding_complete
    }
}

/// All live session contexts, keyed by the id stored in the session cookie.
///
/// Contexts idle for longer than the configured time are dropped, taking
/// their preferences with them.
#[derive(Clone)]
pub struct ContextRegistry {
    contexts: Cache<Uuid, Arc<SessionContext>>,
}

impl ContextRegistry {
    #[must_use]
    pub fn new(idle: Duration) -> Self {
        let contexts = Cache::builder()
            .max_capacity(MAX_SESSIONS)
            .time_to_idle(idle)
            .build();

        Self { contexts }
    }

    /// The context for `id`, created on first use.
    pub async fn get_or_create(&self, id: Uuid) -> Arc<SessionContext> {
        self.contexts
            .get_with(id, async move {
                tracing::debug!(session_id = %id, "Creating session context");
                Arc::new(SessionContext::new(id))
            })
            .await
    }

    /// The context for `id`, if it is still live.
    pub async fn get(&self, id: Uuid) -> Option<Arc<SessionContext>> {
        self.contexts.get(&id).await
    }

    /// Drop the context for `id`.
    pub async fn remove(&self, id: Uuid) {
        self.contexts.invalidate(&id).await;
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use fashion_assistant_core::{Gender, OnboardingStep, PreferencesUpdate};

    use super::*;

    #[tokio::test]
    async fn test_same_id_same_context() {
        let registry = ContextRegistry::new(Duration::from_secs(60));
        let id = Uuid::new_v4();

        let first = registry.get_or_create(id).await;
        first
            .preferences()
            .update_preferences(PreferencesUpdate::gender("Men"));

        let second = registry.get_or_create(id).await;
        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(second.preferences().get_preferences().user_gender, "Men");
    }

    #[tokio::test]
    async fn test_sessions_are_isolated() {
        let registry = ContextRegistry::new(Duration::from_secs(60));
        let a = registry.get_or_create(Uuid::new_v4()).await;
        let b = registry.get_or_create(Uuid::new_v4()).await;

        a.preferences()
            .update_preferences(PreferencesUpdate::price("Luxury"));

        assert_eq!(b.preferences().get_preferences().user_price, "");
    }

    #[tokio::test]
    async fn test_removed_context_starts_over() {
        let registry = ContextRegistry::new(Duration::from_secs(60));
        let id = Uuid::new_v4();
        let ctx = registry.get_or_create(id).await;
        ctx.preferences()
            .update_preferences(PreferencesUpdate::completed());

        registry.remove(id).await;

        assert!(registry.get(id).await.is_none());
        assert!(!registry.get_or_create(id).await.onboarding_complete());
    }

    #[test]
    fn test_onboarding_writes_into_the_session_store() {
        let ctx = SessionContext::new(Uuid::new_v4());
        {
            let mut flow = ctx.onboarding();
            flow.select_gender(Gender::Unisex, ctx.preferences()).unwrap();
            assert_eq!(flow.step(), OnboardingStep::Price);
            flow.skip(ctx.preferences()).unwrap();
            flow.skip(ctx.preferences()).unwrap();
        }

        assert!(ctx.onboarding_complete());
        assert_eq!(ctx.preferences().get_preferences().user_gender, "Unisex");
    }

    #[test]
    fn test_cleared_completion_restarts_survey() {
        let ctx = SessionContext::new(Uuid::new_v4());
        {
            let mut flow = ctx.onboarding();
            for _ in 0..3 {
                flow.skip(ctx.preferences()).unwrap();
            }
        }
        assert!(ctx.onboarding().is_done());

        ctx.preferences().update_preferences(PreferencesUpdate {
            onboarding_complete: Some(false),
            ..PreferencesUpdate::default()
        });

        let mut flow = ctx.onboarding();
        assert_eq!(flow.step(), OnboardingStep::Gender);
        flow.skip(ctx.preferences()).unwrap();
        flow.skip(ctx.preferences()).unwrap();
        flow.skip(ctx.preferences()).unwrap();
        drop(flow);
        assert!(ctx.onboarding_complete());
    }
}
