//! Per-session preferences store.

use fashion_assistant_core::{PreferencesSink, PreferencesUpdate, UserPreferences};
use tokio::sync::watch;

/// Holds one session's [`UserPreferences`].
///
/// Updates are shallow merges. Every subscriber sees an update as soon as
/// [`update_preferences`](Self::update_preferences) returns.
#[derive(Debug)]
pub struct PreferencesStore {
    tx: watch::Sender<UserPreferences>,
}

impl Default for PreferencesStore {
    fn default() -> Self {
        Self::new()
    }
}

impl PreferencesStore {
    /// A store holding the all-empty defaults.
    #[must_use]
    pub fn new() -> Self {
        Self::with_preferences(UserPreferences::default())
    }

    #[must_use]
    pub fn with_preferences(preferences: UserPreferences) -> Self {
        let (tx, _rx) = watch::channel(preferences);
        Self { tx }
    }

    /// The current preference snapshot.
    #[must_use]
    pub fn get_preferences(&self) -> UserPreferences {
        self.tx.borrow().clone()
    }

    /// Merge `update` over the current preferences.
    pub fn update_preferences(&self, update: PreferencesUpdate) {
        if update.is_empty() {
            return;
        }
        tracing::debug!(?update, "Updating preferences");
        self.tx.send_modify(|current| current.merge(update));
    }

    /// Watch the preferences for changes.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<UserPreferences> {
        self.tx.subscribe()
    }
}

impl PreferencesSink for PreferencesStore {
    fn update_preferences(&self, update: PreferencesUpdate) {
        Self::update_preferences(self, update);
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_starts_with_defaults() {
        let store = PreferencesStore::new();
        assert_eq!(store.get_preferences(), UserPreferences::default());
    }

    #[test]
    fn test_updates_merge_in_order() {
        let store = PreferencesStore::new();
        store.update_preferences(PreferencesUpdate::gender("Men"));
        store.update_preferences(PreferencesUpdate::price("Budget"));
        store.update_preferences(PreferencesUpdate::gender("Unisex"));

        let prefs = store.get_preferences();
        assert_eq!(prefs.user_gender, "Unisex");
        assert_eq!(prefs.user_price, "Budget");
        assert!(prefs.user_styles.is_empty());
    }

    #[test]
    fn test_subscribers_see_updates_immediately() {
        let store = PreferencesStore::new();
        let mut rx = store.subscribe();
        assert!(!rx.has_changed().unwrap());

        store.update_preferences(PreferencesUpdate::completed());

        assert!(rx.has_changed().unwrap());
        assert!(rx.borrow_and_update().onboarding_complete);
    }

    #[test]
    fn test_empty_update_does_not_notify() {
        let store = PreferencesStore::new();
        let rx = store.subscribe();
        store.update_preferences(PreferencesUpdate::default());
        assert!(!rx.has_changed().unwrap());
    }

    #[test]
    fn test_snapshot_is_detached() {
        let store = PreferencesStore::new();
        let before = store.get_preferences();
        store.update_preferences(PreferencesUpdate::price("Luxury"));
        assert_eq!(before.user_price, "");
        assert_eq!(store.get_preferences().user_price, "Luxury");
    }
}
