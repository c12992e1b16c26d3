//! User preferences collected by onboarding.

use serde::{Deserialize, Serialize};

/// A user's onboarding answers for the lifetime of a session.
///
/// Empty strings and an empty style list mean "unset". Values are not
/// validated: the survey writes its own labels but any string is accepted.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserPreferences {
    /// Set once the onboarding survey has been finished or skipped through.
    pub onboarding_complete: bool,
    pub user_gender: String,
    pub user_price: String,
    /// Styles in the order they were first selected.
    pub user_styles: Vec<String>,
}

impl UserPreferences {
    /// Apply a partial update, overwriting only the fields it carries.
    pub fn merge(&mut self, update: PreferencesUpdate) {
        let PreferencesUpdate {
            onboarding_complete,
            user_gender,
            user_price,
            user_styles,
        } = update;

        if let Some(complete) = onboarding_complete {
            self.onboarding_complete = complete;
        }
        if let Some(gender) = user_gender {
            self.user_gender = gender;
        }
        if let Some(price) = user_price {
            self.user_price = price;
        }
        if let Some(styles) = user_styles {
            self.user_styles = styles;
        }
    }

    /// Return a copy with `update` merged over it.
    #[must_use]
    pub fn merged(mut self, update: PreferencesUpdate) -> Self {
        self.merge(update);
        self
    }

    /// The stored gender, or `None` when unset.
    #[must_use]
    pub fn gender(&self) -> Option<&str> {
        non_empty(&self.user_gender)
    }

    /// The stored price range, or `None` when unset.
    #[must_use]
    pub fn price(&self) -> Option<&str> {
        non_empty(&self.user_price)
    }

    /// The stored styles, or `None` when none are selected.
    #[must_use]
    pub fn styles(&self) -> Option<&[String]> {
        if self.user_styles.is_empty() {
            None
        } else {
            Some(&self.user_styles)
        }
    }
}

fn non_empty(value: &str) -> Option<&str> {
    if value.is_empty() { None } else { Some(value) }
}

/// A partial [`UserPreferences`]: `None` fields are left untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PreferencesUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub onboarding_complete: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_gender: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_price: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_styles: Option<Vec<String>>,
}

impl PreferencesUpdate {
    #[must_use]
    pub fn gender(gender: impl Into<String>) -> Self {
        Self {
            user_gender: Some(gender.into()),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn price(price: impl Into<String>) -> Self {
        Self {
            user_price: Some(price.into()),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn styles(styles: Vec<String>) -> Self {
        Self {
            user_styles: Some(styles),
            ..Self::default()
        }
    }

    /// Marks onboarding as complete.
    #[must_use]
    pub fn completed() -> Self {
        Self {
            onboarding_complete: Some(true),
            ..Self::default()
        }
    }

    /// Returns true if the update carries no fields.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self == &Self::default()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_unset() {
        let prefs = UserPreferences::default();
        assert!(!prefs.onboarding_complete);
        assert_eq!(prefs.gender(), None);
        assert_eq!(prefs.price(), None);
        assert_eq!(prefs.styles(), None);
    }

    #[test]
    fn test_later_updates_win() {
        let p1 = PreferencesUpdate {
            user_gender: Some("Men".to_string()),
            user_price: Some("Budget".to_string()),
            ..PreferencesUpdate::default()
        };
        let p2 = PreferencesUpdate {
            user_gender: Some("Women".to_string()),
            user_styles: Some(vec!["Formal".to_string()]),
            ..PreferencesUpdate::default()
        };

        let prefs = UserPreferences::default().merged(p1).merged(p2);

        assert_eq!(prefs.user_gender, "Women");
        assert_eq!(prefs.user_price, "Budget");
        assert_eq!(prefs.user_styles, vec!["Formal".to_string()]);
        assert!(!prefs.onboarding_complete);
    }

    #[test]
    fn test_empty_update_changes_nothing() {
        let prefs = UserPreferences::default().merged(PreferencesUpdate::gender("Unisex"));
        let after = prefs.clone().merged(PreferencesUpdate::default());
        assert_eq!(prefs, after);
        assert!(PreferencesUpdate::default().is_empty());
    }

    #[test]
    fn test_values_are_not_validated() {
        let prefs = UserPreferences::default()
            .merged(PreferencesUpdate::gender("anything at all"))
            .merged(PreferencesUpdate::styles(vec!["Casual".into(), "Casual".into()]));
        assert_eq!(prefs.gender(), Some("anything at all"));
        assert_eq!(prefs.user_styles.len(), 2);
    }

    #[test]
    fn test_update_can_clear_a_field() {
        let prefs = UserPreferences::default()
            .merged(PreferencesUpdate::price("Luxury"))
            .merged(PreferencesUpdate::price(""));
        assert_eq!(prefs.price(), None);
    }

    #[test]
    fn test_json_field_names() {
        let prefs = UserPreferences::default().merged(PreferencesUpdate::completed());
        let value = serde_json::to_value(&prefs).unwrap();
        assert_eq!(value["onboardingComplete"], true);
        assert_eq!(value["userGender"], "");
        assert!(value["userStyles"].as_array().unwrap().is_empty());
    }

    #[test]
    fn test_partial_update_from_json() {
        let update: PreferencesUpdate =
            serde_json::from_str(r#"{"userPrice":"Luxury"}"#).unwrap();
        assert_eq!(update, PreferencesUpdate::price("Luxury"));

        let empty: PreferencesUpdate = serde_json::from_str("{}").unwrap();
        assert!(empty.is_empty());
    }
}
