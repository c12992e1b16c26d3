//! Request body sent to the product search service.

use serde::{Deserialize, Serialize};

use super::preferences::UserPreferences;

/// Personalization filters for a product search.
///
/// Unset fields are omitted from the JSON body entirely, never sent as
/// `null`. Build one with [`SearchRequest::empty`] or from preferences with
/// [`SearchRequest::personalized`]; both only ever carry non-empty values.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    gender: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    price: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    styles: Option<Vec<String>>,
}

impl SearchRequest {
    /// A request with no filters. Serializes as `{}`.
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    /// Filters built from the non-empty fields of `preferences`.
    #[must_use]
    pub fn personalized(preferences: &UserPreferences) -> Self {
        Self {
            gender: preferences.gender().map(str::to_string),
            price: preferences.price().map(str::to_string),
            styles: preferences.styles().map(<[String]>::to_vec),
        }
    }

    /// The request for a search with the personalization toggle in the given
    /// state. When `use_preferences` is false, `preferences` is never read.
    #[must_use]
    pub fn for_toggle(
        use_preferences: bool,
        preferences: impl FnOnce() -> UserPreferences,
    ) -> Self {
        if use_preferences {
            Self::personalized(&preferences())
        } else {
            Self::empty()
        }
    }

    #[must_use]
    pub fn gender(&self) -> Option<&str> {
        self.gender.as_deref()
    }

    #[must_use]
    pub fn price(&self) -> Option<&str> {
        self.price.as_deref()
    }

    #[must_use]
    pub fn styles(&self) -> Option<&[String]> {
        self.styles.as_deref()
    }

    /// Returns true if no filter is set.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.gender.is_none() && self.price.is_none() && self.styles.is_none()
    }
}
