//! Fixed answer sets offered by the onboarding survey.
//!
//! The stored preferences are free text (any writer may put any string in
//! them); these enums only describe what the survey itself offers. Each
//! variant maps to the exact label shown to the user and written into the
//! preferences.

use core::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// A submitted value that is not one of the offered choices.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[error("unknown {kind} choice: {value:?}")]
pub struct UnknownChoice {
    /// Which question the value was submitted for.
    pub kind: &'static str,
    /// The rejected value.
    pub value: String,
}

/// Implements label mapping, `Display` and `FromStr` for a choice enum.
macro_rules! choice_enum {
    ($name:ident, $kind:literal, { $($variant:ident => $label:literal),+ $(,)? }) => {
        impl $name {
            /// Every choice, in the order the survey presents them.
            pub const ALL: &'static [Self] = &[$(Self::$variant),+];

            /// The label shown to the user and stored in preferences.
            #[must_use]
            pub const fn label(self) -> &'static str {
                match self {
                    $(Self::$variant => $label),+
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.label())
            }
        }

        impl FromStr for $name {
            type Err = UnknownChoice;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $($label => Ok(Self::$variant),)+
                    other => Err(UnknownChoice {
                        kind: $kind,
                        value: other.to_string(),
                    }),
                }
            }
        }
    };
}

/// Apparel gender asked in the first onboarding step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Gender {
    Men,
    Women,
    Unisex,
}

choice_enum!(Gender, "gender", {
    Men => "Men",
    Women => "Women",
    Unisex => "Unisex",
});

/// Price range asked in the second onboarding step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PriceRange {
    Budget,
    #[serde(rename = "Mid-range")]
    MidRange,
    Luxury,
    #[serde(rename = "No preference")]
    NoPreference,
}

choice_enum!(PriceRange, "price", {
    Budget => "Budget",
    MidRange => "Mid-range",
    Luxury => "Luxury",
    NoPreference => "No preference",
});

/// Styles offered in the third (multi-select) onboarding step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Style {
    Casual,
    Formal,
    Streetwear,
    Vintage,
    Minimalist,
}

choice_enum!(Style, "style", {
    Casual => "Casual",
    Formal => "Formal",
    Streetwear => "Streetwear",
    Vintage => "Vintage",
    Minimalist => "Minimalist",
});
