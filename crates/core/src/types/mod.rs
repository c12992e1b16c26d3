//! Core types for the fashion assistant.

pub mod choice;
pub mod preferences;
pub mod product;
pub mod search;

pub use choice::{Gender, PriceRange, Style, UnknownChoice};
pub use preferences::{PreferencesUpdate, UserPreferences};
pub use product::Product;
pub use search::SearchRequest;
