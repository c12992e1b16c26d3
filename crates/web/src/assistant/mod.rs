//! The assistant's per-session state.
//!
//! # Components
//!
//! - [`PreferencesStore`] - onboarding answers, shallow-merge updates
//! - [`SearchScreen`] - query, loading flag, results and the
//!   personalization toggle
//! - [`SessionContext`] - owns the store, the onboarding survey and the
//!   search screen of one browser session
//! - [`ContextRegistry`] - all live session contexts, with idle expiry

pub mod context;
pub mod preferences;
pub mod search_screen;

pub use context::{ContextRegistry, MAX_SESSIONS, SessionContext};
pub use preferences::PreferencesStore;
pub use search_screen::{SearchOutcome, SearchScreen, SearchState};
