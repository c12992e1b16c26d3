//! HTTP route handlers for the assistant.
//!
//! # Route Structure
//!
//! ```text
//! GET  /                         - Redirect to onboarding or search
//! GET  /health                   - Health check
//!
//! # Onboarding
//! GET  /onboarding               - Current survey step
//! POST /onboarding/gender        - Answer the gender question
//! POST /onboarding/price         - Answer the price question
//! POST /onboarding/styles/toggle - Select or deselect a style
//! POST /onboarding/styles/submit - Submit styles and finish
//! POST /onboarding/skip          - Skip the current question
//!
//! # Search
//! GET  /search                   - Search screen
//! POST /search                   - Run a search
//!
//! # Preferences summary
//! POST /preferences/use          - Personalization toggle
//! POST /preferences/disclosure   - Expand or collapse the summary
//!
//! # JSON API
//! GET   /api/preferences         - Preferences snapshot
//! PATCH /api/preferences         - Merge a partial update
//! ```

pub mod api;
pub mod home;
pub mod onboarding;
pub mod preferences;
pub mod search;

use axum::{
    Router,
    routing::{get, post},
};

use crate::error::AppError;
use crate::state::AppState;

/// Create the onboarding routes router.
pub fn onboarding_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(onboarding::show))
        .route("/gender", post(onboarding::select_gender))
        .route("/price", post(onboarding::select_price))
        .route("/styles/toggle", post(onboarding::toggle_style))
        .route("/styles/submit", post(onboarding::submit_styles))
        .route("/skip", post(onboarding::skip))
}

/// Create the preferences summary routes router.
pub fn preferences_routes() -> Router<AppState> {
    Router::new()
        .route("/use", post(preferences::set_use))
        .route("/disclosure", post(preferences::toggle_disclosure))
}

/// Create all session-scoped routes.
///
/// Every handler here extracts the session context, so the router must be
/// wrapped in the session context middleware.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(home::home))
        .nest("/onboarding", onboarding_routes())
        .route("/search", get(search::show).post(search::submit))
        .nest("/preferences", preferences_routes())
        .nest("/api", api::router())
        .fallback(not_found)
}

async fn not_found() -> AppError {
    AppError::NotFound("page".to_string())
}
