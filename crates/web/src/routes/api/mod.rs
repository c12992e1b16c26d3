//! JSON API routes.

pub mod preferences;

use axum::{Router, routing::get};

use crate::state::AppState;

/// Build the `/api` router.
pub fn router() -> Router<AppState> {
    Router::new().route(
        "/preferences",
        get(preferences::get_preferences).patch(preferences::update_preferences),
    )
}
