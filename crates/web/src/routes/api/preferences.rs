//! Preferences store over JSON.

use axum::Json;
use fashion_assistant_core::{PreferencesUpdate, UserPreferences};
use tracing::instrument;

use crate::middleware::SessionContextHandle;

/// Current preferences for this session.
#[instrument(skip_all, fields(session_id = %ctx.id()))]
pub async fn get_preferences(ctx: SessionContextHandle) -> Json<UserPreferences> {
    Json(ctx.preferences().get_preferences())
}

/// Merge the given fields into this session's preferences.
///
/// Absent fields are left unchanged. Returns the merged snapshot.
#[instrument(skip(ctx), fields(session_id = %ctx.id()))]
pub async fn update_preferences(
    ctx: SessionContextHandle,
    Json(update): Json<PreferencesUpdate>,
) -> Json<UserPreferences> {
    let store = ctx.preferences();
    store.update_preferences(update);
    Json(store.get_preferences())
}
