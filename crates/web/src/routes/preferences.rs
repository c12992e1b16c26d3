//! Preferences summary control handlers.

use axum::{Form, response::Redirect};
use serde::Deserialize;
use tracing::instrument;

use crate::middleware::SessionContextHandle;

/// Checkbox form; browsers omit unchecked boxes.
#[derive(Debug, Deserialize)]
pub struct UsePreferencesForm {
    #[serde(default)]
    pub enabled: Option<String>,
}

/// Turn personalization on or off for this session's searches.
#[instrument(skip(ctx), fields(session_id = %ctx.id()))]
pub async fn set_use(
    ctx: SessionContextHandle,
    Form(form): Form<UsePreferencesForm>,
) -> Redirect {
    let enabled = form.enabled.is_some();
    ctx.search().set_use_preferences(enabled);
    tracing::debug!(enabled, "Personalization toggled");
    Redirect::to("/search")
}

/// Expand or collapse the summary.
#[instrument(skip_all, fields(session_id = %ctx.id()))]
pub async fn toggle_disclosure(ctx: SessionContextHandle) -> Redirect {
    let open = ctx.search().toggle_summary();
    tracing::debug!(open, "Preferences summary toggled");
    Redirect::to("/search")
}
