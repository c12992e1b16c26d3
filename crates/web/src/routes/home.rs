//! Root route: picks onboarding or search.

use axum::response::Redirect;
use tracing::instrument;

use crate::middleware::SessionContextHandle;

/// Send the visitor to the survey until it is complete, then to search.
#[instrument(skip_all, fields(session_id = %ctx.id()))]
pub async fn home(ctx: SessionContextHandle) -> Redirect {
    if ctx.onboarding_complete() {
        Redirect::to("/search")
    } else {
        Redirect::to("/onboarding")
    }
}
