//! Session context provider and extractor.
//!
//! [`session_context_middleware`] is the provider: it maps the session
//! cookie to a [`SessionContext`] and attaches it to the request. Handlers
//! take a [`SessionContextHandle`] to reach the preferences, the onboarding
//! survey and the search screen.
//!
//! A handler that asks for the handle on a route the provider does not wrap
//! is a wiring bug. The extractor fails the request with a 500 and logs an
//! error instead of handing out a default context.

use std::ops::Deref;
use std::sync::Arc;

use axum::{
    extract::{FromRequestParts, Request, State},
    http::request::Parts,
    middleware::Next,
    response::{IntoResponse, Response},
};
use thiserror::Error;
use tower_sessions::Session;
use uuid::Uuid;

use crate::assistant::SessionContext;
use crate::error::AppError;
use crate::state::AppState;

/// Session key holding the context id.
pub const CONTEXT_ID_KEY: &str = "context_id";

/// Misuse of the session context.
#[derive(Debug, Error)]
pub enum ContextError {
    /// The session layer does not wrap this route.
    #[error("no session on request; is SessionManagerLayer installed?")]
    NoSession,

    /// The context provider does not wrap this route.
    #[error("session context accessed outside of session_context_middleware")]
    Missing,

    /// The session store failed.
    #[error("session store error: {0}")]
    Session(#[from] tower_sessions::session::Error),
}

/// Handle to the current session's [`SessionContext`].
///
/// # Example
///
/// ```rust,ignore
/// async fn handler(ctx: SessionContextHandle) -> impl IntoResponse {
///     let prefs = ctx.preferences().get_preferences();
///     format!("gender: {}", prefs.user_gender)
/// }
/// ```
#[derive(Clone, Debug)]
pub struct SessionContextHandle(pub Arc<SessionContext>);

impl Deref for SessionContextHandle {
    type Target = SessionContext;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl<S> FromRequestParts<S> for SessionContextHandle
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<Self>()
            .cloned()
            .ok_or_else(|| AppError::from(ContextError::Missing))
    }
}

/// Attach the session's context to the request, creating it on first visit.
pub async fn session_context_middleware(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Response {
    let Some(session) = request.extensions().get::<Session>().cloned() else {
        return AppError::from(ContextError::NoSession).into_response();
    };

    let id = match context_id(&session).await {
        Ok(id) => id,
        Err(err) => return AppError::from(err).into_response(),
    };

    tracing::Span::current().record("session_id", tracing::field::display(id));

    let context = state.contexts().get_or_create(id).await;
    request.extensions_mut().insert(SessionContextHandle(context));

    next.run(request).await
}

/// The context id stored in `session`, assigning one if absent.
async fn context_id(session: &Session) -> Result<Uuid, ContextError> {
    if let Some(id) = session.get::<Uuid>(CONTEXT_ID_KEY).await? {
        return Ok(id);
    }

    let id = Uuid::new_v4();
    session.insert(CONTEXT_ID_KEY, id).await?;
    Ok(id)
}
