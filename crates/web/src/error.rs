//! Unified error handling with Sentry integration.
//!
//! Provides a unified `AppError` type that captures server errors to Sentry
//! before responding to the client. Route handlers return `Result<T, AppError>`.
//!
//! Search service failures never reach this type: the search screen logs
//! them and keeps its previous results.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use fashion_assistant_core::{OnboardingError, UnknownChoice};
use thiserror::Error;

use crate::middleware::ContextError;

/// Application-level error type.
#[derive(Debug, Error)]
pub enum AppError {
    /// Session context misuse or session store failure.
    #[error("Session context error: {0}")]
    Context(#[from] ContextError),

    /// Onboarding action not allowed in the survey's current state.
    #[error("Onboarding error: {0}")]
    Onboarding(#[from] OnboardingError),

    /// A form carried a value that is not one of the offered choices.
    #[error("Bad request: {0}")]
    UnknownChoice(#[from] UnknownChoice),

    /// Bad request from client.
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// Resource not found.
    #[error("Not found: {0}")]
    NotFound(String),

    /// Internal server error.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        // Capture server errors to Sentry
        if matches!(self, Self::Context(_) | Self::Internal(_)) {
            let event_id = sentry::capture_error(&self);
            tracing::error!(
                error = %self,
                sentry_event_id = %event_id,
                "Request error"
            );
        }

        let status = match &self {
            Self::Context(_) | Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::Onboarding(_) => StatusCode::CONFLICT,
            Self::UnknownChoice(_) | Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
        };

        // Don't expose internal error details to clients
        let message = match &self {
            Self::Context(_) | Self::Internal(_) => "Internal server error".to_string(),
            Self::Onboarding(err) => err.to_string(),
            _ => self.to_string(),
        };

        (status, message).into_response()
    }
}

/// Result type alias for `AppError`.
pub type Result<T> = std::result::Result<T, AppError>;

/// Add a breadcrumb for user actions.
///
/// Breadcrumbs appear in Sentry error reports to show the trail of user actions
/// leading up to an error.
pub fn add_breadcrumb(category: &str, message: &str, data: Option<&[(&str, &str)]>) {
    let mut breadcrumb = sentry::Breadcrumb {
        category: Some(category.to_string()),
        message: Some(message.to_string()),
        level: sentry::Level::Info,
        ..Default::default()
    };

    if let Some(pairs) = data {
        for (key, value) in pairs {
            breadcrumb.data.insert(
                (*key).to_string(),
                serde_json::Value::String((*value).to_string()),
            );
        }
    }

    sentry::add_breadcrumb(breadcrumb);
}

#[cfg(test)]
mod tests {
    use fashion_assistant_core::OnboardingStep;

    use super::*;

    fn get_status(err: AppError) -> StatusCode {
        err.into_response().status()
    }

    #[test]
    fn test_app_error_display() {
        let err = AppError::NotFound("page".to_string());
        assert_eq!(err.to_string(), "Not found: page");

        let err = AppError::BadRequest("invalid input".to_string());
        assert_eq!(err.to_string(), "Bad request: invalid input");
    }

    #[test]
    fn test_app_error_status_codes() {
        assert_eq!(
            get_status(AppError::Context(ContextError::Missing)),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(
            get_status(AppError::Onboarding(OnboardingError::AlreadyComplete)),
            StatusCode::CONFLICT
        );
        assert_eq!(
            get_status(AppError::Onboarding(OnboardingError::WrongStep {
                expected: OnboardingStep::Price,
                actual: OnboardingStep::Styles,
            })),
            StatusCode::CONFLICT
        );
        assert_eq!(
            get_status(AppError::UnknownChoice(UnknownChoice {
                kind: "gender",
                value: "Kids".to_string(),
            })),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            get_status(AppError::NotFound("test".to_string())),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            get_status(AppError::Internal("test".to_string())),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
