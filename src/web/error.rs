//! HTML error responses for browser routes.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use tracing::{error, warn};

use crate::error::AppError;
use crate::web::handlers::not_found::NotFoundTemplate;

/// Wraps an [`AppError`] for routes that answer with HTML.
///
/// `NotFound` renders the 404 page. Everything else becomes a bare 500 with no
/// internal detail in the body.
#[derive(Debug)]
pub struct WebError(pub AppError);

impl From<AppError> for WebError {
    fn from(e: AppError) -> Self {
        Self(e)
    }
}

impl IntoResponse for WebError {
    fn into_response(self) -> Response {
        match self.0 {
            AppError::NotFound { message, details } => {
                warn!(error = %message, details = %details, "Not found");
                (StatusCode::NOT_FOUND, NotFoundTemplate {}).into_response()
            }
            other => {
                error!(error = %other, details = %error_details(&other), "Request failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    StatusCode::INTERNAL_SERVER_ERROR
                        .canonical_reason()
                        .unwrap_or("Internal Server Error"),
                )
                    .into_response()
            }
        }
    }
}

fn error_details(e: &AppError) -> &serde_json::Value {
    match e {
        AppError::Validation { details, .. }
        | AppError::NotFound { details, .. }
        | AppError::Conflict { details, .. }
        | AppError::Internal { details, .. } => details,
    }
}
