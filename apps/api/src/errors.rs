use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

use crate::pdf::PdfError;
use crate::personality::predictor::PredictError;

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
///
/// Bodies are plain text: the upload form is a browser page, not an API client.
#[derive(Debug, Error)]
pub enum AppError {
    /// Message is returned to the client verbatim.
    #[error("{0}")]
    Validation(String),

    #[error(transparent)]
    Pdf(#[from] PdfError),

    #[error(transparent)]
    Prediction(#[from] PredictError),

    #[error("Template error: {0}")]
    Template(#[from] askama::Error),

    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
            AppError::Pdf(e) => {
                tracing::warn!("PDF extraction failed: {e}");
                (
                    StatusCode::UNPROCESSABLE_ENTITY,
                    "Could not read text from the uploaded PDF".to_string(),
                )
            }
            AppError::Prediction(e) => {
                tracing::error!("Prediction error: {e}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Could not produce a prediction".to_string(),
                )
            }
            AppError::Template(e) => {
                tracing::error!("Template error: {e}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "An internal server error occurred".to_string(),
                )
            }
            AppError::Internal(e) => {
                tracing::error!("Internal error: {e:?}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "An internal server error occurred".to_string(),
                )
            }
        };

        (status, message).into_response()
    }
}
