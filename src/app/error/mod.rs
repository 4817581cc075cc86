use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;

use crate::dispatcher::DispatchError;

mod schema;

const DELIVERY_FAILED: &str = "Failed to send email. Please try again later.";

pub type AppResult<T, E = AppError> = std::result::Result<T, E>;

/// A common error type that can be used throughout the API.
///
/// Every variant is rendered as a `{ success: false, message, error? }` JSON body.
#[derive(thiserror::Error, Debug)]
pub enum AppError {
    #[error(transparent)]
    Dispatch(#[from] DispatchError),
    #[error("Not allowed by CORS")]
    OriginRejected,
    #[error(transparent)]
    UnexpectedError(#[from] anyhow::Error),
}

impl AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            Self::Dispatch(DispatchError::Validation(_)) => StatusCode::BAD_REQUEST,
            Self::Dispatch(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::OriginRejected => StatusCode::FORBIDDEN,
            Self::UnexpectedError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let body = match self {
            Self::Dispatch(DispatchError::Validation(ref e)) => schema::Error {
                success: false,
                message: e.to_string(),
                error: None,
            },
            Self::Dispatch(ref e) => {
                tracing::error!("{:?}", e);
                schema::Error {
                    success: false,
                    message: DELIVERY_FAILED.to_owned(),
                    error: Some(e.to_string()),
                }
            }
            Self::OriginRejected => schema::Error {
                success: false,
                message: self.to_string(),
                error: None,
            },
            Self::UnexpectedError(ref e) => {
                tracing::error!("{:?}", e);
                schema::Error {
                    success: false,
                    message: "Unexpected error".to_owned(),
                    error: None,
                }
            }
        };

        (self.status_code(), Json(body)).into_response()
    }
}
