use axum::{Json, http::StatusCode, response::IntoResponse};
use thiserror::Error;

use super::models::ErrorResponse;
use crate::negotiation::{NegotiationError, RepresentationError};

#[derive(Debug, Error)]
pub enum ApiError {
    #[error(transparent)]
    Negotiation(#[from] NegotiationError),
    #[error("payload exceeds the {0} byte limit")]
    PayloadTooLarge(usize),
    #[error("internal error: {0}")]
    Internal(String),
}

impl ApiError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::Negotiation(err) => match err {
                NegotiationError::NoAcceptableContentType => StatusCode::NOT_ACCEPTABLE,
                NegotiationError::NoContentType
                | NegotiationError::Accept(_)
                | NegotiationError::Mime(_)
                | NegotiationError::Io(_) => StatusCode::BAD_REQUEST,
                NegotiationError::Representation(err) => match err {
                    RepresentationError::UnsupportedMediaType(_) => {
                        StatusCode::UNSUPPORTED_MEDIA_TYPE
                    }
                    RepresentationError::Decode(_) | RepresentationError::Json(_) => {
                        StatusCode::BAD_REQUEST
                    }
                    RepresentationError::Encode(_) => StatusCode::INTERNAL_SERVER_ERROR,
                },
            },
            ApiError::PayloadTooLarge(_) => StatusCode::PAYLOAD_TOO_LARGE,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            ApiError::Negotiation(err) => match err {
                NegotiationError::NoAcceptableContentType => "NOT_ACCEPTABLE",
                NegotiationError::NoContentType => "MISSING_CONTENT_TYPE",
                NegotiationError::Accept(_) => "INVALID_ACCEPT",
                NegotiationError::Mime(_) => "INVALID_CONTENT_TYPE",
                NegotiationError::Io(_) => "BODY_READ_FAILED",
                NegotiationError::Representation(RepresentationError::UnsupportedMediaType(
                    _,
                )) => "UNSUPPORTED_MEDIA_TYPE",
                NegotiationError::Representation(RepresentationError::Encode(_)) => {
                    "ENCODE_FAILED"
                }
                NegotiationError::Representation(_) => "INVALID_PAYLOAD",
            },
            ApiError::PayloadTooLarge(_) => "PAYLOAD_TOO_LARGE",
            ApiError::Internal(_) => "INTERNAL_ERROR",
        }
    }

    pub fn is_not_acceptable(&self) -> bool {
        matches!(
            self,
            ApiError::Negotiation(NegotiationError::NoAcceptableContentType)
        )
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        let status = self.status_code();
        let body = ErrorResponse {
            code: self.code().to_string(),
            message: self.to_string(),
        };

        (status, Json(body)).into_response()
    }
}

impl From<crate::negotiation::AcceptError> for ApiError {
    fn from(value: crate::negotiation::AcceptError) -> Self {
        ApiError::Negotiation(value.into())
    }
}
