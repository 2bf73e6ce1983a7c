use std::num::ParseFloatError;

use thiserror::Error;

/// Grammar errors raised while parsing a single Accept value
#[derive(Debug, Clone, PartialEq, Error)]
pub enum AcceptError {
    #[error("invalid accept media range: {0:?}")]
    InvalidMediaRange(String),

    #[error("invalid accept parameter: {0:?}")]
    InvalidAcceptParam(String),

    #[error(transparent)]
    Quality(#[from] ParseFloatError),

    #[error("accept quality out of range: {0}")]
    QualityOutOfRange(f64),
}

/// Errors raised by a [`Representation`](super::Representation) while
/// rendering or decoding a body
#[derive(Debug, Error)]
pub enum RepresentationError {
    #[error("unsupported media type: {0}")]
    UnsupportedMediaType(String),

    #[error("encoding failed: {0}")]
    Encode(String),

    #[error("decoding failed: {0}")]
    Decode(String),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

/// Errors surfaced by registry lookups and body marshalling
#[derive(Debug, Error)]
pub enum NegotiationError {
    #[error(transparent)]
    Accept(#[from] AcceptError),

    #[error("no acceptable content type")]
    NoAcceptableContentType,

    #[error("no Content-Type header provided")]
    NoContentType,

    #[error(transparent)]
    Mime(#[from] mime::FromStrError),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Representation(#[from] RepresentationError),
}
