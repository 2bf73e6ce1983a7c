//! API utility functions
//!
//! Pure helpers for pulling negotiation inputs out of an HTTP request.

use axum::http::{HeaderMap, HeaderName, header};
use http_body_util::LengthLimitError;

use crate::api::error::ApiError;
use crate::negotiation::NegotiationError;

type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Header value as a string; missing or non-visible-ASCII values are `None`
pub fn header_str<'a>(headers: &'a HeaderMap, name: HeaderName) -> Option<&'a str> {
    headers.get(name).and_then(|value| value.to_str().ok())
}

/// The request's `Accept` header, or `default` when absent or blank
pub fn accept_header<'a>(headers: &'a HeaderMap, default: &'a str) -> &'a str {
    header_str(headers, header::ACCEPT)
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .unwrap_or(default)
}

/// Map an error from collecting a size-limited body.
///
/// Hitting the limit is `PayloadTooLarge`; anything else is a read failure.
pub fn body_read_error(err: BoxError, max_size: usize) -> ApiError {
    if err.downcast_ref::<LengthLimitError>().is_some() {
        return ApiError::PayloadTooLarge(max_size);
    }
    NegotiationError::Io(std::io::Error::other(err)).into()
}
