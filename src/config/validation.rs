use super::models::Config;
use crate::negotiation::{AcceptError, AcceptHeader, AcceptValue};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("default_accept '{value}' is not a valid Accept header: {source}")]
    InvalidDefaultAccept { value: String, source: AcceptError },

    #[error("media range '{value}' is invalid: {source}")]
    InvalidMediaRange { value: String, source: AcceptError },

    #[error("media range '{0}' must not carry parameters")]
    MediaRangeWithParams(String),

    #[error("No media ranges configured (at least one is required)")]
    NoMediaRanges,

    #[error("max_body_bytes must be positive")]
    InvalidMaxBodyBytes,
}

/// Validate the entire configuration
pub fn validate(config: &Config) -> Result<(), ValidationError> {
    validate_server(config)?;
    validate_negotiation(config)?;
    Ok(())
}

fn validate_server(config: &Config) -> Result<(), ValidationError> {
    if config.server.max_body_bytes.as_u64() == 0 {
        return Err(ValidationError::InvalidMaxBodyBytes);
    }
    Ok(())
}

/// Registry keys are matched literally against Accept values, so each one
/// must be a bare media range
fn validate_negotiation(config: &Config) -> Result<(), ValidationError> {
    let negotiation = &config.negotiation;

    AcceptHeader::parse(&negotiation.default_accept).map_err(|source| {
        ValidationError::InvalidDefaultAccept {
            value: negotiation.default_accept.clone(),
            source,
        }
    })?;

    if negotiation.media_ranges.is_empty() {
        return Err(ValidationError::NoMediaRanges);
    }

    for range in &negotiation.media_ranges {
        let parsed = AcceptValue::parse(range).map_err(|source| {
            ValidationError::InvalidMediaRange {
                value: range.clone(),
                source,
            }
        })?;

        if parsed.media_range != range.as_str() {
            return Err(ValidationError::MediaRangeWithParams(range.clone()));
        }
    }

    Ok(())
}
