//! API models for the negotiated message resource.
//!
//! The same [`Message`] prototype is registered under every configured media
//! range. It renders itself as JSON for `application/json`, any `+json`
//! vendor type and `*/*`, and as `key: value` lines for `text/plain`:
//!
//! ```text
//! name: World
//! greeting: Hello
//! ```

use serde::{Deserialize, Serialize};

use crate::negotiation::{AcceptValue, ContentTypeParams, Representation, RepresentationError};

const TEXT_PLAIN_UTF_8: &str = "text/plain; charset=utf-8";

/// The negotiated resource served at `/message`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    pub name: String,
    pub greeting: String,
}

impl Default for Message {
    fn default() -> Self {
        Self {
            name: "World".to_string(),
            greeting: "Hello".to_string(),
        }
    }
}

/// Wire format selected for a media type
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Format {
    Json,
    Text,
}

impl Format {
    fn detect(type_: &str, subtype: &str, suffix: &str) -> Option<Self> {
        match (type_, subtype) {
            ("text", "plain") => Some(Format::Text),
            ("*", "*") | ("application", "json") => Some(Format::Json),
            _ if suffix == "json" => Some(Format::Json),
            _ => None,
        }
    }

    fn for_accept(accept: &AcceptValue) -> Result<Self, RepresentationError> {
        let range = &accept.media_range;
        Self::detect(range.type_(), range.subtype(), range.suffix())
            .ok_or_else(|| RepresentationError::UnsupportedMediaType(range.to_string()))
    }

    fn for_content_type(media_type: &str) -> Result<Self, RepresentationError> {
        let unsupported = || RepresentationError::UnsupportedMediaType(media_type.to_string());
        let parsed: mime::Mime = media_type.parse().map_err(|_| unsupported())?;
        let suffix = parsed.suffix().map(|s| s.as_str()).unwrap_or_default();

        match Self::detect(parsed.type_().as_str(), parsed.subtype().as_str(), suffix) {
            // wildcards describe what a client accepts, never what it sent
            Some(_) if parsed.type_() == mime::STAR => Err(unsupported()),
            Some(format) => Ok(format),
            None => Err(unsupported()),
        }
    }
}

impl Message {
    fn to_text(&self) -> String {
        format!("name: {}\ngreeting: {}\n", self.name, self.greeting)
    }

    fn from_text(body: &str) -> Result<Self, RepresentationError> {
        let mut name = None;
        let mut greeting = None;

        for line in body.lines().filter(|line| !line.trim().is_empty()) {
            let (key, value) = line
                .split_once(':')
                .ok_or_else(|| RepresentationError::Decode(format!("malformed line: {line:?}")))?;
            match key.trim() {
                "name" => name = Some(value.trim().to_string()),
                "greeting" => greeting = Some(value.trim().to_string()),
                other => {
                    return Err(RepresentationError::Decode(format!("unknown field: {other}")));
                }
            }
        }

        match (name, greeting) {
            (Some(name), Some(greeting)) => Ok(Self { name, greeting }),
            _ => Err(RepresentationError::Decode(
                "both name and greeting are required".to_string(),
            )),
        }
    }
}

impl Representation for Message {
    fn content_type(&self, accept: &AcceptValue) -> Result<String, RepresentationError> {
        let content_type = match Format::for_accept(accept)? {
            Format::Text => TEXT_PLAIN_UTF_8.to_string(),
            Format::Json if accept.media_range.is_wildcard() => {
                mime::APPLICATION_JSON.essence_str().to_string()
            }
            Format::Json => accept.media_range.to_string(),
        };
        Ok(content_type)
    }

    fn marshal(&self, accept: &AcceptValue) -> Result<Vec<u8>, RepresentationError> {
        match Format::for_accept(accept)? {
            Format::Text => Ok(self.to_text().into_bytes()),
            Format::Json if accept.params.contains_key("indent") => {
                Ok(serde_json::to_vec_pretty(self)?)
            }
            Format::Json => Ok(serde_json::to_vec(self)?),
        }
    }

    fn unmarshal(
        &mut self,
        media_type: &str,
        params: &ContentTypeParams,
        body: &[u8],
    ) -> Result<(), RepresentationError> {
        *self = match Format::for_content_type(media_type)? {
            Format::Json => serde_json::from_slice(body)?,
            Format::Text => {
                if let Some(charset) = params.get("charset") {
                    if !charset.eq_ignore_ascii_case("utf-8") {
                        return Err(RepresentationError::UnsupportedMediaType(format!(
                            "{media_type}; charset={charset}"
                        )));
                    }
                }
                let text = std::str::from_utf8(body)
                    .map_err(|err| RepresentationError::Decode(err.to_string()))?;
                Self::from_text(text)?
            }
        };
        Ok(())
    }
}

/// Error body returned by every failing endpoint
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub code: String,
    pub message: String,
}

/// Body of `GET /media-ranges`
#[derive(Debug, Serialize, Deserialize)]
pub struct MediaRangesResponse {
    pub media_ranges: Vec<String>,
}
