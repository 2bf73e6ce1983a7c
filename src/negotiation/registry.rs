use std::collections::HashMap;

use super::accept::AcceptValue;
use super::error::NegotiationError;
use super::header::AcceptHeader;
use super::representation::{ContentTypeParams, Representation};

/// Result of a successful negotiation
#[derive(Debug, Clone)]
pub struct Negotiated {
    /// Fresh copy of the registered prototype
    pub representation: Box<dyn Representation>,
    /// The ranked Accept value that matched a registry key
    pub accept: AcceptValue,
}

/// Registry mapping exact media-range keys to representation prototypes.
///
/// Keys are matched literally, so `*/*` only matches an Accept value that is
/// itself `*/*`. Registration takes `&mut self`: build the registry at
/// startup and share it behind an `Arc` once traffic starts.
#[derive(Debug, Clone, Default)]
pub struct Registry {
    representations: HashMap<String, Box<dyn Representation>>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store `prototype` under the literal `media_range` key, replacing any
    /// previous entry. The registry owns its copy of the prototype.
    pub fn register<R>(&mut self, media_range: impl Into<String>, prototype: R)
    where
        R: Representation + 'static,
    {
        let media_range = media_range.into();
        tracing::debug!(%media_range, "Representation registered");
        self.representations.insert(media_range, Box::new(prototype));
    }

    /// Pick the representation for the client's most preferred Accept value
    /// that has a registered key
    pub fn negotiate(&self, header: &str) -> Result<Negotiated, NegotiationError> {
        let ranked = AcceptHeader::parse(header)?;

        for accept in ranked {
            if let Some(prototype) = self.representations.get(accept.media_range.as_str()) {
                tracing::debug!(
                    media_range = %accept.media_range,
                    quality = accept.quality,
                    "Accept value negotiated"
                );
                return Ok(Negotiated {
                    representation: prototype.clone(),
                    accept,
                });
            }
        }

        Err(NegotiationError::NoAcceptableContentType)
    }

    /// Find the representation registered for a `Content-Type` header,
    /// returning it with the header's parameters
    pub fn resolve_content_type(
        &self,
        header: &str,
    ) -> Result<(Box<dyn Representation>, ContentTypeParams), NegotiationError> {
        let (media_type, params) = parse_media_type(header)?;

        self.representations
            .get(&media_type)
            .map(|prototype| (prototype.clone(), params))
            .ok_or(NegotiationError::NoAcceptableContentType)
    }

    pub fn contains(&self, media_range: &str) -> bool {
        self.representations.contains_key(media_range)
    }

    /// Registered keys in sorted order
    pub fn media_ranges(&self) -> Vec<&str> {
        let mut keys: Vec<&str> = self.representations.keys().map(String::as_str).collect();
        keys.sort_unstable();
        keys
    }

    pub fn len(&self) -> usize {
        self.representations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.representations.is_empty()
    }
}

/// Split a `Content-Type` header into its bare media type and parameters
pub fn parse_media_type(header: &str) -> Result<(String, ContentTypeParams), NegotiationError> {
    let parsed: mime::Mime = header.parse()?;
    let params = parsed
        .params()
        .map(|(name, value)| (name.as_str().to_string(), value.as_str().to_string()))
        .collect();

    Ok((parsed.essence_str().to_string(), params))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::negotiation::{AcceptError, Json};
    use serde::{Deserialize, Serialize};

    const APP_JSON: &str = "application/json";

    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
    struct Generic {
        x: i32,
    }

    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
    struct Specific {
        x: i32,
        y: i32,
    }

    fn render(negotiated: &Negotiated) -> String {
        let body = negotiated
            .representation
            .marshal(&AcceptValue::parse(APP_JSON).unwrap())
            .unwrap();
        String::from_utf8(body).unwrap()
    }

    fn test_registry() -> Registry {
        let mut registry = Registry::new();
        registry.register(APP_JSON, Json::new(Generic { x: 1 }));
        registry.register(
            "application/vnd.dyn.zone+json",
            Json::new(Specific { x: 2, y: 2 }),
        );
        registry.register("application/xhtml+xml", Json::new(Specific { x: 3, y: 3 }));
        registry.register("*/*", Json::new(Generic { x: 4 }));
        registry
    }

    #[test]
    fn test_negotiate_exact_match() {
        let negotiated = test_registry().negotiate(APP_JSON).unwrap();
        assert_eq!(negotiated.accept.media_range, APP_JSON);
        assert_eq!(render(&negotiated), r#"{"x":1}"#);
    }

    #[test]
    fn test_negotiate_no_match() {
        let err = test_registry().negotiate("application/xml").unwrap_err();
        assert!(matches!(err, NegotiationError::NoAcceptableContentType));
    }

    #[test]
    fn test_negotiate_parse_error() {
        let err = test_registry().negotiate("application/json;foo").unwrap_err();
        assert!(matches!(
            err,
            NegotiationError::Accept(AcceptError::InvalidAcceptParam(_))
        ));
    }

    #[test]
    fn test_negotiate_prefers_params() {
        let negotiated = test_registry()
            .negotiate("*/*,application/json,application/vnd.dyn.zone+json;format=foo,application/*")
            .unwrap();
        assert_eq!(negotiated.accept.media_range, "application/vnd.dyn.zone+json");
        assert_eq!(negotiated.accept.quality, 1.0);
        assert_eq!(render(&negotiated), r#"{"x":2,"y":2}"#);
    }

    #[test]
    fn test_negotiate_browser_header() {
        let negotiated = test_registry()
            .negotiate("text/html, application/xhtml+xml, application/xml;q=0.9, image/webp, */*;q=0.8")
            .unwrap();
        assert_eq!(negotiated.accept.media_range, "application/xhtml+xml");
        assert_eq!(render(&negotiated), r#"{"x":3,"y":3}"#);
    }

    #[test]
    fn test_negotiate_wildcard_key_is_literal() {
        let mut registry = Registry::new();
        registry.register(APP_JSON, Json::new(Generic { x: 1 }));
        registry.register("*/*", Json::new(Generic { x: 4 }));

        let negotiated = registry
            .negotiate("text/html,application/xhtml+xml,application/xml;q=0.9,image/webp,*/*;q=0.8")
            .unwrap();
        assert_eq!(negotiated.accept.media_range, "*/*");
        assert_eq!(negotiated.accept.quality, 0.8);
        assert_eq!(render(&negotiated), r#"{"x":4}"#);

        // a concrete type is not caught by the */* key
        let err = registry.negotiate("text/html").unwrap_err();
        assert!(matches!(err, NegotiationError::NoAcceptableContentType));
    }

    #[test]
    fn test_negotiate_empty_registry() {
        let registry = Registry::new();
        for header in ["application/json", "*/*", "text/html;q=0.1, image/*"] {
            let err = registry.negotiate(header).unwrap_err();
            assert!(matches!(err, NegotiationError::NoAcceptableContentType));
        }
    }

    #[test]
    fn test_register_isolates_prototype() {
        let mut original = Json::new(Generic { x: 1 });
        let mut registry = Registry::new();
        registry.register(APP_JSON, original.clone());
        original.value.x = 100;

        let mut first = registry.negotiate(APP_JSON).unwrap();
        assert_eq!(render(&first), r#"{"x":1}"#);

        first
            .representation
            .unmarshal(APP_JSON, &ContentTypeParams::new(), br#"{"x":7}"#)
            .unwrap();
        let second = registry.negotiate(APP_JSON).unwrap();
        assert_eq!(render(&second), r#"{"x":1}"#);
    }

    #[test]
    fn test_resolve_content_type() {
        let registry = test_registry();
        let (representation, params) = registry
            .resolve_content_type("application/json; charset=utf-8")
            .unwrap();
        assert_eq!(params.get("charset").map(String::as_str), Some("utf-8"));
        let body = representation
            .marshal(&AcceptValue::parse(APP_JSON).unwrap())
            .unwrap();
        assert_eq!(body, br#"{"x":1}"#);

        let err = registry.resolve_content_type("application/xml").unwrap_err();
        assert!(matches!(err, NegotiationError::NoAcceptableContentType));

        let err = registry
            .resolve_content_type("application/xml/json/ foobar")
            .unwrap_err();
        assert!(matches!(err, NegotiationError::Mime(_)));
    }

    #[test]
    fn test_media_ranges() {
        let registry = test_registry();
        assert_eq!(registry.len(), 4);
        assert!(registry.contains("*/*"));
        assert!(!registry.contains("text/*"));
        assert_eq!(
            registry.media_ranges(),
            vec![
                "*/*",
                "application/json",
                "application/vnd.dyn.zone+json",
                "application/xhtml+xml",
            ]
        );
    }
}
