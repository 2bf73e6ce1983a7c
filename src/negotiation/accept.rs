use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use super::error::AcceptError;
use super::media_range::{MediaRange, WILDCARD};

/// Default quality of a range carrying accept-params, e.g. `text/html;level=1`
pub const ACCEPT_PARAMS_QUALITY: f64 = 1.0;

/// Default quality of a concrete range, e.g. `text/html`
pub const MEDIA_RANGE_SUBTYPE_QUALITY: f64 = 0.9;

/// Default quality of a range with a wildcard subtype, e.g. `text/*`
pub const MEDIA_RANGE_WILDCARD_SUBTYPE_QUALITY: f64 = 0.8;

/// Default quality of the full wildcard `*/*`
pub const MEDIA_RANGE_WILDCARD_QUALITY: f64 = 0.7;

const QUALITY_PARAM: &str = "q";

/// Parameters attached to a media range, keyed by name
pub type MediaParams = BTreeMap<String, String>;

/// One comma-separated entry of an `Accept` header.
///
/// Parameters that appear before the `q` parameter are accept-params, the
/// ones after it are accept-extensions. `quality` is always a final value:
/// when the entry has no `q` it is defaulted from the shape of the range.
#[derive(Debug, Clone, PartialEq)]
pub struct AcceptValue {
    pub media_range: MediaRange,
    pub params: MediaParams,
    pub quality: f64,
    pub extensions: MediaParams,
}

impl AcceptValue {
    /// Parse a single Accept value such as `application/json;indent=4;q=0.7`
    pub fn parse(raw: &str) -> Result<Self, AcceptError> {
        let (range, tail) = match raw.split_once(';') {
            Some((range, tail)) => (range, Some(tail)),
            None => (raw, None),
        };

        let range = range.trim();
        if !range.contains('/') {
            return Err(AcceptError::InvalidMediaRange(raw.to_string()));
        }

        let mut params = MediaParams::new();
        let mut extensions = MediaParams::new();
        let mut quality = None;

        for segment in tail.into_iter().flat_map(|tail| tail.split(';')) {
            let (key, value) = split_param(segment)?;

            if quality.is_none() && key == QUALITY_PARAM {
                quality = Some(parse_quality(value)?);
            } else if quality.is_some() {
                extensions.insert(key.to_string(), value.to_string());
            } else {
                params.insert(key.to_string(), value.to_string());
            }
        }

        let media_range = MediaRange::new(range);
        let quality =
            quality.unwrap_or_else(|| default_quality(&media_range, !params.is_empty()));

        Ok(Self {
            media_range,
            params,
            quality,
            extensions,
        })
    }
}

impl FromStr for AcceptValue {
    type Err = AcceptError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for AcceptValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.media_range)?;
        for (key, value) in &self.params {
            write!(f, ";{key}={value}")?;
        }
        write!(f, ";q={}", self.quality)?;
        for (key, value) in &self.extensions {
            write!(f, ";{key}={value}")?;
        }
        Ok(())
    }
}

/// Quality assigned to a value that carries no explicit `q`.
///
/// First matching rule wins: any params, then a concrete subtype, then a
/// wildcard subtype under a concrete type, then the full wildcard.
pub fn default_quality(range: &MediaRange, has_params: bool) -> f64 {
    if has_params {
        ACCEPT_PARAMS_QUALITY
    } else if range.subtype() != WILDCARD {
        MEDIA_RANGE_SUBTYPE_QUALITY
    } else if range.type_() != WILDCARD {
        MEDIA_RANGE_WILDCARD_SUBTYPE_QUALITY
    } else {
        MEDIA_RANGE_WILDCARD_QUALITY
    }
}

fn split_param(segment: &str) -> Result<(&str, &str), AcceptError> {
    let segment = segment.trim();
    let mut parts = segment.split('=');

    match (parts.next(), parts.next(), parts.next()) {
        (Some(key), Some(value), None) if !key.trim().is_empty() => {
            Ok((key.trim(), value.trim()))
        }
        _ => Err(AcceptError::InvalidAcceptParam(segment.to_string())),
    }
}

fn parse_quality(raw: &str) -> Result<f64, AcceptError> {
    let quality: f64 = raw.parse()?;
    if !(0.0..=1.0).contains(&quality) {
        return Err(AcceptError::QualityOutOfRange(quality));
    }
    Ok(quality)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params(pairs: &[(&str, &str)]) -> MediaParams {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_parse_plain_range() {
        let value = AcceptValue::parse("application/json").unwrap();
        assert_eq!(value.media_range, "application/json");
        assert_eq!(value.quality, 0.9);
        assert!(value.params.is_empty());
        assert!(value.extensions.is_empty());
    }

    #[test]
    fn test_bad_media_range() {
        let ok = [
            "application/json",
            "application/*",
            "*/*",
            "application/json;indent=4",
            "application/resource+json;indent=4",
        ];
        for raw in ok {
            assert!(AcceptValue::parse(raw).is_ok(), "{raw} should parse");
        }

        assert_eq!(
            AcceptValue::parse("application resource"),
            Err(AcceptError::InvalidMediaRange("application resource".into()))
        );
        assert!(matches!(
            AcceptValue::parse("text;charset=a/b"),
            Err(AcceptError::InvalidMediaRange(_))
        ));
    }

    #[test]
    fn test_accept_params() {
        let value = AcceptValue::parse("application/json;indent=4; charset=utf8").unwrap();
        assert_eq!(value.params, params(&[("indent", "4"), ("charset", "utf8")]));
        assert_eq!(value.quality, 1.0);
    }

    #[test]
    fn test_bad_params() {
        assert!(AcceptValue::parse("application/json;q=0.3").is_ok());
        assert!(AcceptValue::parse("application/json;foo=bar").is_ok());
        assert!(AcceptValue::parse("application/json;foo=").is_ok());

        for raw in [
            "application/json;foobar",
            "application/json;a=b=c",
            "application/json;=value",
            "application/json;",
        ] {
            assert!(
                matches!(AcceptValue::parse(raw), Err(AcceptError::InvalidAcceptParam(_))),
                "{raw} should be rejected"
            );
        }
    }

    #[test]
    fn test_explicit_quality() {
        let cases = [
            ("application/json;q=0.3", 0.3),
            ("application/json;indent=4;q=0.7", 0.7),
            ("application/json;indent=4; q=0.4", 0.4),
            ("application/json;q=0", 0.0),
            ("application/json;q=1", 1.0),
        ];
        for (raw, expected) in cases {
            assert_eq!(AcceptValue::parse(raw).unwrap().quality, expected, "{raw}");
        }
    }

    #[test]
    fn test_default_quality() {
        let cases = [
            ("application/json", 0.9),
            ("application/json;indent=4", 1.0),
            ("application/*", 0.8),
            ("*/*", 0.7),
            ("*/*;level=1", 1.0),
            ("*/json", 0.9),
        ];
        for (raw, expected) in cases {
            assert_eq!(AcceptValue::parse(raw).unwrap().quality, expected, "{raw}");
        }
    }

    #[test]
    fn test_default_quality_is_stable() {
        for raw in ["text/*", "*/*", "text/html;level=2", "image/png"] {
            let first = AcceptValue::parse(raw).unwrap().quality;
            let second = AcceptValue::parse(raw).unwrap().quality;
            assert_eq!(first, second);
        }
    }

    #[test]
    fn test_extensions_follow_quality() {
        let value = AcceptValue::parse("application/json;indent=4;q=0.7;version=2").unwrap();
        assert_eq!(value.quality, 0.7);
        assert_eq!(value.params, params(&[("indent", "4")]));
        assert_eq!(value.extensions, params(&[("version", "2")]));
    }

    #[test]
    fn test_first_quality_wins() {
        let value = AcceptValue::parse("text/html;q=0.2;q=0.9").unwrap();
        assert_eq!(value.quality, 0.2);
        assert_eq!(value.extensions, params(&[("q", "0.9")]));
    }

    #[test]
    fn test_quality_key_is_case_sensitive() {
        let value = AcceptValue::parse("text/html;Q=0.5").unwrap();
        assert_eq!(value.quality, 1.0);
        assert_eq!(value.params, params(&[("Q", "0.5")]));
        assert!(value.extensions.is_empty());

        let value = AcceptValue::parse("text/html;Q=0.5;q=0.2;level=1").unwrap();
        assert_eq!(value.quality, 0.2);
        assert_eq!(value.params, params(&[("Q", "0.5")]));
        assert_eq!(value.extensions, params(&[("level", "1")]));
    }

    #[test]
    fn test_invalid_quality() {
        let err = AcceptValue::parse("application/json;q=foobar").unwrap_err();
        let expected = "foobar".parse::<f64>().unwrap_err();
        assert_eq!(err, AcceptError::Quality(expected.clone()));
        assert_eq!(err.to_string(), expected.to_string());

        assert_eq!(
            AcceptValue::parse("application/json;q=1.5"),
            Err(AcceptError::QualityOutOfRange(1.5))
        );
        assert!(matches!(
            AcceptValue::parse("application/json;q=NaN"),
            Err(AcceptError::QualityOutOfRange(_))
        ));
    }

    #[test]
    fn test_display() {
        let value = AcceptValue::parse("application/json;indent=4;q=0.7;version=2").unwrap();
        assert_eq!(value.to_string(), "application/json;indent=4;q=0.7;version=2");
    }
}
