use std::fmt;

/// Wildcard token accepted for either half of a media range.
pub const WILDCARD: &str = "*";

/// A single `type/subtype[+suffix]` token taken from an Accept value.
///
/// The accessors never fail: a token without a `/` reports empty parts, and
/// the parser rejects such tokens before a `MediaRange` is ever built from
/// header input.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MediaRange(String);

impl MediaRange {
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Type of the range, e.g. `application` for `application/json`
    pub fn type_(&self) -> &str {
        match self.0.find('/') {
            Some(slash) => &self.0[..slash],
            None => "",
        }
    }

    /// Subtype of the range including any structured suffix, e.g.
    /// `resource+json` for `application/resource+json;indent=4`
    pub fn subtype(&self) -> &str {
        match self.subtype_window() {
            Some((start, end)) => &self.0[start..end],
            None => "",
        }
    }

    /// Structured syntax suffix as defined by RFC 6839, e.g. `json` for
    /// `application/resource+json`. Empty when the subtype carries none.
    pub fn suffix(&self) -> &str {
        let Some((start, end)) = self.subtype_window() else {
            return "";
        };
        let subtype = &self.0[start..end];
        match subtype.rfind('+') {
            Some(plus) => &subtype[plus + 1..],
            None => "",
        }
    }

    pub fn is_wildcard(&self) -> bool {
        self.type_() == WILDCARD && self.subtype() == WILDCARD
    }

    /// Byte bounds of the subtype: after the first `/`, up to the first `;`
    fn subtype_window(&self) -> Option<(usize, usize)> {
        let slash = self.0.find('/')?;
        match self.0.find(';') {
            Some(semi) if semi < slash => None,
            Some(semi) => Some((slash + 1, semi)),
            None => Some((slash + 1, self.0.len())),
        }
    }
}

impl fmt::Display for MediaRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for MediaRange {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl From<&str> for MediaRange {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for MediaRange {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl PartialEq<str> for MediaRange {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl PartialEq<&str> for MediaRange {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}
