use std::cmp::Ordering;
use std::ops::Deref;
use std::str::FromStr;

use super::accept::AcceptValue;
use super::error::AcceptError;

/// A full `Accept` header, ranked from most to least preferred.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct AcceptHeader(Vec<AcceptValue>);

impl AcceptHeader {
    /// Parse every comma-separated value of `header` and rank the result.
    ///
    /// The first malformed value aborts the whole parse. Values with equal
    /// quality keep the order in which they appeared in the header.
    pub fn parse(header: &str) -> Result<Self, AcceptError> {
        let values = header
            .split(',')
            .map(|value| AcceptValue::parse(value.trim()))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self::ranked(values))
    }

    /// Rank already parsed values by descending quality
    pub fn ranked(mut values: Vec<AcceptValue>) -> Self {
        // sort_by is stable; parsed qualities are never NaN
        values.sort_by(|a, b| {
            b.quality
                .partial_cmp(&a.quality)
                .unwrap_or(Ordering::Equal)
        });
        Self(values)
    }

    pub fn values(&self) -> &[AcceptValue] {
        &self.0
    }
}

impl Deref for AcceptHeader {
    type Target = [AcceptValue];

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl IntoIterator for AcceptHeader {
    type Item = AcceptValue;
    type IntoIter = std::vec::IntoIter<AcceptValue>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a AcceptHeader {
    type Item = &'a AcceptValue;
    type IntoIter = std::slice::Iter<'a, AcceptValue>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl FromStr for AcceptHeader {
    type Err = AcceptError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

/// Parse and rank an `Accept` header
pub fn parse_header(header: &str) -> Result<AcceptHeader, AcceptError> {
    AcceptHeader::parse(header)
}
