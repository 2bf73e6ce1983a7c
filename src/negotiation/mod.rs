//! HTTP content negotiation
//!
//! Parses `Accept` headers into ranked preferences and matches them against
//! a registry of resource representations.
//!
//! ## Key Components
//!
//! - [`MediaRange`] - A `type/subtype[+suffix]` token
//! - [`AcceptValue`] - One parsed Accept entry with params, quality and extensions
//! - [`AcceptHeader`] - A full Accept header ranked by descending quality
//! - [`Registry`] - Exact media-range keys mapped to [`Representation`] prototypes
//! - [`marshal_for`] / [`unmarshal_from`] - Bytes in and out of a representation
//!
//! ## Example
//!
//! ```rust
//! use conneg::negotiation::{Json, Registry};
//!
//! let mut registry = Registry::new();
//! registry.register("application/vnd.message.v1+json", Json::new("hello".to_string()));
//!
//! let negotiated = registry
//!     .negotiate("application/json;q=0.5, application/vnd.message.v1+json")
//!     .unwrap();
//! assert_eq!(negotiated.accept.media_range, "application/vnd.message.v1+json");
//! ```

mod accept;
mod content;
mod error;
mod header;
mod media_range;
mod registry;
mod representation;

pub use accept::{
    ACCEPT_PARAMS_QUALITY, AcceptValue, MEDIA_RANGE_SUBTYPE_QUALITY,
    MEDIA_RANGE_WILDCARD_QUALITY, MEDIA_RANGE_WILDCARD_SUBTYPE_QUALITY, MediaParams,
    default_quality,
};
pub use content::{marshal_for, unmarshal_from};
pub use error::{AcceptError, NegotiationError, RepresentationError};
pub use header::{AcceptHeader, parse_header};
pub use media_range::{MediaRange, WILDCARD};
pub use registry::{Negotiated, Registry, parse_media_type};
pub use representation::{ContentTypeParams, Json, Representation, RepresentationClone};
