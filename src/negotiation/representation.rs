use std::collections::BTreeMap;
use std::fmt::Debug;

use serde::Serialize;
use serde::de::DeserializeOwned;

use super::accept::AcceptValue;
use super::error::RepresentationError;

/// Parameters parsed from a `Content-Type` header
pub type ContentTypeParams = BTreeMap<String, String>;

/// A resource representation that can be registered under media ranges.
///
/// Implementors decide how to render themselves for a negotiated
/// [`AcceptValue`] and how to decode a request body into themselves.
pub trait Representation: RepresentationClone + Debug + Send + Sync {
    /// Concrete `Content-Type` to send for the negotiated value
    fn content_type(&self, accept: &AcceptValue) -> Result<String, RepresentationError>;

    /// Render this representation for the negotiated value
    fn marshal(&self, accept: &AcceptValue) -> Result<Vec<u8>, RepresentationError>;

    /// Decode `body`, sent as `media_type` with `params`, into this value
    fn unmarshal(
        &mut self,
        media_type: &str,
        params: &ContentTypeParams,
        body: &[u8],
    ) -> Result<(), RepresentationError>;
}

/// Prototype copying for boxed representations.
///
/// Implemented for every `Representation + Clone`; there is no need to
/// implement it by hand.
pub trait RepresentationClone {
    fn clone_box(&self) -> Box<dyn Representation>;
}

impl<T> RepresentationClone for T
where
    T: Representation + Clone + 'static,
{
    fn clone_box(&self) -> Box<dyn Representation> {
        Box::new(self.clone())
    }
}

impl Clone for Box<dyn Representation> {
    fn clone(&self) -> Self {
        (**self).clone_box()
    }
}

/// JSON representation of any serde value.
///
/// An `indent` accept-param (any value) selects pretty printed output.
#[derive(Debug, Clone, PartialEq)]
pub struct Json<T> {
    pub value: T,
    content_type: String,
}

impl<T> Json<T> {
    pub fn new(value: T) -> Self {
        Self::with_content_type(value, mime::APPLICATION_JSON.essence_str())
    }

    /// Use a vendor media type such as `application/vnd.message.v1+json`
    pub fn with_content_type(value: T, content_type: impl Into<String>) -> Self {
        Self {
            value,
            content_type: content_type.into(),
        }
    }

    pub fn into_inner(self) -> T {
        self.value
    }
}

impl<T> Representation for Json<T>
where
    T: Serialize + DeserializeOwned + Clone + Debug + Send + Sync + 'static,
{
    fn content_type(&self, _accept: &AcceptValue) -> Result<String, RepresentationError> {
        Ok(self.content_type.clone())
    }

    fn marshal(&self, accept: &AcceptValue) -> Result<Vec<u8>, RepresentationError> {
        let data = if accept.params.contains_key("indent") {
            serde_json::to_vec_pretty(&self.value)?
        } else {
            serde_json::to_vec(&self.value)?
        };
        Ok(data)
    }

    fn unmarshal(
        &mut self,
        media_type: &str,
        _params: &ContentTypeParams,
        body: &[u8],
    ) -> Result<(), RepresentationError> {
        let parsed: mime::Mime = media_type
            .parse()
            .map_err(|_| RepresentationError::UnsupportedMediaType(media_type.to_string()))?;
        let is_json = parsed.subtype() == mime::JSON || parsed.suffix() == Some(mime::JSON);
        if !is_json {
            return Err(RepresentationError::UnsupportedMediaType(media_type.to_string()));
        }

        self.value = serde_json::from_slice(body)?;
        Ok(())
    }
}
