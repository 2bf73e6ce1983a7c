//! Moving negotiated representations to and from raw bytes

use std::io::{Read, Write};

use super::accept::AcceptValue;
use super::error::NegotiationError;
use super::registry::parse_media_type;
use super::representation::Representation;

/// Render `representation` for `accept` and write every byte to `writer`
pub fn marshal_for<W>(
    writer: &mut W,
    representation: &dyn Representation,
    accept: &AcceptValue,
) -> Result<(), NegotiationError>
where
    W: Write + ?Sized,
{
    let data = representation.marshal(accept)?;
    writer.write_all(&data)?;
    Ok(())
}

/// Decode a request body into `representation`.
///
/// `content_type` is the raw `Content-Type` header value; an absent or empty
/// header is rejected before the body is touched.
pub fn unmarshal_from<R>(
    content_type: Option<&str>,
    body: &mut R,
    representation: &mut dyn Representation,
) -> Result<(), NegotiationError>
where
    R: Read + ?Sized,
{
    let header = content_type
        .filter(|header| !header.is_empty())
        .ok_or(NegotiationError::NoContentType)?;

    let (media_type, params) = parse_media_type(header)?;

    let mut data = Vec::new();
    body.read_to_end(&mut data)?;

    representation.unmarshal(&media_type, &params, &data)?;
    Ok(())
}
