use axum::{
    Json,
    body::Body,
    extract::State,
    http::{HeaderMap, HeaderValue, StatusCode, header},
    response::{IntoResponse, Response},
};
use http_body_util::{BodyExt, Limited};

use super::{
    error::ApiError,
    models::MediaRangesResponse,
    state::AppState,
    utils::{accept_header, body_read_error, header_str},
};
use crate::negotiation::{
    AcceptValue, NegotiationError, Representation, marshal_for, unmarshal_from,
};

/// Current message, rendered in the client's preferred format (GET /message)
///
/// ## Flow:
/// 1. Negotiate the Accept header (or the configured default) against the registry
/// 2. Render the stored message, or the negotiated prototype if nothing was stored yet
/// 3. Respond with the representation's Content-Type
pub async fn get_message(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Response, ApiError> {
    let result = negotiate_message(&state, &headers).await;
    track(&state, result)
}

async fn negotiate_message(state: &AppState, headers: &HeaderMap) -> Result<Response, ApiError> {
    let accept = accept_header(headers, &state.config.negotiation.default_accept);
    let negotiated = state.registry.negotiate(accept)?;

    let current = state.current.read().await;
    let representation = current
        .as_deref()
        .unwrap_or(negotiated.representation.as_ref());
    render(representation, &negotiated.accept, StatusCode::OK)
}

/// Replace the message from a request body in any registered format (PUT /message)
///
/// ## Flow:
/// 1. Require a Content-Type header and resolve it to a copy of a registered prototype
/// 2. Read the body, stopping at the size limit, and decode it into the copy
/// 3. Negotiate the response format before storing, so a 406 leaves state untouched
/// 4. Store the decoded representation and render it back
pub async fn put_message(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Body,
) -> Result<Response, ApiError> {
    let result = replace_message(&state, &headers, body).await;
    track(&state, result)
}

async fn replace_message(
    state: &AppState,
    headers: &HeaderMap,
    body: Body,
) -> Result<Response, ApiError> {
    let content_type = header_str(headers, header::CONTENT_TYPE)
        .filter(|value| !value.is_empty())
        .ok_or(NegotiationError::NoContentType)?;

    let (mut representation, _params) = state.registry.resolve_content_type(content_type)?;

    let data = read_body(body, state.config.server.max_body_bytes.as_usize()).await?;
    unmarshal_from(Some(content_type), &mut data.as_slice(), representation.as_mut())?;

    let accept = accept_header(headers, &state.config.negotiation.default_accept);
    let negotiated = state.registry.negotiate(accept)?;

    let response = render(representation.as_ref(), &negotiated.accept, StatusCode::OK)?;
    *state.current.write().await = Some(representation);
    tracing::info!(content_type, "Message replaced");

    Ok(response)
}

/// Registered media ranges (GET /media-ranges)
pub async fn media_ranges(State(state): State<AppState>) -> impl IntoResponse {
    let media_ranges = state
        .registry
        .media_ranges()
        .into_iter()
        .map(str::to_string)
        .collect();

    Json(MediaRangesResponse { media_ranges })
}

/// Negotiation counters (GET /metrics)
pub async fn metrics(State(state): State<AppState>) -> impl IntoResponse {
    Json(state.metrics.snapshot())
}

pub async fn health() -> impl IntoResponse {
    (StatusCode::OK, "ok")
}

fn render(
    representation: &dyn Representation,
    accept: &AcceptValue,
    status: StatusCode,
) -> Result<Response, ApiError> {
    let content_type = representation
        .content_type(accept)
        .map_err(NegotiationError::from)?;
    let content_type = HeaderValue::from_str(&content_type)
        .map_err(|err| ApiError::Internal(format!("invalid Content-Type: {err}")))?;

    let mut data = Vec::new();
    marshal_for(&mut data, representation, accept)?;

    Ok((status, [(header::CONTENT_TYPE, content_type)], data).into_response())
}

/// Collect the (already decompressed) body, failing as soon as it passes `max_size`
async fn read_body(body: Body, max_size: usize) -> Result<Vec<u8>, ApiError> {
    let data = Limited::new(body, max_size)
        .collect()
        .await
        .map_err(|err| body_read_error(err, max_size))?
        .to_bytes()
        .to_vec();

    Ok(data)
}

fn track(state: &AppState, result: Result<Response, ApiError>) -> Result<Response, ApiError> {
    match &result {
        Ok(_) => state.metrics.negotiated(),
        Err(err) if err.is_not_acceptable() => state.metrics.not_acceptable(),
        Err(err) if err.status_code().is_client_error() => state.metrics.bad_request(),
        Err(err) => tracing::error!(error = %err, "Request failed"),
    }
    result
}
