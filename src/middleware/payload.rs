use axum::{
    async_trait,
    body::Bytes,
    extract::{rejection::BytesRejection, FromRequest, Request},
    http::StatusCode,
};
use serde::de::DeserializeOwned;

use crate::error::ApiError;

/// JSON request body that tolerates a missing body.
///
/// An empty body deserializes as `T::default()`, so handlers see absent
/// fields instead of an extractor rejection. The `Content-Type` header is not
/// required. Malformed JSON is a 400.
#[derive(Debug, Clone, Default)]
pub struct Payload<T>(pub T);

#[async_trait]
impl<S, T> FromRequest<S> for Payload<T>
where
    T: DeserializeOwned + Default,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let bytes = Bytes::from_request(req, state).await.map_err(rejection_to_error)?;
        parse_body(&bytes).map(Payload)
    }
}

fn parse_body<T: DeserializeOwned + Default>(bytes: &[u8]) -> Result<T, ApiError> {
    if bytes.iter().all(u8::is_ascii_whitespace) {
        return Ok(T::default());
    }

    serde_json::from_slice(bytes).map_err(|e| {
        tracing::debug!("Rejected request body: {}", e);
        ApiError::invalid_json(format!("Invalid JSON body: {}", e))
    })
}

fn rejection_to_error(rejection: BytesRejection) -> ApiError {
    if rejection.status() == StatusCode::PAYLOAD_TOO_LARGE {
        ApiError::payload_too_large("Request body too large")
    } else {
        ApiError::bad_request(rejection.body_text())
    }
}
