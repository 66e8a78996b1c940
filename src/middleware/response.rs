use axum::{
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use serde::Serialize;
use serde_json::{json, Value};

/// JSON response with an explicit status code.
///
/// Bodies are serialized as-is; clients read arrays and objects directly
/// rather than through a `{success, data}` envelope.
#[derive(Debug)]
pub struct ApiResponse<T: Serialize> {
    pub data: T,
    pub status_code: Option<StatusCode>,
}

impl<T: Serialize> ApiResponse<T> {
    /// Create a successful API response with default 200 status
    pub fn success(data: T) -> Self {
        Self {
            data,
            status_code: None, // Default to 200 OK
        }
    }

    /// Create an API response with custom status code
    pub fn with_status(data: T, status_code: StatusCode) -> Self {
        Self {
            data,
            status_code: Some(status_code),
        }
    }

    /// Create a 201 Created response
    pub fn created(data: T) -> Self {
        Self::with_status(data, StatusCode::CREATED)
    }

    pub fn status(&self) -> StatusCode {
        self.status_code.unwrap_or(StatusCode::OK)
    }
}

impl ApiResponse<Value> {
    /// `{"message": ...}` with 200
    pub fn message(message: impl Into<String>) -> Self {
        Self::success(json!({ "message": message.into() }))
    }

    /// `{"message": ...}` with 201
    pub fn created_message(message: impl Into<String>) -> Self {
        Self::created(json!({ "message": message.into() }))
    }
}

impl<T: Serialize> IntoResponse for ApiResponse<T> {
    fn into_response(self) -> Response {
        let status = self.status();

        match serde_json::to_value(&self.data) {
            Ok(value) => (status, Json(value)).into_response(),
            Err(e) => {
                tracing::error!("Failed to serialize response data: {}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(json!({
                        "error": true,
                        "message": "Failed to serialize response data",
                        "code": "INTERNAL_SERVER_ERROR"
                    })),
                )
                    .into_response()
            }
        }
    }
}

pub type ApiResult<T> = Result<ApiResponse<T>, crate::error::ApiError>;
