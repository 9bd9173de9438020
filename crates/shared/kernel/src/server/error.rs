//! Structured HTTP errors.
//!
//! Slice errors convert into [`ApiError`], which renders as
//! `{"error": {"code", "message", "details"?}}`. Server errors are logged;
//! `INTERNAL_ERROR` messages never reach the client.

use super::state::ApiStateError;
use axum::Json;
use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use cargroup_derive::api_model;
use std::borrow::Cow;
use std::fmt;

#[api_model]
/// Error response envelope.
pub struct ErrorBody {
    pub error: ErrorDetail,
}

#[api_model]
/// Machine-readable code, human-readable message and optional details.
pub struct ErrorDetail {
    /// e.g. `NOT_FOUND`, `CAPACITY_EXCEEDED`
    pub code: String,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

/// An error ready to be sent to the client.
#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    code: &'static str,
    message: Cow<'static, str>,
    details: Option<serde_json::Value>,
}

const INTERNAL_CODE: &str = "INTERNAL_ERROR";
const HIDDEN_MESSAGE: &str = "An internal error occurred";

impl ApiError {
    pub fn new(status: StatusCode, code: &'static str, message: impl Into<Cow<'static, str>>) -> Self {
        Self { status, code, message: message.into(), details: None }
    }

    #[must_use]
    pub fn with_details(mut self, details: serde_json::Value) -> Self {
        self.details = Some(details);
        self
    }

    pub fn not_found(message: impl Into<Cow<'static, str>>) -> Self {
        Self::new(StatusCode::NOT_FOUND, "NOT_FOUND", message)
    }

    pub fn bad_request(message: impl Into<Cow<'static, str>>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, "INVALID_REQUEST", message)
    }

    pub fn internal(message: impl Into<Cow<'static, str>>) -> Self {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, INTERNAL_CODE, message)
    }

    #[must_use]
    pub const fn status(&self) -> StatusCode {
        self.status
    }

    #[must_use]
    pub const fn code(&self) -> &'static str {
        self.code
    }

    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }

    fn is_hidden(&self) -> bool {
        self.code == INTERNAL_CODE
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}: {}", self.status.as_u16(), self.code, self.message)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        if self.status.is_server_error() {
            tracing::error!(code = self.code, error = %self.message, "Request failed");
        }

        let message =
            if self.is_hidden() { HIDDEN_MESSAGE.to_owned() } else { self.message.into_owned() };

        let body = ErrorBody {
            error: ErrorDetail { code: self.code.to_owned(), message, details: self.details },
        };

        (self.status, Json(body)).into_response()
    }
}

impl From<ApiStateError> for ApiError {
    fn from(err: ApiStateError) -> Self {
        Self::internal(err.to_string())
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self::bad_request(rejection.body_text())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use http_body_util::BodyExt;
    use serde_json::{Value, json};

    async fn render(err: ApiError) -> (StatusCode, Value) {
        let response = err.into_response();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn client_errors_keep_their_message() {
        let (status, body) = render(ApiError::not_found("Group Kerala/Kia not found")).await;

        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"]["code"], "NOT_FOUND");
        assert_eq!(body["error"]["message"], "Group Kerala/Kia not found");
        assert!(body["error"].get("details").is_none());
    }

    #[tokio::test]
    async fn internal_errors_hide_their_message() {
        let (status, body) = render(ApiError::internal("slice registry poisoned")).await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["error"]["code"], "INTERNAL_ERROR");
        assert_eq!(body["error"]["message"], HIDDEN_MESSAGE);
    }

    #[tokio::test]
    async fn unavailable_errors_are_reported() {
        let err = ApiError::new(StatusCode::SERVICE_UNAVAILABLE, "PERSISTENCE_ERROR", "store timed out");
        let (status, body) = render(err).await;

        assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(body["error"]["message"], "store timed out");
    }

    #[tokio::test]
    async fn details_are_serialized() {
        let err = ApiError::new(StatusCode::CONFLICT, "CAPACITY_EXCEEDED", "full")
            .with_details(json!({ "maxMembers": 50 }));
        let (_, body) = render(err).await;

        assert_eq!(body["error"]["details"]["maxMembers"], 50);
    }

    #[test]
    fn missing_slice_maps_to_internal() {
        let err: ApiError =
            ApiStateError::MissingSlice { message: "Groups".into(), context: None }.into();
        assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(err.code(), "INTERNAL_ERROR");
    }
}
