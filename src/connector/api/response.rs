use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;

use crate::domain::{ChatReply, DomainError};

pub const JSON_REQUIRED: &str = "Content-Type must be application/json";
pub const INFERENCE_FAILED: &str = "Error generating response";
pub const UNEXPECTED_FAILURE: &str =
    "An error occurred while processing your request. Please try again.";
pub const NOT_FOUND: &str = "Not found";
pub const METHOD_NOT_ALLOWED: &str = "Method not allowed";
pub const INTERNAL_SERVER_ERROR: &str = "Internal server error";

/// `{response, history, success: true}`
#[derive(Debug, Serialize)]
pub struct ChatSuccess {
    #[serde(flatten)]
    reply: ChatReply,
    success: bool,
}

impl ChatSuccess {
    pub fn new(reply: ChatReply) -> Self {
        Self {
            reply,
            success: true,
        }
    }
}

impl IntoResponse for ChatSuccess {
    fn into_response(self) -> Response {
        (StatusCode::OK, Json(self)).into_response()
    }
}

#[derive(Debug, Serialize)]
struct ErrorBody {
    error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    detail: Option<String>,
    success: bool,
}

/// Every failure the HTTP surface reports: `{error, detail?, success: false}`.
#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    body: ErrorBody,
}

impl ApiError {
    pub fn new(status: StatusCode, error: impl Into<String>) -> Self {
        Self {
            status,
            body: ErrorBody {
                error: error.into(),
                detail: None,
                success: false,
            },
        }
    }

    pub fn with_detail(mut self, detail: impl Into<String>) -> Self {
        self.body.detail = Some(detail.into());
        self
    }

    pub fn not_found() -> Self {
        Self::new(StatusCode::NOT_FOUND, NOT_FOUND)
    }

    pub fn method_not_allowed() -> Self {
        Self::new(StatusCode::METHOD_NOT_ALLOWED, METHOD_NOT_ALLOWED)
    }

    pub fn internal_server_error() -> Self {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, INTERNAL_SERVER_ERROR)
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }

    pub fn error(&self) -> &str {
        &self.body.error
    }

    pub fn detail(&self) -> Option<&str> {
        self.body.detail.as_deref()
    }
}

impl From<DomainError> for ApiError {
    fn from(err: DomainError) -> Self {
        match err {
            DomainError::UnsupportedMediaType(reason) => {
                Self::new(StatusCode::UNSUPPORTED_MEDIA_TYPE, reason)
            }
            DomainError::InvalidInput(reason) => Self::new(StatusCode::BAD_REQUEST, reason),
            DomainError::Inference(detail) => {
                Self::new(StatusCode::INTERNAL_SERVER_ERROR, INFERENCE_FAILED).with_detail(detail)
            }
            other => Self::new(StatusCode::INTERNAL_SERVER_ERROR, UNEXPECTED_FAILURE)
                .with_detail(other.detail()),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(self.body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ChatRequest;

    fn assert_maps(err: DomainError, status: StatusCode, error: &str, detail: Option<&str>) {
        let api = ApiError::from(err);
        assert_eq!(api.status(), status);
        assert_eq!(api.error(), error);
        assert_eq!(api.detail(), detail);
    }

    #[test]
    fn client_errors_carry_no_detail() {
        assert_maps(
            DomainError::unsupported_media_type(JSON_REQUIRED),
            StatusCode::UNSUPPORTED_MEDIA_TYPE,
            JSON_REQUIRED,
            None,
        );
        assert_maps(
            DomainError::invalid_input("Empty message"),
            StatusCode::BAD_REQUEST,
            "Empty message",
            None,
        );
    }

    #[test]
    fn server_errors_expose_the_raw_detail() {
        assert_maps(
            DomainError::inference("model not found"),
            StatusCode::INTERNAL_SERVER_ERROR,
            INFERENCE_FAILED,
            Some("model not found"),
        );
        assert_maps(
            DomainError::internal("bad history"),
            StatusCode::INTERNAL_SERVER_ERROR,
            UNEXPECTED_FAILURE,
            Some("bad history"),
        );
        assert_maps(
            DomainError::model_unavailable("down"),
            StatusCode::INTERNAL_SERVER_ERROR,
            UNEXPECTED_FAILURE,
            Some("down"),
        );
    }

    #[test]
    fn error_body_omits_missing_detail() {
        let body = serde_json::to_value(&ApiError::not_found().body).unwrap();
        assert_eq!(body, serde_json::json!({"error": "Not found", "success": false}));
    }

    #[test]
    fn success_body_flattens_the_reply() {
        let reply = ChatRequest::new("hi", vec![]).into_reply("hello");
        let body = serde_json::to_value(ChatSuccess::new(reply)).unwrap();
        assert_eq!(
            body,
            serde_json::json!({
                "response": "hello",
                "history": [
                    {"type": "human", "content": "hi"},
                    {"type": "ai", "content": "hello"}
                ],
                "success": true
            })
        );
    }
}
