use std::sync::Arc;

use axum::http::header::CONTENT_TYPE;
use axum::http::HeaderMap;
use serde_json::Value;
use tracing::{debug, error};

use crate::domain::{ChatRequest, DomainError};

use super::super::response::{ApiError, ChatSuccess, JSON_REQUIRED};
use super::super::Container;

pub struct ChatController {
    container: Arc<Container>,
}

impl ChatController {
    pub fn new(container: Arc<Container>) -> Self {
        Self { container }
    }

    /// `POST /chat`: validate, run the turn, shape the result.
    pub async fn chat(&self, headers: &HeaderMap, body: &[u8]) -> Result<ChatSuccess, ApiError> {
        let outcome = match Self::parse_request(headers, body) {
            Ok(request) => self.container.chat_turn_use_case().execute(request).await,
            Err(e) => Err(e),
        };

        outcome.map(ChatSuccess::new).map_err(|e| {
            Self::log_failure(&e);
            e.into()
        })
    }

    fn log_failure(err: &DomainError) {
        if err.is_client_error() {
            debug!("Rejected chat request: {}", err);
        } else if !err.is_inference() {
            // Inference failures are already logged by the use case.
            error!("Error in chat endpoint: {:?}", err);
        }
    }

    fn parse_request(headers: &HeaderMap, body: &[u8]) -> Result<ChatRequest, DomainError> {
        if !is_json(headers) {
            return Err(DomainError::unsupported_media_type(JSON_REQUIRED));
        }

        let payload: Value = serde_json::from_slice(body).map_err(|e| {
            debug!("Body is not valid JSON: {}", e);
            DomainError::unsupported_media_type(JSON_REQUIRED)
        })?;

        ChatRequest::from_json(payload)
    }
}

/// `application/json` or any `application/*+json` media type.
fn is_json(headers: &HeaderMap) -> bool {
    let Some(content_type) = headers.get(CONTENT_TYPE).and_then(|v| v.to_str().ok()) else {
        return false;
    };
    let mime = content_type
        .split(';')
        .next()
        .unwrap_or_default()
        .trim()
        .to_ascii_lowercase();

    mime == "application/json" || (mime.starts_with("application/") && mime.ends_with("+json"))
}
