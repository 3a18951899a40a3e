use std::sync::Arc;

use axum::body::Bytes;
use axum::extract::{DefaultBodyLimit, State};
use axum::http::HeaderMap;
use axum::response::{IntoResponse, Response};
use axum::routing::post;
use axum::{middleware, Router as HttpRouter};
use tracing::{info_span, Instrument};
use uuid::Uuid;

use super::container::Container;
use super::controller::ChatController;
use super::middleware::{catch_panic, cors};
use super::response::ApiError;

pub struct Router {
    chat_controller: Arc<ChatController>,
}

impl Router {
    pub fn new(container: Arc<Container>) -> Self {
        Self {
            chat_controller: Arc::new(ChatController::new(container)),
        }
    }

    /// The HTTP application: `POST /chat`, JSON 404/405 fallbacks, CORS and
    /// panic recovery on every route.
    ///
    /// Request bodies are unbounded. Callers resend the whole history on
    /// every turn, so a long conversation must not hit a size cap.
    pub fn into_service(self) -> HttpRouter {
        HttpRouter::new()
            .route("/chat", post(chat))
            .fallback(not_found)
            .method_not_allowed_fallback(method_not_allowed)
            .layer(DefaultBodyLimit::disable())
            .layer(middleware::from_fn(catch_panic))
            .layer(middleware::from_fn(cors))
            .with_state(self.chat_controller)
    }
}

async fn chat(
    State(controller): State<Arc<ChatController>>,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    let span = info_span!("chat_turn", request_id = %Uuid::new_v4());
    async move { controller.chat(&headers, &body).await.into_response() }
        .instrument(span)
        .await
}

async fn not_found() -> ApiError {
    ApiError::not_found()
}

async fn method_not_allowed() -> ApiError {
    ApiError::method_not_allowed()
}
