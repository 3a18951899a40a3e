use std::sync::Arc;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::application::{ChatModel, ChatModelFactory};
use crate::domain::{ChatMessage, Conversation, DomainError};

/// Default target: Ollama running locally on its standard port.
pub const DEFAULT_BASE_URL: &str = "http://localhost:11434";
pub const DEFAULT_MODEL: &str = "mistral";
pub const DEFAULT_TEMPERATURE: f32 = 0.7;
const CHAT_PATH: &str = "/api/chat";
const TAGS_PATH: &str = "/api/tags";

#[derive(Serialize)]
struct ApiRequest<'a> {
    model: &'a str,
    messages: Vec<ApiMessage<'a>>,
    stream: bool,
    options: ApiOptions,
}

#[derive(Serialize)]
struct ApiMessage<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Serialize)]
struct ApiOptions {
    temperature: f32,
}

#[derive(Deserialize)]
struct ApiResponse {
    message: ApiResponseMessage,
}

#[derive(Deserialize)]
struct ApiResponseMessage {
    content: String,
}

#[derive(Deserialize)]
struct ApiErrorBody {
    error: String,
}

#[derive(Deserialize)]
struct TagsResponse {
    #[serde(default)]
    models: Vec<ModelTag>,
}

#[derive(Deserialize)]
struct ModelTag {
    name: String,
}

/// Connection settings for [`OllamaChatModel`].
#[derive(Debug, Clone, PartialEq)]
pub struct OllamaConfig {
    pub base_url: String,
    pub model: String,
    pub temperature: f32,
}

impl Default for OllamaConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            model: DEFAULT_MODEL.to_string(),
            temperature: DEFAULT_TEMPERATURE,
        }
    }
}

impl OllamaConfig {
    /// Defaults, with the base URL taken from `OLLAMA_HOST` when set.
    ///
    /// `OLLAMA_HOST` may omit the scheme (`127.0.0.1:11434`), as the Ollama
    /// CLI accepts.
    pub fn from_env() -> Self {
        let base_url = std::env::var("OLLAMA_HOST")
            .ok()
            .filter(|host| !host.trim().is_empty())
            .map(|host| normalize_base_url(&host))
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());
        Self {
            base_url,
            ..Self::default()
        }
    }
}

fn normalize_base_url(host: &str) -> String {
    let host = host.trim().trim_end_matches('/');
    if host.contains("://") {
        host.to_string()
    } else {
        format!("http://{host}")
    }
}

/// HTTP client for the Ollama chat API.
///
/// Sends the whole conversation non-streaming with a fixed sampling
/// temperature. No request timeout is configured: a slow generation holds the
/// caller until Ollama answers.
pub struct OllamaChatModel {
    client: reqwest::Client,
    model: String,
    temperature: f32,
    chat_url: String,
    tags_url: String,
}

impl OllamaChatModel {
    pub fn new(config: OllamaConfig) -> Result<Self, DomainError> {
        let client = reqwest::Client::builder().build().map_err(|e| {
            DomainError::model_unavailable(format!(
                "OllamaChatModel: failed to build HTTP client: {e}"
            ))
        })?;
        let base = normalize_base_url(&config.base_url);
        Ok(Self {
            client,
            model: config.model,
            temperature: config.temperature,
            chat_url: format!("{base}{CHAT_PATH}"),
            tags_url: format!("{base}{TAGS_PATH}"),
        })
    }

    fn role(message: &ChatMessage) -> &'static str {
        match message {
            ChatMessage::System(_) => "system",
            ChatMessage::Human(_) => "user",
            ChatMessage::Assistant(_) => "assistant",
        }
    }

    /// Whether an installed tag such as `mistral:latest` satisfies `model`.
    fn provides(tag: &str, model: &str) -> bool {
        tag == model || tag.split_once(':').is_some_and(|(base, _)| base == model)
    }

    async fn error_detail(response: reqwest::Response) -> String {
        let status = response.status();
        let body = response.text().await.unwrap_or_default();
        match serde_json::from_str::<ApiErrorBody>(&body) {
            Ok(parsed) => format!("Ollama returned {status}: {}", parsed.error),
            Err(_) if body.trim().is_empty() => format!("Ollama returned {status}"),
            Err(_) => format!("Ollama returned {status}: {}", body.trim()),
        }
    }
}

#[async_trait]
impl ChatModel for OllamaChatModel {
    async fn invoke(&self, conversation: &Conversation) -> Result<String, DomainError> {
        let request = ApiRequest {
            model: &self.model,
            messages: conversation
                .messages()
                .iter()
                .map(|m| ApiMessage {
                    role: Self::role(m),
                    content: m.content(),
                })
                .collect(),
            stream: false,
            options: ApiOptions {
                temperature: self.temperature,
            },
        };

        let response = self
            .client
            .post(&self.chat_url)
            .json(&request)
            .send()
            .await
            .map_err(|e| DomainError::inference(format!("request to Ollama failed: {e}")))?;

        if !response.status().is_success() {
            let detail = Self::error_detail(response).await;
            warn!("OllamaChatModel: {detail}");
            return Err(DomainError::inference(detail));
        }

        let api_response: ApiResponse = response.json().await.map_err(|e| {
            DomainError::inference(format!("failed to parse Ollama response: {e}"))
        })?;

        debug!("OllamaChatModel raw reply: {}", api_response.message.content);
        Ok(api_response.message.content)
    }

    async fn health_check(&self) -> Result<(), DomainError> {
        let response = self.client.get(&self.tags_url).send().await.map_err(|e| {
            DomainError::model_unavailable(format!(
                "Ollama not reachable at {}: {e}",
                self.tags_url
            ))
        })?;

        if !response.status().is_success() {
            return Err(DomainError::model_unavailable(
                Self::error_detail(response).await,
            ));
        }

        let tags: TagsResponse = response.json().await.map_err(|e| {
            DomainError::model_unavailable(format!("failed to parse Ollama model list: {e}"))
        })?;

        if tags.models.iter().any(|t| Self::provides(&t.name, &self.model)) {
            Ok(())
        } else {
            Err(DomainError::model_unavailable(format!(
                "model '{}' is not installed (try `ollama pull {}`)",
                self.model, self.model
            )))
        }
    }

    fn model_name(&self) -> &str {
        &self.model
    }
}

/// Creates a new [`OllamaChatModel`] for every turn.
pub struct OllamaChatModelFactory {
    config: OllamaConfig,
}

impl OllamaChatModelFactory {
    pub fn new(config: OllamaConfig) -> Self {
        Self { config }
    }
}

impl ChatModelFactory for OllamaChatModelFactory {
    fn create(&self) -> Result<Arc<dyn ChatModel>, DomainError> {
        Ok(Arc::new(OllamaChatModel::new(self.config.clone())?))
    }

    fn model_name(&self) -> &str {
        &self.config.model
    }
}
