use std::sync::Arc;

use async_trait::async_trait;

use crate::application::{ChatModel, ChatModelFactory};
use crate::domain::{Conversation, DomainError};

const MOCK_MODEL_NAME: &str = "mock";

/// Deterministic stand-in for a real model runtime. Replies by echoing the
/// newest utterance, or fails every call when built with [`MockChatModel::failing`].
#[derive(Debug, Clone, Default)]
pub struct MockChatModel {
    failure: Option<String>,
}

impl MockChatModel {
    pub fn new() -> Self {
        Self { failure: None }
    }

    pub fn failing(message: impl Into<String>) -> Self {
        Self {
            failure: Some(message.into()),
        }
    }

    pub fn reply_for(conversation: &Conversation) -> String {
        format!(
            "[mock] {} ({} prior messages)",
            conversation.latest_utterance().unwrap_or_default(),
            conversation.len().saturating_sub(2)
        )
    }
}

#[async_trait]
impl ChatModel for MockChatModel {
    async fn invoke(&self, conversation: &Conversation) -> Result<String, DomainError> {
        match &self.failure {
            Some(message) => Err(DomainError::inference(message.clone())),
            None => Ok(Self::reply_for(conversation)),
        }
    }

    fn model_name(&self) -> &str {
        MOCK_MODEL_NAME
    }
}

/// Hands out clones of one [`MockChatModel`].
#[derive(Debug, Clone, Default)]
pub struct MockChatModelFactory {
    model: MockChatModel,
}

impl MockChatModelFactory {
    pub fn new(model: MockChatModel) -> Self {
        Self { model }
    }
}

impl ChatModelFactory for MockChatModelFactory {
    fn create(&self) -> Result<Arc<dyn ChatModel>, DomainError> {
        Ok(Arc::new(self.model.clone()))
    }

    fn model_name(&self) -> &str {
        MOCK_MODEL_NAME
    }
}
