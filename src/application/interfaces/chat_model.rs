use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::{Conversation, DomainError};

/// A chat model that turns an assembled conversation into reply text.
///
/// Implementors encapsulate transport, serialization, and runtime-specific API
/// details. The turn handler owns no retry or caching policy around it.
#[async_trait]
pub trait ChatModel: Send + Sync {
    /// Generate the assistant's reply to the last message of `conversation`.
    async fn invoke(&self, conversation: &Conversation) -> Result<String, DomainError>;

    /// Verify the model runtime is reachable and the model is provisioned.
    async fn health_check(&self) -> Result<(), DomainError> {
        Ok(())
    }

    fn model_name(&self) -> &str;
}

/// Builds fresh [`ChatModel`] handles; one is created per chat turn.
pub trait ChatModelFactory: Send + Sync {
    fn create(&self) -> Result<Arc<dyn ChatModel>, DomainError>;

    /// Name of the model the created handles talk to (for logging).
    fn model_name(&self) -> &str;
}
