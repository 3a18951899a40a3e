use std::sync::Arc;

use tracing::debug;

use crate::application::{ChatModelFactory, ChatTurnUseCase, CheckModelUseCase};
use crate::connector::adapter::{MockChatModelFactory, OllamaChatModelFactory, OllamaConfig};

#[derive(Debug, Clone, Default)]
pub struct ContainerConfig {
    pub ollama: OllamaConfig,
    /// Answer with [`crate::MockChatModel`] instead of calling Ollama.
    pub mock_model: bool,
}

/// Wires the chat model factory into the use cases. Immutable once built and
/// shared by every request.
pub struct Container {
    model_factory: Arc<dyn ChatModelFactory>,
    config: ContainerConfig,
}

impl Container {
    pub fn new(config: ContainerConfig) -> Self {
        let model_factory: Arc<dyn ChatModelFactory> = if config.mock_model {
            debug!("Using mock chat model");
            Arc::new(MockChatModelFactory::default())
        } else {
            debug!(
                "Using Ollama chat model {} at {}",
                config.ollama.model, config.ollama.base_url
            );
            Arc::new(OllamaChatModelFactory::new(config.ollama.clone()))
        };

        Self::with_model_factory(config, model_factory)
    }

    pub fn with_model_factory(
        config: ContainerConfig,
        model_factory: Arc<dyn ChatModelFactory>,
    ) -> Self {
        Self {
            model_factory,
            config,
        }
    }

    pub fn chat_turn_use_case(&self) -> ChatTurnUseCase {
        ChatTurnUseCase::new(self.model_factory.clone())
    }

    pub fn check_model_use_case(&self) -> CheckModelUseCase {
        CheckModelUseCase::new(self.model_factory.clone())
    }

    pub fn model_name(&self) -> &str {
        self.model_factory.model_name()
    }

    pub fn ollama_url(&self) -> &str {
        &self.config.ollama.base_url
    }

    pub fn mock_model(&self) -> bool {
        self.config.mock_model
    }
}
