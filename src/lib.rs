pub mod application;
pub mod cli;
pub mod connector;
pub mod domain;

pub use application::{ChatModel, ChatModelFactory, ChatTurnUseCase, CheckModelUseCase};

pub use connector::{
    ApiError, ChatSuccess, Container, ContainerConfig, MockChatModel, MockChatModelFactory,
    OllamaChatModel, OllamaChatModelFactory, OllamaConfig, Router,
};

pub use cli::Commands;

pub use domain::{ChatMessage, ChatReply, ChatRequest, Conversation, DomainError, Speaker, Turn};
