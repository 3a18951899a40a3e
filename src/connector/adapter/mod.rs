mod mock_chat_model;
mod ollama_chat_model;

pub use mock_chat_model::*;
pub use ollama_chat_model::*;
