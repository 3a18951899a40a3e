use thiserror::Error;

#[derive(Debug, Error)]
pub enum DomainError {
    #[error("Unsupported media type: {0}")]
    UnsupportedMediaType(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Inference error: {0}")]
    Inference(String),

    #[error("Model unavailable: {0}")]
    ModelUnavailable(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl DomainError {
    pub fn unsupported_media_type(msg: impl Into<String>) -> Self {
        Self::UnsupportedMediaType(msg.into())
    }

    pub fn invalid_input(msg: impl Into<String>) -> Self {
        Self::InvalidInput(msg.into())
    }

    pub fn inference(msg: impl Into<String>) -> Self {
        Self::Inference(msg.into())
    }

    pub fn model_unavailable(msg: impl Into<String>) -> Self {
        Self::ModelUnavailable(msg.into())
    }

    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }

    /// Caused by the caller's payload rather than by the server or the model.
    pub fn is_client_error(&self) -> bool {
        matches!(self, Self::UnsupportedMediaType(_) | Self::InvalidInput(_))
    }

    pub fn is_inference(&self) -> bool {
        matches!(self, Self::Inference(_))
    }

    /// The bare message carried by the variant, without the variant prefix.
    pub fn detail(&self) -> &str {
        match self {
            Self::UnsupportedMediaType(msg)
            | Self::InvalidInput(msg)
            | Self::Inference(msg)
            | Self::ModelUnavailable(msg)
            | Self::Internal(msg) => msg,
        }
    }

    /// Re-tag any error raised while talking to the model as an inference error.
    pub fn into_inference(self) -> Self {
        match self {
            Self::Inference(_) => self,
            other => Self::Inference(other.detail().to_string()),
        }
    }
}
