use std::sync::Arc;

use tracing::debug;

use crate::application::ChatModelFactory;
use crate::domain::DomainError;

/// Startup connectivity check: build one model handle and probe the runtime.
pub struct CheckModelUseCase {
    model_factory: Arc<dyn ChatModelFactory>,
}

impl CheckModelUseCase {
    pub fn new(model_factory: Arc<dyn ChatModelFactory>) -> Self {
        Self { model_factory }
    }

    /// Returns the name of the model that answered the probe.
    pub async fn execute(&self) -> Result<String, DomainError> {
        let model = self.model_factory.create()?;
        debug!("Probing chat model {}", model.model_name());
        model.health_check().await?;
        Ok(model.model_name().to_string())
    }
}
