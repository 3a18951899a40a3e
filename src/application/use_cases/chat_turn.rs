use std::sync::Arc;
use std::time::Instant;

use tracing::{debug, info, warn};

use crate::application::ChatModelFactory;
use crate::domain::{ChatReply, ChatRequest, Conversation, DomainError};

/// System directive that opens every conversation.
pub const MOTORMATE_DIRECTIVE: &str = "\
You are MotorMate, an expert automotive assistant with comprehensive knowledge about cars. \
Your capabilities include:

1. Car Recommendations: You can suggest vehicles based on user preferences, budget, lifestyle, \
and needs.
2. Car Comparisons: You can compare different car models across various parameters like \
performance, features, price, reliability, and value.
3. Technical Knowledge: You can explain car specifications, features, and technical details in \
an easy-to-understand way.
4. Market Insight: You have knowledge about current car market trends, pricing, and value \
propositions.
5. Practical Advice: You can provide guidance on car maintenance, ownership costs, and practical \
considerations.
6. Also keep your responses short, only give big answers when the customer asks so.

Guidelines for interaction:
- Ask clarifying questions when needed to provide better recommendations
- Provide balanced, objective comparisons
- Include both pros and cons in your recommendations
- Consider factors like budget, safety, reliability, and practical needs
- Use your automotive expertise to explain technical concepts in simple terms
- Keep responses concise but informative

Remember: Your goal is to help users make informed decisions about their car choices while \
maintaining a helpful and professional demeanor.";

/// Runs one conversation turn: replay the caller's history behind the system
/// directive, ask the model, and append the exchange to the history.
pub struct ChatTurnUseCase {
    model_factory: Arc<dyn ChatModelFactory>,
    directive: String,
}

impl ChatTurnUseCase {
    pub fn new(model_factory: Arc<dyn ChatModelFactory>) -> Self {
        Self {
            model_factory,
            directive: MOTORMATE_DIRECTIVE.to_string(),
        }
    }

    pub fn with_directive(mut self, directive: impl Into<String>) -> Self {
        self.directive = directive.into();
        self
    }

    /// Errors raised by the model call are always [`DomainError::Inference`];
    /// anything else failing here is reported as-is.
    pub async fn execute(&self, request: ChatRequest) -> Result<ChatReply, DomainError> {
        let model = self.model_factory.create()?;

        let turns = request.replayable_turns()?;
        let skipped = request.history().len() - turns.len();
        if skipped > 0 {
            debug!("Skipped {} history entries with unrecognised type", skipped);
        }

        let conversation = Conversation::assemble(&self.directive, &turns, request.message());
        info!(
            "Chat turn: {} history entries, {} messages to {}",
            request.history().len(),
            conversation.len(),
            model.model_name()
        );

        let start_time = Instant::now();
        let response = model.invoke(&conversation).await.map_err(|e| {
            warn!("Error getting response from chat model: {}", e);
            e.into_inference()
        })?;

        info!(
            "Reply of {} chars generated in {:?}",
            response.len(),
            start_time.elapsed()
        );

        Ok(request.into_reply(response))
    }
}
