use serde::Serialize;
use serde_json::{Map, Value};

use super::Turn;
use crate::domain::DomainError;

pub const NO_MESSAGE_PROVIDED: &str = "No message provided";
pub const EMPTY_MESSAGE: &str = "Empty message";

/// A validated chat turn request: a non-empty, trimmed utterance plus the
/// caller's history exactly as supplied.
#[derive(Debug, Clone, PartialEq)]
pub struct ChatRequest {
    message: String,
    history: Vec<Value>,
}

impl ChatRequest {
    pub fn new(message: impl Into<String>, history: Vec<Value>) -> Self {
        Self {
            message: message.into(),
            history,
        }
    }

    /// Validate a decoded JSON payload.
    ///
    /// A payload that is not a non-empty object, or has no `message` key, or
    /// whose message trims to nothing, is rejected as invalid input. A
    /// `message` that is not a string or a `history` that is not a list is an
    /// internal lookup failure.
    pub fn from_json(payload: Value) -> Result<Self, DomainError> {
        let mut fields = match payload {
            Value::Object(fields) if !fields.is_empty() => fields,
            _ => return Err(DomainError::invalid_input(NO_MESSAGE_PROVIDED)),
        };

        let message = match fields.remove("message") {
            None => return Err(DomainError::invalid_input(NO_MESSAGE_PROVIDED)),
            Some(Value::String(message)) => message,
            Some(other) => {
                return Err(DomainError::internal(format!(
                    "'message' must be a string, got {}",
                    json_kind(&other)
                )))
            }
        };

        let message = message.trim();
        if message.is_empty() {
            return Err(DomainError::invalid_input(EMPTY_MESSAGE));
        }

        let history = take_history(&mut fields)?;

        Ok(Self::new(message, history))
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn history(&self) -> &[Value] {
        &self.history
    }

    /// History entries that can be replayed to the model, in order.
    pub fn replayable_turns(&self) -> Result<Vec<Turn>, DomainError> {
        let mut turns = Vec::with_capacity(self.history.len());
        for entry in &self.history {
            if let Some(turn) = Turn::from_history_entry(entry)? {
                turns.push(turn);
            }
        }
        Ok(turns)
    }

    /// Close the turn: the caller's history with the new exchange appended.
    pub fn into_reply(self, response: impl Into<String>) -> ChatReply {
        let response = response.into();
        let mut history = self.history;
        history.push(Turn::human(self.message).to_value());
        history.push(Turn::ai(response.clone()).to_value());
        ChatReply { response, history }
    }
}

fn take_history(fields: &mut Map<String, Value>) -> Result<Vec<Value>, DomainError> {
    match fields.remove("history") {
        None | Some(Value::Null) => Ok(Vec::new()),
        Some(Value::Array(entries)) => Ok(entries),
        Some(other) => Err(DomainError::internal(format!(
            "'history' must be a list, got {}",
            json_kind(&other)
        ))),
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "a list",
        Value::Object(_) => "an object",
    }
}

/// The outcome of a successful turn.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChatReply {
    response: String,
    history: Vec<Value>,
}

impl ChatReply {
    pub fn response(&self) -> &str {
        &self.response
    }

    pub fn history(&self) -> &[Value] {
        &self.history
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn trims_the_message_and_defaults_history() {
        let request = ChatRequest::from_json(json!({"message": "  Best hybrid SUV?\n"})).unwrap();
        assert_eq!(request.message(), "Best hybrid SUV?");
        assert!(request.history().is_empty());
    }

    #[test]
    fn null_history_is_empty() {
        let request = ChatRequest::from_json(json!({"message": "hi", "history": null})).unwrap();
        assert!(request.history().is_empty());
    }

    #[test]
    fn missing_message_is_rejected() {
        for payload in [
            json!({}),
            json!({"history": []}),
            json!(null),
            json!([1, 2]),
            json!("hi"),
        ] {
            let err = ChatRequest::from_json(payload.clone()).unwrap_err();
            assert!(
                matches!(&err, DomainError::InvalidInput(m) if m == NO_MESSAGE_PROVIDED),
                "{payload}: {err}"
            );
        }
    }

    #[test]
    fn whitespace_message_is_rejected() {
        let err = ChatRequest::from_json(json!({"message": " \t\n "})).unwrap_err();
        assert!(matches!(err, DomainError::InvalidInput(m) if m == EMPTY_MESSAGE));
    }

    #[test]
    fn wrongly_typed_fields_are_internal_errors() {
        let err = ChatRequest::from_json(json!({"message": 42})).unwrap_err();
        assert!(matches!(err, DomainError::Internal(_)));

        let err = ChatRequest::from_json(json!({"message": "hi", "history": "nope"})).unwrap_err();
        assert!(matches!(err, DomainError::Internal(_)));
    }

    #[test]
    fn replayable_turns_skip_unknown_types() {
        let request = ChatRequest::new(
            "and the price?",
            vec![
                json!({"type": "human", "content": "Tell me about the Civic"}),
                json!({"type": "narrator", "content": "ignored"}),
                json!({"type": "ai", "content": "It is a compact car."}),
            ],
        );

        let turns = request.replayable_turns().unwrap();
        assert_eq!(
            turns,
            vec![Turn::human("Tell me about the Civic"), Turn::ai("It is a compact car.")]
        );
    }

    #[test]
    fn reply_appends_exactly_two_turns() {
        let original = vec![
            json!({"type": "human", "content": "Hi"}),
            json!({"type": "bogus", "extra": true}),
        ];
        let reply = ChatRequest::new("Compare Camry and Accord", original.clone())
            .into_reply("Both are reliable midsize sedans.");

        assert_eq!(reply.response(), "Both are reliable midsize sedans.");
        assert_eq!(reply.history().len(), 4);
        assert_eq!(&reply.history()[..2], original.as_slice());
        assert_eq!(
            reply.history()[2],
            json!({"type": "human", "content": "Compare Camry and Accord"})
        );
        assert_eq!(
            reply.history()[3],
            json!({"type": "ai", "content": "Both are reliable midsize sedans."})
        );
    }
}
