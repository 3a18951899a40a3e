use serde_json::Value;

use crate::domain::DomainError;

/// Who produced a turn. Written as the `type` tag of a history entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Speaker {
    Human,
    Ai,
}

impl Speaker {
    pub fn as_str(&self) -> &'static str {
        match self {
            Speaker::Human => "human",
            Speaker::Ai => "ai",
        }
    }

    /// Unknown tags yield `None`; callers skip those entries.
    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag {
            "human" => Some(Speaker::Human),
            "ai" => Some(Speaker::Ai),
            _ => None,
        }
    }
}

/// One utterance in a conversation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Turn {
    speaker: Speaker,
    content: String,
}

impl Turn {
    pub fn new(speaker: Speaker, content: impl Into<String>) -> Self {
        Self {
            speaker,
            content: content.into(),
        }
    }

    pub fn human(content: impl Into<String>) -> Self {
        Self::new(Speaker::Human, content)
    }

    pub fn ai(content: impl Into<String>) -> Self {
        Self::new(Speaker::Ai, content)
    }

    /// Interpret one caller-supplied history entry.
    ///
    /// Entries whose `type` is missing or not one of `human`/`ai` (including
    /// entries that are not objects at all) are skipped with `Ok(None)`. A
    /// recognised entry without a string `content` is a lookup failure.
    pub fn from_history_entry(entry: &Value) -> Result<Option<Self>, DomainError> {
        let Some(speaker) = entry
            .get("type")
            .and_then(Value::as_str)
            .and_then(Speaker::from_tag)
        else {
            return Ok(None);
        };

        let content = entry
            .get("content")
            .and_then(Value::as_str)
            .ok_or_else(|| {
                DomainError::internal(format!(
                    "history entry of type '{}' has no string 'content'",
                    speaker.as_str()
                ))
            })?;

        Ok(Some(Self::new(speaker, content)))
    }

    pub fn speaker(&self) -> Speaker {
        self.speaker
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    /// The history entry form: `{"type": "human" | "ai", "content": ...}`.
    pub fn to_value(&self) -> Value {
        serde_json::json!({
            "type": self.speaker.as_str(),
            "content": self.content,
        })
    }
}
