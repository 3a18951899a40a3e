use super::{Speaker, Turn};

/// A single message as handed to the model runtime.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChatMessage {
    System(String),
    Human(String),
    Assistant(String),
}

impl ChatMessage {
    pub fn content(&self) -> &str {
        match self {
            ChatMessage::System(c) | ChatMessage::Human(c) | ChatMessage::Assistant(c) => c,
        }
    }
}

impl From<&Turn> for ChatMessage {
    fn from(turn: &Turn) -> Self {
        match turn.speaker() {
            Speaker::Human => ChatMessage::Human(turn.content().to_string()),
            Speaker::Ai => ChatMessage::Assistant(turn.content().to_string()),
        }
    }
}

/// The full message sequence for one model call: system directive, replayed
/// history, then the new human utterance.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Conversation {
    messages: Vec<ChatMessage>,
}

impl Conversation {
    pub fn assemble(directive: &str, history: &[Turn], utterance: &str) -> Self {
        let mut messages = Vec::with_capacity(history.len() + 2);
        messages.push(ChatMessage::System(directive.to_string()));
        messages.extend(history.iter().map(ChatMessage::from));
        messages.push(ChatMessage::Human(utterance.to_string()));
        Self { messages }
    }

    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    /// The newest human utterance, always the final message.
    pub fn latest_utterance(&self) -> Option<&str> {
        match self.messages.last() {
            Some(ChatMessage::Human(content)) => Some(content),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_with_directive_and_ends_with_utterance() {
        let history = vec![Turn::human("Hi"), Turn::ai("Hello! Looking for a car?")];
        let conversation = Conversation::assemble("You are MotorMate.", &history, "Yes, a sedan");

        assert_eq!(conversation.len(), 4);
        assert_eq!(
            conversation.messages(),
            &[
                ChatMessage::System("You are MotorMate.".into()),
                ChatMessage::Human("Hi".into()),
                ChatMessage::Assistant("Hello! Looking for a car?".into()),
                ChatMessage::Human("Yes, a sedan".into()),
            ]
        );
        assert_eq!(conversation.latest_utterance(), Some("Yes, a sedan"));
    }

    #[test]
    fn empty_history_yields_two_messages() {
        let conversation = Conversation::assemble("directive", &[], "hello");
        assert_eq!(conversation.len(), 2);
        assert!(!conversation.is_empty());
    }
}
