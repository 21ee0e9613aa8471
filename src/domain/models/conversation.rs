#[cfg(test)]
#[path = "conversation_test.rs"]
mod tests;
use super::Author;
use super::Message;

pub const GREETING: &str =
    "Hello! I'm an HR MatchMaker Assistant. Ask me anything about your database.";

/// Append-only log of chat messages, seeded with the assistant greeting.
/// Owned by a single session and never truncated or reordered.
#[derive(Clone, Debug)]
pub struct Conversation {
    messages: Vec<Message>,
}

impl Default for Conversation {
    fn default() -> Conversation {
        return Conversation {
            messages: vec![Message::new(Author::Assistant, GREETING)],
        };
    }
}

impl Conversation {
    pub fn append(&mut self, message: Message) {
        self.messages.push(message);
    }

    pub fn messages(&self) -> &[Message] {
        return &self.messages;
    }

    pub fn len(&self) -> usize {
        return self.messages.len();
    }

    pub fn is_empty(&self) -> bool {
        return self.messages.is_empty();
    }

    /// Serializes the history as `Role: text` lines for prompt embedding.
    pub fn render(&self) -> String {
        return self
            .messages
            .iter()
            .map(|msg| {
                return format!("{role}: {text}", role = msg.author.role(), text = msg.text);
            })
            .collect::<Vec<String>>()
            .join("\n");
    }
}
