//! Render output normalization.
//!
//! A prompt's backing function returns a [`RenderOutput`]; rendering flattens
//! it into the list of [`PromptMessage`]s sent to clients.

use rmcp::model::{PromptMessage, PromptMessageContent, PromptMessageRole};
use serde_json::Value;

/// Whatever a prompt's backing function produced.
#[derive(Debug, Clone, PartialEq)]
pub enum RenderOutput {
    /// Plain text, sent as a single user message.
    Text(String),

    /// A fully built message, passed through unchanged.
    Message(PromptMessage),

    /// Bare content (image, embedded resource, ...), sent as a user message.
    Content(PromptMessageContent),

    /// An arbitrary JSON value.
    ///
    /// Strings become text, objects shaped like a message are parsed as one,
    /// and anything else is sent as pretty-printed JSON text.
    Json(Value),

    /// Several outputs, each normalized on its own, in order.
    Many(Vec<RenderOutput>),
}

impl RenderOutput {
    /// Wrap anything printable as text output.
    pub fn display(value: impl std::fmt::Display) -> Self {
        Self::Text(value.to_string())
    }

    /// Flatten into the messages sent to the client.
    pub fn into_messages(self) -> Vec<PromptMessage> {
        let mut messages = Vec::new();
        self.flatten_into(&mut messages);
        messages
    }

    fn flatten_into(self, messages: &mut Vec<PromptMessage>) {
        match self {
            Self::Text(text) => messages.push(user_message(text)),
            Self::Message(message) => messages.push(message),
            Self::Content(content) => messages.push(PromptMessage {
                role: PromptMessageRole::User,
                content,
            }),
            Self::Json(value) => messages.push(message_from_json(value)),
            Self::Many(items) => {
                for item in items {
                    item.flatten_into(messages);
                }
            }
        }
    }
}

/// Build a user text message.
pub fn user_message(text: impl Into<String>) -> PromptMessage {
    PromptMessage::new_text(PromptMessageRole::User, text)
}

/// Build an assistant text message.
pub fn assistant_message(text: impl Into<String>) -> PromptMessage {
    PromptMessage::new_text(PromptMessageRole::Assistant, text)
}

fn message_from_json(value: Value) -> PromptMessage {
    match value {
        Value::String(text) => user_message(text),
        Value::Object(_) => match serde_json::from_value::<PromptMessage>(value.clone()) {
            Ok(message) => message,
            Err(_) => user_message(pretty_json(&value)),
        },
        other => user_message(pretty_json(&other)),
    }
}

fn pretty_json(value: &Value) -> String {
    serde_json::to_string_pretty(value).unwrap_or_else(|_| value.to_string())
}

impl From<String> for RenderOutput {
    fn from(text: String) -> Self {
        Self::Text(text)
    }
}

impl From<&str> for RenderOutput {
    fn from(text: &str) -> Self {
        Self::Text(text.to_string())
    }
}

impl From<PromptMessage> for RenderOutput {
    fn from(message: PromptMessage) -> Self {
        Self::Message(message)
    }
}

impl From<PromptMessageContent> for RenderOutput {
    fn from(content: PromptMessageContent) -> Self {
        Self::Content(content)
    }
}

impl From<Value> for RenderOutput {
    fn from(value: Value) -> Self {
        Self::Json(value)
    }
}

impl<T: Into<RenderOutput>> From<Vec<T>> for RenderOutput {
    fn from(items: Vec<T>) -> Self {
        Self::Many(items.into_iter().map(Into::into).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn text_of(message: &PromptMessage) -> &str {
        match &message.content {
            PromptMessageContent::Text { text } => text,
            other => panic!("expected text content, got {other:?}"),
        }
    }

    #[test]
    fn test_text_becomes_user_message() {
        let messages = RenderOutput::from("Hello, world!").into_messages();

        assert_eq!(messages.len(), 1);
        assert_eq!(messages[0].role, PromptMessageRole::User);
        assert_eq!(text_of(&messages[0]), "Hello, world!");
    }

    #[test]
    fn test_message_passes_through() {
        let reply = assistant_message("Sure, send it over.");
        let messages = RenderOutput::from(reply.clone()).into_messages();
        assert_eq!(messages, vec![reply]);
    }

    #[test]
    fn test_mixed_sequence_keeps_order() {
        let output = RenderOutput::Many(vec![
            RenderOutput::from("first"),
            RenderOutput::from(assistant_message("second")),
            RenderOutput::Content(PromptMessageContent::text("third")),
            RenderOutput::Many(vec![RenderOutput::from("fourth")]),
        ]);

        let messages = output.into_messages();
        let texts: Vec<_> = messages.iter().map(text_of).collect();
        assert_eq!(texts, vec!["first", "second", "third", "fourth"]);
        assert_eq!(messages[1].role, PromptMessageRole::Assistant);
        assert_eq!(messages[2].role, PromptMessageRole::User);
    }

    #[test]
    fn test_json_message_object_is_parsed() {
        let value = json!({
            "role": "assistant",
            "content": { "type": "text", "text": "from json" }
        });

        let messages = RenderOutput::from(value).into_messages();
        assert_eq!(messages[0].role, PromptMessageRole::Assistant);
        assert_eq!(text_of(&messages[0]), "from json");
    }

    #[test]
    fn test_other_json_is_stringified() {
        let messages = RenderOutput::from(json!({ "score": 42 })).into_messages();
        assert_eq!(messages[0].role, PromptMessageRole::User);
        assert_eq!(text_of(&messages[0]), "{\n  \"score\": 42\n}");

        let messages = RenderOutput::from(json!(7)).into_messages();
        assert_eq!(text_of(&messages[0]), "7");

        let messages = RenderOutput::from(json!("plain")).into_messages();
        assert_eq!(text_of(&messages[0]), "plain");
    }

    #[test]
    fn test_display_wraps_any_printable_value() {
        let messages = RenderOutput::display(3.5).into_messages();
        assert_eq!(text_of(&messages[0]), "3.5");
    }
}
