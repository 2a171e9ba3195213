//! Chat messages and endpoint responses exchanged with the service.

use chrono::{SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Role of the message sender.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum ChatRole {
    #[serde(rename = "AI")]
    Ai,
    #[serde(rename = "USER")]
    User,
}

/// One turn in a conversation.
///
/// Optional accounting fields are `None` until a provider has answered.
/// They are omitted from the wire form when absent.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ChatMessage {
    content: String,
    role: ChatRole,
    created_at: String,
    id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    provider_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    input_tokens: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    output_tokens: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    cost: Option<f64>,
}

impl ChatMessage {
    /// Create a message with all required fields.
    pub fn new(
        content: impl Into<String>,
        role: ChatRole,
        created_at: impl Into<String>,
        id: impl Into<String>,
    ) -> Self {
        Self {
            content: content.into(),
            role,
            created_at: created_at.into(),
            id: id.into(),
            provider_id: None,
            input_tokens: None,
            output_tokens: None,
            cost: None,
        }
    }

    /// Create a user message stamped with the current time.
    pub fn user(content: impl Into<String>, id: impl Into<String>) -> Self {
        Self::new(content, ChatRole::User, Self::current_timestamp(), id)
    }

    /// Create an AI message stamped with the current time.
    pub fn ai(content: impl Into<String>, id: impl Into<String>) -> Self {
        Self::new(content, ChatRole::Ai, Self::current_timestamp(), id)
    }

    /// Set the provider identifier.
    pub fn with_provider_id(mut self, provider_id: impl Into<String>) -> Self {
        self.provider_id = Some(provider_id.into());
        self
    }

    /// Set the input token count.
    pub fn with_input_tokens(mut self, input_tokens: f64) -> Self {
        self.input_tokens = Some(input_tokens);
        self
    }

    /// Set the output token count.
    pub fn with_output_tokens(mut self, output_tokens: f64) -> Self {
        self.output_tokens = Some(output_tokens);
        self
    }

    /// Set the cost.
    pub fn with_cost(mut self, cost: f64) -> Self {
        self.cost = Some(cost);
        self
    }

    /// Current instant as ISO-8601 UTC with millisecond precision,
    /// e.g. `2024-05-01T09:30:12.345Z`.
    pub fn current_timestamp() -> String {
        Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn role(&self) -> ChatRole {
        self.role
    }

    pub fn created_at(&self) -> &str {
        &self.created_at
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn provider_id(&self) -> Option<&str> {
        self.provider_id.as_deref()
    }

    pub fn input_tokens(&self) -> Option<f64> {
        self.input_tokens
    }

    pub fn output_tokens(&self) -> Option<f64> {
        self.output_tokens
    }

    pub fn cost(&self) -> Option<f64> {
        self.cost
    }
}

/// One unit of output from an endpoint call.
///
/// Non-streaming calls return exactly one; streaming calls yield one per
/// `data: ` line, all sharing the same `chat_id`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ChatResponse {
    new_message: ChatMessage,
    chat_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    stream_finished: Option<bool>,
}

impl ChatResponse {
    pub fn new(new_message: ChatMessage, chat_id: impl Into<String>, stream_finished: Option<bool>) -> Self {
        Self {
            new_message,
            chat_id: chat_id.into(),
            stream_finished,
        }
    }

    pub fn new_message(&self) -> &ChatMessage {
        &self.new_message
    }

    pub fn chat_id(&self) -> &str {
        &self.chat_id
    }

    pub fn stream_finished(&self) -> Option<bool> {
        self.stream_finished
    }

    /// Whether this is the terminal chunk of a stream.
    ///
    /// Informational only: the stream keeps reading until the body ends.
    pub fn is_stream_finished(&self) -> bool {
        self.stream_finished == Some(true)
    }

    /// Take the new message, typically to append it to the caller's history.
    pub fn into_message(self) -> ChatMessage {
        self.new_message
    }
}

/// Kind of remote endpoint, used as the URL path segment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EndpointKind {
    Prompt,
    Agent,
    Portal,
    Workflow,
}

impl EndpointKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            EndpointKind::Prompt => "prompt",
            EndpointKind::Agent => "agent",
            EndpointKind::Portal => "portal",
            EndpointKind::Workflow => "workflow",
        }
    }
}

impl fmt::Display for EndpointKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::DateTime;
    use serde_json::json;

    #[test]
    fn test_role_wire_literals() {
        assert_eq!(serde_json::to_value(ChatRole::Ai).unwrap(), json!("AI"));
        assert_eq!(serde_json::to_value(ChatRole::User).unwrap(), json!("USER"));
        assert!(serde_json::from_value::<ChatRole>(json!("assistant")).is_err());
    }

    #[test]
    fn test_message_omits_absent_optionals() {
        let message = ChatMessage::new("Hi", ChatRole::User, "2024-05-01T09:30:12.345Z", "m1");

        assert_eq!(
            serde_json::to_value(&message).unwrap(),
            json!({
                "content": "Hi",
                "role": "USER",
                "createdAt": "2024-05-01T09:30:12.345Z",
                "id": "m1"
            })
        );
    }

    #[test]
    fn test_message_includes_present_optionals() {
        let message = ChatMessage::new("Hello", ChatRole::Ai, "2024-05-01T09:30:12.345Z", "m2")
            .with_provider_id("openai")
            .with_input_tokens(10.0)
            .with_output_tokens(20.0)
            .with_cost(0.001);

        assert_eq!(
            serde_json::to_value(&message).unwrap(),
            json!({
                "content": "Hello",
                "role": "AI",
                "createdAt": "2024-05-01T09:30:12.345Z",
                "id": "m2",
                "providerId": "openai",
                "inputTokens": 10.0,
                "outputTokens": 20.0,
                "cost": 0.001
            })
        );
    }

    #[test]
    fn test_message_decodes_null_and_missing_optionals() {
        let message: ChatMessage = serde_json::from_value(json!({
            "content": "Hello",
            "role": "AI",
            "createdAt": "2024-05-01T09:30:12.345Z",
            "id": "m3",
            "providerId": null,
            "inputTokens": 12
        }))
        .unwrap();

        assert_eq!(message.provider_id(), None);
        assert_eq!(message.input_tokens(), Some(12.0));
        assert_eq!(message.output_tokens(), None);
        assert_eq!(message.cost(), None);
    }

    #[test]
    fn test_message_requires_id() {
        let result = serde_json::from_value::<ChatMessage>(json!({
            "content": "Hello",
            "role": "AI",
            "createdAt": "2024-05-01T09:30:12.345Z"
        }));
        assert!(result.is_err());
    }

    #[test]
    fn test_current_timestamp_format() {
        let timestamp = ChatMessage::current_timestamp();

        assert!(timestamp.ends_with('Z'));
        // YYYY-MM-DDTHH:MM:SS.mmmZ
        assert_eq!(timestamp.len(), 24);
        assert_eq!(&timestamp[19..20], ".");
        assert!(DateTime::parse_from_rfc3339(&timestamp).is_ok());
    }

    #[test]
    fn test_response_stream_finished() {
        let response: ChatResponse = serde_json::from_value(json!({
            "newMessage": {
                "content": "Done",
                "role": "AI",
                "createdAt": "2024-05-01T09:30:12.345Z",
                "id": "m4"
            },
            "chatId": "c1",
            "streamFinished": true
        }))
        .unwrap();

        assert_eq!(response.chat_id(), "c1");
        assert!(response.is_stream_finished());
        assert_eq!(response.into_message().content(), "Done");
    }

    #[test]
    fn test_response_without_stream_flag() {
        let response: ChatResponse = serde_json::from_value(json!({
            "newMessage": {
                "content": "Hi",
                "role": "AI",
                "createdAt": "2024-05-01T09:30:12.345Z",
                "id": "m5"
            },
            "chatId": "c2"
        }))
        .unwrap();

        assert_eq!(response.stream_finished(), None);
        assert!(!response.is_stream_finished());
    }

    #[test]
    fn test_endpoint_kind_path_segments() {
        assert_eq!(EndpointKind::Prompt.as_str(), "prompt");
        assert_eq!(EndpointKind::Agent.as_str(), "agent");
        assert_eq!(EndpointKind::Portal.to_string(), "portal");
        assert_eq!(EndpointKind::Workflow.to_string(), "workflow");
    }
}
