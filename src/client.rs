//! Core client traits and error types.

use std::collections::HashMap;

use async_trait::async_trait;
use thiserror::Error;

use crate::model::{ChatMessage, ChatResponse, EndpointKind};
use crate::stream::ChatStream;

/// Errors that can occur during client operations.
#[derive(Error, Debug)]
pub enum ClientError {
    /// The service answered with a status outside 200..=299.
    #[error("Invalid response: HTTP {status}: {body}")]
    InvalidResponse {
        status: reqwest::StatusCode,
        body: String,
    },

    /// The request body could not be serialized. Raised before any I/O.
    #[error("Encoding error: {0}")]
    Encoding(#[source] serde_json::Error),

    /// A response body, or one streamed `data:` payload, is not a valid response.
    #[error("Decoding error: {0}")]
    Decoding(#[source] serde_json::Error),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Configuration error: {0}")]
    Config(String),
}

/// Non-streaming access to the service endpoints.
///
/// Implementors provide `request`; the per-kind wrappers fix the
/// [`EndpointKind`] and delegate unchanged.
///
/// # Arguments (shared by all methods)
/// - `id`: Identifier of the prompt, agent, portal or workflow
/// - `user_id`: Optional end-user identifier, sent as `null` when absent
/// - `filled_variables`: Template variable values by name
/// - `messages`: Prior conversation, oldest first
#[async_trait]
pub trait Client: Send + Sync {
    /// Issue one request and decode the complete response body.
    ///
    /// # Returns
    /// The decoded response, or `InvalidResponse` for a non-2xx status,
    /// `Decoding` for a malformed body, `Http` for transport failures.
    async fn request(
        &self,
        kind: EndpointKind,
        id: &str,
        user_id: Option<&str>,
        filled_variables: HashMap<String, String>,
        messages: Vec<ChatMessage>,
    ) -> Result<ChatResponse, ClientError>;

    async fn get_prompt(
        &self,
        prompt_id: &str,
        user_id: Option<&str>,
        filled_variables: HashMap<String, String>,
        messages: Vec<ChatMessage>,
    ) -> Result<ChatResponse, ClientError> {
        self.request(EndpointKind::Prompt, prompt_id, user_id, filled_variables, messages)
            .await
    }

    async fn get_agent(
        &self,
        agent_id: &str,
        user_id: Option<&str>,
        filled_variables: HashMap<String, String>,
        messages: Vec<ChatMessage>,
    ) -> Result<ChatResponse, ClientError> {
        self.request(EndpointKind::Agent, agent_id, user_id, filled_variables, messages)
            .await
    }

    async fn get_portal(
        &self,
        portal_id: &str,
        user_id: Option<&str>,
        filled_variables: HashMap<String, String>,
        messages: Vec<ChatMessage>,
    ) -> Result<ChatResponse, ClientError> {
        self.request(EndpointKind::Portal, portal_id, user_id, filled_variables, messages)
            .await
    }

    async fn get_workflow(
        &self,
        workflow_id: &str,
        user_id: Option<&str>,
        filled_variables: HashMap<String, String>,
        messages: Vec<ChatMessage>,
    ) -> Result<ChatResponse, ClientError> {
        self.request(EndpointKind::Workflow, workflow_id, user_id, filled_variables, messages)
            .await
    }
}

/// Extension trait for streaming support.
///
/// The returned [`ChatStream`] is lazy and single-pass: body data is only
/// read as the consumer polls, and dropping the stream releases the
/// connection.
#[async_trait]
pub trait StreamingClient: Client {
    /// Issue one streaming request and validate its status.
    ///
    /// # Returns
    /// A stream of decoded chunks, or `InvalidResponse` before any chunk when
    /// the status is not 2xx.
    async fn request_stream(
        &self,
        kind: EndpointKind,
        id: &str,
        user_id: Option<&str>,
        filled_variables: HashMap<String, String>,
        messages: Vec<ChatMessage>,
    ) -> Result<ChatStream, ClientError>;

    async fn stream_prompt(
        &self,
        prompt_id: &str,
        user_id: Option<&str>,
        filled_variables: HashMap<String, String>,
        messages: Vec<ChatMessage>,
    ) -> Result<ChatStream, ClientError> {
        self.request_stream(EndpointKind::Prompt, prompt_id, user_id, filled_variables, messages)
            .await
    }

    async fn stream_agent(
        &self,
        agent_id: &str,
        user_id: Option<&str>,
        filled_variables: HashMap<String, String>,
        messages: Vec<ChatMessage>,
    ) -> Result<ChatStream, ClientError> {
        self.request_stream(EndpointKind::Agent, agent_id, user_id, filled_variables, messages)
            .await
    }

    async fn stream_portal(
        &self,
        portal_id: &str,
        user_id: Option<&str>,
        filled_variables: HashMap<String, String>,
        messages: Vec<ChatMessage>,
    ) -> Result<ChatStream, ClientError> {
        self.request_stream(EndpointKind::Portal, portal_id, user_id, filled_variables, messages)
            .await
    }

    async fn stream_workflow(
        &self,
        workflow_id: &str,
        user_id: Option<&str>,
        filled_variables: HashMap<String, String>,
        messages: Vec<ChatMessage>,
    ) -> Result<ChatStream, ClientError> {
        self.request_stream(
            EndpointKind::Workflow,
            workflow_id,
            user_id,
            filled_variables,
            messages,
        )
        .await
    }
}
