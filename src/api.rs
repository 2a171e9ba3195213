//! easybeam service client.
//!
//! Implements [`Client`] and [`StreamingClient`] over one shared request
//! builder, plus review submission.

use std::collections::HashMap;

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, AUTHORIZATION, CONTENT_TYPE};
use serde::Serialize;
use tracing::{debug, warn};

use crate::client::{Client, ClientError, StreamingClient};
use crate::http::{add_extra_headers, build_http_client};
use crate::model::{ChatMessage, ChatResponse, EndpointKind};
use crate::options::ClientConfig;
use crate::sse::SSEResponseExt;
use crate::stream::{chat_stream, ChatStream};

/// Client for the hosted prompt/agent service.
///
/// Holds immutable configuration and a shared HTTP client; cheap to share
/// across tasks by reference.
#[derive(Debug, Clone)]
pub struct EasyBeam {
    config: ClientConfig,
    http: reqwest::Client,
}

impl EasyBeam {
    /// Create a client, building its HTTP transport from `config`.
    pub fn new(config: ClientConfig) -> Result<Self, ClientError> {
        let http = build_http_client(&config)?;
        Ok(Self { config, http })
    }

    /// Replace the HTTP transport, e.g. with one pointed at a test server.
    pub fn with_http_client(mut self, http: reqwest::Client) -> Self {
        self.http = http;
        self
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Build the request for an endpoint call without sending it.
    ///
    /// `Accept: text/event-stream` is set only when `streaming` is true.
    /// `userId` is always present in the body, `null` when absent.
    pub fn build_request(
        &self,
        kind: EndpointKind,
        id: &str,
        user_id: Option<&str>,
        filled_variables: HashMap<String, String>,
        messages: Vec<ChatMessage>,
        streaming: bool,
    ) -> Result<reqwest::Request, ClientError> {
        let body = EndpointRequest {
            variables: filled_variables,
            messages,
            stream: streaming,
            user_id,
        };

        self.post_json(&format!("{}/{}", kind, id), &body, streaming)
    }

    /// Submit a review for a completed chat.
    ///
    /// Absent values are sent as `null`. The response body is ignored.
    pub async fn review(
        &self,
        chat_id: &str,
        user_id: Option<&str>,
        review_score: Option<i32>,
        review_text: Option<&str>,
    ) -> Result<(), ClientError> {
        let body = ReviewRequest {
            chat_id,
            user_id,
            review_score,
            review_text,
        };
        let request = self.post_json("review", &body, false)?;

        debug!(chat_id, "Submitting review");
        self.send(request, true).await?;
        Ok(())
    }

    fn post_json<T: Serialize>(
        &self,
        path: &str,
        body: &T,
        event_stream: bool,
    ) -> Result<reqwest::Request, ClientError> {
        let body = serde_json::to_vec(body).map_err(ClientError::Encoding)?;

        let mut authorization =
            HeaderValue::from_str(&format!("Bearer {}", self.config.token.expose_secret()))
                .map_err(|_| ClientError::Config("Invalid token".to_string()))?;
        authorization.set_sensitive(true);

        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers.insert(AUTHORIZATION, authorization);
        if event_stream {
            headers.insert(ACCEPT, HeaderValue::from_static("text/event-stream"));
        }

        let url = self.config.endpoint_url(path);
        let mut req = self.http.post(&url).headers(headers);
        req = add_extra_headers(req, &self.config.extra_headers);

        req.body(body)
            .build()
            .map_err(|e| ClientError::Config(format!("Invalid request URL {}: {}", url, e)))
    }

    /// Execute a request and reject any status outside 200..=299.
    ///
    /// With `capture_error_body` the rejected response's body is read into
    /// the error; otherwise the response is dropped unread, since an event
    /// stream body may never end.
    async fn send(
        &self,
        request: reqwest::Request,
        capture_error_body: bool,
    ) -> Result<reqwest::Response, ClientError> {
        let response = self.http.execute(request).await?;
        let status = response.status();

        if !status.is_success() {
            let body = if capture_error_body {
                response.text().await.unwrap_or_default()
            } else {
                String::new()
            };
            warn!(%status, "Request rejected");
            return Err(ClientError::InvalidResponse { status, body });
        }

        debug!(%status, "Response received");
        Ok(response)
    }
}

#[async_trait]
impl Client for EasyBeam {
    async fn request(
        &self,
        kind: EndpointKind,
        id: &str,
        user_id: Option<&str>,
        filled_variables: HashMap<String, String>,
        messages: Vec<ChatMessage>,
    ) -> Result<ChatResponse, ClientError> {
        debug!(%kind, id, messages = messages.len(), "Sending request");
        let request = self.build_request(kind, id, user_id, filled_variables, messages, false)?;

        let response = self.send(request, true).await?;
        let body = response.bytes().await?;

        serde_json::from_slice(&body).map_err(ClientError::Decoding)
    }
}

#[async_trait]
impl StreamingClient for EasyBeam {
    async fn request_stream(
        &self,
        kind: EndpointKind,
        id: &str,
        user_id: Option<&str>,
        filled_variables: HashMap<String, String>,
        messages: Vec<ChatMessage>,
    ) -> Result<ChatStream, ClientError> {
        debug!(%kind, id, messages = messages.len(), "Sending streaming request");
        let request = self.build_request(kind, id, user_id, filled_variables, messages, true)?;

        let response = self.send(request, false).await?;

        Ok(chat_stream(response.sse()))
    }
}

// --- Request Types ---

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct EndpointRequest<'a> {
    variables: HashMap<String, String>,
    messages: Vec<ChatMessage>,
    stream: bool,
    user_id: Option<&'a str>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ReviewRequest<'a> {
    chat_id: &'a str,
    user_id: Option<&'a str>,
    review_score: Option<i32>,
    review_text: Option<&'a str>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::ChatRole;
    use serde_json::{json, Value};

    fn client() -> EasyBeam {
        EasyBeam::new(ClientConfig::new("test-token").with_base_url("http://localhost:9999/v1")).unwrap()
    }

    fn body_json(request: &reqwest::Request) -> Value {
        let bytes = request.body().and_then(|b| b.as_bytes()).unwrap();
        serde_json::from_slice(bytes).unwrap()
    }

    #[test]
    fn test_build_request_line_and_headers() {
        let request = client()
            .build_request(EndpointKind::Agent, "a-42", None, HashMap::new(), vec![], false)
            .unwrap();

        assert_eq!(request.method(), reqwest::Method::POST);
        assert_eq!(request.url().as_str(), "http://localhost:9999/v1/agent/a-42");
        assert_eq!(request.headers()[CONTENT_TYPE], "application/json");
        assert_eq!(request.headers()[AUTHORIZATION], "Bearer test-token");
        assert!(request.headers()[AUTHORIZATION].is_sensitive());
        assert!(request.headers().get(ACCEPT).is_none());
    }

    #[test]
    fn test_build_streaming_request_accepts_event_stream() {
        let request = client()
            .build_request(EndpointKind::Prompt, "p1", None, HashMap::new(), vec![], true)
            .unwrap();

        assert_eq!(request.headers()[ACCEPT], "text/event-stream");
        assert_eq!(body_json(&request)["stream"], json!(true));
    }

    #[test]
    fn test_build_request_body() {
        let mut variables = HashMap::new();
        variables.insert("name".to_string(), "Ada".to_string());
        let messages = vec![
            ChatMessage::new("Hi", ChatRole::User, "2024-05-01T09:30:12.345Z", "m1"),
            ChatMessage::new("Hello", ChatRole::Ai, "2024-05-01T09:30:13.000Z", "m2")
                .with_provider_id("openai")
                .with_cost(0.5),
        ];

        let request = client()
            .build_request(EndpointKind::Portal, "portal-1", Some("u1"), variables, messages, false)
            .unwrap();

        assert_eq!(
            body_json(&request),
            json!({
                "variables": {"name": "Ada"},
                "messages": [
                    {"content": "Hi", "role": "USER", "createdAt": "2024-05-01T09:30:12.345Z", "id": "m1"},
                    {
                        "content": "Hello",
                        "role": "AI",
                        "createdAt": "2024-05-01T09:30:13.000Z",
                        "id": "m2",
                        "providerId": "openai",
                        "cost": 0.5
                    }
                ],
                "stream": false,
                "userId": "u1"
            })
        );
    }

    #[test]
    fn test_absent_user_id_is_explicit_null() {
        let request = client()
            .build_request(EndpointKind::Workflow, "w1", None, HashMap::new(), vec![], false)
            .unwrap();

        let body = body_json(&request);
        assert!(body.as_object().unwrap().contains_key("userId"));
        assert_eq!(body["userId"], Value::Null);
    }

    #[test]
    fn test_extra_headers_are_sent() {
        let config = ClientConfig::new("t")
            .with_base_url("http://localhost:9999")
            .with_header("X-Client".to_string(), "tests".to_string());
        let request = EasyBeam::new(config)
            .unwrap()
            .build_request(EndpointKind::Prompt, "p1", None, HashMap::new(), vec![], false)
            .unwrap();

        assert_eq!(request.headers()["X-Client"], "tests");
    }

    #[test]
    fn test_malformed_base_url_is_config_error() {
        let client = EasyBeam::new(ClientConfig::new("t").with_base_url("not a url")).unwrap();
        let result = client.build_request(EndpointKind::Prompt, "p1", None, HashMap::new(), vec![], false);

        assert!(matches!(result, Err(ClientError::Config(_))));
    }

    #[test]
    fn test_review_body_serializes_nulls() {
        let body = ReviewRequest {
            chat_id: "c1",
            user_id: None,
            review_score: Some(5),
            review_text: None,
        };

        assert_eq!(
            serde_json::to_value(&body).unwrap(),
            json!({"chatId": "c1", "userId": null, "reviewScore": 5, "reviewText": null})
        );
    }

    #[test]
    fn test_debug_hides_token() {
        let debug = format!("{:?}", client());
        assert!(!debug.contains("test-token"));
    }
}
