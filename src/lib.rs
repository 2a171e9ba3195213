//! # easybeam - client for the easybeam prompt/agent service
//!
//! Sends a conversation (chat messages plus template variables) to a remote
//! prompt, agent, portal or workflow and returns either one completed
//! response or a stream of response chunks. Chats can be reviewed afterwards.
//!
//! ## Features
//! - Async-first, tokio compatible
//! - Streaming via Server-Sent Events, pull-driven and cancellable by drop
//! - Typed request and response models
//! - One HTTP exchange per call, no retries
//!
//! ## Architecture
//!
//! - **`Client`**: non-streaming calls, with per-endpoint convenience methods
//! - **`StreamingClient`**: streaming calls returning a [`ChatStream`]
//! - **`EasyBeam`**: the service client implementing both
//!
//! The library keeps no conversation state: append each response's message
//! to your history before the next call.
//!
//! ## Example
//! ```no_run
//! use std::collections::HashMap;
//!
//! use easybeam::{ChatMessage, ClientConfig, EasyBeam, StreamingClient};
//! use futures::StreamExt;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = EasyBeam::new(ClientConfig::new("your-token"))?;
//!
//!     let mut variables = HashMap::new();
//!     variables.insert("topic".to_string(), "Rust".to_string());
//!     let messages = vec![ChatMessage::user("Tell me a fact.", "msg-1")];
//!
//!     let mut stream = client.stream_prompt("prompt-id", None, variables, messages).await?;
//!     while let Some(chunk) = stream.next().await {
//!         let chunk = chunk?;
//!         println!("{}", chunk.new_message().content());
//!     }
//!     Ok(())
//! }
//! ```

pub mod api;
pub mod client;
pub mod http;
pub mod model;
pub mod options;
pub mod sse;
pub mod stream;

// Re-exports for convenience
pub use api::EasyBeam;
pub use client::{Client, ClientError, StreamingClient};
pub use model::{ChatMessage, ChatResponse, ChatRole, EndpointKind};
pub use options::ClientConfig;
pub use stream::ChatStream;
