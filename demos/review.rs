//! Non-streaming agent call followed by a review of the chat.
//!
//! Run with:
//! ```bash
//! export EASYBEAM_TOKEN="your-token"
//! export EASYBEAM_AGENT_ID="your-agent-id"
//! cargo run --example review
//! ```

use std::collections::HashMap;

use easybeam::{ChatMessage, Client, ClientConfig, EasyBeam};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let token = std::env::var("EASYBEAM_TOKEN").expect("EASYBEAM_TOKEN environment variable must be set");
    let agent_id =
        std::env::var("EASYBEAM_AGENT_ID").expect("EASYBEAM_AGENT_ID environment variable must be set");

    let client = EasyBeam::new(ClientConfig::new(token))?;

    let messages = vec![ChatMessage::user("What can you help me with?", "demo-1")];

    let response = client
        .get_agent(&agent_id, Some("demo-user"), HashMap::new(), messages)
        .await?;

    println!("Response: {}", response.new_message().content());
    if let (Some(input), Some(output)) = (
        response.new_message().input_tokens(),
        response.new_message().output_tokens(),
    ) {
        println!("Tokens: {} in / {} out", input, output);
    }

    client
        .review(response.chat_id(), Some("demo-user"), Some(5), Some("Helpful"))
        .await?;
    println!("Review submitted for chat {}", response.chat_id());

    Ok(())
}
