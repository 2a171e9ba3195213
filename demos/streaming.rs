//! Streaming a prompt and carrying the conversation forward.
//!
//! Run with:
//! ```bash
//! export EASYBEAM_TOKEN="your-token"
//! export EASYBEAM_PROMPT_ID="your-prompt-id"
//! cargo run --example streaming
//! ```

use std::collections::HashMap;
use std::io::Write;
use std::time::Duration;

use easybeam::{ChatMessage, ClientConfig, EasyBeam, StreamingClient};
use futures::StreamExt;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let token = std::env::var("EASYBEAM_TOKEN").expect("EASYBEAM_TOKEN environment variable must be set");
    let prompt_id =
        std::env::var("EASYBEAM_PROMPT_ID").expect("EASYBEAM_PROMPT_ID environment variable must be set");

    let client = EasyBeam::new(ClientConfig::new(token).with_timeout(Duration::from_secs(60)))?;

    let mut variables = HashMap::new();
    variables.insert("language".to_string(), "Rust".to_string());

    let mut history = vec![ChatMessage::user("Write a haiku about ownership.", "demo-1")];

    println!("Streaming response...\n");

    let mut stream = client
        .stream_prompt(&prompt_id, None, variables.clone(), history.clone())
        .await?;

    // Each chunk carries the message so far; keep the latest one
    let mut last = None;
    while let Some(chunk) = stream.next().await {
        let chunk = chunk?;
        print!("\r{}", chunk.new_message().content());
        std::io::stdout().flush()?;

        if chunk.is_stream_finished() {
            println!("\n\n=== Stream Complete (chat {}) ===", chunk.chat_id());
        }
        last = Some(chunk);
    }

    if let Some(chunk) = last {
        let message = chunk.new_message();
        if let Some(cost) = message.cost() {
            println!("Cost: {}", cost);
        }
        history.push(chunk.into_message());
    }

    println!("History now holds {} messages", history.len());
    Ok(())
}
