//! `chat` subcommand — interactive brainstorming loop.

use crate::GatewayClient;
use anyhow::Result;
use clap::Args;
use llm::Message;
use std::io::Write;
use tokio::io::{AsyncBufReadExt, BufReader};

/// Chat with the idea assistant.
#[derive(Args, Debug)]
pub struct ChatCmd {
    /// Print raw text instead of rendered markdown.
    #[arg(long)]
    pub plain: bool,
}

impl ChatCmd {
    /// Run the interactive loop against the given gateway.
    pub async fn run(self, gateway: &str) -> Result<()> {
        let client = GatewayClient::new(gateway);
        let mut history: Vec<Message> = Vec::new();
        let mut lines = BufReader::new(tokio::io::stdin()).lines();

        println!("Chat with the idea assistant. /quit to exit.");
        loop {
            print!("> ");
            std::io::stdout().flush()?;

            let Some(line) = lines.next_line().await? else {
                break;
            };
            let line = line.trim();
            if line.is_empty() {
                continue;
            }
            if matches!(line, "/quit" | "/exit") {
                break;
            }

            history.push(Message::user(line));
            let response = match client.chat(&history).await {
                Ok(response) => response,
                Err(e) => {
                    eprintln!("Error: {e}");
                    // Drop the turn so a retry does not resend it twice.
                    history.pop();
                    continue;
                }
            };

            match super::stream_response(response, self.plain).await? {
                Some(reply) => history.push(Message::assistant(reply)),
                None => break,
            }
        }
        Ok(())
    }
}
