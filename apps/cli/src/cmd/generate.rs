//! `generate` subcommand — request one project idea and stream it.

use crate::GatewayClient;
use anyhow::Result;
use clap::{Args, ValueEnum};
use serde_json::{Map, Value, json};

/// Generate a single project idea.
#[derive(Args, Debug)]
pub struct GenerateCmd {
    /// Topic to build the idea around.
    #[arg(short, long)]
    pub topic: Option<String>,

    /// Product domain (e.g. productivity, education).
    #[arg(short, long)]
    pub domain: Option<String>,

    /// Pin the complexity level.
    #[arg(long, value_enum)]
    pub difficulty: Option<DifficultyArg>,

    /// Print raw text instead of rendered markdown.
    #[arg(long)]
    pub plain: bool,
}

/// Complexity labels accepted by the gateway.
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum DifficultyArg {
    Beginner,
    Intermediate,
    Advanced,
}

impl DifficultyArg {
    fn label(self) -> &'static str {
        match self {
            Self::Beginner => "Beginner",
            Self::Intermediate => "Intermediate",
            Self::Advanced => "Advanced",
        }
    }
}

impl GenerateCmd {
    /// Run the generation against the given gateway.
    pub async fn run(self, gateway: &str) -> Result<()> {
        let client = GatewayClient::new(gateway);

        let mut body = Map::new();
        if let Some(topic) = &self.topic {
            body.insert("topic".into(), json!(topic));
        }
        if let Some(domain) = &self.domain {
            body.insert("domain".into(), json!(domain));
        }
        if let Some(difficulty) = self.difficulty {
            body.insert("difficulty".into(), json!(difficulty.label()));
        }

        let response = client.generate(Value::Object(body)).await?;
        super::stream_response(response, self.plain).await?;
        Ok(())
    }
}
