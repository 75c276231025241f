use anyhow::Result;
use clap::{Parser, Subcommand};
use ideaforge_cli::cmd::{ChatCmd, GenerateCmd};
use tracing_subscriber::EnvFilter;

/// Streaming client for the ideaforge gateway.
#[derive(Parser, Debug)]
#[command(version, about)]
struct Cli {
    /// Gateway base URL.
    #[arg(long, global = true, default_value = "http://127.0.0.1:3000")]
    gateway: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Generate a single project idea.
    Generate(GenerateCmd),
    /// Chat interactively about project ideas.
    Chat(ChatCmd),
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.command {
        Command::Generate(cmd) => cmd.run(&cli.gateway).await,
        Command::Chat(cmd) => cmd.run(&cli.gateway).await,
    }
}
