//! CLI subcommands.

pub use chat::ChatCmd;
pub use generate::GenerateCmd;

mod chat;
mod generate;

use crate::{Repaint, StreamConsumer, render_markdown};
use anyhow::Result;
use futures_util::StreamExt;
use std::io::Write;

/// Consume a streaming response, printing as it arrives.
///
/// Plain mode prints decoded increments; rendered mode repaints the
/// whole document on every chunk. Ctrl-c aborts the read, dropping
/// the connection, and returns `None`.
pub(crate) async fn stream_response(
    response: reqwest::Response,
    plain: bool,
) -> Result<Option<String>> {
    let mut stream = response.bytes_stream();
    let mut consumer = StreamConsumer::new();
    let mut repaint = Repaint::new();
    let mut stdout = std::io::stdout();

    loop {
        tokio::select! {
            chunk = stream.next() => match chunk {
                Some(Ok(bytes)) => {
                    let delta = consumer.push(&bytes);
                    if plain {
                        print!("{delta}");
                        stdout.flush().ok();
                    } else {
                        repaint.draw(&mut stdout, &render_markdown(consumer.text()))?;
                    }
                }
                Some(Err(e)) => {
                    eprintln!("\nError: {e}");
                    break;
                }
                None => break,
            },
            _ = tokio::signal::ctrl_c() => {
                println!();
                return Ok(None);
            }
        }
    }

    let document = consumer.finish();
    if plain {
        println!();
    } else {
        repaint.draw(&mut stdout, &render_markdown(&document))?;
    }
    Ok(Some(document))
}
