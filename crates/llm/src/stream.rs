//! Streaming response chunks and incremental SSE parsing.

use serde::Deserialize;

/// A streaming chat completion chunk.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct StreamChunk {
    /// The list of completion choices (with delta content).
    #[serde(default)]
    pub choices: Vec<Choice>,
}

/// One completion choice within a chunk.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Choice {
    /// Incremental content for this choice.
    #[serde(default)]
    pub delta: Delta,
    /// Why the model stopped, present only on the final chunk.
    pub finish_reason: Option<FinishReason>,
}

/// Incremental message content.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Delta {
    /// New text, absent on role/metadata-only deltas.
    pub content: Option<String>,
}

/// The reason the model stopped generating.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FinishReason {
    Stop,
    Length,
    ContentFilter,
    #[serde(other)]
    Other,
}

impl StreamChunk {
    /// Get the content of the first choice.
    pub fn content(&self) -> Option<&str> {
        self.choices
            .first()
            .and_then(|c| c.delta.content.as_deref())
            .filter(|s| !s.is_empty())
    }

    /// Get the reason the model stopped generating.
    pub fn reason(&self) -> Option<FinishReason> {
        self.choices.first().and_then(|c| c.finish_reason)
    }
}

/// An event produced by the SSE parser.
#[derive(Debug)]
pub enum SseEvent {
    /// A parsed completion chunk.
    Chunk(StreamChunk),
    /// The `[DONE]` terminator.
    Done,
}

/// Incremental parser for an SSE byte stream.
///
/// Transport reads split the stream at arbitrary byte offsets: an
/// event, or a multi-byte character inside one, may straddle two
/// reads. Bytes are buffered until a complete newline-terminated line
/// is available, so only whole events are ever parsed.
#[derive(Debug, Default)]
pub struct SseParser {
    buf: Vec<u8>,
}

impl SseParser {
    /// Create an empty parser.
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed one transport read and collect the events it completes.
    ///
    /// Malformed `data:` payloads are skipped, matching upstream
    /// keep-alive and vendor-extension lines.
    pub fn push(&mut self, bytes: &[u8]) -> Vec<SseEvent> {
        self.buf.extend_from_slice(bytes);

        let mut events = Vec::new();
        while let Some(pos) = self.buf.iter().position(|&b| b == b'\n') {
            let line: Vec<u8> = self.buf.drain(..=pos).collect();
            let Ok(line) = std::str::from_utf8(&line) else {
                tracing::trace!("skipping non-utf8 SSE line");
                continue;
            };
            let Some(data) = line.trim().strip_prefix("data:") else {
                continue;
            };
            let data = data.trim_start();
            if data == "[DONE]" {
                events.push(SseEvent::Done);
                continue;
            }
            match serde_json::from_str::<StreamChunk>(data) {
                Ok(chunk) => events.push(SseEvent::Chunk(chunk)),
                Err(e) => tracing::trace!("skipping malformed SSE data line: {e}"),
            }
        }
        events
    }

    /// Bytes currently held back waiting for a newline.
    pub fn pending(&self) -> usize {
        self.buf.len()
    }
}
