//! Incremental consumption of a streamed generation.
//!
//! Transport chunks arrive at arbitrary byte boundaries, so a chunk
//! may end in the middle of a multi-byte UTF-8 sequence. Decoding each
//! chunk in isolation would corrupt such characters; the decoder
//! carries the partial sequence into the next chunk instead.

/// Streaming UTF-8 decoder with carry-over for split sequences.
#[derive(Debug, Default)]
pub struct Utf8Decoder {
    /// Bytes of an incomplete trailing sequence (at most 3).
    pending: Vec<u8>,
}

impl Utf8Decoder {
    /// Create a fresh decoder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Decode one chunk, joining any bytes held over from the
    /// previous call. Invalid sequences decode as U+FFFD; an
    /// incomplete trailing sequence is held back for the next chunk.
    pub fn decode(&mut self, bytes: &[u8]) -> String {
        let mut input = std::mem::take(&mut self.pending);
        input.extend_from_slice(bytes);

        let mut out = String::with_capacity(input.len());
        let mut rest = input.as_slice();
        loop {
            match std::str::from_utf8(rest) {
                Ok(valid) => {
                    out.push_str(valid);
                    break;
                }
                Err(err) => {
                    let (valid, after) = rest.split_at(err.valid_up_to());
                    out.push_str(std::str::from_utf8(valid).unwrap_or_default());
                    match err.error_len() {
                        Some(bad) => {
                            out.push(char::REPLACEMENT_CHARACTER);
                            rest = &after[bad..];
                        }
                        None => {
                            // Sequence may complete in the next chunk.
                            self.pending = after.to_vec();
                            break;
                        }
                    }
                }
            }
        }
        out
    }

    /// Flush once the stream has ended: a held-back partial sequence
    /// can no longer complete and decodes as U+FFFD.
    pub fn finish(&mut self) -> Option<char> {
        if self.pending.is_empty() {
            None
        } else {
            self.pending.clear();
            Some(char::REPLACEMENT_CHARACTER)
        }
    }
}

/// Accumulated state for one generation attempt.
///
/// The document is append-only while the stream runs and scoped to a
/// single attempt; a new generation gets a fresh consumer.
#[derive(Debug, Default)]
pub struct StreamConsumer {
    decoder: Utf8Decoder,
    text: String,
}

impl StreamConsumer {
    /// Create a consumer for a new generation attempt.
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed one transport chunk; returns the newly decoded increment.
    pub fn push(&mut self, chunk: &[u8]) -> String {
        let decoded = self.decoder.decode(chunk);
        self.text.push_str(&decoded);
        decoded
    }

    /// The cumulative document so far.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Flush the decoder and return the completed document.
    pub fn finish(mut self) -> String {
        if let Some(replacement) = self.decoder.finish() {
            self.text.push(replacement);
        }
        self.text
    }
}
