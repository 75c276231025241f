//! IdeaForge terminal client library.
//!
//! Consumes the gateway's streaming responses: a stateful UTF-8
//! decoder reassembles text across arbitrary chunk boundaries, and the
//! renderer repaints the growing markdown document on every update.

pub use client::GatewayClient;
pub use consume::{StreamConsumer, Utf8Decoder};
pub use render::{Repaint, render_markdown};

pub mod client;
pub mod cmd;
pub mod consume;
pub mod render;
