//! IdeaForge domain logic.
//!
//! Everything the gateway needs that is independent of HTTP: generation
//! parameters and their validation, deterministic prompt building, and
//! the per-identity token-bucket rate limiter.

pub use limit::{RateLimiter, TokenBucket};
pub use params::{Difficulty, GenerationParams, ValidationError};
pub use prompt::{SYSTEM_PROMPT, build_prompt};

mod limit;
mod params;
mod prompt;
