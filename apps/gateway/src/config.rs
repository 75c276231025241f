//! Request-time configuration resolved from the environment.
//!
//! Nothing is cached: each request re-reads its configuration, so a
//! redeployed environment takes effect without a restart. Invalid
//! overrides fall back to defaults, silently in production and
//! `warn`-logged otherwise.

use compact_str::CompactString;
use std::collections::BTreeMap;
use std::sync::Arc;

/// Default model identifier.
pub const DEFAULT_MODEL: &str = "gpt-4o-mini";
/// Default maximum output tokens.
pub const DEFAULT_MAX_TOKENS: u32 = 500;
/// Upper bound accepted for the max-token override.
pub const MAX_TOKENS_CEILING: u32 = 4000;
/// Default sampling temperature.
pub const DEFAULT_TEMPERATURE: f32 = 0.9;

/// Where configuration values come from.
///
/// The process environment in deployment; a fixed map in tests, so
/// tests never mutate process-global state.
#[derive(Debug, Clone, Default)]
pub enum EnvSource {
    /// Read from `std::env`.
    #[default]
    Process,
    /// Read from an in-memory map.
    Fixed(Arc<BTreeMap<String, String>>),
}

impl EnvSource {
    /// Build a fixed source from key/value pairs.
    pub fn fixed<K, V>(vars: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        Self::Fixed(Arc::new(
            vars.into_iter().map(|(k, v)| (k.into(), v.into())).collect(),
        ))
    }

    fn get(&self, key: &str) -> Option<String> {
        match self {
            Self::Process => std::env::var(key).ok(),
            Self::Fixed(map) => map.get(key).cloned(),
        }
    }
}

/// Generation settings forwarded to the upstream call.
#[derive(Debug, Clone, PartialEq)]
pub struct GenConfig {
    /// Model identifier.
    pub model: CompactString,
    /// Maximum output tokens, within `1..=4000`.
    pub max_tokens: u32,
    /// Sampling temperature, within `0.0..=2.0`.
    pub temperature: f32,
}

impl GenConfig {
    fn resolve(source: &EnvSource, production: bool) -> Self {
        let model = source
            .get("OPENAI_MODEL")
            .filter(|m| !m.is_empty())
            .map(CompactString::from)
            .unwrap_or_else(|| CompactString::const_new(DEFAULT_MODEL));

        let max_tokens = match source.get("OPENAI_MAX_TOKENS") {
            None => DEFAULT_MAX_TOKENS,
            Some(raw) => match raw.parse::<u32>() {
                Ok(v) if (1..=MAX_TOKENS_CEILING).contains(&v) => v,
                _ => {
                    if !production {
                        tracing::warn!(
                            "invalid OPENAI_MAX_TOKENS, using default {DEFAULT_MAX_TOKENS}"
                        );
                    }
                    DEFAULT_MAX_TOKENS
                }
            },
        };

        let temperature = match source.get("OPENAI_TEMPERATURE") {
            None => DEFAULT_TEMPERATURE,
            Some(raw) => match raw.parse::<f32>() {
                Ok(v) if v.is_finite() && (0.0..=2.0).contains(&v) => v,
                _ => {
                    if !production {
                        tracing::warn!(
                            "invalid OPENAI_TEMPERATURE, using default {DEFAULT_TEMPERATURE}"
                        );
                    }
                    DEFAULT_TEMPERATURE
                }
            },
        };

        Self {
            model,
            max_tokens,
            temperature,
        }
    }
}

/// Everything one request needs from the environment.
#[derive(Debug, Clone)]
pub struct EnvConfig {
    /// Upstream credential; `None` is a configuration error.
    pub api_key: Option<String>,
    /// Endpoint override for OpenAI-compatible upstreams.
    pub base_url: Option<String>,
    /// Generation settings.
    pub r#gen: GenConfig,
    /// Production mode: generic errors, quiet logs.
    pub production: bool,
}

impl EnvConfig {
    /// Resolve the full per-request configuration.
    pub fn resolve(source: &EnvSource) -> Self {
        let production = source
            .get("IDEAFORGE_ENV")
            .is_some_and(|v| v == "production");
        Self {
            api_key: source.get("OPENAI_API_KEY").filter(|k| !k.is_empty()),
            base_url: source.get("OPENAI_BASE_URL").filter(|u| !u.is_empty()),
            r#gen: GenConfig::resolve(source, production),
            production,
        }
    }
}
