//! Generation request parameters and validation.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Project complexity label. Wire labels are case-sensitive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Difficulty {
    Beginner,
    Intermediate,
    Advanced,
}

impl Difficulty {
    /// The wire/display label.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Beginner => "Beginner",
            Self::Intermediate => "Intermediate",
            Self::Advanced => "Advanced",
        }
    }

    fn parse(label: &str) -> Option<Self> {
        match label {
            "Beginner" => Some(Self::Beginner),
            "Intermediate" => Some(Self::Intermediate),
            "Advanced" => Some(Self::Advanced),
            _ => None,
        }
    }
}

/// Validated parameters for a generation request.
///
/// All fields are optional; absent fields fall back to defaults
/// downstream. A field that is present must satisfy its constraint or
/// the whole request is rejected.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GenerationParams {
    /// Subject to build the idea around.
    pub topic: Option<String>,
    /// Product domain (productivity, education, ...).
    pub domain: Option<String>,
    /// Pinned complexity level.
    pub difficulty: Option<Difficulty>,
}

/// Request body validation failure.
///
/// Messages name the expected shape and never echo the offending
/// value back to the caller.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("Invalid request body. Field '{0}' must be a non-empty string")]
    EmptyField(&'static str),
    #[error("Invalid request body. Field 'difficulty' must be one of: Beginner, Intermediate, Advanced")]
    BadDifficulty,
    #[error("Invalid request body. Expected a JSON object")]
    NotAnObject,
    #[error("Invalid request body. Expected: {{ messages: Array }}")]
    BadMessages,
}

impl GenerationParams {
    /// Validate an already-parsed JSON body.
    ///
    /// `null` (an absent body) yields all-default parameters.
    pub fn from_value(value: &Value) -> Result<Self, ValidationError> {
        let obj = match value {
            Value::Null => return Ok(Self::default()),
            Value::Object(map) => map,
            _ => return Err(ValidationError::NotAnObject),
        };

        let topic = trimmed_field(obj, "topic")?;
        let domain = trimmed_field(obj, "domain")?;
        let difficulty = match obj.get("difficulty") {
            None | Some(Value::Null) => None,
            Some(Value::String(label)) => {
                Some(Difficulty::parse(label).ok_or(ValidationError::BadDifficulty)?)
            }
            Some(_) => return Err(ValidationError::BadDifficulty),
        };

        Ok(Self {
            topic,
            domain,
            difficulty,
        })
    }
}

fn trimmed_field(
    obj: &serde_json::Map<String, Value>,
    key: &'static str,
) -> Result<Option<String>, ValidationError> {
    match obj.get(key) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(s)) if !s.trim().is_empty() => Ok(Some(s.trim().to_owned())),
        Some(_) => Err(ValidationError::EmptyField(key)),
    }
}
