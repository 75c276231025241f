//! Deterministic prompt construction.
//!
//! `build_prompt` is a pure function: identical parameters produce
//! byte-identical output.

use crate::{Difficulty, GenerationParams};

/// The output template the model is instructed to follow verbatim.
const OUTPUT_TEMPLATE: &str = "\
# [Project Title]

## Description
[A compelling 2-3 sentence description of the project]

## Key Features
- [Feature 1]
- [Feature 2]
- [Feature 3]
- [Feature 4]
- [Feature 5]

## Tech Stack
- [Technology 1]
- [Technology 2]
- [Technology 3]
- [Technology 4]

## Complexity Level
[Beginner/Intermediate/Advanced]";

/// System instruction for the chat-style endpoint.
pub const SYSTEM_PROMPT: &str = "\
You are a creative web development project idea generator. When a user asks \
for a project idea, generate a creative and unique web development project \
concept.

Format your response exactly as follows:

# [Project Title]

## Description
[A compelling 2-3 sentence description of the project]

## Key Features
- [Feature 1]
- [Feature 2]
- [Feature 3]
- [Feature 4]
- [Feature 5]

## Tech Stack
- [Technology 1]
- [Technology 2]
- [Technology 3]
- [Technology 4]

## Complexity Level
[Beginner/Intermediate/Advanced]

Make projects innovative, practical, and inspiring. Vary the domain (e.g., \
productivity, entertainment, education, e-commerce, social, tools, etc.) and \
adjust complexity appropriately.

If the user provides specific requirements (topic, domain, difficulty), \
incorporate those into your response.";

/// Render the instruction text for a single generation request.
pub fn build_prompt(params: &GenerationParams) -> String {
    let mut prompt = String::from("Generate a creative and unique web development project idea");
    match (&params.topic, &params.domain) {
        (Some(topic), Some(domain)) => {
            prompt.push_str(&format!(" about {topic} in the {domain} domain"));
        }
        (Some(topic), None) => prompt.push_str(&format!(" about {topic}")),
        (None, Some(domain)) => prompt.push_str(&format!(" in the {domain} domain")),
        (None, None) => {}
    }
    prompt.push_str(". The response should be formatted exactly as follows:\n\n");
    prompt.push_str(OUTPUT_TEMPLATE);
    prompt.push_str("\n\n");
    prompt.push_str(&closing(params.difficulty));
    prompt
}

fn closing(difficulty: Option<Difficulty>) -> String {
    match difficulty {
        Some(level) => format!(
            "Make it innovative, practical, and inspiring. The complexity level must be {}.",
            level.as_str()
        ),
        None => String::from(
            "Make it innovative, practical, and inspiring. Vary the complexity and \
             domain (e.g., productivity, entertainment, education, e-commerce, \
             social, tools, etc.).",
        ),
    }
}
