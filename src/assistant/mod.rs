//! Text-generation backed helpers: mod suggestions and the chat assistant
//!
//! Nothing here touches the operation tracker. The backend is injected as a
//! [`TextGenerationClient`] so callers and tests choose the implementation.

mod gemini;

use std::future::Future;

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub use gemini::GeminiClient;

pub const ASSISTANT_INSTRUCTION: &str = "You are Sheihu AI, a helpful Minecraft assistant specialized in optimization, mods, and performance.";

#[derive(Error, Debug)]
pub enum AssistantError {
    #[error("No API key: set GEMINI_API_KEY (or API_KEY)")]
    MissingApiKey,

    #[error("Request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Backend returned {status}: {body}")]
    Status { status: u16, body: String },

    #[error("Could not decode response: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("Backend returned no text")]
    EmptyResponse,
}

pub type Result<T> = std::result::Result<T, AssistantError>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Model,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatTurn {
    pub role: Role,
    pub text: String,
}

impl ChatTurn {
    pub fn user(text: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            text: text.into(),
        }
    }

    pub fn model(text: impl Into<String>) -> Self {
        Self {
            role: Role::Model,
            text: text.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct GenerationRequest {
    pub system_instruction: Option<String>,
    pub contents: Vec<ChatTurn>,
    /// When set, the backend is asked for JSON matching this schema.
    pub response_schema: Option<serde_json::Value>,
}

/// A single-shot text generation backend.
pub trait TextGenerationClient {
    fn generate(&self, request: &GenerationRequest) -> impl Future<Output = Result<String>>;
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModSuggestion {
    pub name: String,
    pub description: String,
    pub category: String,
    pub reason: String,
}

fn mod_suggestion_schema() -> serde_json::Value {
    serde_json::json!({
        "type": "ARRAY",
        "items": {
            "type": "OBJECT",
            "properties": {
                "name": { "type": "STRING" },
                "description": { "type": "STRING" },
                "category": { "type": "STRING" },
                "reason": { "type": "STRING" }
            },
            "required": ["name", "description", "category", "reason"]
        }
    })
}

/// Ask the backend for five mods matching a theme.
pub async fn suggest_mods<T: TextGenerationClient>(
    client: &T,
    theme: &str,
) -> Result<Vec<ModSuggestion>> {
    let request = GenerationRequest {
        system_instruction: None,
        contents: vec![ChatTurn::user(format!(
            "Suggest a list of Minecraft mods based on this theme: {}. Provide exactly 5 mods.",
            theme
        ))],
        response_schema: Some(mod_suggestion_schema()),
    };

    let text = client.generate(&request).await?;
    let json = strip_code_fence(&text);
    if json.is_empty() {
        return Ok(Vec::new());
    }
    Ok(serde_json::from_str(json)?)
}

/// Continue a conversation with the assistant.
pub async fn chat<T: TextGenerationClient>(
    client: &T,
    history: &[ChatTurn],
    message: &str,
) -> Result<String> {
    let mut contents = history.to_vec();
    contents.push(ChatTurn::user(message));

    let request = GenerationRequest {
        system_instruction: Some(ASSISTANT_INSTRUCTION.to_string()),
        contents,
        response_schema: None,
    };

    let reply = client.generate(&request).await?;
    let reply = reply.trim();
    if reply.is_empty() {
        return Err(AssistantError::EmptyResponse);
    }
    Ok(reply.to_string())
}

/// Models sometimes wrap JSON in a markdown fence even in JSON mode.
fn strip_code_fence(text: &str) -> &str {
    let trimmed = text.trim();
    let Some(inner) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    let inner = inner.strip_suffix("```").unwrap_or(inner);
    // Drop the language tag line, if any.
    match inner.split_once('\n') {
        Some((tag, body)) if !tag.trim_start().starts_with(['[', '{']) => body.trim(),
        _ => inner.trim(),
    }
}
