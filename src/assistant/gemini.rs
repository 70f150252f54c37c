//! Gemini REST backend

use serde::{Deserialize, Serialize};

use super::{AssistantError, ChatTurn, GenerationRequest, Result, TextGenerationClient};
use crate::config::AssistantConfig;

pub struct GeminiClient {
    http: reqwest::Client,
    api_key: String,
    model: String,
    endpoint: String,
}

impl GeminiClient {
    pub fn new(api_key: &str, config: &AssistantConfig) -> Self {
        Self {
            http: reqwest::Client::new(),
            api_key: api_key.to_string(),
            model: config.model.clone(),
            endpoint: config.endpoint.trim_end_matches('/').to_string(),
        }
    }

    /// Build a client from `GEMINI_API_KEY`, falling back to `API_KEY`.
    pub fn from_env(config: &AssistantConfig) -> Result<Self> {
        let key = ["GEMINI_API_KEY", "API_KEY"]
            .iter()
            .filter_map(|var| std::env::var(var).ok())
            .find(|value| !value.trim().is_empty())
            .ok_or(AssistantError::MissingApiKey)?;
        Ok(Self::new(&key, config))
    }

    fn url(&self) -> String {
        format!("{}/models/{}:generateContent", self.endpoint, self.model)
    }
}

impl TextGenerationClient for GeminiClient {
    async fn generate(&self, request: &GenerationRequest) -> Result<String> {
        let body = WireRequest::from(request);
        tracing::debug!(model = %self.model, turns = body.contents.len(), "Gemini request");

        let response = self
            .http
            .post(self.url())
            .header("x-goog-api-key", &self.api_key)
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        let text = response.text().await?;
        if !status.is_success() {
            tracing::warn!(status = status.as_u16(), "Gemini request failed");
            return Err(AssistantError::Status {
                status: status.as_u16(),
                body: text,
            });
        }

        let parsed: WireResponse = serde_json::from_str(&text)?;
        parsed.text().ok_or(AssistantError::EmptyResponse)
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct WireRequest<'a> {
    contents: Vec<WireContent<'a>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    system_instruction: Option<WireContent<'a>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    generation_config: Option<WireGenerationConfig<'a>>,
}

#[derive(Serialize)]
struct WireContent<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    role: Option<&'static str>,
    parts: Vec<WirePart<'a>>,
}

#[derive(Serialize)]
struct WirePart<'a> {
    text: &'a str,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct WireGenerationConfig<'a> {
    response_mime_type: &'static str,
    response_schema: &'a serde_json::Value,
}

impl<'a> From<&'a GenerationRequest> for WireRequest<'a> {
    fn from(request: &'a GenerationRequest) -> Self {
        let contents = request.contents.iter().map(turn_content).collect();
        let system_instruction = request.system_instruction.as_deref().map(|text| WireContent {
            role: None,
            parts: vec![WirePart { text }],
        });
        let generation_config = request
            .response_schema
            .as_ref()
            .map(|schema| WireGenerationConfig {
                response_mime_type: "application/json",
                response_schema: schema,
            });

        Self {
            contents,
            system_instruction,
            generation_config,
        }
    }
}

fn turn_content(turn: &ChatTurn) -> WireContent<'_> {
    let role = match turn.role {
        super::Role::User => "user",
        super::Role::Model => "model",
    };
    WireContent {
        role: Some(role),
        parts: vec![WirePart { text: &turn.text }],
    }
}

#[derive(Deserialize, Default)]
struct WireResponse {
    #[serde(default)]
    candidates: Vec<WireCandidate>,
}

#[derive(Deserialize)]
struct WireCandidate {
    content: Option<WireResponseContent>,
}

#[derive(Deserialize)]
struct WireResponseContent {
    #[serde(default)]
    parts: Vec<WireResponsePart>,
}

#[derive(Deserialize)]
struct WireResponsePart {
    text: Option<String>,
}

impl WireResponse {
    /// Concatenated text of the first candidate.
    fn text(&self) -> Option<String> {
        let content = self.candidates.first()?.content.as_ref()?;
        let text: String = content
            .parts
            .iter()
            .filter_map(|p| p.text.as_deref())
            .collect();
        if text.is_empty() {
            None
        } else {
            Some(text)
        }
    }
}
