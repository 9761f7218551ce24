use std::sync::Arc;
use std::time::Duration;
use futures_util::future::BoxFuture;
use reqwest::{Client, Response};
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::config::generative_model::{GenerativeModelSettings, ModelProvider};
use crate::errors::AppError;
use crate::models::coach::{ChatRole, ChatTurn};

#[derive(Debug, thiserror::Error)]
pub enum ModelError {
    #[error("Model request timed out")]
    Timeout,

    #[error("Model request failed: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Model rate limit exceeded")]
    RateLimited,

    #[error("Model service unavailable: {0}")]
    Unavailable(String),

    #[error("Invalid model response: {0}")]
    InvalidResponse(String),
}

impl From<ModelError> for AppError {
    fn from(e: ModelError) -> Self {
        AppError::Dependency(e.to_string())
    }
}

/// Text generation backend for the coaching endpoints. `turns` is the whole
/// conversation, oldest first; the reply is the model's next turn.
pub trait GenerativeModel: Send + Sync {
    fn generate<'a>(&'a self, turns: &'a [ChatTurn]) -> BoxFuture<'a, Result<String, ModelError>>;
}

pub fn generative_model_from_settings(
    settings: &GenerativeModelSettings,
) -> Result<Arc<dyn GenerativeModel>, ModelError> {
    match settings.provider {
        ModelProvider::Gemini => Ok(Arc::new(GeminiModel::new(settings)?)),
        ModelProvider::Ollama => Ok(Arc::new(OllamaModel::new(settings)?)),
    }
}

fn http_client(timeout: Duration) -> Result<Client, ModelError> {
    Ok(Client::builder().timeout(timeout).build()?)
}

fn request_error(e: reqwest::Error) -> ModelError {
    if e.is_timeout() {
        ModelError::Timeout
    } else {
        ModelError::Network(e)
    }
}

async fn check_status(response: Response) -> Result<Response, ModelError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let error_text = response.text().await.unwrap_or_default();
    Err(match status.as_u16() {
        429 => ModelError::RateLimited,
        500..=599 => ModelError::Unavailable(error_text),
        _ => ModelError::InvalidResponse(format!("HTTP {}: {}", status, error_text)),
    })
}

fn non_empty(text: Option<String>) -> Result<String, ModelError> {
    text.filter(|t| !t.trim().is_empty())
        .ok_or_else(|| ModelError::InvalidResponse("Empty content".to_string()))
}

/// Google's Gemini `generateContent` API.
pub struct GeminiModel {
    client: Client,
    base_url: String,
    api_key: SecretString,
    model_name: String,
}

#[derive(Serialize)]
struct GeminiContent<'a> {
    role: &'static str,
    parts: [GeminiPart<'a>; 1],
}

#[derive(Serialize)]
struct GeminiPart<'a> {
    text: &'a str,
}

#[derive(Deserialize)]
struct GeminiResponse {
    #[serde(default)]
    candidates: Vec<GeminiCandidate>,
}

#[derive(Deserialize)]
struct GeminiCandidate {
    content: Option<GeminiReplyContent>,
}

#[derive(Deserialize)]
struct GeminiReplyContent {
    #[serde(default)]
    parts: Vec<GeminiReplyPart>,
}

#[derive(Deserialize)]
struct GeminiReplyPart {
    text: Option<String>,
}

impl GeminiResponse {
    fn into_text(self) -> Option<String> {
        let parts = self.candidates.into_iter().next()?.content?.parts;
        let text: String = parts.into_iter().filter_map(|p| p.text).collect();
        Some(text)
    }
}

impl GeminiModel {
    pub fn new(settings: &GenerativeModelSettings) -> Result<Self, ModelError> {
        Ok(Self {
            client: http_client(settings.timeout())?,
            base_url: settings.base_url.trim_end_matches('/').to_string(),
            api_key: settings.api_key.clone(),
            model_name: settings.model_name.clone(),
        })
    }
}

impl GenerativeModel for GeminiModel {
    fn generate<'a>(&'a self, turns: &'a [ChatTurn]) -> BoxFuture<'a, Result<String, ModelError>> {
        Box::pin(async move {
            let contents: Vec<GeminiContent> = turns
                .iter()
                .map(|turn| GeminiContent { role: turn.role.as_str(), parts: [GeminiPart { text: &turn.text }] })
                .collect();

            tracing::debug!("Calling Gemini model {} with {} turns", self.model_name, turns.len());
            let response = self
                .client
                .post(format!("{}/v1beta/models/{}:generateContent", self.base_url, self.model_name))
                .header("x-goog-api-key", self.api_key.expose_secret())
                .json(&json!({ "contents": contents }))
                .send()
                .await
                .map_err(request_error)?;

            let reply: GeminiResponse = check_status(response).await?.json().await?;
            non_empty(reply.into_text())
        })
    }
}

/// A model served by Ollama's chat endpoint.
pub struct OllamaModel {
    client: Client,
    base_url: String,
    model_name: String,
}

impl OllamaModel {
    pub fn new(settings: &GenerativeModelSettings) -> Result<Self, ModelError> {
        Ok(Self {
            client: http_client(settings.timeout())?,
            base_url: settings.base_url.trim_end_matches('/').to_string(),
            model_name: settings.model_name.clone(),
        })
    }
}

fn ollama_role(role: ChatRole) -> &'static str {
    match role {
        ChatRole::User => "user",
        ChatRole::Model => "assistant",
    }
}

impl GenerativeModel for OllamaModel {
    fn generate<'a>(&'a self, turns: &'a [ChatTurn]) -> BoxFuture<'a, Result<String, ModelError>> {
        Box::pin(async move {
            let messages: Vec<serde_json::Value> = turns
                .iter()
                .map(|turn| json!({ "role": ollama_role(turn.role), "content": turn.text }))
                .collect();
            let request = json!({
                "model": self.model_name,
                "messages": messages,
                "stream": false,
                "options": {
                    "temperature": 0.8,
                    "top_p": 0.9,
                }
            });

            tracing::debug!("Calling Ollama model {} with {} turns", self.model_name, turns.len());
            let response = self
                .client
                .post(format!("{}/api/chat", self.base_url))
                .json(&request)
                .send()
                .await
                .map_err(request_error)?;

            let reply: serde_json::Value = check_status(response).await?.json().await?;
            non_empty(reply["message"]["content"].as_str().map(str::to_string))
        })
    }
}
