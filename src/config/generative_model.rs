use std::time::Duration;
use secrecy::SecretString;
use serde::Deserialize;

#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ModelProvider {
    Gemini,
    /// Self-hosted model behind an Ollama server.
    Ollama,
}

#[derive(Debug, Deserialize)]
pub struct GenerativeModelSettings {
    pub provider: ModelProvider,
    pub base_url: String,
    pub api_key: SecretString,
    pub model_name: String,
    pub timeout_milliseconds: u64,
}

impl GenerativeModelSettings {
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_milliseconds)
    }
}
