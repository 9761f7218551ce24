use std::time::Duration;
use secrecy::SecretString;
use serde::Deserialize;

#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum EmailProvider {
    /// Write messages to the log instead of delivering them.
    Log,
    Brevo,
}

#[derive(Debug, Deserialize)]
pub struct EmailSettings {
    pub provider: EmailProvider,
    pub base_url: String,
    pub api_key: SecretString,
    pub sender_email: String,
    pub sender_name: String,
    pub timeout_milliseconds: u64,
}

impl EmailSettings {
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_milliseconds)
    }
}
