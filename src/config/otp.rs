use chrono::Duration;
use serde::Deserialize;

#[derive(Debug, Deserialize, Clone)]
pub struct OtpSettings {
    pub ttl_seconds: i64,
}

impl OtpSettings {
    pub fn ttl(&self) -> Duration {
        Duration::seconds(self.ttl_seconds)
    }
}

impl Default for OtpSettings {
    fn default() -> Self {
        Self { ttl_seconds: 600 }
    }
}
