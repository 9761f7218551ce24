use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, sqlx::FromRow)]
pub struct UnlockedAchievement {
    pub badge_type: String,
    pub badge_name: String,
    pub unlocked_at: DateTime<Utc>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct BadgeStatus {
    #[serde(rename = "type")]
    pub badge_type: String,
    pub name: String,
    pub icon: String,
    pub description: String,
    pub unlocked: bool,
    pub unlocked_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Deserialize)]
pub struct UnlockRequest {
    pub badge_type: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct UnlockResponse {
    pub success: bool,
    pub badge_type: String,
    pub badge_name: String,
}
