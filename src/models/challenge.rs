use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct DailyChallenge {
    pub id: i64,
    pub user_id: Uuid,
    pub challenge_date: NaiveDate,
    pub challenge_type: String,
    pub challenge_text: String,
    pub xp_reward: i32,
    pub completed: bool,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ChallengeCompletion {
    pub success: bool,
    pub xp_earned: i32,
    pub total_xp: i32,
    pub power_level: i32,
    pub title: String,
    pub leveled_up: bool,
}
