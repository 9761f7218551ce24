use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

// Progression
pub const XP_PER_LEVEL: i32 = 100;

// Hydration
pub const WATER_GOAL_GLASSES: i32 = 8;

// Leaderboard
pub const LEADERBOARD_SIZE: i64 = 10;

// Body stats
pub const MIN_WEIGHT_KG: f64 = 1.0;
pub const MAX_WEIGHT_KG: f64 = 500.0;
pub const WEIGHT_HISTORY_LIMIT: i64 = 30;

#[derive(Debug, Serialize, Deserialize, PartialEq)]
pub struct PowerLevel {
    pub xp_points: i32,
    pub power_level: i32,
    pub title: String,
    pub xp_for_next_level: i32,
    pub xp_progress_percent: i32,
}

/// `xp_amount` is read wide so out-of-range values are rejected instead of
/// failing deserialization.
#[derive(Debug, Deserialize)]
pub struct AddXpRequest {
    pub xp_amount: Option<i64>,
    pub reason: Option<String>,
}

/// Result of an XP award as returned by the progression ledger.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct XpAward {
    pub total_xp: i32,
    pub power_level: i32,
    pub title: String,
    pub leveled_up: bool,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct AddXpResponse {
    pub xp_added: i32,
    pub total_xp: i32,
    pub power_level: i32,
    pub title: String,
    pub leveled_up: bool,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct WaterIntake {
    pub water_intake: i32,
    pub goal: i32,
}

impl WaterIntake {
    pub fn new(water_intake: i32) -> Self {
        Self { water_intake, goal: WATER_GOAL_GLASSES }
    }
}

#[derive(Debug, Deserialize)]
pub struct LogWeightRequest {
    pub weight: Option<f64>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct LogWeightResponse {
    pub success: bool,
    pub weight: f64,
}

#[derive(Debug, Serialize, Deserialize, sqlx::FromRow)]
pub struct WeightEntry {
    pub weight: f64,
    pub logged_at: DateTime<Utc>,
}

#[derive(Debug, sqlx::FromRow)]
pub struct LeaderboardRow {
    pub id: Uuid,
    pub name: String,
    pub power_level: i32,
    pub title: String,
    pub xp_points: i32,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct LeaderboardEntry {
    pub rank: usize,
    pub name: String,
    pub power_level: i32,
    pub title: String,
    pub xp_points: i32,
    pub is_current_user: bool,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct LeaderboardResponse {
    pub leaderboard: Vec<LeaderboardEntry>,
    pub current_user_rank: i64,
}
