use std::fmt;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Highest intensity a single day and category can reach.
pub const MAX_INTENSITY: i32 = 4;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ActivityCategory {
    Workout,
    Meal,
    Challenge,
}

impl ActivityCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            ActivityCategory::Workout => "workout",
            ActivityCategory::Meal => "meal",
            ActivityCategory::Challenge => "challenge",
        }
    }

    /// Workouts and meals keep a streak alive. Challenges only feed the log.
    pub fn counts_toward_streak(&self) -> bool {
        matches!(self, ActivityCategory::Workout | ActivityCategory::Meal)
    }
}

impl fmt::Display for ActivityCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct ActivityLogEntry {
    pub logged_at: NaiveDate,
    pub activity_type: String,
    pub intensity: i32,
}
