use std::fmt;
use std::str::FromStr;
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use secrecy::SecretString;
use validator::Validate;

use crate::errors::AppError;
use crate::game::streak::StreakState;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Goal {
    #[serde(rename = "weight loss")]
    WeightLoss,
    #[serde(rename = "muscle gain")]
    MuscleGain,
    #[serde(rename = "maintenance")]
    Maintenance,
}

impl Goal {
    pub fn as_str(&self) -> &'static str {
        match self {
            Goal::WeightLoss => "weight loss",
            Goal::MuscleGain => "muscle gain",
            Goal::Maintenance => "maintenance",
        }
    }
}

impl FromStr for Goal {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "weight loss" => Ok(Goal::WeightLoss),
            "muscle gain" => Ok(Goal::MuscleGain),
            "maintenance" => Ok(Goal::Maintenance),
            _ => Err(AppError::Validation(
                "Invalid goal. Must be: weight loss, muscle gain, or maintenance".to_string(),
            )),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    User,
    Trainer,
    Admin,
}

impl fmt::Display for UserRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UserRole::User => write!(f, "user"),
            UserRole::Trainer => write!(f, "trainer"),
            UserRole::Admin => write!(f, "admin"),
        }
    }
}

impl FromStr for UserRole {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "user" => Ok(UserRole::User),
            "trainer" => Ok(UserRole::Trainer),
            "admin" => Ok(UserRole::Admin),
            other => Err(AppError::Dependency(format!("Unknown role stored for account: {}", other))),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FatigueLevel {
    Low,
    Medium,
    High,
}

impl FatigueLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            FatigueLevel::Low => "Low",
            FatigueLevel::Medium => "Medium",
            FatigueLevel::High => "High",
        }
    }
}

/// Account row as stored. Enum-valued columns stay text here and are parsed
/// where a handler needs the typed value.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct Account {
    pub id: Uuid,
    pub name: String,
    pub age: i32,
    pub gender: String,
    pub height: f64,
    pub weight: f64,
    pub goal: String,
    pub email: String,
    pub password_hash: String,
    pub role: String,
    pub xp_points: i32,
    pub power_level: i32,
    pub title: String,
    pub streak_count: i32,
    pub last_activity_date: Option<NaiveDate>,
    pub fatigue_level: String,
    pub water_intake: i32,
    pub created_at: DateTime<Utc>,
}

impl Account {
    pub fn role(&self) -> Result<UserRole, AppError> {
        self.role.parse()
    }

    pub fn streak_state(&self) -> StreakState {
        StreakState {
            streak_count: self.streak_count,
            last_activity_date: self.last_activity_date,
        }
    }
}

/// Everything an authenticated client may see about its own account.
#[derive(Debug, Serialize, Deserialize)]
pub struct ProfileResponse {
    pub id: Uuid,
    pub name: String,
    pub age: i32,
    pub gender: String,
    pub height: f64,
    pub weight: f64,
    pub goal: String,
    pub email: String,
    pub role: String,
    pub created_at: DateTime<Utc>,
    pub streak_count: i32,
    pub fatigue_level: String,
    pub last_activity_date: Option<NaiveDate>,
    pub xp_points: i32,
    pub power_level: i32,
    pub title: String,
    pub water_intake: i32,
}

impl From<Account> for ProfileResponse {
    fn from(account: Account) -> Self {
        Self {
            id: account.id,
            name: account.name,
            age: account.age,
            gender: account.gender,
            height: account.height,
            weight: account.weight,
            goal: account.goal,
            email: account.email,
            role: account.role,
            created_at: account.created_at,
            streak_count: account.streak_count,
            fatigue_level: account.fatigue_level,
            last_activity_date: account.last_activity_date,
            xp_points: account.xp_points,
            power_level: account.power_level,
            title: account.title,
            water_intake: account.water_intake,
        }
    }
}

/// Short form returned next to a freshly issued token.
#[derive(Debug, Serialize, Deserialize)]
pub struct UserSummary {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub goal: String,
    pub role: String,
}

impl From<&Account> for UserSummary {
    fn from(account: &Account) -> Self {
        Self {
            id: account.id,
            name: account.name.clone(),
            email: account.email.clone(),
            goal: account.goal.clone(),
            role: account.role.clone(),
        }
    }
}

/// Partial profile update. Absent fields are left untouched.
#[derive(Debug, Default, Deserialize, Validate)]
pub struct ProfileUpdate {
    #[validate(length(min = 1, message = "Name cannot be empty"))]
    pub name: Option<String>,
    #[validate(range(min = 1, max = 120, message = "Age must be between 1 and 120"))]
    pub age: Option<i32>,
    #[validate(length(min = 1, message = "Gender cannot be empty"))]
    pub gender: Option<String>,
    #[validate(range(min = 1.0, max = 300.0, message = "Height must be between 1 and 300 cm"))]
    pub height: Option<f64>,
    #[validate(range(min = 1.0, max = 500.0, message = "Weight must be between 1 and 500 kg"))]
    pub weight: Option<f64>,
    pub goal: Option<String>,
}

/// Validated form of [`ProfileUpdate`] ready for the storage layer.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct ProfileChanges {
    pub name: Option<String>,
    pub age: Option<i32>,
    pub gender: Option<String>,
    pub height: Option<f64>,
    pub weight: Option<f64>,
    pub goal: Option<Goal>,
}

impl ProfileChanges {
    pub fn is_empty(&self) -> bool {
        *self == ProfileChanges::default()
    }
}

impl TryFrom<ProfileUpdate> for ProfileChanges {
    type Error = AppError;

    fn try_from(update: ProfileUpdate) -> Result<Self, Self::Error> {
        update.validate()?;
        if update.name.as_deref().is_some_and(|n| n.trim().is_empty()) {
            return Err(AppError::Validation("Name cannot be empty".to_string()));
        }
        let goal = update.goal.as_deref().map(Goal::from_str).transpose()?;
        let changes = ProfileChanges {
            name: update.name.map(|n| n.trim().to_string()),
            age: update.age,
            gender: update.gender,
            height: update.height,
            weight: update.weight,
            goal,
        };
        if changes.is_empty() {
            return Err(AppError::Validation("No fields to update".to_string()));
        }
        Ok(changes)
    }
}

#[derive(Debug, Deserialize)]
pub struct FatigueUpdate {
    pub fatigue_level: FatigueLevel,
}

pub fn deserialize_optional_secret_string<'de, D>(deserializer: D) -> Result<Option<SecretString>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let s = Option::<String>::deserialize(deserializer)?;
    Ok(s.map(|s| SecretString::new(s.into_boxed_str())))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn goal_round_trips_through_its_label() {
        for goal in [Goal::WeightLoss, Goal::MuscleGain, Goal::Maintenance] {
            assert_eq!(goal.as_str().parse::<Goal>().unwrap(), goal);
        }
        assert!("bulking".parse::<Goal>().is_err());
    }

    #[test]
    fn empty_profile_update_is_rejected() {
        let err = ProfileChanges::try_from(ProfileUpdate::default()).unwrap_err();
        assert_eq!(err.to_string(), "No fields to update");
    }

    #[test]
    fn blank_name_is_rejected() {
        let update = ProfileUpdate { name: Some("   ".into()), ..Default::default() };
        assert!(matches!(ProfileChanges::try_from(update), Err(AppError::Validation(_))));
    }

    #[test]
    fn out_of_range_age_names_the_field() {
        let update = ProfileUpdate { age: Some(130), ..Default::default() };
        let err = ProfileChanges::try_from(update).unwrap_err();
        assert!(err.to_string().contains("age"));
    }

    #[test]
    fn goal_change_is_parsed() {
        let update = ProfileUpdate { goal: Some("muscle gain".into()), ..Default::default() };
        let changes = ProfileChanges::try_from(update).unwrap();
        assert_eq!(changes.goal, Some(Goal::MuscleGain));
    }
}
