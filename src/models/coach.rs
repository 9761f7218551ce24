use std::fmt;
use std::str::FromStr;
use serde::{Deserialize, Serialize};

use crate::errors::AppError;
use crate::models::plan::{DailyMeals, Exercise};

/// Who wrote a conversation turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChatRole {
    User,
    Model,
}

impl ChatRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            ChatRole::User => "user",
            ChatRole::Model => "model",
        }
    }
}

impl fmt::Display for ChatRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ChatRole {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "user" => Ok(ChatRole::User),
            "model" => Ok(ChatRole::Model),
            other => Err(AppError::Dependency(format!("Unknown chat role stored: {}", other))),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatTurn {
    pub role: ChatRole,
    pub text: String,
}

impl ChatTurn {
    pub fn user(text: impl Into<String>) -> Self {
        Self { role: ChatRole::User, text: text.into() }
    }

    pub fn model(text: impl Into<String>) -> Self {
        Self { role: ChatRole::Model, text: text.into() }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WorkoutLocation {
    Gym,
    #[default]
    Home,
}

impl WorkoutLocation {
    pub fn as_str(&self) -> &'static str {
        match self {
            WorkoutLocation::Gym => "gym",
            WorkoutLocation::Home => "home",
        }
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct GenerateWorkoutRequest {
    #[serde(default, rename = "type")]
    pub location: Option<WorkoutLocation>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct GeneratedWorkout {
    pub exercises: Vec<Exercise>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct GenerateWorkoutResponse {
    pub workout: GeneratedWorkout,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct MealPlanResponse {
    #[serde(rename = "mealPlan")]
    pub meal_plan: DailyMeals,
}

#[derive(Debug, Deserialize)]
pub struct SwapMealRequest {
    #[serde(default, rename = "currentMeal")]
    pub current_meal: Option<String>,
}

/// A replacement meal suggested by the coach.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MealAlternative {
    pub name: String,
    pub calories: i32,
    pub description: String,
    pub reason: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct SwapMealResponse {
    pub alternative: MealAlternative,
}

#[derive(Debug, Deserialize)]
pub struct ChatRequest {
    #[serde(default)]
    pub message: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ChatResponse {
    pub response: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct AnalysisResponse {
    pub analysis: String,
}
