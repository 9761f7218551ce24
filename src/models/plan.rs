use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;
use chrono::{DateTime, Datelike, NaiveDate, Utc, Weekday};
use serde::{Deserialize, Serialize};
use sqlx::types::Json;
use uuid::Uuid;

use crate::errors::AppError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum PlanDay {
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
    Sunday,
}

impl PlanDay {
    pub const ALL: [PlanDay; 7] = [
        PlanDay::Monday,
        PlanDay::Tuesday,
        PlanDay::Wednesday,
        PlanDay::Thursday,
        PlanDay::Friday,
        PlanDay::Saturday,
        PlanDay::Sunday,
    ];

    /// Position within the week, Monday being 0.
    pub fn index(&self) -> usize {
        *self as usize
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            PlanDay::Monday => "Monday",
            PlanDay::Tuesday => "Tuesday",
            PlanDay::Wednesday => "Wednesday",
            PlanDay::Thursday => "Thursday",
            PlanDay::Friday => "Friday",
            PlanDay::Saturday => "Saturday",
            PlanDay::Sunday => "Sunday",
        }
    }

    pub fn for_date(date: NaiveDate) -> Self {
        match date.weekday() {
            Weekday::Mon => PlanDay::Monday,
            Weekday::Tue => PlanDay::Tuesday,
            Weekday::Wed => PlanDay::Wednesday,
            Weekday::Thu => PlanDay::Thursday,
            Weekday::Fri => PlanDay::Friday,
            Weekday::Sat => PlanDay::Saturday,
            Weekday::Sun => PlanDay::Sunday,
        }
    }
}

impl fmt::Display for PlanDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PlanDay {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        PlanDay::ALL
            .into_iter()
            .find(|day| day.as_str() == s)
            .ok_or_else(|| AppError::Validation(format!("Invalid day: {}", s)))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Exercise {
    pub name: String,
    pub sets: i32,
    pub reps: String,
    pub instructions: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Meal {
    pub name: String,
    pub calories: i32,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyMeals {
    pub breakfast: Meal,
    pub lunch: Meal,
    pub dinner: Meal,
    pub snacks: Vec<Meal>,
    #[serde(rename = "totalCalories")]
    pub total_calories: i32,
}

impl DailyMeals {
    pub fn new(breakfast: Meal, lunch: Meal, dinner: Meal, snacks: Vec<Meal>) -> Self {
        let total_calories = breakfast.calories
            + lunch.calories
            + dinner.calories
            + snacks.iter().map(|s| s.calories).sum::<i32>();
        Self { breakfast, lunch, dinner, snacks, total_calories }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MealCompletion {
    pub breakfast: bool,
    pub lunch: bool,
    pub dinner: bool,
    #[serde(default)]
    pub snacks: BTreeMap<usize, bool>,
}

/// Per-item completion flags stored next to a plan. Map keys are item
/// indices and are written as strings on the wire.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CompletionStatus {
    pub exercises: BTreeMap<usize, bool>,
    pub meals: MealCompletion,
}

impl CompletionStatus {
    pub fn fresh(exercise_count: usize, snack_count: usize) -> Self {
        Self {
            exercises: (0..exercise_count).map(|i| (i, false)).collect(),
            meals: MealCompletion {
                snacks: (0..snack_count).map(|i| (i, false)).collect(),
                ..MealCompletion::default()
            },
        }
    }

    /// Drops every exercise flag and starts over for a new exercise list.
    /// Meal flags are kept.
    pub fn reset_exercises(&mut self, exercise_count: usize) {
        self.exercises = (0..exercise_count).map(|i| (i, false)).collect();
    }
}

/// Which meal slot a completion toggle targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MealSlot {
    Breakfast,
    Lunch,
    Dinner,
    Snack(usize),
}

impl MealSlot {
    pub fn parse(meal_type: &str, snack_index: Option<usize>) -> Result<Self, AppError> {
        match meal_type {
            "breakfast" => Ok(MealSlot::Breakfast),
            "lunch" => Ok(MealSlot::Lunch),
            "dinner" => Ok(MealSlot::Dinner),
            "snack" => snack_index
                .map(MealSlot::Snack)
                .ok_or_else(|| AppError::Validation("snackIndex is required for snack meals".to_string())),
            other => Err(AppError::Validation(format!(
                "Invalid meal type: {}. Must be breakfast, lunch, dinner or snack",
                other
            ))),
        }
    }
}

#[derive(Debug, Clone, sqlx::FromRow)]
pub struct WeeklyPlanRow {
    pub id: i64,
    pub user_id: Uuid,
    pub day: String,
    pub exercises: Json<Vec<Exercise>>,
    pub meals: Json<DailyMeals>,
    pub completed_status: Json<CompletionStatus>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeeklyPlan {
    pub id: i64,
    pub user_id: Uuid,
    pub day: String,
    pub exercises: Vec<Exercise>,
    pub meals: DailyMeals,
    pub completed_status: CompletionStatus,
    pub created_at: DateTime<Utc>,
}

impl From<WeeklyPlanRow> for WeeklyPlan {
    fn from(row: WeeklyPlanRow) -> Self {
        Self {
            id: row.id,
            user_id: row.user_id,
            day: row.day,
            exercises: row.exercises.0,
            meals: row.meals.0,
            completed_status: row.completed_status.0,
            created_at: row.created_at,
        }
    }
}

/// One day's generated content before it is stored.
#[derive(Debug, Clone, PartialEq)]
pub struct DayPlan {
    pub day: PlanDay,
    pub exercises: Vec<Exercise>,
    pub meals: DailyMeals,
    pub completed_status: CompletionStatus,
}

#[derive(Debug, Deserialize)]
pub struct ReplaceExercisesRequest {
    pub exercises: Option<Vec<Exercise>>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ReplaceExercisesResponse {
    pub message: String,
    pub exercises: Vec<Exercise>,
    pub completed_status: CompletionStatus,
}

/// `completed` is kept loose so a non-boolean value gets a proper 400.
#[derive(Debug, Deserialize)]
pub struct ToggleRequest {
    pub completed: Option<serde_json::Value>,
    #[serde(default, rename = "snackIndex")]
    pub snack_index: Option<usize>,
}

impl ToggleRequest {
    pub fn completed(&self) -> Result<bool, AppError> {
        match self.completed {
            Some(serde_json::Value::Bool(flag)) => Ok(flag),
            _ => Err(AppError::Validation("Completed status must be a boolean".to_string())),
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct CompletionResponse {
    pub message: String,
    pub completed_status: CompletionStatus,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct GroceryListResponse {
    pub day: String,
    pub grocery_list: String,
}
