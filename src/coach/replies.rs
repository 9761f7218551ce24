//! Turning the model's text replies into plan types.
//!
//! Models are asked for bare JSON but often wrap it in markdown fences and
//! are loose about numbers, so sets and calories may arrive as strings and
//! reps as numbers. Totals are recomputed rather than trusted.

use serde::Deserialize;

use crate::errors::AppError;
use crate::models::coach::MealAlternative;
use crate::models::plan::{DailyMeals, Exercise, Meal};

#[derive(Debug, thiserror::Error)]
pub enum ReplyError {
    #[error("Model reply is not valid JSON: {0}")]
    NotJson(#[from] serde_json::Error),

    #[error("Model reply has an unusable {field}: {detail}")]
    BadField { field: &'static str, detail: String },
}

impl From<ReplyError> for AppError {
    fn from(e: ReplyError) -> Self {
        AppError::Dependency(e.to_string())
    }
}

fn bad(field: &'static str, detail: impl Into<String>) -> ReplyError {
    ReplyError::BadField { field, detail: detail.into() }
}

pub fn strip_code_fences(text: &str) -> String {
    text.replace("```json", "").replace("```", "").trim().to_string()
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum Loose {
    Int(i64),
    Float(f64),
    Text(String),
}

impl Loose {
    fn count(self, field: &'static str) -> Result<i32, ReplyError> {
        let value = match self {
            Loose::Int(n) => n,
            Loose::Float(f) if f.fract() == 0.0 => f as i64,
            Loose::Float(f) => return Err(bad(field, f.to_string())),
            Loose::Text(s) => s.trim().parse::<i64>().map_err(|_| bad(field, s.clone()))?,
        };
        i32::try_from(value)
            .ok()
            .filter(|n| *n >= 0)
            .ok_or_else(|| bad(field, value.to_string()))
    }

    fn text(self) -> String {
        match self {
            Loose::Int(n) => n.to_string(),
            Loose::Float(f) => f.to_string(),
            Loose::Text(s) => s,
        }
    }
}

#[derive(Debug, Deserialize)]
struct RawWorkout {
    exercises: Vec<RawExercise>,
}

#[derive(Debug, Deserialize)]
struct RawExercise {
    name: String,
    sets: Loose,
    reps: Loose,
    #[serde(default)]
    instructions: String,
}

pub fn parse_workout(reply: &str) -> Result<Vec<Exercise>, ReplyError> {
    let raw: RawWorkout = serde_json::from_str(&strip_code_fences(reply))?;
    if raw.exercises.is_empty() {
        return Err(bad("exercises", "empty list"));
    }

    raw.exercises
        .into_iter()
        .map(|e| {
            let sets = e.sets.count("sets")?;
            if sets == 0 {
                return Err(bad("sets", "0"));
            }
            Ok(Exercise { name: e.name, sets, reps: e.reps.text(), instructions: e.instructions })
        })
        .collect()
}

#[derive(Debug, Deserialize)]
struct RawMeal {
    name: String,
    calories: Loose,
    #[serde(default)]
    description: String,
}

impl RawMeal {
    fn into_meal(self) -> Result<Meal, ReplyError> {
        Ok(Meal { name: self.name, calories: self.calories.count("calories")?, description: self.description })
    }
}

#[derive(Debug, Deserialize)]
struct RawMealPlan {
    breakfast: RawMeal,
    lunch: RawMeal,
    dinner: RawMeal,
    #[serde(default)]
    snacks: Vec<RawMeal>,
}

pub fn parse_meal_plan(reply: &str) -> Result<DailyMeals, ReplyError> {
    let raw: RawMealPlan = serde_json::from_str(&strip_code_fences(reply))?;
    let snacks = raw.snacks.into_iter().map(RawMeal::into_meal).collect::<Result<Vec<_>, _>>()?;
    Ok(DailyMeals::new(raw.breakfast.into_meal()?, raw.lunch.into_meal()?, raw.dinner.into_meal()?, snacks))
}

#[derive(Debug, Deserialize)]
struct RawAlternative {
    name: String,
    calories: Loose,
    #[serde(default)]
    description: String,
    #[serde(default)]
    reason: String,
}

pub fn parse_meal_swap(reply: &str) -> Result<MealAlternative, ReplyError> {
    let raw: RawAlternative = serde_json::from_str(&strip_code_fences(reply))?;
    Ok(MealAlternative {
        name: raw.name,
        calories: raw.calories.count("calories")?,
        description: raw.description,
        reason: raw.reason,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fences_are_removed() {
        assert_eq!(strip_code_fences("```json\n{\"a\":1}\n```"), "{\"a\":1}");
        assert_eq!(strip_code_fences("  {\"a\":1} "), "{\"a\":1}");
    }

    #[test]
    fn workout_accepts_loose_numbers() {
        let reply = r#"```json
        {"exercises": [
            {"name": "Push-ups", "sets": 3, "reps": 12, "instructions": "Chest to floor"},
            {"name": "Plank", "sets": "2", "reps": "45 seconds"}
        ]}
        ```"#;
        let exercises = parse_workout(reply).unwrap();
        assert_eq!(exercises.len(), 2);
        assert_eq!(exercises[0].reps, "12");
        assert_eq!(exercises[1].sets, 2);
        assert_eq!(exercises[1].instructions, "");
    }

    #[test]
    fn unusable_workouts_are_rejected() {
        assert!(matches!(parse_workout("Sure! Here is your plan"), Err(ReplyError::NotJson(_))));
        assert!(parse_workout(r#"{"exercises": []}"#).is_err());
        assert!(parse_workout(r#"{"exercises": [{"name": "Squats", "sets": "many", "reps": "10"}]}"#).is_err());
        assert!(parse_workout(r#"{"exercises": [{"name": "Squats", "sets": 0, "reps": "10"}]}"#).is_err());
    }

    #[test]
    fn meal_plan_total_is_recomputed() {
        let reply = r#"{
            "breakfast": {"name": "Oats", "calories": 350, "description": "Rolled oats"},
            "lunch": {"name": "Bowl", "calories": "600", "description": "Rice and chicken"},
            "dinner": {"name": "Salmon", "calories": 550.0, "description": "With greens"},
            "snacks": [{"name": "Apple", "calories": 95, "description": "Fresh"}],
            "totalCalories": 9999
        }"#;
        let meals = parse_meal_plan(reply).unwrap();
        assert_eq!(meals.total_calories, 1595);
        assert_eq!(meals.snacks.len(), 1);
    }

    #[test]
    fn meal_plan_needs_every_main_meal() {
        let reply = r#"{"breakfast": {"name": "Oats", "calories": 350}, "lunch": {"name": "Bowl", "calories": 600}}"#;
        assert!(parse_meal_plan(reply).is_err());
        let negative = r#"{"breakfast": {"name": "A", "calories": -1}, "lunch": {"name": "B", "calories": 1},
                          "dinner": {"name": "C", "calories": 1}}"#;
        assert!(matches!(parse_meal_plan(negative), Err(ReplyError::BadField { field: "calories", .. })));
    }

    #[test]
    fn meal_swap_reads_the_reason() {
        let alternative = parse_meal_swap(
            r#"{"name": "Turkey Wrap", "calories": 480, "description": "Whole wheat", "reason": "Leaner protein"}"#,
        )
        .unwrap();
        assert_eq!(alternative.name, "Turkey Wrap");
        assert_eq!(alternative.calories, 480);
        assert_eq!(alternative.reason, "Leaner protein");
    }
}
