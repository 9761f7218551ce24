//! Prompt text sent to the coaching model.
//!
//! Every prompt is built from an [`AthleteProfile`] so the model sees the same
//! figures the profile endpoint shows, including a streak that has lapsed but
//! not yet been reset in storage.

use chrono::NaiveDate;

use crate::game::streak::is_broken;
use crate::models::coach::WorkoutLocation;
use crate::models::plan::{DailyMeals, Exercise};
use crate::models::user::Account;

/// The model's scripted answer to the persona turn, replayed before history.
pub const PERSONA_ACKNOWLEDGEMENT: &str = "Understood. I'm ready to help you reach your goals!";

/// Streak length above which the coach turns proud instead of scolding.
const PROUD_STREAK: i32 = 5;

const PLANNED_EXERCISES_SHOWN: usize = 3;

#[derive(Debug, Clone, PartialEq)]
pub struct AthleteProfile {
    pub name: String,
    pub age: i32,
    pub gender: String,
    pub weight: f64,
    pub height: f64,
    pub goal: String,
    pub fatigue_level: String,
    pub streak_count: i32,
}

impl AthleteProfile {
    pub fn from_account(account: &Account, today: NaiveDate) -> Self {
        let streak_count = if is_broken(account.streak_state(), today) { 0 } else { account.streak_count };
        Self {
            name: account.name.clone(),
            age: account.age,
            gender: account.gender.clone(),
            weight: account.weight,
            height: account.height,
            goal: account.goal.clone(),
            fatigue_level: account.fatigue_level.clone(),
            streak_count,
        }
    }
}

/// What today's stored plan says about the athlete's recent fuel and training.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PlanContext {
    pub last_meal: Option<String>,
    pub planned_workout: Option<String>,
}

impl PlanContext {
    /// `hour` is the local hour of day and picks the most recent meal slot.
    pub fn from_plan(exercises: &[Exercise], meals: &DailyMeals, hour: u32) -> Self {
        let meal = match hour {
            h if h < 11 => &meals.breakfast,
            h if h < 15 => &meals.lunch,
            _ => &meals.dinner,
        };

        let planned_workout = (!exercises.is_empty()).then(|| {
            let names: Vec<&str> = exercises
                .iter()
                .take(PLANNED_EXERCISES_SHOWN)
                .map(|e| e.name.as_str())
                .collect();
            format!("Targeting: {}", names.join(", "))
        });

        Self {
            last_meal: Some(format!("{} ({} cal)", meal.name, meal.calories)),
            planned_workout,
        }
    }
}

pub fn coach_persona(profile: &AthleteProfile) -> String {
    let tone = if profile.streak_count > PROUD_STREAK {
        "Proud and demanding, like a true Saiyan elite."
    } else {
        "Tough love, pushing them to stop being weak."
    };

    format!(
        "You are Vegeta, the Prince of all Saiyans, acting as an elite fitness coach.\n\
         User Profile: {age}yo {gender}, {weight}kg, {height}cm. Name: {name}.\n\
         Goal: {goal}. Fatigue Level: {fatigue}. Streak: {streak} days.\n\
         Push the user beyond their limits using scientifically accurate advice wrapped in \
         Dragon Ball Z metaphors (Ki, Power Levels, Super Saiyan, Gravity Training).\n\
         Address the user as \"Warrior\" or by their name. Keep answers concise but intense.\n\
         Tone: {tone}\n\
         Always end with a short DBZ-style motivation.",
        age = profile.age,
        gender = profile.gender,
        weight = profile.weight,
        height = profile.height,
        name = profile.name,
        goal = profile.goal,
        fatigue = profile.fatigue_level,
        streak = profile.streak_count,
        tone = tone,
    )
}

pub fn workout_prompt(profile: &AthleteProfile, location: WorkoutLocation, last_meal: Option<&str>) -> String {
    let meal_context = last_meal
        .map(|meal| format!("User recently ate: \"{}\". Adjust intensity based on this energy intake.\n", meal))
        .unwrap_or_default();

    format!(
        "Generate a single daily workout routine for a {gender} focused on {goal}.\n\
         Location: {location}.\n\
         Fatigue Level: {fatigue} (Adjust intensity accordingly).\n\
         {meal_context}\
         Format: JSON object with an 'exercises' array. Each exercise object has: \
         'name', 'sets' (number), 'reps' (string), 'instructions'.\n\
         Return only the raw JSON, without code fences.",
        gender = profile.gender,
        goal = profile.goal,
        location = location.as_str(),
        fatigue = profile.fatigue_level,
        meal_context = meal_context,
    )
}

pub fn meal_plan_prompt(profile: &AthleteProfile, planned_workout: Option<&str>) -> String {
    let workout_context = planned_workout
        .map(|workout| {
            format!(
                "User's workout plan includes: \"{}\". Ensure meals provide appropriate fuel and recovery for this training.\n",
                workout
            )
        })
        .unwrap_or_default();

    format!(
        "Generate a daily meal plan for a {gender} focused on {goal}.\n\
         Current Weight: {weight}kg.\n\
         Fatigue Level: {fatigue} (Suggest recovery foods if High).\n\
         {workout_context}\
         Format: JSON object with keys 'breakfast', 'lunch', 'dinner', 'snacks' (array) and \
         'totalCalories' (number). Each meal object has: 'name', 'calories', 'description'.\n\
         Total calories should be appropriate for the goal.\n\
         Return only the raw JSON, without code fences.",
        gender = profile.gender,
        goal = profile.goal,
        weight = profile.weight,
        fatigue = profile.fatigue_level,
        workout_context = workout_context,
    )
}

pub fn meal_swap_prompt(profile: &AthleteProfile, current_meal: &str) -> String {
    format!(
        "Suggest a healthy alternative for this meal: \"{meal}\".\n\
         User Goal: {goal}.\n\
         Constraint: Must have similar calories and macros.\n\
         Format: JSON object with 'name', 'calories' (number), 'description', 'reason'.\n\
         Return only the raw JSON, without code fences.",
        meal = current_meal,
        goal = profile.goal,
    )
}

pub fn health_analysis_prompt(profile: &AthleteProfile) -> String {
    format!(
        "Provide a weekly health summary for a user.\n\
         Goal: {goal}. Streak: {streak}.\n\
         Fatigue: {fatigue}.\n\
         Give structured feedback on consistency, recovery, and motivation.\n\
         Keep it human-like and friendly.",
        goal = profile.goal,
        streak = profile.streak_count,
        fatigue = profile.fatigue_level,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::plan::Meal;

    fn profile(streak_count: i32) -> AthleteProfile {
        AthleteProfile {
            name: "Ada".into(),
            age: 30,
            gender: "female".into(),
            weight: 65.0,
            height: 170.0,
            goal: "muscle gain".into(),
            fatigue_level: "High".into(),
            streak_count,
        }
    }

    fn meal(name: &str, calories: i32) -> Meal {
        Meal { name: name.into(), calories, description: String::new() }
    }

    fn exercise(name: &str) -> Exercise {
        Exercise { name: name.into(), sets: 3, reps: "10".into(), instructions: String::new() }
    }

    fn meals() -> DailyMeals {
        DailyMeals::new(meal("Oats", 350), meal("Chicken Bowl", 600), meal("Salmon", 550), vec![])
    }

    #[test]
    fn last_meal_follows_the_hour() {
        assert_eq!(PlanContext::from_plan(&[], &meals(), 10).last_meal.as_deref(), Some("Oats (350 cal)"));
        assert_eq!(PlanContext::from_plan(&[], &meals(), 11).last_meal.as_deref(), Some("Chicken Bowl (600 cal)"));
        assert_eq!(PlanContext::from_plan(&[], &meals(), 15).last_meal.as_deref(), Some("Salmon (550 cal)"));
    }

    #[test]
    fn planned_workout_names_the_first_three_exercises() {
        let exercises = ["Squats", "Lunges", "Plank", "Burpees"].map(exercise);
        let context = PlanContext::from_plan(&exercises, &meals(), 8);
        assert_eq!(context.planned_workout.as_deref(), Some("Targeting: Squats, Lunges, Plank"));
        assert_eq!(PlanContext::from_plan(&[], &meals(), 8).planned_workout, None);
    }

    #[test]
    fn persona_tone_depends_on_the_streak() {
        assert!(coach_persona(&profile(6)).contains("Proud and demanding"));
        assert!(coach_persona(&profile(5)).contains("Tough love"));
        assert!(coach_persona(&profile(5)).contains("30yo female, 65kg, 170cm"));
    }

    #[test]
    fn workout_prompt_carries_fatigue_location_and_meal() {
        let prompt = workout_prompt(&profile(0), WorkoutLocation::Gym, Some("Oats (350 cal)"));
        assert!(prompt.contains("Location: gym."));
        assert!(prompt.contains("Fatigue Level: High"));
        assert!(prompt.contains("User recently ate: \"Oats (350 cal)\""));

        let without_meal = workout_prompt(&profile(0), WorkoutLocation::Home, None);
        assert!(!without_meal.contains("recently ate"));
    }

    #[test]
    fn meal_prompt_mentions_the_planned_workout() {
        let prompt = meal_plan_prompt(&profile(0), Some("Targeting: Squats"));
        assert!(prompt.contains("Current Weight: 65kg."));
        assert!(prompt.contains("\"Targeting: Squats\""));
    }
}
