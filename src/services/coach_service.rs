use std::sync::Arc;
use chrono::{DateTime, Local, Timelike};
use sqlx::PgPool;
use uuid::Uuid;

use crate::coach::prompts::{
    coach_persona, health_analysis_prompt, meal_plan_prompt, meal_swap_prompt, workout_prompt, AthleteProfile,
    PlanContext, PERSONA_ACKNOWLEDGEMENT,
};
use crate::coach::replies::{parse_meal_plan, parse_meal_swap, parse_workout};
use crate::db::{accounts, chat_history, weekly_plans};
use crate::db::helpers::require_record;
use crate::errors::AppError;
use crate::models::coach::{ChatRole, ChatTurn, MealAlternative, WorkoutLocation};
use crate::models::plan::{DailyMeals, Exercise, PlanDay};
use crate::services::generative_model::GenerativeModel;

/// Shown when the model cannot produce a health analysis.
pub const ANALYSIS_FALLBACK: &str = "I'm having trouble analyzing your data right now. Keep going!";

/// Earlier turns replayed ahead of a new chat message.
const CHAT_HISTORY_TURNS: i64 = 5;

/// Model-backed coaching. Generated workouts and meal plans are returned to
/// the client, which decides whether to store them in the weekly plan.
pub struct CoachService {
    pool: PgPool,
    model: Arc<dyn GenerativeModel>,
}

impl CoachService {
    pub fn new(pool: PgPool, model: Arc<dyn GenerativeModel>) -> Self {
        Self { pool, model }
    }

    async fn athlete(&self, account_id: Uuid, now: DateTime<Local>) -> Result<AthleteProfile, AppError> {
        let account = require_record(accounts::find_by_id(&self.pool, account_id).await, "User not found")?;
        Ok(AthleteProfile::from_account(&account, now.date_naive()))
    }

    /// Today's plan as seen at `now`. A missing plan gives an empty context.
    async fn plan_context(&self, account_id: Uuid, now: DateTime<Local>) -> Result<PlanContext, AppError> {
        let today = PlanDay::for_date(now.date_naive());
        Ok(weekly_plans::find(&self.pool, account_id, today)
            .await?
            .map(|plan| PlanContext::from_plan(&plan.exercises.0, &plan.meals.0, now.hour()))
            .unwrap_or_default())
    }

    async fn ask(&self, prompt: String) -> Result<String, AppError> {
        Ok(self.model.generate(&[ChatTurn::user(prompt)]).await?)
    }

    #[tracing::instrument(name = "Generate workout", skip(self))]
    pub async fn generate_workout(&self, account_id: Uuid, location: WorkoutLocation) -> Result<Vec<Exercise>, AppError> {
        let now = Local::now();
        let athlete = self.athlete(account_id, now).await?;
        let context = self.plan_context(account_id, now).await?;

        let reply = self.ask(workout_prompt(&athlete, location, context.last_meal.as_deref())).await?;
        let exercises = parse_workout(&reply).map_err(|e| {
            tracing::error!("Unusable workout reply: {}", e);
            e
        })?;

        tracing::info!("Generated a {} workout with {} exercises", location.as_str(), exercises.len());
        Ok(exercises)
    }

    #[tracing::instrument(name = "Generate meal plan", skip(self))]
    pub async fn generate_meal_plan(&self, account_id: Uuid) -> Result<DailyMeals, AppError> {
        let now = Local::now();
        let athlete = self.athlete(account_id, now).await?;
        let context = self.plan_context(account_id, now).await?;

        let reply = self.ask(meal_plan_prompt(&athlete, context.planned_workout.as_deref())).await?;
        let meals = parse_meal_plan(&reply).map_err(|e| {
            tracing::error!("Unusable meal plan reply: {}", e);
            e
        })?;

        tracing::info!("Generated a meal plan of {} kcal", meals.total_calories);
        Ok(meals)
    }

    #[tracing::instrument(name = "Swap meal", skip(self))]
    pub async fn swap_meal(&self, account_id: Uuid, current_meal: &str) -> Result<MealAlternative, AppError> {
        let current_meal = current_meal.trim();
        if current_meal.is_empty() {
            return Err(AppError::Validation("currentMeal is required".to_string()));
        }

        let athlete = self.athlete(account_id, Local::now()).await?;
        let reply = self.ask(meal_swap_prompt(&athlete, current_meal)).await?;
        Ok(parse_meal_swap(&reply)?)
    }

    /// Replies in the coach persona with the last few turns as context.
    /// Both the message and the reply are stored only once the model answers.
    #[tracing::instrument(name = "Coach chat", skip(self, message))]
    pub async fn chat(&self, account_id: Uuid, message: &str) -> Result<String, AppError> {
        let message = message.trim();
        if message.is_empty() {
            return Err(AppError::Validation("Message is required".to_string()));
        }

        let athlete = self.athlete(account_id, Local::now()).await?;
        let history = chat_history::recent(&self.pool, account_id, CHAT_HISTORY_TURNS).await?;

        let mut turns = Vec::with_capacity(history.len() + 3);
        turns.push(ChatTurn::user(coach_persona(&athlete)));
        turns.push(ChatTurn::model(PERSONA_ACKNOWLEDGEMENT));
        turns.extend(history);
        turns.push(ChatTurn::user(message));

        let reply = self.model.generate(&turns).await?;

        let mut tx = self.pool.begin().await?;
        chat_history::insert(&mut *tx, account_id, ChatRole::User, message).await?;
        chat_history::insert(&mut *tx, account_id, ChatRole::Model, &reply).await?;
        tx.commit().await?;

        Ok(reply)
    }

    #[tracing::instrument(name = "Health analysis", skip(self))]
    pub async fn health_analysis(&self, account_id: Uuid) -> Result<String, AppError> {
        let athlete = self.athlete(account_id, Local::now()).await?;
        match self.model.generate(&[ChatTurn::user(health_analysis_prompt(&athlete))]).await {
            Ok(analysis) => Ok(analysis),
            Err(e) => {
                tracing::warn!("Health analysis unavailable, using fallback: {}", e);
                Ok(ANALYSIS_FALLBACK.to_string())
            }
        }
    }
}
