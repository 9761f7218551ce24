use sqlx::PgPool;
use uuid::Uuid;

use crate::db::weekly_plans;
use crate::errors::AppError;
use crate::game::streak::local_today;
use crate::models::activity::ActivityCategory;
use crate::models::plan::{CompletionStatus, DailyMeals, Exercise, MealSlot, PlanDay, WeeklyPlan};
use crate::services::activity_log::ActivityLog;

const PLAN_NOT_FOUND: &str = "Plan not found for this day";

/// Flags exercise `index` as done or not done.
pub fn mark_exercise(
    status: &mut CompletionStatus,
    exercises: &[Exercise],
    index: usize,
    completed: bool,
) -> Result<(), AppError> {
    if index >= exercises.len() {
        return Err(AppError::Validation(format!(
            "Exercise index {} is out of range for {} exercises",
            index,
            exercises.len()
        )));
    }
    status.exercises.insert(index, completed);
    Ok(())
}

pub fn mark_meal(
    status: &mut CompletionStatus,
    meals: &DailyMeals,
    slot: MealSlot,
    completed: bool,
) -> Result<(), AppError> {
    match slot {
        MealSlot::Breakfast => status.meals.breakfast = completed,
        MealSlot::Lunch => status.meals.lunch = completed,
        MealSlot::Dinner => status.meals.dinner = completed,
        MealSlot::Snack(index) => {
            if index >= meals.snacks.len() {
                return Err(AppError::Validation(format!(
                    "snackIndex {} is out of range for {} snacks",
                    index,
                    meals.snacks.len()
                )));
            }
            status.meals.snacks.insert(index, completed);
        }
    }
    Ok(())
}

/// Reads and edits the stored weekly plan days.
pub struct PlanService {
    pool: PgPool,
}

impl PlanService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn day(&self, account_id: Uuid, day: PlanDay) -> Result<WeeklyPlan, AppError> {
        weekly_plans::find(&self.pool, account_id, day)
            .await?
            .map(WeeklyPlan::from)
            .ok_or_else(|| AppError::NotFound(PLAN_NOT_FOUND.to_string()))
    }

    /// Swaps in a new exercise list and clears exercise completion.
    #[tracing::instrument(name = "Replace exercises", skip(self, exercises))]
    pub async fn replace_exercises(
        &self,
        account_id: Uuid,
        day: PlanDay,
        exercises: Vec<Exercise>,
    ) -> Result<(Vec<Exercise>, CompletionStatus), AppError> {
        let mut tx = self.pool.begin().await?;
        let plan = weekly_plans::find_for_update(&mut *tx, account_id, day)
            .await?
            .ok_or_else(|| AppError::NotFound(PLAN_NOT_FOUND.to_string()))?;

        let mut status = plan.completed_status.0;
        status.reset_exercises(exercises.len());
        weekly_plans::update_exercises(&mut *tx, account_id, day, &exercises, &status).await?;
        tx.commit().await?;

        Ok((exercises, status))
    }

    /// Completing an exercise also logs the day's workout activity.
    #[tracing::instrument(name = "Toggle exercise", skip(self))]
    pub async fn toggle_exercise(
        &self,
        account_id: Uuid,
        day: PlanDay,
        index: usize,
        completed: bool,
    ) -> Result<CompletionStatus, AppError> {
        let mut tx = self.pool.begin().await?;
        let plan = weekly_plans::find_for_update(&mut *tx, account_id, day)
            .await?
            .ok_or_else(|| AppError::NotFound(PLAN_NOT_FOUND.to_string()))?;

        let mut status = plan.completed_status.0;
        mark_exercise(&mut status, &plan.exercises.0, index, completed)?;
        weekly_plans::update_status(&mut *tx, account_id, day, &status).await?;

        if completed {
            ActivityLog::record_in(&mut *tx, account_id, ActivityCategory::Workout, local_today()).await?;
        }

        tx.commit().await?;
        Ok(status)
    }

    /// Completing a meal also logs the day's meal activity.
    #[tracing::instrument(name = "Toggle meal", skip(self))]
    pub async fn toggle_meal(
        &self,
        account_id: Uuid,
        day: PlanDay,
        slot: MealSlot,
        completed: bool,
    ) -> Result<CompletionStatus, AppError> {
        let mut tx = self.pool.begin().await?;
        let plan = weekly_plans::find_for_update(&mut *tx, account_id, day)
            .await?
            .ok_or_else(|| AppError::NotFound(PLAN_NOT_FOUND.to_string()))?;

        let mut status = plan.completed_status.0;
        mark_meal(&mut status, &plan.meals.0, slot, completed)?;
        weekly_plans::update_status(&mut *tx, account_id, day, &status).await?;

        if completed {
            ActivityLog::record_in(&mut *tx, account_id, ActivityCategory::Meal, local_today()).await?;
        }

        tx.commit().await?;
        Ok(status)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::user::Goal;
    use crate::workout::plan_generator::generate_day;

    #[test]
    fn exercise_index_must_exist() {
        let plan = generate_day(Goal::WeightLoss, PlanDay::Monday);
        let mut status = plan.completed_status.clone();

        assert!(mark_exercise(&mut status, &plan.exercises, 3, true).is_ok());
        assert_eq!(status.exercises.get(&3), Some(&true));

        let err = mark_exercise(&mut status, &plan.exercises, plan.exercises.len(), true).unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
    }

    #[test]
    fn snack_index_must_exist() {
        let plan = generate_day(Goal::Maintenance, PlanDay::Friday);
        let mut status = plan.completed_status.clone();

        mark_meal(&mut status, &plan.meals, MealSlot::Snack(1), true).unwrap();
        assert_eq!(status.meals.snacks.get(&1), Some(&true));
        assert!(mark_meal(&mut status, &plan.meals, MealSlot::Snack(2), true).is_err());
    }

    #[test]
    fn unmarking_a_meal_keeps_the_others() {
        let plan = generate_day(Goal::MuscleGain, PlanDay::Sunday);
        let mut status = plan.completed_status.clone();

        mark_meal(&mut status, &plan.meals, MealSlot::Breakfast, true).unwrap();
        mark_meal(&mut status, &plan.meals, MealSlot::Dinner, true).unwrap();
        mark_meal(&mut status, &plan.meals, MealSlot::Breakfast, false).unwrap();

        assert!(!status.meals.breakfast);
        assert!(status.meals.dinner);
    }
}
