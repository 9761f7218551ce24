use sqlx::types::Json;
use sqlx::PgExecutor;
use uuid::Uuid;

use crate::models::plan::{CompletionStatus, DayPlan, Exercise, PlanDay, WeeklyPlanRow};

const PLAN_COLUMNS: &str = "id, user_id, day, exercises, meals, completed_status, created_at";

pub async fn list<'e>(executor: impl PgExecutor<'e>, user_id: Uuid) -> Result<Vec<WeeklyPlanRow>, sqlx::Error> {
    sqlx::query_as::<_, WeeklyPlanRow>(&format!(
        r#"
        SELECT {}
        FROM workout_meal_plans
        WHERE user_id = $1
        ORDER BY CASE day
            WHEN 'Monday' THEN 1
            WHEN 'Tuesday' THEN 2
            WHEN 'Wednesday' THEN 3
            WHEN 'Thursday' THEN 4
            WHEN 'Friday' THEN 5
            WHEN 'Saturday' THEN 6
            WHEN 'Sunday' THEN 7
            ELSE 8
        END
        "#,
        PLAN_COLUMNS
    ))
    .bind(user_id)
    .fetch_all(executor)
    .await
}

pub async fn find<'e>(
    executor: impl PgExecutor<'e>,
    user_id: Uuid,
    day: PlanDay,
) -> Result<Option<WeeklyPlanRow>, sqlx::Error> {
    sqlx::query_as::<_, WeeklyPlanRow>(&format!(
        "SELECT {} FROM workout_meal_plans WHERE user_id = $1 AND day = $2",
        PLAN_COLUMNS
    ))
    .bind(user_id)
    .bind(day.as_str())
    .fetch_optional(executor)
    .await
}

/// Same as [`find`] but holds the row lock for the rest of the transaction.
pub async fn find_for_update(
    conn: &mut sqlx::PgConnection,
    user_id: Uuid,
    day: PlanDay,
) -> Result<Option<WeeklyPlanRow>, sqlx::Error> {
    sqlx::query_as::<_, WeeklyPlanRow>(&format!(
        "SELECT {} FROM workout_meal_plans WHERE user_id = $1 AND day = $2 FOR UPDATE",
        PLAN_COLUMNS
    ))
    .bind(user_id)
    .bind(day.as_str())
    .fetch_optional(conn)
    .await
}

/// Writes a generated day, replacing whatever the account had for it.
pub async fn upsert_day<'e>(executor: impl PgExecutor<'e>, user_id: Uuid, plan: &DayPlan) -> Result<(), sqlx::Error> {
    sqlx::query(
        r#"
        INSERT INTO workout_meal_plans (user_id, day, exercises, meals, completed_status)
        VALUES ($1, $2, $3, $4, $5)
        ON CONFLICT (user_id, day) DO UPDATE
        SET exercises = EXCLUDED.exercises,
            meals = EXCLUDED.meals,
            completed_status = EXCLUDED.completed_status
        "#,
    )
    .bind(user_id)
    .bind(plan.day.as_str())
    .bind(Json(&plan.exercises))
    .bind(Json(&plan.meals))
    .bind(Json(&plan.completed_status))
    .execute(executor)
    .await?;
    Ok(())
}

/// Writes a generated day only if the account has nothing for it yet.
pub async fn insert_day_if_absent<'e>(
    executor: impl PgExecutor<'e>,
    user_id: Uuid,
    plan: &DayPlan,
) -> Result<(), sqlx::Error> {
    sqlx::query(
        r#"
        INSERT INTO workout_meal_plans (user_id, day, exercises, meals, completed_status)
        VALUES ($1, $2, $3, $4, $5)
        ON CONFLICT (user_id, day) DO NOTHING
        "#,
    )
    .bind(user_id)
    .bind(plan.day.as_str())
    .bind(Json(&plan.exercises))
    .bind(Json(&plan.meals))
    .bind(Json(&plan.completed_status))
    .execute(executor)
    .await?;
    Ok(())
}

pub async fn update_exercises<'e>(
    executor: impl PgExecutor<'e>,
    user_id: Uuid,
    day: PlanDay,
    exercises: &[Exercise],
    status: &CompletionStatus,
) -> Result<u64, sqlx::Error> {
    let result = sqlx::query(
        "UPDATE workout_meal_plans SET exercises = $3, completed_status = $4 WHERE user_id = $1 AND day = $2",
    )
    .bind(user_id)
    .bind(day.as_str())
    .bind(Json(exercises))
    .bind(Json(status))
    .execute(executor)
    .await?;
    Ok(result.rows_affected())
}

pub async fn update_status<'e>(
    executor: impl PgExecutor<'e>,
    user_id: Uuid,
    day: PlanDay,
    status: &CompletionStatus,
) -> Result<u64, sqlx::Error> {
    let result = sqlx::query("UPDATE workout_meal_plans SET completed_status = $3 WHERE user_id = $1 AND day = $2")
        .bind(user_id)
        .bind(day.as_str())
        .bind(Json(status))
        .execute(executor)
        .await?;
    Ok(result.rows_affected())
}
