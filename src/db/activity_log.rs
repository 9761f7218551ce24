use chrono::NaiveDate;
use sqlx::PgExecutor;
use uuid::Uuid;

use crate::models::activity::{ActivityCategory, ActivityLogEntry, MAX_INTENSITY};

/// First activity of the day stores intensity 1, later ones bump it up to the cap.
pub async fn upsert_activity<'e>(
    executor: impl PgExecutor<'e>,
    user_id: Uuid,
    category: ActivityCategory,
    date: NaiveDate,
) -> Result<i32, sqlx::Error> {
    sqlx::query_scalar::<_, i32>(
        r#"
        INSERT INTO activity_logs (user_id, activity_type, intensity, logged_at)
        VALUES ($1, $2, 1, $3)
        ON CONFLICT (user_id, logged_at, activity_type) DO UPDATE
        SET intensity = LEAST(activity_logs.intensity + 1, $4)
        RETURNING intensity
        "#,
    )
    .bind(user_id)
    .bind(category.as_str())
    .bind(date)
    .bind(MAX_INTENSITY)
    .fetch_one(executor)
    .await
}

/// Entries in the inclusive date range, oldest first.
pub async fn list_between<'e>(
    executor: impl PgExecutor<'e>,
    user_id: Uuid,
    from: NaiveDate,
    to: NaiveDate,
) -> Result<Vec<ActivityLogEntry>, sqlx::Error> {
    sqlx::query_as::<_, ActivityLogEntry>(
        r#"
        SELECT logged_at, activity_type, intensity
        FROM activity_logs
        WHERE user_id = $1 AND logged_at BETWEEN $2 AND $3
        ORDER BY logged_at ASC, activity_type ASC
        "#,
    )
    .bind(user_id)
    .bind(from)
    .bind(to)
    .fetch_all(executor)
    .await
}
