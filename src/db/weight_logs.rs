use sqlx::PgExecutor;
use uuid::Uuid;

use crate::models::game::{WeightEntry, WEIGHT_HISTORY_LIMIT};

pub async fn insert<'e>(executor: impl PgExecutor<'e>, user_id: Uuid, weight: f64) -> Result<(), sqlx::Error> {
    sqlx::query("INSERT INTO weight_logs (user_id, weight) VALUES ($1, $2)")
        .bind(user_id)
        .bind(weight)
        .execute(executor)
        .await?;
    Ok(())
}

/// Most recent entries first.
pub async fn history<'e>(executor: impl PgExecutor<'e>, user_id: Uuid) -> Result<Vec<WeightEntry>, sqlx::Error> {
    sqlx::query_as::<_, WeightEntry>(
        r#"
        SELECT weight, logged_at
        FROM weight_logs
        WHERE user_id = $1
        ORDER BY logged_at DESC, id DESC
        LIMIT $2
        "#,
    )
    .bind(user_id)
    .bind(WEIGHT_HISTORY_LIMIT)
    .fetch_all(executor)
    .await
}
