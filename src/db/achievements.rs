use sqlx::PgExecutor;
use uuid::Uuid;

use crate::game::achievements::Badge;
use crate::models::achievement::UnlockedAchievement;

pub async fn list_unlocked<'e>(
    executor: impl PgExecutor<'e>,
    user_id: Uuid,
) -> Result<Vec<UnlockedAchievement>, sqlx::Error> {
    sqlx::query_as::<_, UnlockedAchievement>(
        r#"
        SELECT badge_type, badge_name, unlocked_at
        FROM achievements
        WHERE user_id = $1
        ORDER BY unlocked_at DESC
        "#,
    )
    .bind(user_id)
    .fetch_all(executor)
    .await
}

/// Returns true when the badge was newly unlocked.
pub async fn unlock<'e>(executor: impl PgExecutor<'e>, user_id: Uuid, badge: &Badge) -> Result<bool, sqlx::Error> {
    let result = sqlx::query(
        r#"
        INSERT INTO achievements (user_id, badge_type, badge_name)
        VALUES ($1, $2, $3)
        ON CONFLICT (user_id, badge_type) DO NOTHING
        "#,
    )
    .bind(user_id)
    .bind(badge.badge_type)
    .bind(badge.name)
    .execute(executor)
    .await?;
    Ok(result.rows_affected() == 1)
}
