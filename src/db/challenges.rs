use chrono::NaiveDate;
use sqlx::{PgConnection, PgExecutor};
use uuid::Uuid;

use crate::game::challenges::ChallengeTemplate;
use crate::models::challenge::DailyChallenge;

const CHALLENGE_COLUMNS: &str =
    "id, user_id, challenge_date, challenge_type, challenge_text, xp_reward, completed";

pub async fn find_for_date<'e>(
    executor: impl PgExecutor<'e>,
    user_id: Uuid,
    date: NaiveDate,
) -> Result<Option<DailyChallenge>, sqlx::Error> {
    sqlx::query_as::<_, DailyChallenge>(&format!(
        "SELECT {} FROM daily_challenges WHERE user_id = $1 AND challenge_date = $2",
        CHALLENGE_COLUMNS
    ))
    .bind(user_id)
    .bind(date)
    .fetch_optional(executor)
    .await
}

/// Inserts the day's challenge unless one already exists. A concurrent
/// insert for the same day simply loses.
pub async fn insert_if_absent<'e>(
    executor: impl PgExecutor<'e>,
    user_id: Uuid,
    date: NaiveDate,
    template: &ChallengeTemplate,
) -> Result<(), sqlx::Error> {
    sqlx::query(
        r#"
        INSERT INTO daily_challenges (user_id, challenge_date, challenge_type, challenge_text, xp_reward)
        VALUES ($1, $2, $3, $4, $5)
        ON CONFLICT (user_id, challenge_date) DO NOTHING
        "#,
    )
    .bind(user_id)
    .bind(date)
    .bind(template.challenge_type)
    .bind(template.text)
    .bind(template.xp_reward)
    .execute(executor)
    .await?;
    Ok(())
}

/// Flips the day's challenge to completed and returns it, or `None` when
/// there is nothing left to complete.
pub async fn complete_for_date(
    conn: &mut PgConnection,
    user_id: Uuid,
    date: NaiveDate,
) -> Result<Option<DailyChallenge>, sqlx::Error> {
    sqlx::query_as::<_, DailyChallenge>(&format!(
        r#"
        UPDATE daily_challenges SET completed = TRUE
        WHERE user_id = $1 AND challenge_date = $2 AND completed = FALSE
        RETURNING {}
        "#,
        CHALLENGE_COLUMNS
    ))
    .bind(user_id)
    .bind(date)
    .fetch_optional(conn)
    .await
}
