use chrono::NaiveDate;
use sqlx::{PgConnection, PgExecutor};
use uuid::Uuid;

use crate::game::streak::StreakState;
use crate::models::game::{LeaderboardRow, LEADERBOARD_SIZE, WATER_GOAL_GLASSES};
use crate::models::user::{Account, FatigueLevel, Goal, ProfileChanges, UserRole};

const ACCOUNT_COLUMNS: &str = r#"
    id, name, age, gender, height, weight, goal, email, password_hash, role,
    xp_points, power_level, title, streak_count, last_activity_date,
    fatigue_level, water_intake, created_at
"#;

// Accounts whose email matches these never show up on the leaderboard
const LEADERBOARD_EXCLUSION: &str = "email NOT LIKE '%test%' AND email NOT LIKE '%warrior%'";

pub struct NewAccount<'a> {
    pub id: Uuid,
    pub name: &'a str,
    pub age: i32,
    pub gender: &'a str,
    pub height: f64,
    pub weight: f64,
    pub goal: Goal,
    pub email: &'a str,
    pub password_hash: &'a str,
    pub role: UserRole,
}

pub async fn find_by_id<'e>(executor: impl PgExecutor<'e>, id: Uuid) -> Result<Option<Account>, sqlx::Error> {
    sqlx::query_as::<_, Account>(&format!("SELECT {} FROM users WHERE id = $1", ACCOUNT_COLUMNS))
        .bind(id)
        .fetch_optional(executor)
        .await
}

pub async fn find_by_email<'e>(executor: impl PgExecutor<'e>, email: &str) -> Result<Option<Account>, sqlx::Error> {
    sqlx::query_as::<_, Account>(&format!("SELECT {} FROM users WHERE email = $1", ACCOUNT_COLUMNS))
        .bind(email)
        .fetch_optional(executor)
        .await
}

pub async fn email_exists<'e>(executor: impl PgExecutor<'e>, email: &str) -> Result<bool, sqlx::Error> {
    sqlx::query_scalar::<_, bool>("SELECT EXISTS(SELECT 1 FROM users WHERE email = $1)")
        .bind(email)
        .fetch_one(executor)
        .await
}

/// Inserts a fresh account with zeroed progression counters.
pub async fn insert_account<'e>(executor: impl PgExecutor<'e>, account: &NewAccount<'_>) -> Result<Account, sqlx::Error> {
    sqlx::query_as::<_, Account>(&format!(
        r#"
        INSERT INTO users (
            id, name, age, gender, height, weight, goal, email, password_hash, role,
            xp_points, power_level, title, streak_count, water_intake
        )
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, 0, 1, 'Rookie', 0, 0)
        RETURNING {}
        "#,
        ACCOUNT_COLUMNS
    ))
    .bind(account.id)
    .bind(account.name)
    .bind(account.age)
    .bind(account.gender)
    .bind(account.height)
    .bind(account.weight)
    .bind(account.goal.as_str())
    .bind(account.email)
    .bind(account.password_hash)
    .bind(account.role.to_string())
    .fetch_one(executor)
    .await
}

/// Applies only the fields present in `changes`.
pub async fn update_profile<'e>(
    executor: impl PgExecutor<'e>,
    id: Uuid,
    changes: &ProfileChanges,
) -> Result<Option<Account>, sqlx::Error> {
    sqlx::query_as::<_, Account>(&format!(
        r#"
        UPDATE users SET
            name = COALESCE($2, name),
            age = COALESCE($3, age),
            gender = COALESCE($4, gender),
            height = COALESCE($5, height),
            weight = COALESCE($6, weight),
            goal = COALESCE($7, goal)
        WHERE id = $1
        RETURNING {}
        "#,
        ACCOUNT_COLUMNS
    ))
    .bind(id)
    .bind(changes.name.as_deref())
    .bind(changes.age)
    .bind(changes.gender.as_deref())
    .bind(changes.height)
    .bind(changes.weight)
    .bind(changes.goal.map(|g| g.as_str()))
    .fetch_optional(executor)
    .await
}

pub async fn set_fatigue_level<'e>(
    executor: impl PgExecutor<'e>,
    id: Uuid,
    level: FatigueLevel,
) -> Result<u64, sqlx::Error> {
    let result = sqlx::query("UPDATE users SET fatigue_level = $2 WHERE id = $1")
        .bind(id)
        .bind(level.as_str())
        .execute(executor)
        .await?;
    Ok(result.rows_affected())
}

pub async fn set_weight<'e>(executor: impl PgExecutor<'e>, id: Uuid, weight: f64) -> Result<u64, sqlx::Error> {
    let result = sqlx::query("UPDATE users SET weight = $2 WHERE id = $1")
        .bind(id)
        .bind(weight)
        .execute(executor)
        .await?;
    Ok(result.rows_affected())
}

/// Reads the streak columns and holds the row lock until the transaction ends.
pub async fn lock_streak_state(conn: &mut PgConnection, id: Uuid) -> Result<Option<StreakState>, sqlx::Error> {
    let row = sqlx::query_as::<_, (i32, Option<NaiveDate>)>(
        "SELECT streak_count, last_activity_date FROM users WHERE id = $1 FOR UPDATE",
    )
    .bind(id)
    .fetch_optional(conn)
    .await?;

    Ok(row.map(|(streak_count, last_activity_date)| StreakState { streak_count, last_activity_date }))
}

pub async fn set_streak_state(conn: &mut PgConnection, id: Uuid, state: StreakState) -> Result<(), sqlx::Error> {
    sqlx::query("UPDATE users SET streak_count = $2, last_activity_date = $3 WHERE id = $1")
        .bind(id)
        .bind(state.streak_count)
        .bind(state.last_activity_date)
        .execute(conn)
        .await?;
    Ok(())
}

/// Zeroes the streak only if it is still lapsed as of `today`, so a streak
/// extended after the caller's read is left alone. Running it twice is harmless.
pub async fn reset_streak<'e>(executor: impl PgExecutor<'e>, id: Uuid, today: NaiveDate) -> Result<u64, sqlx::Error> {
    let result = sqlx::query(
        r#"
        UPDATE users SET streak_count = 0
        WHERE id = $1 AND streak_count <> 0 AND last_activity_date < $2::date - 1
        "#,
    )
    .bind(id)
    .bind(today)
    .execute(executor)
    .await?;
    Ok(result.rows_affected())
}

/// Adds `amount` to the account's XP and returns the new total. Returns
/// `None` when the account is missing or the total would leave the column range.
pub async fn add_xp(conn: &mut PgConnection, id: Uuid, amount: i32) -> Result<Option<i32>, sqlx::Error> {
    sqlx::query_scalar::<_, i32>(
        r#"
        UPDATE users SET xp_points = xp_points + $2
        WHERE id = $1 AND xp_points <= 2147483647 - $2
        RETURNING xp_points
        "#,
    )
    .bind(id)
    .bind(amount)
    .fetch_optional(conn)
    .await
}

pub async fn exists<'e>(executor: impl PgExecutor<'e>, id: Uuid) -> Result<bool, sqlx::Error> {
    sqlx::query_scalar::<_, bool>("SELECT EXISTS(SELECT 1 FROM users WHERE id = $1)")
        .bind(id)
        .fetch_one(executor)
        .await
}

pub async fn set_level_and_title(conn: &mut PgConnection, id: Uuid, level: i32, title: &str) -> Result<(), sqlx::Error> {
    sqlx::query("UPDATE users SET power_level = $2, title = $3 WHERE id = $1")
        .bind(id)
        .bind(level)
        .bind(title)
        .execute(conn)
        .await?;
    Ok(())
}

pub async fn water_intake<'e>(executor: impl PgExecutor<'e>, id: Uuid) -> Result<Option<i32>, sqlx::Error> {
    sqlx::query_scalar::<_, i32>("SELECT water_intake FROM users WHERE id = $1")
        .bind(id)
        .fetch_optional(executor)
        .await
}

/// One more glass, never past the daily goal.
pub async fn add_water_glass<'e>(executor: impl PgExecutor<'e>, id: Uuid) -> Result<Option<i32>, sqlx::Error> {
    sqlx::query_scalar::<_, i32>(
        "UPDATE users SET water_intake = LEAST(water_intake + 1, $2) WHERE id = $1 RETURNING water_intake",
    )
    .bind(id)
    .bind(WATER_GOAL_GLASSES)
    .fetch_optional(executor)
    .await
}

pub async fn reset_water<'e>(executor: impl PgExecutor<'e>, id: Uuid) -> Result<u64, sqlx::Error> {
    let result = sqlx::query("UPDATE users SET water_intake = 0 WHERE id = $1")
        .bind(id)
        .execute(executor)
        .await?;
    Ok(result.rows_affected())
}

pub async fn leaderboard<'e>(executor: impl PgExecutor<'e>) -> Result<Vec<LeaderboardRow>, sqlx::Error> {
    sqlx::query_as::<_, LeaderboardRow>(&format!(
        r#"
        SELECT id, name, power_level, title, xp_points
        FROM users
        WHERE {}
        ORDER BY power_level DESC, xp_points DESC
        LIMIT $1
        "#,
        LEADERBOARD_EXCLUSION
    ))
    .bind(LEADERBOARD_SIZE)
    .fetch_all(executor)
    .await
}

/// One plus the number of ranked accounts with a strictly higher power level.
pub async fn leaderboard_rank<'e>(executor: impl PgExecutor<'e>, id: Uuid) -> Result<i64, sqlx::Error> {
    sqlx::query_scalar::<_, i64>(&format!(
        r#"
        SELECT COUNT(*) + 1
        FROM users
        WHERE power_level > (SELECT power_level FROM users WHERE id = $1)
        AND {}
        "#,
        LEADERBOARD_EXCLUSION
    ))
    .bind(id)
    .fetch_one(executor)
    .await
}
