use sqlx::PgExecutor;
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::coach::{ChatRole, ChatTurn};

#[derive(Debug, sqlx::FromRow)]
struct ChatHistoryRow {
    role: String,
    message: String,
}

/// The latest `limit` turns for an account, oldest first.
pub async fn recent<'e>(executor: impl PgExecutor<'e>, user_id: Uuid, limit: i64) -> Result<Vec<ChatTurn>, AppError> {
    let rows = sqlx::query_as::<_, ChatHistoryRow>(
        r#"
        SELECT role, message
        FROM chat_history
        WHERE user_id = $1
        ORDER BY created_at DESC, id DESC
        LIMIT $2
        "#,
    )
    .bind(user_id)
    .bind(limit)
    .fetch_all(executor)
    .await?;

    rows.into_iter()
        .rev()
        .map(|row| Ok(ChatTurn { role: row.role.parse()?, text: row.message }))
        .collect()
}

pub async fn insert<'e>(
    executor: impl PgExecutor<'e>,
    user_id: Uuid,
    role: ChatRole,
    message: &str,
) -> Result<(), sqlx::Error> {
    sqlx::query("INSERT INTO chat_history (user_id, role, message) VALUES ($1, $2, $3)")
        .bind(user_id)
        .bind(role.as_str())
        .bind(message)
        .execute(executor)
        .await?;
    Ok(())
}
