use chrono::{DateTime, Utc};
use sqlx::types::Json;
use sqlx::{PgConnection, PgExecutor};

use crate::models::auth::PendingRegistrationData;

#[derive(Debug, Clone, sqlx::FromRow)]
pub struct PendingRegistration {
    pub id: i64,
    pub email: String,
    pub otp: String,
    pub registration_data: Json<PendingRegistrationData>,
    pub expires_at: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
}

/// Deletes every pending row already past its expiry.
pub async fn sweep_expired<'e>(executor: impl PgExecutor<'e>, now: DateTime<Utc>) -> Result<u64, sqlx::Error> {
    let result = sqlx::query("DELETE FROM pending_registrations WHERE expires_at < $1")
        .bind(now)
        .execute(executor)
        .await?;
    Ok(result.rows_affected())
}

/// Creates or replaces the pending row for an email.
pub async fn upsert<'e>(
    executor: impl PgExecutor<'e>,
    email: &str,
    otp: &str,
    data: &PendingRegistrationData,
    expires_at: DateTime<Utc>,
) -> Result<(), sqlx::Error> {
    sqlx::query(
        r#"
        INSERT INTO pending_registrations (email, otp, registration_data, expires_at)
        VALUES ($1, $2, $3, $4)
        ON CONFLICT (email) DO UPDATE
        SET otp = EXCLUDED.otp,
            registration_data = EXCLUDED.registration_data,
            expires_at = EXCLUDED.expires_at,
            created_at = NOW()
        "#,
    )
    .bind(email)
    .bind(otp)
    .bind(Json(data))
    .bind(expires_at)
    .execute(executor)
    .await?;
    Ok(())
}

pub async fn find<'e>(executor: impl PgExecutor<'e>, email: &str) -> Result<Option<PendingRegistration>, sqlx::Error> {
    sqlx::query_as::<_, PendingRegistration>(
        r#"
        SELECT id, email, otp, registration_data, expires_at, created_at
        FROM pending_registrations
        WHERE email = $1
        "#,
    )
    .bind(email)
    .fetch_optional(executor)
    .await
}

pub async fn find_for_update(conn: &mut PgConnection, email: &str) -> Result<Option<PendingRegistration>, sqlx::Error> {
    sqlx::query_as::<_, PendingRegistration>(
        r#"
        SELECT id, email, otp, registration_data, expires_at, created_at
        FROM pending_registrations
        WHERE email = $1
        FOR UPDATE
        "#,
    )
    .bind(email)
    .fetch_optional(conn)
    .await
}

/// Swaps in a new code and expiry. Returns 0 when no row exists.
pub async fn replace_code<'e>(
    executor: impl PgExecutor<'e>,
    email: &str,
    otp: &str,
    expires_at: DateTime<Utc>,
) -> Result<u64, sqlx::Error> {
    let result = sqlx::query("UPDATE pending_registrations SET otp = $2, expires_at = $3 WHERE email = $1")
        .bind(email)
        .bind(otp)
        .bind(expires_at)
        .execute(executor)
        .await?;
    Ok(result.rows_affected())
}

pub async fn delete<'e>(executor: impl PgExecutor<'e>, email: &str) -> Result<u64, sqlx::Error> {
    let result = sqlx::query("DELETE FROM pending_registrations WHERE email = $1")
        .bind(email)
        .execute(executor)
        .await?;
    Ok(result.rows_affected())
}
