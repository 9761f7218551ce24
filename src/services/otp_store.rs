use std::sync::Arc;
use chrono::{DateTime, Duration, Utc};
use rand::Rng;
use sqlx::{PgConnection, PgPool};

use crate::config::otp::OtpSettings;
use crate::db::{accounts, pending_registrations};
use crate::errors::AppError;
use crate::models::auth::PendingRegistrationData;
use crate::services::email::{otp_email, EmailError, EmailSender};

#[derive(Debug, thiserror::Error)]
pub enum OtpError {
    #[error("Email already registered")]
    DuplicateAccount,

    #[error("No pending registration found. Please register again.")]
    NotFound,

    #[error("OTP has expired. Please request a new one.")]
    Expired,

    #[error("Invalid OTP")]
    Mismatch,

    #[error("Failed to send verification email: {0}")]
    DeliveryFailed(#[from] EmailError),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

impl From<OtpError> for AppError {
    fn from(e: OtpError) -> Self {
        match e {
            OtpError::DuplicateAccount => AppError::Conflict(e.to_string()),
            OtpError::NotFound => AppError::NotFound(e.to_string()),
            OtpError::Expired => AppError::Expired(e.to_string()),
            OtpError::Mismatch => AppError::Validation(e.to_string()),
            OtpError::DeliveryFailed(_) | OtpError::Database(_) => AppError::Dependency(e.to_string()),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct IssuedCode {
    pub code: String,
    pub expires_at: DateTime<Utc>,
}

/// Six ASCII digits, uniform over 100000..=999999.
pub fn generate_code<R: Rng + ?Sized>(rng: &mut R) -> String {
    rng.gen_range(100_000..=999_999u32).to_string()
}

/// A code is still good at exactly its expiry instant.
pub fn is_expired(now: DateTime<Utc>, expires_at: DateTime<Utc>) -> bool {
    now > expires_at
}

/// Pending registrations awaiting their emailed code.
pub struct OtpStore {
    pool: PgPool,
    email_sender: Arc<dyn EmailSender>,
    ttl: Duration,
}

impl OtpStore {
    pub fn new(pool: PgPool, email_sender: Arc<dyn EmailSender>, settings: &OtpSettings) -> Self {
        Self { pool, email_sender, ttl: settings.ttl() }
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Stores the payload under a fresh code and emails the code. Nothing is
    /// persisted if delivery fails.
    #[tracing::instrument(name = "Issue registration code", skip(self, payload), fields(email = %payload.email))]
    pub async fn issue(&self, payload: &PendingRegistrationData) -> Result<IssuedCode, OtpError> {
        let now = Utc::now();
        let swept = pending_registrations::sweep_expired(&self.pool, now).await?;
        if swept > 0 {
            tracing::debug!("Swept {} expired pending registrations", swept);
        }

        if accounts::email_exists(&self.pool, &payload.email).await? {
            return Err(OtpError::DuplicateAccount);
        }

        let code = generate_code(&mut rand::thread_rng());
        let expires_at = now + self.ttl;

        let mut tx = self.pool.begin().await?;
        pending_registrations::upsert(&mut *tx, &payload.email, &code, payload, expires_at).await?;
        self.deliver(&payload.email, &code).await?;
        tx.commit().await?;

        tracing::info!("Registration code issued");
        Ok(IssuedCode { code, expires_at })
    }

    pub async fn verify(&self, email: &str, code: &str) -> Result<PendingRegistrationData, OtpError> {
        self.verify_at(email, code, Utc::now()).await
    }

    /// [`OtpStore::verify`] with an explicit clock.
    pub async fn verify_at(
        &self,
        email: &str,
        code: &str,
        now: DateTime<Utc>,
    ) -> Result<PendingRegistrationData, OtpError> {
        let mut tx = self.pool.begin().await?;
        let result = Self::consume(&mut *tx, email, code, now).await;
        // the expired row is deleted as part of the failure
        if matches!(result, Ok(_) | Err(OtpError::Expired)) {
            tx.commit().await?;
        }
        result
    }

    /// Checks the code without locking or deleting anything. An expired row
    /// is left for [`OtpStore::consume`] to remove.
    pub async fn peek(&self, email: &str, code: &str, now: DateTime<Utc>) -> Result<PendingRegistrationData, OtpError> {
        let pending = pending_registrations::find(&self.pool, email)
            .await?
            .ok_or(OtpError::NotFound)?;

        if is_expired(now, pending.expires_at) {
            return Err(OtpError::Expired);
        }
        if pending.otp != code.trim() {
            return Err(OtpError::Mismatch);
        }
        Ok(pending.registration_data.0)
    }

    /// Checks the code against the locked pending row and deletes the row
    /// on success or expiry. The caller owns the transaction and decides
    /// when to commit.
    pub async fn consume(
        conn: &mut PgConnection,
        email: &str,
        code: &str,
        now: DateTime<Utc>,
    ) -> Result<PendingRegistrationData, OtpError> {
        let pending = pending_registrations::find_for_update(&mut *conn, email)
            .await?
            .ok_or(OtpError::NotFound)?;

        if is_expired(now, pending.expires_at) {
            pending_registrations::delete(&mut *conn, email).await?;
            return Err(OtpError::Expired);
        }

        if pending.otp != code.trim() {
            return Err(OtpError::Mismatch);
        }

        pending_registrations::delete(&mut *conn, email).await?;
        Ok(pending.registration_data.0)
    }

    /// New code and a fresh expiry window for an existing pending row.
    #[tracing::instrument(name = "Resend registration code", skip(self))]
    pub async fn resend(&self, email: &str) -> Result<IssuedCode, OtpError> {
        let code = generate_code(&mut rand::thread_rng());
        let expires_at = Utc::now() + self.ttl;

        let mut tx = self.pool.begin().await?;
        let updated = pending_registrations::replace_code(&mut *tx, email, &code, expires_at).await?;
        if updated == 0 {
            return Err(OtpError::NotFound);
        }
        self.deliver(email, &code).await?;
        tx.commit().await?;

        Ok(IssuedCode { code, expires_at })
    }

    async fn deliver(&self, email: &str, code: &str) -> Result<(), OtpError> {
        let message = otp_email(email, code, self.ttl.num_minutes());
        self.email_sender.send(&message).await.map_err(|e| {
            tracing::error!("Failed to deliver registration code: {}", e);
            OtpError::DeliveryFailed(e)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn codes_are_six_digits() {
        let mut rng = StdRng::seed_from_u64(42);
        for _ in 0..1_000 {
            let code = generate_code(&mut rng);
            assert_eq!(code.len(), 6);
            assert!(code.bytes().all(|b| b.is_ascii_digit()));
            let value: u32 = code.parse().unwrap();
            assert!((100_000..=999_999).contains(&value));
        }
    }

    #[test]
    fn expiry_is_strict() {
        let expires_at = Utc::now();
        assert!(!is_expired(expires_at - Duration::seconds(1), expires_at));
        assert!(!is_expired(expires_at, expires_at));
        assert!(is_expired(expires_at + Duration::milliseconds(1), expires_at));
    }

    #[test]
    fn errors_follow_the_http_taxonomy() {
        use actix_web::http::StatusCode;
        use actix_web::ResponseError;

        let status = |e: OtpError| AppError::from(e).status_code();
        assert_eq!(status(OtpError::DuplicateAccount), StatusCode::BAD_REQUEST);
        assert_eq!(status(OtpError::NotFound), StatusCode::NOT_FOUND);
        assert_eq!(status(OtpError::Expired), StatusCode::BAD_REQUEST);
        assert_eq!(status(OtpError::Mismatch), StatusCode::BAD_REQUEST);
        assert_eq!(
            status(OtpError::DeliveryFailed(EmailError::Rejected { status: 503, body: String::new() })),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
