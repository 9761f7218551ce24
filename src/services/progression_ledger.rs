use sqlx::{PgConnection, PgPool};
use uuid::Uuid;

use crate::db::accounts;
use crate::errors::AppError;
use crate::game::progression::{level_for, leveled_up, progress, title_for};
use crate::models::game::{PowerLevel, XpAward};

#[derive(Debug, thiserror::Error)]
pub enum ProgressionError {
    #[error("xp_amount must be a positive number")]
    InvalidAmount,

    #[error("xp_amount would push the total past the maximum XP")]
    Overflow,

    #[error("User not found")]
    AccountNotFound,

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

impl From<ProgressionError> for AppError {
    fn from(e: ProgressionError) -> Self {
        match e {
            ProgressionError::InvalidAmount | ProgressionError::Overflow => AppError::Validation(e.to_string()),
            ProgressionError::AccountNotFound => AppError::NotFound(e.to_string()),
            ProgressionError::Database(e) => e.into(),
        }
    }
}

/// Narrows a requested amount to something the `xp_points` column can take.
pub fn checked_amount(amount: i64) -> Result<i32, ProgressionError> {
    if amount <= 0 {
        return Err(ProgressionError::InvalidAmount);
    }
    i32::try_from(amount).map_err(|_| ProgressionError::InvalidAmount)
}

/// Owns every write to `xp_points`, `power_level` and `title`.
pub struct ProgressionLedger {
    pool: PgPool,
}

impl ProgressionLedger {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    #[tracing::instrument(name = "Award XP", skip(self))]
    pub async fn award(&self, account_id: Uuid, amount: i64, reason: &str) -> Result<XpAward, ProgressionError> {
        let amount = checked_amount(amount)?;

        let mut tx = self.pool.begin().await?;
        let award = Self::award_in(&mut *tx, account_id, amount).await?;
        tx.commit().await?;

        if award.leveled_up {
            tracing::info!("Account {} reached power level {} ({})", account_id, award.power_level, award.title);
        }
        Ok(award)
    }

    /// Applies the award inside the caller's transaction. The XP increment
    /// is a single statement, and level and title are derived from the
    /// total it returns while the row lock is still held.
    pub async fn award_in(
        conn: &mut PgConnection,
        account_id: Uuid,
        amount: i32,
    ) -> Result<XpAward, ProgressionError> {
        if amount <= 0 {
            return Err(ProgressionError::InvalidAmount);
        }

        let total_xp = match accounts::add_xp(&mut *conn, account_id, amount).await? {
            Some(total) => total,
            None if accounts::exists(&mut *conn, account_id).await? => return Err(ProgressionError::Overflow),
            None => return Err(ProgressionError::AccountNotFound),
        };

        let power_level = level_for(total_xp);
        let title = title_for(power_level);
        accounts::set_level_and_title(&mut *conn, account_id, power_level, title).await?;

        Ok(XpAward {
            total_xp,
            power_level,
            title: title.to_string(),
            leveled_up: leveled_up(total_xp - amount, total_xp),
        })
    }

    pub async fn progress(&self, account_id: Uuid) -> Result<PowerLevel, ProgressionError> {
        let account = accounts::find_by_id(&self.pool, account_id)
            .await?
            .ok_or(ProgressionError::AccountNotFound)?;
        Ok(progress(account.xp_points, account.power_level, account.title))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn non_positive_amounts_are_rejected() {
        assert!(matches!(checked_amount(0), Err(ProgressionError::InvalidAmount)));
        assert!(matches!(checked_amount(-5), Err(ProgressionError::InvalidAmount)));
        assert_eq!(checked_amount(450).unwrap(), 450);
    }

    #[test]
    fn amounts_beyond_the_column_range_are_rejected() {
        assert!(matches!(
            checked_amount(i64::from(i32::MAX) + 1),
            Err(ProgressionError::InvalidAmount)
        ));
    }

    #[test]
    fn overflow_is_a_validation_error() {
        let err: AppError = ProgressionError::Overflow.into();
        assert!(matches!(err, AppError::Validation(_)));
    }

    #[test]
    fn invalid_amount_is_a_validation_error() {
        let err: AppError = ProgressionError::InvalidAmount.into();
        assert!(matches!(err, AppError::Validation(m) if m.contains("xp_amount")));
    }
}
