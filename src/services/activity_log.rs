use chrono::{Months, NaiveDate};
use sqlx::{PgConnection, PgPool};
use uuid::Uuid;

use crate::db::{accounts, activity_log};
use crate::game::streak::{advance, local_today, StreakState};
use crate::models::activity::{ActivityCategory, ActivityLogEntry};

/// What a single recorded activity did to the account.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RecordedActivity {
    pub intensity: i32,
    pub streak: Option<StreakState>,
}

/// Per-day activity heat-map plus the streak transition it drives.
pub struct ActivityLog {
    pool: PgPool,
}

impl ActivityLog {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn record(&self, account_id: Uuid, category: ActivityCategory) -> Result<RecordedActivity, sqlx::Error> {
        self.record_on(account_id, category, local_today()).await
    }

    #[tracing::instrument(name = "Record activity", skip(self))]
    pub async fn record_on(
        &self,
        account_id: Uuid,
        category: ActivityCategory,
        date: NaiveDate,
    ) -> Result<RecordedActivity, sqlx::Error> {
        let mut tx = self.pool.begin().await?;
        let recorded = Self::record_in(&mut *tx, account_id, category, date).await?;
        tx.commit().await?;
        Ok(recorded)
    }

    /// Bumps the day's intensity and, for streak-qualifying categories,
    /// applies the streak transition under a row lock on the account.
    pub async fn record_in(
        conn: &mut PgConnection,
        account_id: Uuid,
        category: ActivityCategory,
        date: NaiveDate,
    ) -> Result<RecordedActivity, sqlx::Error> {
        let intensity = activity_log::upsert_activity(&mut *conn, account_id, category, date).await?;

        let streak = if category.counts_toward_streak() {
            Self::advance_streak(conn, account_id, date).await?
        } else {
            None
        };

        Ok(RecordedActivity { intensity, streak })
    }

    async fn advance_streak(
        conn: &mut PgConnection,
        account_id: Uuid,
        date: NaiveDate,
    ) -> Result<Option<StreakState>, sqlx::Error> {
        let Some(current) = accounts::lock_streak_state(&mut *conn, account_id).await? else {
            return Ok(None);
        };

        match advance(current, date) {
            Some(next) => {
                accounts::set_streak_state(&mut *conn, account_id, next).await?;
                tracing::debug!("Streak for {} is now {}", account_id, next.streak_count);
                Ok(Some(next))
            }
            None => Ok(Some(current)),
        }
    }

    pub async fn query(
        &self,
        account_id: Uuid,
        from: NaiveDate,
        to: NaiveDate,
    ) -> Result<Vec<ActivityLogEntry>, sqlx::Error> {
        activity_log::list_between(&self.pool, account_id, from, to).await
    }

    /// The rolling year ending today.
    pub async fn last_year(&self, account_id: Uuid) -> Result<Vec<ActivityLogEntry>, sqlx::Error> {
        let (from, to) = year_window(local_today());
        self.query(account_id, from, to).await
    }
}

pub fn year_window(today: NaiveDate) -> (NaiveDate, NaiveDate) {
    let from = today.checked_sub_months(Months::new(12)).unwrap_or(NaiveDate::MIN);
    (from, today)
}
