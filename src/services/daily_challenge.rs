use chrono::NaiveDate;
use sqlx::PgPool;
use uuid::Uuid;

use crate::db::challenges;
use crate::errors::AppError;
use crate::game::challenges::pick_challenge;
use crate::game::streak::local_today;
use crate::models::activity::ActivityCategory;
use crate::models::challenge::{ChallengeCompletion, DailyChallenge};
use crate::services::activity_log::ActivityLog;
use crate::services::progression_ledger::ProgressionLedger;

/// One challenge per account per day, created on first read.
pub struct DailyChallengeService {
    pool: PgPool,
}

impl DailyChallengeService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn today(&self, account_id: Uuid) -> Result<DailyChallenge, AppError> {
        self.for_date(account_id, local_today()).await
    }

    #[tracing::instrument(name = "Get daily challenge", skip(self))]
    pub async fn for_date(&self, account_id: Uuid, date: NaiveDate) -> Result<DailyChallenge, AppError> {
        if let Some(challenge) = challenges::find_for_date(&self.pool, account_id, date).await? {
            return Ok(challenge);
        }

        let template = pick_challenge(&mut rand::thread_rng());
        challenges::insert_if_absent(&self.pool, account_id, date, &template).await?;

        // a concurrent request may have won the insert, so read back whichever row exists
        challenges::find_for_date(&self.pool, account_id, date)
            .await?
            .ok_or_else(|| AppError::Dependency("Daily challenge vanished after insert".to_string()))
    }

    pub async fn complete_today(&self, account_id: Uuid) -> Result<ChallengeCompletion, AppError> {
        self.complete_on(account_id, local_today()).await
    }

    /// Marks the day's challenge done and pays out its XP in the same
    /// transaction.
    #[tracing::instrument(name = "Complete daily challenge", skip(self))]
    pub async fn complete_on(&self, account_id: Uuid, date: NaiveDate) -> Result<ChallengeCompletion, AppError> {
        let mut tx = self.pool.begin().await?;

        let challenge = challenges::complete_for_date(&mut *tx, account_id, date)
            .await?
            .ok_or_else(|| AppError::Validation("No incomplete challenge found for today".to_string()))?;

        let award = ProgressionLedger::award_in(&mut *tx, account_id, challenge.xp_reward).await?;
        ActivityLog::record_in(&mut *tx, account_id, ActivityCategory::Challenge, date).await?;

        tx.commit().await?;

        tracing::info!("Challenge {} completed for {} XP", challenge.challenge_type, challenge.xp_reward);
        Ok(ChallengeCompletion {
            success: true,
            xp_earned: challenge.xp_reward,
            total_xp: award.total_xp,
            power_level: award.power_level,
            title: award.title,
            leveled_up: award.leveled_up,
        })
    }
}
