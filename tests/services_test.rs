use chrono::{DateTime, Duration, NaiveDate, Utc};

use limitbreaker_backend::config::otp::OtpSettings;
use limitbreaker_backend::models::activity::ActivityCategory;
use limitbreaker_backend::models::auth::PendingRegistrationData;
use limitbreaker_backend::db::accounts;
use limitbreaker_backend::models::user::Goal;
use limitbreaker_backend::services::otp_store::OtpError;
use limitbreaker_backend::services::progression_ledger::ProgressionError;
use limitbreaker_backend::services::{ActivityLog, DailyChallengeService, OtpStore, ProgressionLedger};

mod common;
use common::utils::{register_user, spawn_app, unique_email, TestApp};

fn pending(email: &str) -> PendingRegistrationData {
    PendingRegistrationData {
        name: Some("Ada".to_string()),
        age: 30,
        gender: "female".to_string(),
        height: 170.0,
        weight: 65.0,
        goal: Goal::Maintenance,
        email: email.to_string(),
        password_hash: Some("$2b$04$placeholderplaceholderplaceholderplaceholde".to_string()),
        is_google_user: false,
        google_token: None,
    }
}

fn otp_store(app: &TestApp) -> OtpStore {
    OtpStore::new(app.db_pool.clone(), app.emails.clone(), &OtpSettings::default())
}

async fn stored_expiry(app: &TestApp, email: &str) -> DateTime<Utc> {
    sqlx::query_scalar("SELECT expires_at FROM pending_registrations WHERE email = $1")
        .bind(email)
        .fetch_one(&app.db_pool)
        .await
        .expect("Failed to fetch expiry.")
}

fn day(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

#[tokio::test]
async fn otp_is_still_valid_at_its_expiry_instant() {
    let test_app = spawn_app().await;
    let store = otp_store(&test_app);
    let email = unique_email("ada");

    let issued = store.issue(&pending(&email)).await.expect("Failed to issue code.");
    assert!(issued.expires_at > Utc::now() + Duration::minutes(9));

    let expires_at = stored_expiry(&test_app, &email).await;
    let payload = store.verify_at(&email, &issued.code, expires_at).await.expect("Code rejected at expiry.");
    assert_eq!(payload, pending(&email));

    // consumed
    assert!(matches!(store.verify(&email, &issued.code).await, Err(OtpError::NotFound)));
}

#[tokio::test]
async fn otp_one_microsecond_late_is_expired_and_removed() {
    let test_app = spawn_app().await;
    let store = otp_store(&test_app);
    let email = unique_email("ada");

    let issued = store.issue(&pending(&email)).await.unwrap();
    let late = stored_expiry(&test_app, &email).await + Duration::microseconds(1);

    assert!(matches!(store.verify_at(&email, &issued.code, late).await, Err(OtpError::Expired)));
    assert!(matches!(store.verify(&email, &issued.code).await, Err(OtpError::NotFound)));
}

#[tokio::test]
async fn eleven_minutes_later_the_code_is_expired() {
    let test_app = spawn_app().await;
    let store = otp_store(&test_app);
    let email = unique_email("ada");

    let issued = store.issue(&pending(&email)).await.unwrap();
    let later = Utc::now() + Duration::minutes(11);

    assert!(matches!(store.verify_at(&email, &issued.code, later).await, Err(OtpError::Expired)));
}

#[tokio::test]
async fn issuing_sweeps_other_expired_registrations() {
    let test_app = spawn_app().await;
    let store = otp_store(&test_app);
    let stale = unique_email("stale");

    store.issue(&pending(&stale)).await.unwrap();
    sqlx::query("UPDATE pending_registrations SET expires_at = NOW() - INTERVAL '1 hour' WHERE email = $1")
        .bind(&stale)
        .execute(&test_app.db_pool)
        .await
        .unwrap();

    store.issue(&pending(&unique_email("fresh"))).await.unwrap();

    let remaining: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM pending_registrations WHERE email = $1")
        .bind(&stale)
        .fetch_one(&test_app.db_pool)
        .await
        .unwrap();
    assert_eq!(remaining, 0);
}

#[tokio::test]
async fn activity_intensity_caps_at_four() {
    let test_app = spawn_app().await;
    let user = register_user(&test_app, "maintenance").await;
    let log = ActivityLog::new(test_app.db_pool.clone());
    let date = day(2025, 5, 1);

    let mut intensities = Vec::new();
    for _ in 0..6 {
        intensities.push(log.record_on(user.id, ActivityCategory::Meal, date).await.unwrap().intensity);
    }
    assert_eq!(intensities, vec![1, 2, 3, 4, 4, 4]);

    let entries = log.query(user.id, date, date).await.unwrap();
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].activity_type, "meal");
    assert_eq!(entries[0].intensity, 4);
}

#[tokio::test]
async fn streak_follows_consecutive_days() {
    let test_app = spawn_app().await;
    let user = register_user(&test_app, "maintenance").await;
    let log = ActivityLog::new(test_app.db_pool.clone());

    let counts: Vec<i32> = {
        let mut counts = Vec::new();
        for date in [day(2025, 5, 1), day(2025, 5, 2), day(2025, 5, 2), day(2025, 5, 3), day(2025, 5, 6)] {
            let recorded = log.record_on(user.id, ActivityCategory::Workout, date).await.unwrap();
            counts.push(recorded.streak.unwrap().streak_count);
        }
        counts
    };
    assert_eq!(counts, vec![1, 2, 2, 3, 1]);

    // challenges are logged but leave the streak alone
    let recorded = log.record_on(user.id, ActivityCategory::Challenge, day(2025, 5, 7)).await.unwrap();
    assert_eq!(recorded.streak, None);

    let (count, last): (i32, Option<NaiveDate>) =
        sqlx::query_as("SELECT streak_count, last_activity_date FROM users WHERE id = $1")
            .bind(user.id)
            .fetch_one(&test_app.db_pool)
            .await
            .unwrap();
    assert_eq!((count, last), (1, Some(day(2025, 5, 6))));

    let entries = log.query(user.id, day(2025, 5, 1), day(2025, 5, 31)).await.unwrap();
    let dates: Vec<NaiveDate> = entries.iter().map(|e| e.logged_at).collect();
    assert!(dates.windows(2).all(|w| w[0] <= w[1]));
    assert_eq!(entries.len(), 5);
}

#[tokio::test]
async fn concurrent_workouts_on_one_day_count_once() {
    let test_app = spawn_app().await;
    let user = register_user(&test_app, "maintenance").await;
    let log = ActivityLog::new(test_app.db_pool.clone());

    let recordings = (0..5).map(|_| log.record(user.id, ActivityCategory::Workout));
    for recorded in futures_util::future::join_all(recordings).await {
        assert_eq!(recorded.unwrap().streak.unwrap().streak_count, 1);
    }
}

#[tokio::test]
async fn ledger_rejects_non_positive_amounts_and_unknown_accounts() {
    let test_app = spawn_app().await;
    let user = register_user(&test_app, "maintenance").await;
    let ledger = ProgressionLedger::new(test_app.db_pool.clone());

    assert!(matches!(ledger.award(user.id, 0, "none").await, Err(ProgressionError::InvalidAmount)));
    assert!(matches!(
        ledger.award(uuid::Uuid::new_v4(), 10, "ghost").await,
        Err(ProgressionError::AccountNotFound)
    ));

    let award = ledger.award(user.id, 950, "marathon").await.unwrap();
    assert_eq!(award.power_level, 10);
    assert_eq!(award.title, "Warrior");

    let progress = ledger.progress(user.id).await.unwrap();
    assert_eq!(progress.power_level, 10);
    assert_eq!(progress.xp_progress_percent, 50);
}

#[tokio::test]
async fn ledger_refuses_to_overflow_the_xp_column() {
    let test_app = spawn_app().await;
    let user = register_user(&test_app, "maintenance").await;
    let ledger = ProgressionLedger::new(test_app.db_pool.clone());

    ledger.award(user.id, 2_147_483_000, "grind").await.unwrap();
    assert!(matches!(ledger.award(user.id, 1000, "one more").await, Err(ProgressionError::Overflow)));

    let progress = ledger.progress(user.id).await.unwrap();
    assert_eq!(progress.xp_points, 2_147_483_000);
}

async fn set_streak(app: &TestApp, id: uuid::Uuid, count: i32, last: NaiveDate) {
    sqlx::query("UPDATE users SET streak_count = $2, last_activity_date = $3 WHERE id = $1")
        .bind(id)
        .bind(count)
        .bind(last)
        .execute(&app.db_pool)
        .await
        .unwrap();
}

async fn streak_count(app: &TestApp, id: uuid::Uuid) -> i32 {
    sqlx::query_scalar("SELECT streak_count FROM users WHERE id = $1")
        .bind(id)
        .fetch_one(&app.db_pool)
        .await
        .unwrap()
}

#[tokio::test]
async fn streak_reset_leaves_a_streak_extended_today_alone() {
    let test_app = spawn_app().await;
    let user = register_user(&test_app, "maintenance").await;
    let today = day(2025, 6, 10);

    set_streak(&test_app, user.id, 1, today).await;
    let rows = accounts::reset_streak(&test_app.db_pool, user.id, today).await.unwrap();
    assert_eq!(rows, 0);
    assert_eq!(streak_count(&test_app, user.id).await, 1);

    set_streak(&test_app, user.id, 4, day(2025, 6, 9)).await;
    assert_eq!(accounts::reset_streak(&test_app.db_pool, user.id, today).await.unwrap(), 0);
    assert_eq!(streak_count(&test_app, user.id).await, 4);

    set_streak(&test_app, user.id, 4, day(2025, 6, 8)).await;
    assert_eq!(accounts::reset_streak(&test_app.db_pool, user.id, today).await.unwrap(), 1);
    assert_eq!(streak_count(&test_app, user.id).await, 0);
}

#[tokio::test]
async fn challenge_for_a_past_date_is_created_once_and_completed_once() {
    let test_app = spawn_app().await;
    let user = register_user(&test_app, "maintenance").await;
    let challenges = DailyChallengeService::new(test_app.db_pool.clone());
    let date = day(2025, 4, 2);

    let first = challenges.for_date(user.id, date).await.unwrap();
    let again = challenges.for_date(user.id, date).await.unwrap();
    assert_eq!(first.id, again.id);
    assert_eq!(first.challenge_date, date);

    let completion = challenges.complete_on(user.id, date).await.unwrap();
    assert_eq!(completion.xp_earned, first.xp_reward);
    assert!(challenges.complete_on(user.id, date).await.is_err());

    let log = ActivityLog::new(test_app.db_pool.clone());
    let entries = log.query(user.id, date, date).await.unwrap();
    assert_eq!(entries[0].activity_type, "challenge");
}
