use chrono::{Duration, Local, NaiveDate};
use reqwest::Client;
use serde_json::{json, Value};

use limitbreaker_backend::models::plan::WeeklyPlan;
use limitbreaker_backend::models::user::Goal;
use limitbreaker_backend::workout::plan_generator::generate_week;

mod common;
use common::utils::{get_authed, patch_authed, post_authed, put_authed, register_user, spawn_app, TestApp};

async fn set_streak(app: &TestApp, id: uuid::Uuid, count: i32, last: NaiveDate) {
    sqlx::query("UPDATE users SET streak_count = $1, last_activity_date = $2 WHERE id = $3")
        .bind(count)
        .bind(last)
        .bind(id)
        .execute(&app.db_pool)
        .await
        .expect("Failed to update streak.");
}

async fn stored_streak(app: &TestApp, id: uuid::Uuid) -> (i32, Option<NaiveDate>) {
    sqlx::query_as("SELECT streak_count, last_activity_date FROM users WHERE id = $1")
        .bind(id)
        .fetch_one(&app.db_pool)
        .await
        .expect("Failed to fetch streak.")
}

#[tokio::test]
async fn protected_routes_need_a_valid_token() {
    let test_app = spawn_app().await;
    let client = Client::new();

    for path in ["/profile", "/workouts", "/meals", "/progress", "/game/power-level"] {
        let response = client
            .get(&format!("{}{}", &test_app.address, path))
            .send()
            .await
            .expect("Failed to execute request.");
        assert_eq!(response.status().as_u16(), 401, "{} without a token", path);
        let body: Value = response.json().await.unwrap();
        assert_eq!(body["error"], "Access token required");
    }

    let response = get_authed(&test_app, "not.a.jwt", "/profile").await;
    assert_eq!(response.status().as_u16(), 401);
}

#[tokio::test]
async fn profile_returns_the_registration_data() {
    let test_app = spawn_app().await;
    let user = register_user(&test_app, "maintenance").await;

    let response = get_authed(&test_app, &user.token, "/profile").await;
    assert_eq!(response.status().as_u16(), 200);

    let body: Value = response.json().await.unwrap();
    assert_eq!(body["id"], user.id.to_string());
    assert_eq!(body["email"], user.email.as_str());
    assert_eq!(body["age"], 30);
    assert_eq!(body["goal"], "maintenance");
    assert_eq!(body["xp_points"], 0);
    assert_eq!(body["power_level"], 1);
    assert_eq!(body["title"], "Rookie");
    assert_eq!(body["streak_count"], 0);
    assert_eq!(body["fatigue_level"], "Low");
    assert!(body.get("password_hash").is_none());
}

#[tokio::test]
async fn lapsed_streak_reads_as_zero_and_stays_zero() {
    let test_app = spawn_app().await;
    let user = register_user(&test_app, "maintenance").await;
    let three_days_ago = Local::now().date_naive() - Duration::days(3);
    set_streak(&test_app, user.id, 5, three_days_ago).await;

    for _ in 0..2 {
        let body: Value = get_authed(&test_app, &user.token, "/profile").await.json().await.unwrap();
        assert_eq!(body["streak_count"], 0);
        assert_eq!(stored_streak(&test_app, user.id).await, (0, Some(three_days_ago)));
    }
}

#[tokio::test]
async fn streak_from_yesterday_is_still_alive() {
    let test_app = spawn_app().await;
    let user = register_user(&test_app, "maintenance").await;
    let yesterday = Local::now().date_naive() - Duration::days(1);
    set_streak(&test_app, user.id, 4, yesterday).await;

    let body: Value = get_authed(&test_app, &user.token, "/profile").await.json().await.unwrap();
    assert_eq!(body["streak_count"], 4);
    assert_eq!(stored_streak(&test_app, user.id).await, (4, Some(yesterday)));
}

#[tokio::test]
async fn partial_update_changes_only_given_fields() {
    let test_app = spawn_app().await;
    let user = register_user(&test_app, "maintenance").await;

    let response = put_authed(&test_app, &user.token, "/profile", json!({ "name": "Ada L.", "weight": 63.5 })).await;
    assert_eq!(response.status().as_u16(), 200);

    let body: Value = response.json().await.unwrap();
    assert_eq!(body["name"], "Ada L.");
    assert_eq!(body["weight"], 63.5);
    assert_eq!(body["age"], 30);
    assert_eq!(body["goal"], "maintenance");
}

#[tokio::test]
async fn empty_or_invalid_updates_are_rejected() {
    let test_app = spawn_app().await;
    let user = register_user(&test_app, "maintenance").await;

    let response = put_authed(&test_app, &user.token, "/profile", json!({})).await;
    assert_eq!(response.status().as_u16(), 400);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["error"], "No fields to update");

    let response = put_authed(&test_app, &user.token, "/profile", json!({ "goal": "bulking" })).await;
    assert_eq!(response.status().as_u16(), 400);

    let response = put_authed(&test_app, &user.token, "/profile", json!({ "age": 0 })).await;
    assert_eq!(response.status().as_u16(), 400);
}

#[tokio::test]
async fn goal_change_rebuilds_the_week() {
    let test_app = spawn_app().await;
    let user = register_user(&test_app, "weight loss").await;

    // Progress on the old plan is discarded with it
    patch_authed(&test_app, &user.token, "/workouts/Monday/exercises/0", json!({ "completed": true })).await;

    let response = put_authed(&test_app, &user.token, "/profile", json!({ "goal": "muscle gain" })).await;
    assert_eq!(response.status().as_u16(), 200);

    let plans: Vec<WeeklyPlan> = get_authed(&test_app, &user.token, "/workouts").await.json().await.unwrap();
    let expected = generate_week(Goal::MuscleGain);
    assert_eq!(plans.len(), 7);
    for (plan, day) in plans.iter().zip(expected.iter()) {
        assert_eq!(plan.exercises, day.exercises);
        assert_eq!(plan.completed_status, day.completed_status);
    }
}

#[tokio::test]
async fn fatigue_level_accepts_only_known_levels() {
    let test_app = spawn_app().await;
    let user = register_user(&test_app, "maintenance").await;

    let response = put_authed(&test_app, &user.token, "/profile/fatigue", json!({ "fatigue_level": "High" })).await;
    assert_eq!(response.status().as_u16(), 200);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["fatigue_level"], "High");

    let response = put_authed(&test_app, &user.token, "/profile/fatigue", json!({ "fatigue_level": "Exhausted" })).await;
    assert_eq!(response.status().as_u16(), 400);

    let body: Value = get_authed(&test_app, &user.token, "/profile").await.json().await.unwrap();
    assert_eq!(body["fatigue_level"], "High");
}

#[tokio::test]
async fn activity_log_reflects_completed_items() {
    let test_app = spawn_app().await;
    let user = register_user(&test_app, "maintenance").await;

    let body: Value = get_authed(&test_app, &user.token, "/profile/activity-log").await.json().await.unwrap();
    assert_eq!(body, json!([]));

    patch_authed(&test_app, &user.token, "/workouts/Monday/exercises/0", json!({ "completed": true })).await;
    patch_authed(&test_app, &user.token, "/workouts/Monday/exercises/1", json!({ "completed": true })).await;

    let response = get_authed(&test_app, &user.token, "/profile/activity-log").await;
    assert_eq!(response.status().as_u16(), 200);
    let body: Value = response.json().await.unwrap();
    let entries = body.as_array().unwrap();
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0]["activity_type"], "workout");
    assert_eq!(entries[0]["intensity"], 2);
    assert_eq!(entries[0]["logged_at"], Local::now().date_naive().to_string());
}

#[tokio::test]
async fn progress_report_is_emailed_to_the_account() {
    let test_app = spawn_app().await;
    let user = register_user(&test_app, "maintenance").await;

    let response = post_authed(&test_app, &user.token, "/profile/email-progress", json!({})).await;
    assert_eq!(response.status().as_u16(), 200);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["message"], "Progress report sent to your email");

    let sent = test_app.emails.sent_to(&user.email);
    let report = sent.last().expect("No progress email captured");
    assert!(report.subject.contains("0 Day Streak"));
    assert!(report.html_content.contains("Hi Ada"));
    assert!(report.html_content.contains("22.5"));
}
