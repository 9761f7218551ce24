use actix_web::{get, post, web, HttpResponse};
use sqlx::PgPool;

use crate::errors::AppError;
use crate::handlers::game::{achievements, daily_challenge, leaderboard, power_level, water, weight};
use crate::middleware::auth::Claims;
use crate::models::achievement::UnlockRequest;
use crate::models::game::{AddXpRequest, LogWeightRequest};
use crate::services::{DailyChallengeService, ProgressionLedger};

#[get("/power-level")]
async fn get_power_level(
    ledger: web::Data<ProgressionLedger>,
    claims: web::ReqData<Claims>,
) -> Result<HttpResponse, AppError> {
    power_level::get_power_level(ledger, claims).await
}

#[post("/add-xp")]
async fn add_xp(
    ledger: web::Data<ProgressionLedger>,
    claims: web::ReqData<Claims>,
    request: web::Json<AddXpRequest>,
) -> Result<HttpResponse, AppError> {
    power_level::add_xp(ledger, claims, request).await
}

#[get("/achievements")]
async fn get_achievements(
    pool: web::Data<PgPool>,
    claims: web::ReqData<Claims>,
) -> Result<HttpResponse, AppError> {
    achievements::get_achievements(pool, claims).await
}

#[post("/achievements/unlock")]
async fn unlock_achievement(
    pool: web::Data<PgPool>,
    claims: web::ReqData<Claims>,
    request: web::Json<UnlockRequest>,
) -> Result<HttpResponse, AppError> {
    achievements::unlock_achievement(pool, claims, request).await
}

#[get("/daily-challenge")]
async fn get_daily_challenge(
    challenge_service: web::Data<DailyChallengeService>,
    claims: web::ReqData<Claims>,
) -> Result<HttpResponse, AppError> {
    daily_challenge::get_daily_challenge(challenge_service, claims).await
}

#[post("/daily-challenge/complete")]
async fn complete_daily_challenge(
    challenge_service: web::Data<DailyChallengeService>,
    claims: web::ReqData<Claims>,
) -> Result<HttpResponse, AppError> {
    daily_challenge::complete_daily_challenge(challenge_service, claims).await
}

#[get("/water")]
async fn get_water(
    pool: web::Data<PgPool>,
    claims: web::ReqData<Claims>,
) -> Result<HttpResponse, AppError> {
    water::get_water_intake(pool, claims).await
}

#[post("/water/add")]
async fn add_water(
    pool: web::Data<PgPool>,
    claims: web::ReqData<Claims>,
) -> Result<HttpResponse, AppError> {
    water::add_water_glass(pool, claims).await
}

#[post("/water/reset")]
async fn reset_water(
    pool: web::Data<PgPool>,
    claims: web::ReqData<Claims>,
) -> Result<HttpResponse, AppError> {
    water::reset_water_intake(pool, claims).await
}

#[post("/weight/log")]
async fn log_weight(
    pool: web::Data<PgPool>,
    claims: web::ReqData<Claims>,
    request: web::Json<LogWeightRequest>,
) -> Result<HttpResponse, AppError> {
    weight::log_weight(pool, claims, request).await
}

#[get("/weight/history")]
async fn get_weight_history(
    pool: web::Data<PgPool>,
    claims: web::ReqData<Claims>,
) -> Result<HttpResponse, AppError> {
    weight::get_weight_history(pool, claims).await
}

#[get("/leaderboard")]
async fn get_leaderboard(
    pool: web::Data<PgPool>,
    claims: web::ReqData<Claims>,
) -> Result<HttpResponse, AppError> {
    leaderboard::get_leaderboard(pool, claims).await
}
