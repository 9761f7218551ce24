use actix_web::{get, post, put, web, HttpResponse};
use sqlx::PgPool;

use crate::errors::AppError;
use crate::handlers::profile::activity_log::get_activity_log;
use crate::handlers::profile::profile::{get_user_profile, update_fatigue_level, update_user_profile};
use crate::handlers::profile::progress_email::email_progress_report;
use crate::middleware::auth::Claims;
use crate::models::user::{FatigueUpdate, ProfileUpdate};
use crate::services::{AccountService, ActivityLog, EmailSender, PlanService};

#[get("")]
async fn get_profile(
    account_service: web::Data<AccountService>,
    claims: web::ReqData<Claims>,
) -> Result<HttpResponse, AppError> {
    get_user_profile(account_service, claims).await
}

#[put("")]
async fn update_profile(
    account_service: web::Data<AccountService>,
    claims: web::ReqData<Claims>,
    update: web::Json<ProfileUpdate>,
) -> Result<HttpResponse, AppError> {
    update_user_profile(account_service, claims, update).await
}

#[put("/fatigue")]
async fn update_fatigue(
    pool: web::Data<PgPool>,
    claims: web::ReqData<Claims>,
    update: web::Json<FatigueUpdate>,
) -> Result<HttpResponse, AppError> {
    update_fatigue_level(pool, claims, update).await
}

#[get("/activity-log")]
async fn activity_heatmap(
    activity_log: web::Data<ActivityLog>,
    claims: web::ReqData<Claims>,
) -> Result<HttpResponse, AppError> {
    get_activity_log(activity_log, claims).await
}

#[post("/email-progress")]
async fn email_progress(
    account_service: web::Data<AccountService>,
    plan_service: web::Data<PlanService>,
    email_sender: web::Data<dyn EmailSender>,
    claims: web::ReqData<Claims>,
) -> Result<HttpResponse, AppError> {
    email_progress_report(account_service, plan_service, email_sender, claims).await
}
