use actix_web::{get, patch, put, web, HttpResponse};

use crate::errors::AppError;
use crate::handlers::plans::workouts::{get_day_plan, list_weekly_plans, replace_day_exercises, toggle_exercise};
use crate::middleware::auth::Claims;
use crate::models::plan::{ReplaceExercisesRequest, ToggleRequest};
use crate::services::{AccountService, PlanService};

#[get("")]
async fn list_workouts(
    account_service: web::Data<AccountService>,
    claims: web::ReqData<Claims>,
) -> Result<HttpResponse, AppError> {
    list_weekly_plans(account_service, claims).await
}

#[get("/{day}")]
async fn get_workout(
    plan_service: web::Data<PlanService>,
    claims: web::ReqData<Claims>,
    day: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    get_day_plan(plan_service, claims, day).await
}

#[put("/{day}")]
async fn replace_workout(
    plan_service: web::Data<PlanService>,
    claims: web::ReqData<Claims>,
    day: web::Path<String>,
    request: web::Json<ReplaceExercisesRequest>,
) -> Result<HttpResponse, AppError> {
    replace_day_exercises(plan_service, claims, day, request).await
}

#[patch("/{day}/exercises/{index}")]
async fn update_exercise_status(
    plan_service: web::Data<PlanService>,
    claims: web::ReqData<Claims>,
    path: web::Path<(String, usize)>,
    request: web::Json<ToggleRequest>,
) -> Result<HttpResponse, AppError> {
    toggle_exercise(plan_service, claims, path, request).await
}
