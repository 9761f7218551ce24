use actix_web::{web, HttpResponse};

use crate::errors::AppError;
use crate::middleware::auth::Claims;
use crate::models::plan::{CompletionResponse, PlanDay, ReplaceExercisesRequest, ReplaceExercisesResponse, ToggleRequest};
use crate::services::account_service::AccountService;
use crate::services::plan_service::PlanService;

#[tracing::instrument(
    name = "List weekly plans",
    skip(account_service, claims),
    fields(user_id = %claims.sub)
)]
pub async fn list_weekly_plans(
    account_service: web::Data<AccountService>,
    claims: web::ReqData<Claims>,
) -> Result<HttpResponse, AppError> {
    let plans = account_service.weekly_plans(claims.account_id()?).await?;
    Ok(HttpResponse::Ok().json(plans))
}

#[tracing::instrument(
    name = "Get day plan",
    skip(plan_service, claims),
    fields(user_id = %claims.sub)
)]
pub async fn get_day_plan(
    plan_service: web::Data<PlanService>,
    claims: web::ReqData<Claims>,
    day: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let day: PlanDay = day.parse()?;
    let plan = plan_service.day(claims.account_id()?, day).await?;
    Ok(HttpResponse::Ok().json(plan))
}

#[tracing::instrument(
    name = "Replace day exercises",
    skip(plan_service, claims, request),
    fields(user_id = %claims.sub)
)]
pub async fn replace_day_exercises(
    plan_service: web::Data<PlanService>,
    claims: web::ReqData<Claims>,
    day: web::Path<String>,
    request: web::Json<ReplaceExercisesRequest>,
) -> Result<HttpResponse, AppError> {
    let day: PlanDay = day.parse()?;
    let exercises = request
        .into_inner()
        .exercises
        .ok_or_else(|| AppError::Validation("exercises must be an array".to_string()))?;

    let (exercises, completed_status) = plan_service
        .replace_exercises(claims.account_id()?, day, exercises)
        .await?;

    Ok(HttpResponse::Ok().json(ReplaceExercisesResponse {
        message: "Workout updated successfully".to_string(),
        exercises,
        completed_status,
    }))
}

#[tracing::instrument(
    name = "Toggle exercise completion",
    skip(plan_service, claims, request),
    fields(user_id = %claims.sub)
)]
pub async fn toggle_exercise(
    plan_service: web::Data<PlanService>,
    claims: web::ReqData<Claims>,
    path: web::Path<(String, usize)>,
    request: web::Json<ToggleRequest>,
) -> Result<HttpResponse, AppError> {
    let (day, index) = path.into_inner();
    let day: PlanDay = day.parse()?;
    let completed = request.completed()?;

    let completed_status = plan_service
        .toggle_exercise(claims.account_id()?, day, index, completed)
        .await?;

    Ok(HttpResponse::Ok().json(CompletionResponse {
        message: "Exercise status updated".to_string(),
        completed_status,
    }))
}
