use actix_web::{web, HttpResponse};

use crate::errors::AppError;
use crate::middleware::auth::Claims;
use crate::models::coach::{
    GenerateWorkoutRequest, GenerateWorkoutResponse, GeneratedWorkout, MealPlanResponse, SwapMealRequest,
    SwapMealResponse,
};
use crate::services::coach_service::CoachService;

#[tracing::instrument(
    name = "Generate workout request",
    skip(coach_service, claims, request),
    fields(user_id = %claims.sub)
)]
pub async fn generate_workout(
    coach_service: web::Data<CoachService>,
    claims: web::ReqData<Claims>,
    request: web::Json<GenerateWorkoutRequest>,
) -> Result<HttpResponse, AppError> {
    let location = request.into_inner().location.unwrap_or_default();
    let exercises = coach_service.generate_workout(claims.account_id()?, location).await?;
    Ok(HttpResponse::Ok().json(GenerateWorkoutResponse { workout: GeneratedWorkout { exercises } }))
}

#[tracing::instrument(
    name = "Generate meal plan request",
    skip(coach_service, claims),
    fields(user_id = %claims.sub)
)]
pub async fn generate_meal_plan(
    coach_service: web::Data<CoachService>,
    claims: web::ReqData<Claims>,
) -> Result<HttpResponse, AppError> {
    let meal_plan = coach_service.generate_meal_plan(claims.account_id()?).await?;
    Ok(HttpResponse::Ok().json(MealPlanResponse { meal_plan }))
}

#[tracing::instrument(
    name = "Swap meal request",
    skip(coach_service, claims, request),
    fields(user_id = %claims.sub)
)]
pub async fn swap_meal(
    coach_service: web::Data<CoachService>,
    claims: web::ReqData<Claims>,
    request: web::Json<SwapMealRequest>,
) -> Result<HttpResponse, AppError> {
    let current_meal = request.into_inner().current_meal.unwrap_or_default();
    let alternative = coach_service.swap_meal(claims.account_id()?, &current_meal).await?;
    Ok(HttpResponse::Ok().json(SwapMealResponse { alternative }))
}
