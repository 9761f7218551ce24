use actix_web::{get, post, web, HttpResponse};

use crate::errors::AppError;
use crate::handlers::coach::{conversation, generation};
use crate::middleware::auth::Claims;
use crate::models::coach::{ChatRequest, GenerateWorkoutRequest, SwapMealRequest};
use crate::services::CoachService;

#[post("/generate-workout")]
async fn generate_workout(
    coach_service: web::Data<CoachService>,
    claims: web::ReqData<Claims>,
    request: web::Json<GenerateWorkoutRequest>,
) -> Result<HttpResponse, AppError> {
    generation::generate_workout(coach_service, claims, request).await
}

#[post("/generate-meal")]
async fn generate_meal(
    coach_service: web::Data<CoachService>,
    claims: web::ReqData<Claims>,
) -> Result<HttpResponse, AppError> {
    generation::generate_meal_plan(coach_service, claims).await
}

#[post("/swap-meal")]
async fn swap_meal(
    coach_service: web::Data<CoachService>,
    claims: web::ReqData<Claims>,
    request: web::Json<SwapMealRequest>,
) -> Result<HttpResponse, AppError> {
    generation::swap_meal(coach_service, claims, request).await
}

#[post("/chat")]
async fn chat(
    coach_service: web::Data<CoachService>,
    claims: web::ReqData<Claims>,
    request: web::Json<ChatRequest>,
) -> Result<HttpResponse, AppError> {
    conversation::chat(coach_service, claims, request).await
}

#[get("/analysis")]
async fn analysis(
    coach_service: web::Data<CoachService>,
    claims: web::ReqData<Claims>,
) -> Result<HttpResponse, AppError> {
    conversation::health_analysis(coach_service, claims).await
}
