use actix_web::{web, HttpResponse};

use crate::errors::AppError;
use crate::middleware::auth::Claims;
use crate::models::coach::{AnalysisResponse, ChatRequest, ChatResponse};
use crate::services::coach_service::CoachService;

#[tracing::instrument(
    name = "Coach chat request",
    skip(coach_service, claims, request),
    fields(user_id = %claims.sub)
)]
pub async fn chat(
    coach_service: web::Data<CoachService>,
    claims: web::ReqData<Claims>,
    request: web::Json<ChatRequest>,
) -> Result<HttpResponse, AppError> {
    let message = request.into_inner().message.unwrap_or_default();
    let response = coach_service.chat(claims.account_id()?, &message).await?;
    Ok(HttpResponse::Ok().json(ChatResponse { response }))
}

#[tracing::instrument(
    name = "Health analysis request",
    skip(coach_service, claims),
    fields(user_id = %claims.sub)
)]
pub async fn health_analysis(
    coach_service: web::Data<CoachService>,
    claims: web::ReqData<Claims>,
) -> Result<HttpResponse, AppError> {
    let analysis = coach_service.health_analysis(claims.account_id()?).await?;
    Ok(HttpResponse::Ok().json(AnalysisResponse { analysis }))
}
