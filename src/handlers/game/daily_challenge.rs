use actix_web::{web, HttpResponse};

use crate::errors::AppError;
use crate::middleware::auth::Claims;
use crate::services::daily_challenge::DailyChallengeService;

#[tracing::instrument(
    name = "Get daily challenge",
    skip(challenge_service, claims),
    fields(user_id = %claims.sub)
)]
pub async fn get_daily_challenge(
    challenge_service: web::Data<DailyChallengeService>,
    claims: web::ReqData<Claims>,
) -> Result<HttpResponse, AppError> {
    let challenge = challenge_service.today(claims.account_id()?).await?;
    Ok(HttpResponse::Ok().json(challenge))
}

#[tracing::instrument(
    name = "Complete daily challenge",
    skip(challenge_service, claims),
    fields(user_id = %claims.sub)
)]
pub async fn complete_daily_challenge(
    challenge_service: web::Data<DailyChallengeService>,
    claims: web::ReqData<Claims>,
) -> Result<HttpResponse, AppError> {
    let completion = challenge_service.complete_today(claims.account_id()?).await?;
    Ok(HttpResponse::Ok().json(completion))
}
