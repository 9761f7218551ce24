use actix_web::{web, HttpResponse};
use sqlx::PgPool;

use crate::db::achievements;
use crate::errors::AppError;
use crate::game::achievements::{badge_statuses, find_badge};
use crate::middleware::auth::Claims;
use crate::models::achievement::{UnlockRequest, UnlockResponse};

#[tracing::instrument(
    name = "Get achievements",
    skip(pool, claims),
    fields(user_id = %claims.sub)
)]
pub async fn get_achievements(
    pool: web::Data<PgPool>,
    claims: web::ReqData<Claims>,
) -> Result<HttpResponse, AppError> {
    let unlocked = achievements::list_unlocked(pool.get_ref(), claims.account_id()?).await?;
    Ok(HttpResponse::Ok().json(badge_statuses(unlocked)))
}

/// Unlocking a badge the account already holds is a no-op success.
#[tracing::instrument(
    name = "Unlock achievement",
    skip(pool, claims, request),
    fields(user_id = %claims.sub, badge_type = ?request.badge_type)
)]
pub async fn unlock_achievement(
    pool: web::Data<PgPool>,
    claims: web::ReqData<Claims>,
    request: web::Json<UnlockRequest>,
) -> Result<HttpResponse, AppError> {
    let badge_type = request
        .badge_type
        .as_deref()
        .ok_or_else(|| AppError::Validation("badge_type is required".to_string()))?;
    let badge = find_badge(badge_type)
        .ok_or_else(|| AppError::Validation(format!("Invalid badge type: {}", badge_type)))?;

    if achievements::unlock(pool.get_ref(), claims.account_id()?, badge).await? {
        tracing::info!("Badge {} unlocked", badge.badge_type);
    }

    Ok(HttpResponse::Ok().json(UnlockResponse {
        success: true,
        badge_type: badge.badge_type.to_string(),
        badge_name: badge.name.to_string(),
    }))
}
