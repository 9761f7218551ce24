use actix_web::{web, HttpResponse};
use serde_json::json;
use sqlx::PgPool;

use crate::db::accounts;
use crate::errors::AppError;
use crate::middleware::auth::Claims;
use crate::models::user::{FatigueUpdate, ProfileChanges, ProfileResponse, ProfileUpdate};
use crate::services::account_service::AccountService;

#[tracing::instrument(
    name = "Get user profile",
    skip(account_service, claims),
    fields(user_id = %claims.sub)
)]
pub async fn get_user_profile(
    account_service: web::Data<AccountService>,
    claims: web::ReqData<Claims>,
) -> Result<HttpResponse, AppError> {
    let account = account_service.profile(claims.account_id()?).await?;
    Ok(HttpResponse::Ok().json(ProfileResponse::from(account)))
}

#[tracing::instrument(
    name = "Update user profile",
    skip(account_service, claims, update),
    fields(user_id = %claims.sub)
)]
pub async fn update_user_profile(
    account_service: web::Data<AccountService>,
    claims: web::ReqData<Claims>,
    update: web::Json<ProfileUpdate>,
) -> Result<HttpResponse, AppError> {
    let changes = ProfileChanges::try_from(update.into_inner())?;
    let account = account_service.update_profile(claims.account_id()?, &changes).await?;

    tracing::info!("Profile updated");
    Ok(HttpResponse::Ok().json(ProfileResponse::from(account)))
}

#[tracing::instrument(
    name = "Update fatigue level",
    skip(pool, claims, update),
    fields(user_id = %claims.sub, fatigue_level = ?update.fatigue_level)
)]
pub async fn update_fatigue_level(
    pool: web::Data<PgPool>,
    claims: web::ReqData<Claims>,
    update: web::Json<FatigueUpdate>,
) -> Result<HttpResponse, AppError> {
    let level = update.fatigue_level;
    let updated = accounts::set_fatigue_level(pool.get_ref(), claims.account_id()?, level).await?;
    if updated == 0 {
        return Err(AppError::NotFound("User not found".to_string()));
    }

    Ok(HttpResponse::Ok().json(json!({ "fatigue_level": level })))
}
