use actix_web::{web, HttpResponse};
use sqlx::PgPool;

use crate::db::accounts;
use crate::db::helpers::require_record;
use crate::errors::AppError;
use crate::middleware::auth::Claims;
use crate::models::game::WaterIntake;

#[tracing::instrument(name = "Get water intake", skip(pool, claims), fields(user_id = %claims.sub))]
pub async fn get_water_intake(
    pool: web::Data<PgPool>,
    claims: web::ReqData<Claims>,
) -> Result<HttpResponse, AppError> {
    let glasses = require_record(
        accounts::water_intake(pool.get_ref(), claims.account_id()?).await,
        "User not found",
    )?;
    Ok(HttpResponse::Ok().json(WaterIntake::new(glasses)))
}

#[tracing::instrument(name = "Add water glass", skip(pool, claims), fields(user_id = %claims.sub))]
pub async fn add_water_glass(
    pool: web::Data<PgPool>,
    claims: web::ReqData<Claims>,
) -> Result<HttpResponse, AppError> {
    let glasses = require_record(
        accounts::add_water_glass(pool.get_ref(), claims.account_id()?).await,
        "User not found",
    )?;
    Ok(HttpResponse::Ok().json(WaterIntake::new(glasses)))
}

#[tracing::instrument(name = "Reset water intake", skip(pool, claims), fields(user_id = %claims.sub))]
pub async fn reset_water_intake(
    pool: web::Data<PgPool>,
    claims: web::ReqData<Claims>,
) -> Result<HttpResponse, AppError> {
    if accounts::reset_water(pool.get_ref(), claims.account_id()?).await? == 0 {
        return Err(AppError::NotFound("User not found".to_string()));
    }
    Ok(HttpResponse::Ok().json(WaterIntake::new(0)))
}
