use actix_web::{web, HttpResponse};
use sqlx::PgPool;

use crate::db::{accounts, weight_logs};
use crate::errors::AppError;
use crate::middleware::auth::Claims;
use crate::models::game::{LogWeightRequest, LogWeightResponse, MAX_WEIGHT_KG, MIN_WEIGHT_KG};

/// Logs a weigh-in and makes it the account's current weight.
#[tracing::instrument(
    name = "Log weight",
    skip(pool, claims, request),
    fields(user_id = %claims.sub, weight = ?request.weight)
)]
pub async fn log_weight(
    pool: web::Data<PgPool>,
    claims: web::ReqData<Claims>,
    request: web::Json<LogWeightRequest>,
) -> Result<HttpResponse, AppError> {
    let weight = match request.weight {
        Some(w) if w.is_finite() && (MIN_WEIGHT_KG..=MAX_WEIGHT_KG).contains(&w) => w,
        _ => {
            return Err(AppError::Validation(format!(
                "Invalid weight: must be between {} and {} kg",
                MIN_WEIGHT_KG, MAX_WEIGHT_KG
            )))
        }
    };
    let account_id = claims.account_id()?;

    let mut tx = pool.begin().await?;
    if accounts::set_weight(&mut *tx, account_id, weight).await? == 0 {
        return Err(AppError::NotFound("User not found".to_string()));
    }
    weight_logs::insert(&mut *tx, account_id, weight).await?;
    tx.commit().await?;

    Ok(HttpResponse::Ok().json(LogWeightResponse { success: true, weight }))
}

#[tracing::instrument(name = "Get weight history", skip(pool, claims), fields(user_id = %claims.sub))]
pub async fn get_weight_history(
    pool: web::Data<PgPool>,
    claims: web::ReqData<Claims>,
) -> Result<HttpResponse, AppError> {
    let history = weight_logs::history(pool.get_ref(), claims.account_id()?).await?;
    Ok(HttpResponse::Ok().json(history))
}
