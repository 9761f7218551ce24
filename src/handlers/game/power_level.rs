use actix_web::{web, HttpResponse};

use crate::errors::AppError;
use crate::middleware::auth::Claims;
use crate::models::game::{AddXpRequest, AddXpResponse};
use crate::services::progression_ledger::{checked_amount, ProgressionError, ProgressionLedger};

#[tracing::instrument(
    name = "Get power level",
    skip(ledger, claims),
    fields(user_id = %claims.sub)
)]
pub async fn get_power_level(
    ledger: web::Data<ProgressionLedger>,
    claims: web::ReqData<Claims>,
) -> Result<HttpResponse, AppError> {
    let power_level = ledger.progress(claims.account_id()?).await?;
    Ok(HttpResponse::Ok().json(power_level))
}

#[tracing::instrument(
    name = "Add XP",
    skip(ledger, claims, request),
    fields(user_id = %claims.sub, xp_amount = ?request.xp_amount)
)]
pub async fn add_xp(
    ledger: web::Data<ProgressionLedger>,
    claims: web::ReqData<Claims>,
    request: web::Json<AddXpRequest>,
) -> Result<HttpResponse, AppError> {
    let amount = request.xp_amount.ok_or(ProgressionError::InvalidAmount)?;
    let xp_added = checked_amount(amount)?;
    let reason = request.reason.as_deref().unwrap_or("unspecified");

    let award = ledger.award(claims.account_id()?, amount, reason).await?;

    Ok(HttpResponse::Ok().json(AddXpResponse {
        xp_added,
        total_xp: award.total_xp,
        power_level: award.power_level,
        title: award.title,
        leveled_up: award.leveled_up,
    }))
}
